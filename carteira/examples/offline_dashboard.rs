use carteira::{Dispatcher, RequestDescriptor, keys};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,carteira=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // Fixture data only; set CARTEIRA_USE_MOCK=0 and CARTEIRA_API_URL to hit a real backend.
    let mut cfg = carteira::DispatchConfig::from_env()?;
    if std::env::var_os("CARTEIRA_USE_MOCK").is_none() {
        cfg.use_mock = true;
    }
    let dispatcher = Dispatcher::builder().config(cfg).build()?;

    let health = dispatcher.get(RequestDescriptor::new(keys::HEALTH)).await;
    println!("health: {:?}", health.into_data());

    if !dispatcher.login("investidor", "senha").await {
        eprintln!("login rejected");
        return Ok(());
    }
    println!("user: {:?}", dispatcher.get_user_data().await);

    let overview = dispatcher
        .get(RequestDescriptor::new(keys::BUDGET_OVERVIEW).with_auth(true))
        .await;
    println!("budget overview ({}): {:?}", overview.status, overview.data);

    for tipo in ["acoes", "fiis"] {
        println!("ranking {tipo}: {:?}", dispatcher.get_ranking(tipo).await);
    }

    let unknown = dispatcher
        .get(RequestDescriptor::new(carteira::RequestKey::new("budgetOverveiw")))
        .await;
    println!("typo'd key -> {} {:?}", unknown.status, unknown.message);

    dispatcher.logout().await?;
    Ok(())
}
