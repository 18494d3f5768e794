//! Network-free transports for carteira.
//!
//! [`FixtureTransport`] serves deterministic data for every standard endpoint and backs
//! the mock-data toggle. [`DynamicMockTransport`] is scripted per test.
use async_trait::async_trait;
use carteira_core::{HttpMethod, RawResponse, ResolvedRequest, Transport, TransportError};
use serde_json::{Value, json};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockTransport, MockBehavior};
pub use fixtures::auth::{ACCESS_TOKEN, REFRESH_TOKEN, REFRESHED_ACCESS_TOKEN};

/// Canonical reason phrase for the statuses the mocks produce.
#[must_use]
pub const fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// JSON response with the canonical reason phrase for `status`.
#[must_use]
pub fn json_response(status: u16, body: &Value) -> RawResponse {
    RawResponse::json(status, reason_phrase(status), body)
}

/// Mock transport for offline mode and CI-safe demos.
///
/// Provides deterministic data from static fixtures.
///
/// Private endpoints answer `401` unless an `Authorization` header is present; the token
/// value itself is not checked. A login with username `FAIL` is rejected.
pub struct FixtureTransport;

impl Default for FixtureTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureTransport {
    /// Fixture transport; it holds no state.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn query_param(url: &str, name: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        parsed
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    fn route(req: &ResolvedRequest) -> (u16, Value) {
        use crate::fixtures::{auth, budget, crypto, investments, market, system};

        let body = req.body.as_ref();
        let param = |name: &str| Self::query_param(&req.url, name);
        let ok = |v: Value| -> (u16, Value) { (200, v) };

        match (req.method, req.endpoint.as_str()) {
            (HttpMethod::Post, "/api/auth/login/") => auth::login(body),
            (HttpMethod::Post, "/api/auth/register/") => auth::register(body),
            (HttpMethod::Post, "/api/auth/token/refresh/") => auth::refresh(body),
            (HttpMethod::Post, "/api/auth/token/verify/") => ok(json!({})),
            (HttpMethod::Post, "/api/auth/logout/") => ok(json!({ "detail": "Logout realizado" })),
            (HttpMethod::Get, "/api/auth/user/") => ok(auth::user()),

            (HttpMethod::Get, "/api/budget/overview/") => ok(budget::overview()),
            (HttpMethod::Get, "/api/budget/custos/") => ok(budget::costs()),
            (HttpMethod::Get, "/api/budget/entradas/") => ok(budget::income()),
            (HttpMethod::Get, "/api/budget/categorias/") => ok(budget::categories()),
            (HttpMethod::Get, "/api/budget/porcentagens/") => ok(budget::percentages()),
            (HttpMethod::Get, "/api/budget/mensal/") => ok(budget::monthly()),
            (HttpMethod::Get, "/api/budget/metas/") => ok(budget::goals()),
            (
                HttpMethod::Post,
                "/api/budget/custos/adicionar/" | "/api/budget/entradas/adicionar/",
            ) => (201, budget::created(body)),

            (HttpMethod::Get, "/api/investimentos/carteira/") => ok(investments::portfolio()),
            (HttpMethod::Get, "/api/investimentos/dividendos/") => ok(investments::dividends()),
            (HttpMethod::Get, "/api/investimentos/historico/") => ok(investments::history()),
            (HttpMethod::Get, "/api/investimentos/fiis/") => ok(investments::by_type("fii")),
            (HttpMethod::Get, "/api/investimentos/acoes/") => ok(investments::by_type("acao")),
            (HttpMethod::Get, "/api/investimentos/resumo/") => ok(investments::summary()),

            (HttpMethod::Get, "/api/ranking/" | "/api/ranking/privado/") => {
                ok(market::ranking(param("tipo").as_deref()))
            }
            (HttpMethod::Get, "/api/mercado/cotacao/") => {
                match market::quote(param("ticker").as_deref()) {
                    Some(q) => ok(q),
                    None => (404, json!({ "detail": "Ticker não encontrado" })),
                }
            }
            (HttpMethod::Get, "/api/mercado/busca/") => ok(market::search(param("q").as_deref())),
            (HttpMethod::Get, "/api/mercado/indices/") => ok(market::indices()),
            (HttpMethod::Get, "/api/mercado/noticias/") => ok(market::news()),
            (HttpMethod::Get, "/api/mercado/dividend-yield/") => {
                ok(market::dividend_yield(param("ticker").as_deref()))
            }

            (HttpMethod::Get, "/api/cripto/precos/") => ok(crypto::prices()),
            (HttpMethod::Get, "/api/cripto/carteira/") => ok(crypto::portfolio()),
            (HttpMethod::Get, "/api/cripto/historico/") => ok(crypto::history()),

            (HttpMethod::Get, "/api/system/health/") => ok(system::health()),
            (HttpMethod::Get, "/api/system/version/") => ok(system::version()),
            (HttpMethod::Get, "/api/system/config/") => ok(system::settings()),
            (HttpMethod::Get, "/api/system/notificacoes/") => ok(system::notifications()),
            (HttpMethod::Post, "/api/system/feedback/") => (201, json!({ "recebido": true })),

            _ => (404, json!({ "detail": "Not found." })),
        }
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    fn name(&self) -> &'static str {
        "carteira-mock"
    }

    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse, TransportError> {
        let private = request.headers.get("X-Request-Source") == Some("private");
        if private && !request.headers.contains("Authorization") {
            return Ok(json_response(
                401,
                &json!({ "detail": "Authentication credentials were not provided." }),
            ));
        }
        let (status, body) = Self::route(request);
        Ok(json_response(status, &body))
    }
}
