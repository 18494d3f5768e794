use serde_json::{Value, json};

/// Public ranking for `tipo` (`acoes` or `fiis`); anything else yields an empty list.
pub fn ranking(tipo: Option<&str>) -> Value {
    match tipo.unwrap_or("acoes") {
        "fiis" => json!([
            { "posicao": 1, "ticker": "HGLG11", "dividend_yield": 8.7, "p_vp": 1.02 },
            { "posicao": 2, "ticker": "MXRF11", "dividend_yield": 12.1, "p_vp": 1.05 },
            { "posicao": 3, "ticker": "KNRI11", "dividend_yield": 7.9, "p_vp": 0.96 },
        ]),
        "acoes" => json!([
            { "posicao": 1, "ticker": "BBAS3", "dividend_yield": 9.4, "p_l": 4.1 },
            { "posicao": 2, "ticker": "ITSA4", "dividend_yield": 7.8, "p_l": 7.3 },
            { "posicao": 3, "ticker": "TAEE11", "dividend_yield": 10.2, "p_l": 8.9 },
        ]),
        _ => json!([]),
    }
}

pub fn quote(ticker: Option<&str>) -> Option<Value> {
    let (name, price, change) = match ticker? {
        "ITSA4" => ("Itaúsa PN", 10.45, 0.87),
        "BBAS3" => ("Banco do Brasil ON", 28.10, -0.35),
        "MXRF11" => ("Maxi Renda FII", 10.38, 0.10),
        "HGLG11" => ("CSHG Logística FII", 163.20, 0.42),
        _ => return None,
    };
    Some(json!({ "ticker": ticker, "nome": name, "preco": price, "variacao_pct": change }))
}

pub fn indices() -> Value {
    json!([
        { "nome": "IBOV", "valor": 127_850.12, "variacao_pct": 0.54 },
        { "nome": "IFIX", "valor": 3_390.40, "variacao_pct": 0.12 },
        { "nome": "CDI", "valor": 10.40, "variacao_pct": 0.0 },
    ])
}

pub fn search(query: Option<&str>) -> Value {
    let q = query.unwrap_or_default().to_ascii_uppercase();
    let hits: Vec<&str> = ["ITSA4", "BBAS3", "MXRF11", "HGLG11", "KNRI11", "TAEE11"]
        .into_iter()
        .filter(|t| !q.is_empty() && t.contains(q.as_str()))
        .collect();
    json!(hits)
}

pub fn news() -> Value {
    json!([
        { "titulo": "Copom mantém Selic", "fonte": "Agência", "data": "2024-05-08" },
        { "titulo": "FIIs logísticos renovam máximas", "fonte": "Agência", "data": "2024-05-10" },
    ])
}

pub fn dividend_yield(ticker: Option<&str>) -> Value {
    json!({
        "ticker": ticker.unwrap_or_default(),
        "historico": [
            { "ano": 2022, "dy": 8.1 },
            { "ano": 2023, "dy": 9.0 },
        ],
    })
}
