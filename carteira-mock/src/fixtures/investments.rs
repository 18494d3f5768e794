use serde_json::{Value, json};

pub fn portfolio() -> Value {
    json!([
        { "ticker": "MXRF11", "tipo": "fii", "quantidade": 120, "preco_medio": 10.12 },
        { "ticker": "HGLG11", "tipo": "fii", "quantidade": 8, "preco_medio": 160.40 },
        { "ticker": "ITSA4", "tipo": "acao", "quantidade": 300, "preco_medio": 9.85 },
        { "ticker": "BBAS3", "tipo": "acao", "quantidade": 50, "preco_medio": 27.30 },
    ])
}

pub fn dividends() -> Value {
    json!([
        { "ticker": "MXRF11", "valor": 12.00, "data_pagamento": "2024-05-15" },
        { "ticker": "ITSA4", "valor": 6.60, "data_pagamento": "2024-04-01" },
    ])
}

pub fn history() -> Value {
    json!([
        { "ticker": "MXRF11", "operacao": "compra", "quantidade": 20, "preco": 10.30, "data": "2024-04-10" },
        { "ticker": "BBAS3", "operacao": "compra", "quantidade": 50, "preco": 27.30, "data": "2024-02-21" },
    ])
}

pub fn by_type(tipo: &str) -> Value {
    let rows: Vec<Value> = portfolio()
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter(|r| r.get("tipo").and_then(Value::as_str) == Some(tipo))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Value::Array(rows)
}

pub fn summary() -> Value {
    json!({
        "patrimonio": 11245.80,
        "investido": 10594.40,
        "rentabilidade_pct": 6.15,
        "alocacao": { "fii": 0.46, "acao": 0.54 },
    })
}
