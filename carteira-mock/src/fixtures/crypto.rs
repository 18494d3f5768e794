use serde_json::{Value, json};

pub fn prices() -> Value {
    json!({
        "BTC": { "brl": 345_000.00, "usd": 65_000.00 },
        "ETH": { "brl": 16_800.00, "usd": 3_150.00 },
        "SOL": { "brl": 780.00, "usd": 146.00 },
    })
}

pub fn portfolio() -> Value {
    json!([
        { "moeda": "BTC", "quantidade": 0.015, "preco_medio_brl": 300_000.00 },
        { "moeda": "ETH", "quantidade": 0.4, "preco_medio_brl": 14_500.00 },
    ])
}

pub fn history() -> Value {
    json!([
        { "data": "2024-03-31", "valor_brl": 10_420.00 },
        { "data": "2024-04-30", "valor_brl": 10_980.00 },
        { "data": "2024-05-31", "valor_brl": 11_895.00 },
    ])
}
