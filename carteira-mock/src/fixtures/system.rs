use serde_json::{Value, json};

pub fn health() -> Value {
    json!({ "status": "ok", "database": "ok" })
}

pub fn version() -> Value {
    json!({ "version": "mock", "api": "v1" })
}

pub fn settings() -> Value {
    json!({ "tema": "escuro", "moeda": "BRL", "notificacoes": true })
}

pub fn notifications() -> Value {
    json!([{ "id": 1, "mensagem": "Dividendos de MXRF11 creditados", "lida": false }])
}
