use serde_json::{Value, json};

pub fn overview() -> Value {
    json!({
        "mes": "2024-05",
        "total_entradas": 8500.00,
        "total_custos": 6120.35,
        "saldo": 2379.65,
    })
}

pub fn costs() -> Value {
    json!([
        { "id": 11, "descricao": "Aluguel", "valor": 2200.00, "categoria": "Moradia", "data": "2024-05-05" },
        { "id": 12, "descricao": "Mercado", "valor": 1340.20, "categoria": "Alimentação", "data": "2024-05-09" },
        { "id": 13, "descricao": "Internet", "valor": 119.90, "categoria": "Serviços", "data": "2024-05-10" },
    ])
}

pub fn income() -> Value {
    json!([
        { "id": 21, "descricao": "Salário", "valor": 8000.00, "data": "2024-05-01" },
        { "id": 22, "descricao": "Dividendos", "valor": 500.00, "data": "2024-05-15" },
    ])
}

pub fn categories() -> Value {
    json!(["Moradia", "Alimentação", "Serviços", "Transporte", "Lazer"])
}

pub fn percentages() -> Value {
    json!({ "Moradia": 35.9, "Alimentação": 21.9, "Serviços": 2.0, "Outros": 40.2 })
}

pub fn monthly() -> Value {
    json!([
        { "mes": "2024-03", "entradas": 8000.00, "custos": 6400.10 },
        { "mes": "2024-04", "entradas": 8200.00, "custos": 5980.75 },
        { "mes": "2024-05", "entradas": 8500.00, "custos": 6120.35 },
    ])
}

pub fn goals() -> Value {
    json!([{ "id": 1, "nome": "Reserva de emergência", "alvo": 30000.00, "atual": 18250.00 }])
}

pub fn created(body: Option<&Value>) -> Value {
    json!({ "id": 99, "criado": true, "dados": body.cloned().unwrap_or(Value::Null) })
}
