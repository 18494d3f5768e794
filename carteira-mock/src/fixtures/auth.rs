use serde_json::{Value, json};

pub const ACCESS_TOKEN: &str = "mock-access-token";
pub const REFRESH_TOKEN: &str = "mock-refresh-token";
pub const REFRESHED_ACCESS_TOKEN: &str = "mock-access-token-2";

pub fn user() -> Value {
    json!({
        "id": 1,
        "username": "investidor",
        "email": "investidor@example.com",
        "first_name": "Ana",
        "last_name": "Souza",
        "date_joined": "2024-01-15T10:00:00Z",
    })
}

/// Login succeeds for any non-empty username except `FAIL`.
pub fn login(body: Option<&Value>) -> (u16, Value) {
    let username = body
        .and_then(|b| b.get("username"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    match username {
        "" => (400, json!({ "username": ["This field is required."] })),
        "FAIL" => (
            401,
            json!({ "detail": "No active account found with the given credentials" }),
        ),
        _ => (
            200,
            json!({ "access": ACCESS_TOKEN, "refresh": REFRESH_TOKEN, "user": user() }),
        ),
    }
}

pub fn register(body: Option<&Value>) -> (u16, Value) {
    let username = body
        .and_then(|b| b.get("username"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if username.is_empty() {
        return (400, json!({ "username": ["This field is required."] }));
    }
    (
        201,
        json!({ "id": 2, "username": username, "message": "Usuário criado com sucesso" }),
    )
}

pub fn refresh(body: Option<&Value>) -> (u16, Value) {
    match body.and_then(|b| b.get("refresh")).and_then(Value::as_str) {
        Some(REFRESH_TOKEN) => (200, json!({ "access": REFRESHED_ACCESS_TOKEN })),
        _ => (
            401,
            json!({ "detail": "Token is invalid or expired", "code": "token_not_valid" }),
        ),
    }
}
