use carteira_core::{RequestDescriptor, RequestKey, keys};
use serde_json::{Value, json};

use crate::Dispatcher;

impl Dispatcher {
    /// Log in with username and password.
    ///
    /// Returns true iff the backend answered 2xx. The `access` (or `token`) and
    /// `refresh` fields of the response are written to the token store.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        self.login_with_key(username, password, keys::LOGIN).await
    }

    /// [`login`](Self::login) under a custom request key.
    pub async fn login_with_key(
        &self,
        username: &str,
        password: &str,
        key: impl Into<RequestKey>,
    ) -> bool {
        let env = self
            .post(
                RequestDescriptor::new(key)
                    .with_body(json!({ "username": username, "password": password })),
            )
            .await;
        if !env.success {
            return false;
        }
        if let Some(data) = &env.data {
            self.store_session(data);
        }
        true
    }

    /// Create an account. Returns true iff the backend answered 2xx.
    pub async fn register(&self, user_data: Value) -> bool {
        self.register_with_key(user_data, keys::REGISTER).await
    }

    /// [`register`](Self::register) under a custom request key.
    pub async fn register_with_key(&self, user_data: Value, key: impl Into<RequestKey>) -> bool {
        self.post(RequestDescriptor::new(key).with_body(user_data))
            .await
            .success
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// On success the returned `access` token replaces the stored one and the response
    /// data is returned; any failure yields `None`.
    pub async fn refresh_token_api(&self, refresh_token: &str) -> Option<Value> {
        self.refresh_token_api_with_key(refresh_token, keys::REFRESH_TOKEN)
            .await
    }

    /// [`refresh_token_api`](Self::refresh_token_api) under a custom request key.
    pub async fn refresh_token_api_with_key(
        &self,
        refresh_token: &str,
        key: impl Into<RequestKey>,
    ) -> Option<Value> {
        let data = self
            .post(RequestDescriptor::new(key).with_body(json!({ "refresh": refresh_token })))
            .await
            .into_data()?;
        self.store_session(&data);
        Some(data)
    }

    /// End the session.
    ///
    /// Sends a best-effort `POST` to the logout endpoint when a token is held, then
    /// clears the token store and the response cache whatever the backend answered.
    ///
    /// # Errors
    /// Returns `Storage` if the cleared session cannot be persisted.
    pub async fn logout(&self) -> Result<(), carteira_core::CarteiraError> {
        if self.tokens.get_auth_token().is_some() {
            let env = self
                .post(RequestDescriptor::new(keys::LOGOUT).with_auth(true))
                .await;
            if !env.success {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "carteira::session", status = env.status, "logout not acknowledged");
            }
        }
        self.invalidate_cache();
        self.tokens.clear()
    }

    fn store_session(&self, data: &Value) {
        let access = data
            .get("access")
            .or_else(|| data.get("token"))
            .and_then(Value::as_str);
        if let Some(token) = access
            && let Err(_e) = self.tokens.set_auth_token(token)
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "carteira::session", error = %_e, "failed to store access token");
        }
        if let Some(refresh) = data.get("refresh").and_then(Value::as_str)
            && let Err(_e) = self.tokens.set_refresh_token(refresh)
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "carteira::session", error = %_e, "failed to store refresh token");
        }
    }
}
