use carteira_core::{RequestDescriptor, RequestKey, keys};
use serde_json::Value;

use crate::Dispatcher;

impl Dispatcher {
    /// Profile of the logged-in user, or `None` on any failure.
    ///
    /// A `401` means the stored session is no longer valid; the token store is cleared.
    pub async fn get_user_data(&self) -> Option<Value> {
        self.get_user_data_with_key(keys::USER).await
    }

    /// [`get_user_data`](Self::get_user_data) under a custom request key.
    pub async fn get_user_data_with_key(&self, key: impl Into<RequestKey>) -> Option<Value> {
        let env = self.get(RequestDescriptor::new(key).with_auth(true)).await;
        if env.status == 401 {
            #[cfg(feature = "tracing")]
            tracing::info!(target: "carteira::session", "session rejected by backend, clearing tokens");
            if let Err(_e) = self.tokens.clear() {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "carteira::session", error = %_e, "failed to clear session");
            }
        }
        env.into_data()
    }
}
