use carteira_core::{RequestDescriptor, RequestKey, keys};
use serde_json::Value;

use crate::Dispatcher;

impl Dispatcher {
    /// Public asset ranking for `tipo` (e.g. `"acoes"`, `"fiis"`), or `None` on failure.
    pub async fn get_ranking(&self, tipo: &str) -> Option<Value> {
        self.get_ranking_with_key(tipo, keys::RANKING_PUBLIC).await
    }

    /// [`get_ranking`](Self::get_ranking) under a custom request key.
    pub async fn get_ranking_with_key(
        &self,
        tipo: &str,
        key: impl Into<RequestKey>,
    ) -> Option<Value> {
        self.get(RequestDescriptor::new(key).with_param("tipo", tipo))
            .await
            .into_data()
    }
}
