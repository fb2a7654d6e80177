use std::sync::Arc;

use jot_auth::TokenService;
use jot_store::Store;

/// Shared handles every handler can reach through `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Store, tokens: TokenService) -> Self {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
        }
    }
}
