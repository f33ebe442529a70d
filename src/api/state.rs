//! API server state

use std::sync::Arc;

use crate::repository::OrderRepository;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Order repository shared by all handlers
    pub repository: Arc<dyn OrderRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }
}
