use std::sync::Arc;

use tokio::sync::RwLock;

use crate::queue::QueueManager;

/// Shared handle to the single waiting line.
///
/// Structural operations and the position-renumbering side effect of
/// listing go through the write lock, so position numbers are never
/// observed half-updated.
#[derive(Clone, Default)]
pub struct AppState {
    pub queue: Arc<RwLock<QueueManager>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
