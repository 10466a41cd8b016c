use std::sync::Arc;

use crate::backend::Backend;

/// Shared handler state. The backend is the only cross-request resource;
/// everything else is request-scoped.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}
