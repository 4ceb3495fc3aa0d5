use std::sync::Arc;

use crate::pipeline::Pipeline;

/// Shared, read-only request context
#[derive(Clone, Default)]
pub struct AppState {
    pub pipeline: Option<Arc<Pipeline>>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Some(Arc::new(pipeline)),
        }
    }

    /// State with no artifacts loaded; only probes and indicators are served
    pub fn unloaded() -> Self {
        Self { pipeline: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.pipeline.is_some()
    }
}
