use std::sync::Arc;

use crate::services::ChatSummaryService;

#[derive(Clone)]
pub struct AppContext {
    pub summary: Arc<dyn ChatSummaryService>,
}

impl AppContext {
    pub fn new(summary: Arc<dyn ChatSummaryService>) -> Self {
        Self { summary }
    }
}
