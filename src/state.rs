// src/state.rs
use std::sync::Arc;

use crate::services::assistants::Assistants;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub assistants: Arc<dyn Assistants>,
}

impl AppState {
    pub fn new(assistants: Arc<dyn Assistants>) -> Self {
        Self { assistants }
    }
}
