use std::sync::Arc;

use axum::extract::FromRef;

use crate::engine::ExamEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ExamEngine>,
}

impl FromRef<AppState> for Arc<ExamEngine> {
    fn from_ref(state: &AppState) -> Self {
        state.engine.clone()
    }
}
