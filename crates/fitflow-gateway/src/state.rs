//! Shared handler state.

use fitflow_flows::CoachingFlows;
use fitflow_store::FitnessRepository;
use std::sync::Arc;

/// Long-lived clients shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Profile and note persistence.
    pub repository: FitnessRepository,

    /// Generation flows.
    pub flows: Arc<dyn CoachingFlows>,
}

impl AppState {
    /// Create handler state.
    pub fn new(repository: FitnessRepository, flows: Arc<dyn CoachingFlows>) -> Self {
        Self { repository, flows }
    }
}
