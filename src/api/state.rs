//! Application state for the payroll API.

use std::sync::Arc;

use crate::repository::InMemoryRepository;
use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service every handler runs against.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService<InMemoryRepository>>,
}

impl AppState {
    /// Creates application state over the given repository.
    pub fn new(repository: InMemoryRepository) -> Self {
        Self {
            service: Arc::new(PayrollService::new(repository)),
        }
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService<InMemoryRepository> {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SchoolRepository;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_repository() {
        let state = AppState::new(InMemoryRepository::new());
        let clone = state.clone();
        assert!(clone.service().repository().get_school("sch_001").is_err());
        assert!(std::ptr::eq(state.service(), clone.service()));
    }
}
