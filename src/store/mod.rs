//! Deduplicated session-state store: identity, search, storage.

pub mod criteria;
pub mod manager;
pub mod state;

pub use criteria::SearchCriteria;
pub use manager::StateStore;
pub use state::SessionState;
