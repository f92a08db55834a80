// ============================================================================
// Engine Module
// Contains the core exchange issuance quoting logic
// ============================================================================

mod quoter;

pub mod factory;

pub use factory::{create_from_config, BasketQuoterBuilder};
pub use quoter::BasketQuoter;
