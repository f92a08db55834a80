// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod basket;
pub mod config;
pub mod errors;
pub mod quote;
pub mod registry;
pub mod token;

pub use basket::{BasketComposition, Component, ComponentList};
pub use config::{QuoterConfig, RouteSelection};
pub use errors::{QuoteError, QuoteResult};
pub use quote::{ComponentQuote, ExactOutputQuote, QuoteKind};
pub use registry::InMemoryBasketRegistry;
pub use token::{QuoteId, TokenId};
