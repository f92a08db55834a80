// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod composition_source;
mod quote_observer;
mod quote_source;

pub use composition_source::BasketCompositionSource;
pub use quote_observer::{
    LoggingQuoteObserver, NoOpQuoteObserver, QuoteEvent, QuoteObserver, RecordingQuoteObserver,
};
pub use quote_source::ExchangeQuoteSource;
