// ============================================================================
// Exchange Issuance Library
// Off-chain quoting of basket token issuance and redemption through AMMs
// ============================================================================

//! # Exchange Issuance
//!
//! Predicts the outcome of minting or redeeming a basket token (a token
//! backed by fixed per-unit quantities of several component tokens) by
//! swapping through automated market makers.
//!
//! ## Features
//!
//! - **Exact on-chain arithmetic** on `BigInt` with 18-decimal precise math
//! - **Pluggable data sources** for basket composition and exchange quotes
//! - **Constant-product pools** with Uniswap V2 rounding and best-price routing
//! - **Quote events** for audit trail and diagnostics
//!
//! ## Example
//!
//! ```rust
//! use exchange_issuance::prelude::*;
//! use exchange_issuance::numeric::{ether, units};
//! use std::sync::Arc;
//!
//! // Basket: 1 set = 50 DAI + 0.0001 WBTC
//! let registry = Arc::new(InMemoryBasketRegistry::new());
//! registry.register(BasketComposition::new(
//!     "dpi",
//!     [
//!         Component::new("dai", ether(50)),
//!         Component::new("wbtc", units(1, 4)),
//!     ],
//! ));
//!
//! let uniswap = Arc::new(ConstantProductExchange::uniswap_v2("uniswap"));
//! uniswap.add_liquidity(&"weth".into(), ether(10), &"dai".into(), ether(100_000)).unwrap();
//! uniswap.add_liquidity(&"weth".into(), ether(100), &"wbtc".into(), units(1, 8)).unwrap();
//!
//! let quoter = BasketQuoterBuilder::new("weth", "dpi")
//!     .with_composition_source(registry)
//!     .with_exchange(uniswap)
//!     .build()
//!     .unwrap();
//!
//! let minted = quoter.issue_for_exact_input(&ether(1)).unwrap();
//! let cost = quoter.issue_exact_output_for_eth(&minted).unwrap();
//! assert!(cost <= ether(1));
//! ```

pub mod domain;
pub mod engine;
pub mod exchange;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        BasketComposition, Component, ComponentQuote, ExactOutputQuote, InMemoryBasketRegistry,
        QuoteError, QuoteId, QuoteKind, QuoteResult, QuoterConfig, RouteSelection, TokenId,
    };
    pub use crate::engine::{create_from_config, BasketQuoter, BasketQuoterBuilder};
    pub use crate::exchange::{BestPriceExchange, ConstantProductExchange};
    pub use crate::interfaces::{
        BasketCompositionSource, ExchangeQuoteSource, LoggingQuoteObserver, NoOpQuoteObserver,
        QuoteEvent, QuoteObserver, RecordingQuoteObserver,
    };
    pub use crate::numeric::{Amount, NumericError};
}
