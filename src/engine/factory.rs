// ============================================================================
// Quoter Factory
// Creates basket quoters with proper configuration
// ============================================================================

use crate::domain::config::{QuoterConfig, RouteSelection};
use crate::domain::TokenId;
use crate::engine::BasketQuoter;
use crate::exchange::BestPriceExchange;
use crate::interfaces::{
    BasketCompositionSource, ExchangeQuoteSource, NoOpQuoteObserver, QuoteObserver,
};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a basket quoter from configuration
///
/// # Arguments
/// * `config` - Quoter configuration
/// * `composition` - Source of the basket's components and units
/// * `exchanges` - Exchanges to price components on, in priority order
/// * `observer` - Observer for quote events
///
/// # Returns
/// * `Result<BasketQuoter, String>` - Configured quoter or error
///
/// # Example
/// ```
/// use exchange_issuance::prelude::*;
/// use exchange_issuance::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let registry = Arc::new(InMemoryBasketRegistry::new());
/// let uniswap = Arc::new(ConstantProductExchange::uniswap_v2("uniswap"));
/// let quoter = create_from_config(
///     QuoterConfig::new("weth", "dpi"),
///     registry,
///     vec![uniswap],
///     Arc::new(NoOpQuoteObserver),
/// )
/// .unwrap();
/// assert_eq!(quoter.exchange_name(), "uniswap");
/// ```
pub fn create_from_config(
    config: QuoterConfig,
    composition: Arc<dyn BasketCompositionSource>,
    exchanges: Vec<Arc<dyn ExchangeQuoteSource>>,
    observer: Arc<dyn QuoteObserver>,
) -> Result<BasketQuoter, String> {
    config.validate()?;

    let exchange = select_route(config.route_selection, exchanges)?;
    tracing::debug!(
        basket = %config.basket,
        base = %config.base_token,
        exchange = exchange.name(),
        "created basket quoter"
    );

    Ok(BasketQuoter::new(config, composition, exchange, observer))
}

/// Resolves the exchange set into the single quote source the quoter prices against
fn select_route(
    route_selection: RouteSelection,
    mut exchanges: Vec<Arc<dyn ExchangeQuoteSource>>,
) -> Result<Arc<dyn ExchangeQuoteSource>, String> {
    if exchanges.is_empty() {
        return Err("At least one exchange is required".to_string());
    }

    match route_selection {
        RouteSelection::FirstExchange => Ok(exchanges.swap_remove(0)),
        RouteSelection::BestPrice if exchanges.len() == 1 => Ok(exchanges.swap_remove(0)),
        RouteSelection::BestPrice => Ok(Arc::new(BestPriceExchange::new(exchanges))),
    }
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating basket quoters with fluent API
///
/// # Example
/// ```
/// use exchange_issuance::prelude::*;
/// use exchange_issuance::engine::factory::BasketQuoterBuilder;
/// use std::sync::Arc;
///
/// let quoter = BasketQuoterBuilder::new("weth", "dpi")
///     .with_composition_source(Arc::new(InMemoryBasketRegistry::new()))
///     .with_exchange(Arc::new(ConstantProductExchange::uniswap_v2("uniswap")))
///     .with_exchange(Arc::new(ConstantProductExchange::uniswap_v2("sushiswap")))
///     .best_price_routing()
///     .build()
///     .unwrap();
///
/// assert_eq!(quoter.exchange_name(), "uniswap|sushiswap");
/// ```
pub struct BasketQuoterBuilder {
    config: QuoterConfig,
    composition: Option<Arc<dyn BasketCompositionSource>>,
    exchanges: Vec<Arc<dyn ExchangeQuoteSource>>,
    observer: Arc<dyn QuoteObserver>,
}

impl BasketQuoterBuilder {
    /// Create a new builder for `basket` priced in `base_token`
    pub fn new(base_token: impl Into<TokenId>, basket: impl Into<TokenId>) -> Self {
        Self::from_config(QuoterConfig::new(base_token, basket))
    }

    /// Start from an existing configuration
    pub fn from_config(config: QuoterConfig) -> Self {
        Self {
            config,
            composition: None,
            exchanges: Vec::new(),
            observer: Arc::new(NoOpQuoteObserver),
        }
    }

    // ========================================================================
    // Data Sources
    // ========================================================================

    pub fn with_composition_source(mut self, source: Arc<dyn BasketCompositionSource>) -> Self {
        self.composition = Some(source);
        self
    }

    /// Add an exchange; earlier exchanges take priority under first-exchange routing
    pub fn with_exchange(mut self, exchange: Arc<dyn ExchangeQuoteSource>) -> Self {
        self.exchanges.push(exchange);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn QuoteObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ========================================================================
    // Routing and Composition Policy
    // ========================================================================

    /// Price on the first configured exchange only
    pub fn first_exchange_routing(mut self) -> Self {
        self.config.route_selection = RouteSelection::FirstExchange;
        self
    }

    /// Price on every configured exchange and keep the best quote (default)
    pub fn best_price_routing(mut self) -> Self {
        self.config.route_selection = RouteSelection::BestPrice;
        self
    }

    /// Reject baskets holding zero per-unit quantities
    pub fn strict_units(mut self) -> Self {
        self.config.strict_units = true;
        self
    }

    pub fn with_max_components(mut self, max: usize) -> Self {
        self.config.max_components = Some(max);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the quoter
    pub fn build(self) -> Result<BasketQuoter, String> {
        let composition = self
            .composition
            .ok_or_else(|| "A basket composition source is required".to_string())?;
        create_from_config(self.config, composition, self.exchanges, self.observer)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &QuoterConfig {
        &self.config
    }
}
