// ============================================================================
// Quoter Configuration
// Base currency, target basket and composition policy of a quoter
// ============================================================================

use super::TokenId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical wrapped ether on Ethereum mainnet.
pub const MAINNET_WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

// ============================================================================
// Route Selection
// ============================================================================

/// How quotes are routed when more than one exchange is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RouteSelection {
    /// Use the first configured exchange only
    FirstExchange,

    /// Ask every exchange and take the most favourable quote
    /// (largest output for exact input, smallest input for exact output)
    BestPrice,
}

// ============================================================================
// Complete Quoter Configuration
// ============================================================================

/// Configuration for creating a basket quoter
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuoterConfig {
    /// Base currency every component is priced against (e.g. WETH)
    pub base_token: TokenId,

    /// The basket token being issued or redeemed
    pub basket: TokenId,

    /// Routing policy across exchanges
    pub route_selection: RouteSelection,

    /// Reject zero per-unit quantities instead of skipping those components
    pub strict_units: bool,

    /// Optional: Maximum number of components a basket may hold
    /// None means unlimited
    pub max_components: Option<usize>,
}

impl QuoterConfig {
    /// Create a new configuration with required parameters
    pub fn new(base_token: impl Into<TokenId>, basket: impl Into<TokenId>) -> Self {
        Self {
            base_token: base_token.into(),
            basket: basket.into(),
            route_selection: RouteSelection::BestPrice,
            strict_units: false,
            max_components: None,
        }
    }

    /// Builder method: Set routing policy
    pub fn with_route_selection(mut self, route_selection: RouteSelection) -> Self {
        self.route_selection = route_selection;
        self
    }

    /// Builder method: Treat zero per-unit quantities as invalid
    pub fn with_strict_units(mut self, strict: bool) -> Self {
        self.strict_units = strict;
        self
    }

    /// Builder method: Limit basket size
    pub fn with_max_components(mut self, max: usize) -> Self {
        self.max_components = Some(max);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_token.is_empty() {
            return Err("Base token cannot be empty".to_string());
        }

        if self.basket.is_empty() {
            return Err("Basket token cannot be empty".to_string());
        }

        if self.basket == self.base_token {
            return Err("Basket token cannot be its own base currency".to_string());
        }

        if let Some(0) = self.max_components {
            return Err("Maximum component count must be positive".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl QuoterConfig {
    /// Mainnet basket priced in WETH with best-price routing
    pub fn mainnet_weth(basket: impl Into<TokenId>) -> Self {
        Self::new(MAINNET_WETH, basket)
    }

    /// Single exchange, strict composition checks (test fixtures)
    pub fn strict_single_exchange(
        base_token: impl Into<TokenId>,
        basket: impl Into<TokenId>,
    ) -> Self {
        Self::new(base_token, basket)
            .with_route_selection(RouteSelection::FirstExchange)
            .with_strict_units(true)
    }
}
