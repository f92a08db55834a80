// ============================================================================
// Basket Composition Source Interface
// Defines the contract for reading a basket token's components
// ============================================================================

use crate::domain::{BasketComposition, Component, QuoteResult, TokenId};
use num_bigint::BigInt;

/// Read-only view of basket token state (component list and per-unit holdings).
///
/// Implementations: on-chain readers, `InMemoryBasketRegistry`, test fixtures.
pub trait BasketCompositionSource: Send + Sync {
    /// Ordered component identifiers of `basket`
    fn components(&self, basket: &TokenId) -> QuoteResult<Vec<TokenId>>;

    /// Quantity of `component` held per one whole (10^18) unit of `basket`
    fn per_unit_quantity(&self, basket: &TokenId, component: &TokenId) -> QuoteResult<BigInt>;

    /// Fetch an immutable snapshot of the whole composition.
    ///
    /// The default implementation issues one `per_unit_quantity` call per
    /// component; sources that can read atomically should override it.
    fn snapshot(&self, basket: &TokenId) -> QuoteResult<BasketComposition> {
        let tokens = self.components(basket)?;
        let mut components = Vec::with_capacity(tokens.len());
        for token in tokens {
            let unit = self.per_unit_quantity(basket, &token)?;
            components.push(Component { token, unit });
        }
        Ok(BasketComposition::new(basket.clone(), components))
    }
}
