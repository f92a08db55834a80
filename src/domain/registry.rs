// ============================================================================
// In-Memory Basket Registry
// Composition source backed by locally held basket snapshots
// ============================================================================

use super::{BasketComposition, Component, QuoteError, QuoteResult, TokenId};
use crate::interfaces::BasketCompositionSource;
use num_bigint::BigInt;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Thread-safe registry of basket compositions.
///
/// Writers replace or edit compositions between quotes; `snapshot` clones
/// a composition under a single read lock so a quote never observes a
/// half-applied update.
#[derive(Default)]
pub struct InMemoryBasketRegistry {
    baskets: RwLock<HashMap<TokenId, BasketComposition>>,
}

impl InMemoryBasketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a basket composition
    pub fn register(&self, composition: BasketComposition) {
        tracing::debug!(
            basket = %composition.basket,
            components = composition.len(),
            "registered basket composition"
        );
        self.baskets
            .write()
            .insert(composition.basket.clone(), composition);
    }

    /// Set the per-unit quantity of a component, appending it if absent
    pub fn set_unit(&self, basket: &TokenId, token: &TokenId, unit: BigInt) -> QuoteResult<()> {
        let mut baskets = self.baskets.write();
        let composition = baskets
            .get_mut(basket)
            .ok_or_else(|| QuoteError::invalid_composition(basket, "unknown basket"))?;

        match composition.components.iter_mut().find(|c| &c.token == token) {
            Some(component) => component.unit = unit,
            None => composition.components.push(Component {
                token: token.clone(),
                unit,
            }),
        }
        Ok(())
    }

    pub fn remove(&self, basket: &TokenId) -> Option<BasketComposition> {
        self.baskets.write().remove(basket)
    }

    pub fn len(&self) -> usize {
        self.baskets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.baskets.read().is_empty()
    }
}

impl BasketCompositionSource for InMemoryBasketRegistry {
    fn components(&self, basket: &TokenId) -> QuoteResult<Vec<TokenId>> {
        self.baskets
            .read()
            .get(basket)
            .map(|c| c.tokens())
            .ok_or_else(|| QuoteError::invalid_composition(basket, "unknown basket"))
    }

    fn per_unit_quantity(&self, basket: &TokenId, component: &TokenId) -> QuoteResult<BigInt> {
        let baskets = self.baskets.read();
        let composition = baskets
            .get(basket)
            .ok_or_else(|| QuoteError::invalid_composition(basket, "unknown basket"))?;
        composition.unit_of(component).cloned().ok_or_else(|| {
            QuoteError::invalid_composition(basket, format!("{} is not a component", component))
        })
    }

    fn snapshot(&self, basket: &TokenId) -> QuoteResult<BasketComposition> {
        self.baskets
            .read()
            .get(basket)
            .cloned()
            .ok_or_else(|| QuoteError::invalid_composition(basket, "unknown basket"))
    }
}
