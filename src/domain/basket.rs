// ============================================================================
// Basket Composition
// Snapshot of a basket token's components and per-unit quantities
// ============================================================================

use super::TokenId;
use num_bigint::BigInt;
use num_traits::Zero;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Baskets rarely hold more than a handful of components.
pub type ComponentList = SmallVec<[Component; 8]>;

/// One component of a basket and the quantity held per 1.0 (10^18) basket token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    pub token: TokenId,
    /// Raw component units per whole basket unit
    pub unit: BigInt,
}

impl Component {
    pub fn new(token: impl Into<TokenId>, unit: BigInt) -> Self {
        Self {
            token: token.into(),
            unit,
        }
    }

    /// A zero unit contributes nothing to issuance or redemption.
    #[inline]
    pub fn is_empty_position(&self) -> bool {
        self.unit.is_zero()
    }
}

/// Immutable, ordered composition of a basket token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasketComposition {
    pub basket: TokenId,
    pub components: ComponentList,
}

impl BasketComposition {
    pub fn new(basket: impl Into<TokenId>, components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            basket: basket.into(),
            components: components.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Per-unit quantity of `token`, if it is a component.
    pub fn unit_of(&self, token: &TokenId) -> Option<&BigInt> {
        self.components
            .iter()
            .find(|c| &c.token == token)
            .map(|c| &c.unit)
    }

    /// Components with a non-zero per-unit quantity, in composition order.
    pub fn active_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| !c.is_empty_position())
    }

    pub fn tokens(&self) -> Vec<TokenId> {
        self.components.iter().map(|c| c.token.clone()).collect()
    }
}
