// ============================================================================
// Basket Quoter
// Predicts exchange issuance and redemption outcomes for a basket token
// ============================================================================

use crate::domain::{
    BasketComposition, Component, ComponentQuote, ExactOutputQuote, QuoteError, QuoteId,
    QuoteKind, QuoteResult, QuoterConfig, TokenId,
};
use crate::interfaces::{BasketCompositionSource, ExchangeQuoteSource, QuoteEvent, QuoteObserver};
use crate::numeric::{min, mul_div, precise_div, precise_mul};
use chrono::Utc;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::sync::Arc;

/// Events collected while one quote is computed
struct QuoteContext {
    quote_id: QuoteId,
    events: Vec<QuoteEvent>,
}

impl QuoteContext {
    fn component(&mut self, component: &TokenId, base_amount: &BigInt, component_amount: &BigInt) {
        tracing::trace!(
            %component,
            %base_amount,
            %component_amount,
            "component quoted"
        );
        self.events.push(QuoteEvent::ComponentQuoted {
            quote_id: self.quote_id,
            quote: ComponentQuote {
                component: component.clone(),
                base_amount: base_amount.clone(),
                component_amount: component_amount.clone(),
            },
            timestamp: Utc::now(),
        });
    }
}

fn ensure_positive(amount: &BigInt, operation: &'static str) -> QuoteResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(QuoteError::ZeroAmount { operation })
    }
}

/// Off-chain predictor for exchange issuance of one basket token.
///
/// Every quote fetches a fresh composition snapshot, then prices each
/// component against the exchange. Quotes are pure: the quoter holds no
/// mutable state and may be shared across threads.
pub struct BasketQuoter {
    config: QuoterConfig,
    composition: Arc<dyn BasketCompositionSource>,
    exchange: Arc<dyn ExchangeQuoteSource>,
    observer: Arc<dyn QuoteObserver>,
}

impl BasketQuoter {
    /// Create a new quoter
    pub fn new(
        config: QuoterConfig,
        composition: Arc<dyn BasketCompositionSource>,
        exchange: Arc<dyn ExchangeQuoteSource>,
        observer: Arc<dyn QuoteObserver>,
    ) -> Self {
        Self {
            config,
            composition,
            exchange,
            observer,
        }
    }

    pub fn config(&self) -> &QuoterConfig {
        &self.config
    }

    pub fn base_token(&self) -> &TokenId {
        &self.config.base_token
    }

    pub fn basket(&self) -> &TokenId {
        &self.config.basket
    }

    /// Name of the exchange (or exchange set) quotes are priced on
    pub fn exchange_name(&self) -> &str {
        self.exchange.name()
    }

    // ========================================================================
    // Issuance
    // ========================================================================

    /// Maximum basket amount mintable for exactly `base_in` of the base currency.
    ///
    /// The input is split across components in proportion to what one basket
    /// unit of each costs; the result is the smallest basket amount any
    /// component's share can back.
    pub fn issue_for_exact_input(&self, base_in: &BigInt) -> QuoteResult<BigInt> {
        self.run(
            QuoteKind::IssueExactInput,
            base_in,
            "issue_for_exact_input",
            |ctx| self.issue_for_base(ctx, base_in),
            BigInt::clone,
        )
    }

    /// Maximum basket amount mintable for exactly `amount_in` of `token`.
    ///
    /// The input is first valued in base currency.
    pub fn issue_for_exact_input_token(
        &self,
        token: &TokenId,
        amount_in: &BigInt,
    ) -> QuoteResult<BigInt> {
        self.run(
            QuoteKind::IssueExactInput,
            amount_in,
            "issue_for_exact_input_token",
            |ctx| {
                let base_in = self.to_base(amount_in, token)?;
                tracing::debug!(%token, %amount_in, %base_in, "input valued in base currency");
                self.issue_for_base(ctx, &base_in)
            },
            BigInt::clone,
        )
    }

    /// Base currency cost of minting exactly `amount_set_out` basket tokens.
    pub fn issue_exact_output_for_eth(&self, amount_set_out: &BigInt) -> QuoteResult<BigInt> {
        self.run(
            QuoteKind::IssueExactOutput,
            amount_set_out,
            "issue_exact_output_for_eth",
            |ctx| self.exact_output_cost(ctx, amount_set_out),
            BigInt::clone,
        )
    }

    /// Cost and refund of minting exactly `amount_set_out` basket tokens
    /// when paying with `amount_in` of `token`.
    ///
    /// # Errors
    /// `InsufficientInput` if the input is worth less than the cost.
    pub fn issue_exact_output_for_token(
        &self,
        token: &TokenId,
        amount_in: &BigInt,
        amount_set_out: &BigInt,
    ) -> QuoteResult<ExactOutputQuote> {
        ensure_positive(amount_in, "issue_exact_output_for_token")?;
        self.run(
            QuoteKind::IssueExactOutput,
            amount_set_out,
            "issue_exact_output_for_token",
            |ctx| {
                let cost_in_base = self.exact_output_cost(ctx, amount_set_out)?;
                let input_value_in_base = self.to_base(amount_in, token)?;
                if input_value_in_base < cost_in_base {
                    return Err(QuoteError::InsufficientInput {
                        available: input_value_in_base,
                        required: cost_in_base,
                    });
                }
                let refund = &input_value_in_base - &cost_in_base;
                Ok(ExactOutputQuote {
                    input_token: token.clone(),
                    amount_set_out: amount_set_out.clone(),
                    input_value_in_base,
                    cost_in_base,
                    refund,
                })
            },
            |quote: &ExactOutputQuote| quote.cost_in_base.clone(),
        )
    }

    // ========================================================================
    // Redemption
    // ========================================================================

    /// Base currency received for redeeming exactly `amount_set_in` basket tokens.
    pub fn redeem_exact_input_for_eth(&self, amount_set_in: &BigInt) -> QuoteResult<BigInt> {
        self.run(
            QuoteKind::RedeemExactInput,
            amount_set_in,
            "redeem_exact_input_for_eth",
            |ctx| self.redemption_value(ctx, amount_set_in),
            BigInt::clone,
        )
    }

    /// Amount of `token` received for redeeming exactly `amount_set_in` basket tokens.
    pub fn redeem_exact_input_for_token(
        &self,
        token: &TokenId,
        amount_set_in: &BigInt,
    ) -> QuoteResult<BigInt> {
        self.run(
            QuoteKind::RedeemExactInput,
            amount_set_in,
            "redeem_exact_input_for_token",
            |ctx| {
                let total_base = self.redemption_value(ctx, amount_set_in)?;
                self.from_base(&total_base, token)
            },
            BigInt::clone,
        )
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Fetch and validate the basket composition used by every quote.
    ///
    /// # Errors
    /// `InvalidComposition` when the basket has no component with a
    /// non-zero unit, exceeds `max_components`, or (with `strict_units`)
    /// holds any zero unit or any negative unit.
    pub fn load_composition(&self) -> QuoteResult<BasketComposition> {
        let composition = self.composition.snapshot(&self.config.basket)?;
        let basket = &self.config.basket;

        if let Some(max) = self.config.max_components {
            if composition.len() > max {
                return Err(QuoteError::invalid_composition(
                    basket,
                    format!("{} components exceed the limit of {}", composition.len(), max),
                ));
            }
        }

        for component in composition.components.iter() {
            if component.unit.is_negative() {
                return Err(QuoteError::invalid_composition(
                    basket,
                    format!("negative unit for {}", component.token),
                ));
            }
            if self.config.strict_units && component.is_empty_position() {
                return Err(QuoteError::invalid_composition(
                    basket,
                    format!("zero unit for {}", component.token),
                ));
            }
        }

        if composition.active_components().next().is_none() {
            return Err(QuoteError::invalid_composition(basket, "no components"));
        }

        Ok(composition)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn run<T>(
        &self,
        kind: QuoteKind,
        amount: &BigInt,
        operation: &'static str,
        compute: impl FnOnce(&mut QuoteContext) -> QuoteResult<T>,
        headline: impl Fn(&T) -> BigInt,
    ) -> QuoteResult<T> {
        ensure_positive(amount, operation)?;

        let mut ctx = QuoteContext {
            quote_id: QuoteId::new(),
            events: Vec::new(),
        };
        let span = tracing::debug_span!(
            "quote",
            quote_id = %ctx.quote_id,
            operation,
            basket = %self.config.basket
        );
        let _enter = span.enter();

        ctx.events.push(QuoteEvent::QuoteStarted {
            quote_id: ctx.quote_id,
            kind,
            basket: self.config.basket.clone(),
            amount: amount.clone(),
            timestamp: Utc::now(),
        });

        let outcome = compute(&mut ctx);
        match &outcome {
            Ok(value) => {
                let result = headline(value);
                tracing::debug!(%amount, %result, "quote completed");
                ctx.events.push(QuoteEvent::QuoteCompleted {
                    quote_id: ctx.quote_id,
                    kind,
                    result,
                    timestamp: Utc::now(),
                });
            },
            Err(err) => {
                tracing::debug!(%amount, error = %err, kind = err.kind(), "quote failed");
                ctx.events.push(QuoteEvent::QuoteFailed {
                    quote_id: ctx.quote_id,
                    kind,
                    reason: err.to_string(),
                    timestamp: Utc::now(),
                });
            },
        }

        self.observer.on_events(ctx.events);
        outcome
    }

    fn issue_for_base(&self, ctx: &mut QuoteContext, base_in: &BigInt) -> QuoteResult<BigInt> {
        let composition = self.load_composition()?;

        // Cost of one basket unit's worth of each component
        let mut unit_costs: Vec<(&Component, BigInt)> = Vec::with_capacity(composition.len());
        let mut total_unit_cost = BigInt::zero();
        for component in composition.active_components() {
            let cost = self.base_cost_of(&component.unit, &component.token)?;
            total_unit_cost += &cost;
            unit_costs.push((component, cost));
        }

        let mut amount_set_out: Option<BigInt> = None;
        for (component, unit_cost) in &unit_costs {
            let share = mul_div(unit_cost, base_in, &total_unit_cost)?;
            let bought = self.component_for_base(&share, &component.token)?;
            ctx.component(&component.token, &share, &bought);

            let candidate = precise_div(&bought, &component.unit)?;
            amount_set_out = Some(match amount_set_out {
                Some(current) => min(&current, &candidate),
                None => candidate,
            });
        }

        amount_set_out
            .ok_or_else(|| QuoteError::invalid_composition(&self.config.basket, "no components"))
    }

    fn exact_output_cost(
        &self,
        ctx: &mut QuoteContext,
        amount_set_out: &BigInt,
    ) -> QuoteResult<BigInt> {
        let composition = self.load_composition()?;

        let mut total_cost = BigInt::zero();
        for component in composition.active_components() {
            let required = precise_mul(amount_set_out, &component.unit);
            let cost = self.base_cost_of(&required, &component.token)?;
            ctx.component(&component.token, &cost, &required);
            total_cost += cost;
        }
        Ok(total_cost)
    }

    fn redemption_value(&self, ctx: &mut QuoteContext, amount_set_in: &BigInt) -> QuoteResult<BigInt> {
        let composition = self.load_composition()?;

        let mut total_base = BigInt::zero();
        for component in composition.active_components() {
            let released = precise_mul(amount_set_in, &component.unit);
            let proceeds = self.base_for_component(&released, &component.token)?;
            ctx.component(&component.token, &proceeds, &released);
            total_base += proceeds;
        }
        Ok(total_base)
    }

    // Exchange hops; the base currency itself is never routed through a pool

    fn base_cost_of(&self, amount_out: &BigInt, component: &TokenId) -> QuoteResult<BigInt> {
        if component == &self.config.base_token {
            return Ok(amount_out.clone());
        }
        self.exchange
            .quote_amount_in(amount_out, &self.config.base_token, component)
    }

    fn component_for_base(&self, base_in: &BigInt, component: &TokenId) -> QuoteResult<BigInt> {
        if component == &self.config.base_token {
            return Ok(base_in.clone());
        }
        self.exchange
            .quote_amount_out(base_in, &self.config.base_token, component)
    }

    fn base_for_component(&self, amount_in: &BigInt, component: &TokenId) -> QuoteResult<BigInt> {
        self.to_base(amount_in, component)
    }

    fn to_base(&self, amount_in: &BigInt, token: &TokenId) -> QuoteResult<BigInt> {
        if token == &self.config.base_token {
            return Ok(amount_in.clone());
        }
        self.exchange
            .quote_amount_out(amount_in, token, &self.config.base_token)
    }

    fn from_base(&self, base_in: &BigInt, token: &TokenId) -> QuoteResult<BigInt> {
        self.component_for_base(base_in, token)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InMemoryBasketRegistry;
    use crate::exchange::ConstantProductExchange;
    use crate::interfaces::{NoOpQuoteObserver, RecordingQuoteObserver};
    use crate::numeric::{ether, units, NumericError};
    use num_traits::One;
    use std::collections::HashMap;

    fn weth() -> TokenId {
        TokenId::new("weth")
    }

    fn dai() -> TokenId {
        TokenId::new("dai")
    }

    fn wbtc() -> TokenId {
        TokenId::new("wbtc")
    }

    fn usdc() -> TokenId {
        TokenId::new("usdc")
    }

    fn set() -> TokenId {
        TokenId::new("set")
    }

    /// Exchange answering every quote with a fixed amount per (direction, pair)
    #[derive(Default)]
    struct FixedQuotes {
        amounts_out: HashMap<(TokenId, TokenId), BigInt>,
        amounts_in: HashMap<(TokenId, TokenId), BigInt>,
    }

    impl FixedQuotes {
        fn out(mut self, token_in: &TokenId, token_out: &TokenId, amount: BigInt) -> Self {
            self.amounts_out
                .insert((token_in.clone(), token_out.clone()), amount);
            self
        }

        fn cost(mut self, token_in: &TokenId, token_out: &TokenId, amount: BigInt) -> Self {
            self.amounts_in
                .insert((token_in.clone(), token_out.clone()), amount);
            self
        }
    }

    impl ExchangeQuoteSource for FixedQuotes {
        fn quote_amount_out(
            &self,
            _amount_in: &BigInt,
            token_in: &TokenId,
            token_out: &TokenId,
        ) -> QuoteResult<BigInt> {
            self.amounts_out
                .get(&(token_in.clone(), token_out.clone()))
                .cloned()
                .ok_or_else(|| QuoteError::unavailable(token_in, token_out, "no liquidity"))
        }

        fn quote_amount_in(
            &self,
            _amount_out: &BigInt,
            token_in: &TokenId,
            token_out: &TokenId,
        ) -> QuoteResult<BigInt> {
            self.amounts_in
                .get(&(token_in.clone(), token_out.clone()))
                .cloned()
                .ok_or_else(|| QuoteError::unavailable(token_in, token_out, "no liquidity"))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn registry(components: Vec<Component>) -> Arc<InMemoryBasketRegistry> {
        let registry = Arc::new(InMemoryBasketRegistry::new());
        registry.register(BasketComposition::new(set(), components));
        registry
    }

    fn quoter_with(
        registry: Arc<InMemoryBasketRegistry>,
        exchange: Arc<dyn ExchangeQuoteSource>,
    ) -> BasketQuoter {
        BasketQuoter::new(
            QuoterConfig::new(weth(), set()),
            registry,
            exchange,
            Arc::new(NoOpQuoteObserver),
        )
    }

    /// Pools mirroring the issuance fixtures: 100 ETH/1 WBTC, 10 ETH/100k DAI, 100 ETH/100k USDC
    fn uniswap() -> Arc<ConstantProductExchange> {
        let exchange = Arc::new(ConstantProductExchange::uniswap_v2("uniswap"));
        exchange.add_liquidity(&weth(), ether(100), &wbtc(), units(1, 8)).unwrap();
        exchange.add_liquidity(&weth(), ether(10), &dai(), ether(100_000)).unwrap();
        exchange.add_liquidity(&weth(), ether(100), &usdc(), units(100_000, 6)).unwrap();
        exchange
    }

    fn dai_wbtc_basket() -> Arc<InMemoryBasketRegistry> {
        // 1 set = 50 DAI + 0.0001 WBTC
        registry(vec![
            Component::new(dai(), ether(50)),
            Component::new(wbtc(), units(1, 4)),
        ])
    }

    // ------------------------------------------------------------------------
    // Hand-computed scenario with fixed quotes
    // ------------------------------------------------------------------------

    #[test]
    fn test_issue_for_exact_input_takes_scarcest_component() {
        // A: 0.5 per set (18 decimals); B: 1 whole unit per set (8 decimals)
        let a = TokenId::new("a");
        let b = TokenId::new("b");
        let registry = registry(vec![
            Component::new(a.clone(), ether(1) / BigInt::from(2u8)),
            Component::new(b.clone(), units(1, 8)),
        ]);
        let exchange = FixedQuotes::default()
            .cost(&weth(), &a, ether(1) / BigInt::from(4u8)) // 0.25 ETH per set of A
            .cost(&weth(), &b, ether(3) / BigInt::from(4u8)) // 0.75 ETH per set of B
            .out(&weth(), &a, ether(2)) // 2 A for the A share
            .out(&weth(), &b, units(1, 8)); // 1 B for the B share

        let quoter = quoter_with(registry, Arc::new(exchange));
        let out = quoter.issue_for_exact_input(&ether(1)).unwrap();

        // candidates: A = 2 / 0.5 = 4 sets, B = 1e8 * 1e18 / 1e8 = 1 set
        assert_eq!(out, ether(1));
    }

    #[test]
    fn test_issue_for_exact_input_is_idempotent() {
        let quoter = quoter_with(dai_wbtc_basket(), uniswap());
        let first = quoter.issue_for_exact_input(&ether(1)).unwrap();
        let second = quoter.issue_for_exact_input(&ether(1)).unwrap();
        assert_eq!(first, second);
        assert!(first.is_positive());
    }

    #[test]
    fn test_issue_for_exact_input_matches_reference_walk() {
        let exchange = uniswap();
        let quoter = quoter_with(dai_wbtc_basket(), exchange.clone());
        let eth_in = ether(1);

        // Reference computation, step by step
        let dai_cost = exchange.quote_amount_in(&ether(50), &weth(), &dai()).unwrap();
        let wbtc_cost = exchange.quote_amount_in(&units(1, 4), &weth(), &wbtc()).unwrap();
        let total = &dai_cost + &wbtc_cost;
        let dai_share = &dai_cost * &eth_in / &total;
        let wbtc_share = &wbtc_cost * &eth_in / &total;
        let dai_out = exchange.quote_amount_out(&dai_share, &weth(), &dai()).unwrap();
        let wbtc_out = exchange.quote_amount_out(&wbtc_share, &weth(), &wbtc()).unwrap();
        let expected = std::cmp::min(
            dai_out * ether(1) / ether(50),
            wbtc_out * ether(1) / units(1, 4),
        );

        assert_eq!(quoter.issue_for_exact_input(&eth_in).unwrap(), expected);
    }

    #[test]
    fn test_issue_for_exact_input_token_converts_first() {
        let exchange = uniswap();
        let quoter = quoter_with(dai_wbtc_basket(), exchange.clone());
        let usdc_in = units(1_000, 6);

        let eth_value = exchange.quote_amount_out(&usdc_in, &usdc(), &weth()).unwrap();
        let expected = quoter.issue_for_exact_input(&eth_value).unwrap();
        assert_eq!(
            quoter.issue_for_exact_input_token(&usdc(), &usdc_in).unwrap(),
            expected
        );

        // Paying in the base currency needs no conversion
        assert_eq!(
            quoter.issue_for_exact_input_token(&weth(), &ether(1)).unwrap(),
            quoter.issue_for_exact_input(&ether(1)).unwrap()
        );
    }

    #[test]
    fn test_issue_exact_output_sums_component_costs() {
        let exchange = uniswap();
        let quoter = quoter_with(dai_wbtc_basket(), exchange.clone());
        let amount = ether(2);

        let expected = exchange.quote_amount_in(&ether(100), &weth(), &dai()).unwrap()
            + exchange.quote_amount_in(&units(2, 4), &weth(), &wbtc()).unwrap();
        assert_eq!(quoter.issue_exact_output_for_eth(&amount).unwrap(), expected);
    }

    #[test]
    fn test_issue_exact_output_for_token_refund() {
        let exchange = uniswap();
        let quoter = quoter_with(dai_wbtc_basket(), exchange.clone());
        let usdc_in = units(1_000, 6);
        let amount = ether(1);

        let quote = quoter
            .issue_exact_output_for_token(&usdc(), &usdc_in, &amount)
            .unwrap();
        let cost = quoter.issue_exact_output_for_eth(&amount).unwrap();
        let value = exchange.quote_amount_out(&usdc_in, &usdc(), &weth()).unwrap();

        assert_eq!(quote.cost_in_base, cost);
        assert_eq!(quote.input_value_in_base, value);
        assert_eq!(quote.refund, &value - &cost);
        assert_eq!(quote.amount_set_out, amount);
    }

    #[test]
    fn test_issue_exact_output_for_token_insufficient_input() {
        let quoter = quoter_with(dai_wbtc_basket(), uniswap());
        let err = quoter
            .issue_exact_output_for_token(&usdc(), &units(1, 6), &ether(10))
            .unwrap_err();
        assert!(matches!(err, QuoteError::InsufficientInput { .. }));
    }

    #[test]
    fn test_redeem_exact_input_for_eth_and_token() {
        let exchange = uniswap();
        let quoter = quoter_with(dai_wbtc_basket(), exchange.clone());
        let amount = ether(1);

        let expected_eth = exchange.quote_amount_out(&ether(50), &dai(), &weth()).unwrap()
            + exchange.quote_amount_out(&units(1, 4), &wbtc(), &weth()).unwrap();
        assert_eq!(quoter.redeem_exact_input_for_eth(&amount).unwrap(), expected_eth);

        let expected_usdc = exchange.quote_amount_out(&expected_eth, &weth(), &usdc()).unwrap();
        assert_eq!(
            quoter.redeem_exact_input_for_token(&usdc(), &amount).unwrap(),
            expected_usdc
        );
    }

    // ------------------------------------------------------------------------
    // Boundary rejection and composition policy
    // ------------------------------------------------------------------------

    #[test]
    fn test_zero_amounts_are_rejected() {
        let quoter = quoter_with(dai_wbtc_basket(), uniswap());
        let zero = BigInt::zero();

        assert!(matches!(
            quoter.issue_exact_output_for_eth(&zero),
            Err(QuoteError::ZeroAmount { .. })
        ));
        assert!(matches!(
            quoter.issue_for_exact_input(&zero),
            Err(QuoteError::ZeroAmount { .. })
        ));
        assert!(matches!(
            quoter.issue_for_exact_input_token(&usdc(), &zero),
            Err(QuoteError::ZeroAmount { .. })
        ));
        assert!(matches!(
            quoter.issue_exact_output_for_token(&usdc(), &zero, &ether(1)),
            Err(QuoteError::ZeroAmount { .. })
        ));
        assert!(matches!(
            quoter.redeem_exact_input_for_eth(&zero),
            Err(QuoteError::ZeroAmount { .. })
        ));
        assert!(matches!(
            quoter.redeem_exact_input_for_token(&usdc(), &-BigInt::one()),
            Err(QuoteError::ZeroAmount { .. })
        ));
    }

    #[test]
    fn test_empty_basket_is_invalid() {
        let quoter = quoter_with(registry(Vec::new()), uniswap());
        assert!(matches!(
            quoter.issue_for_exact_input(&ether(1)),
            Err(QuoteError::InvalidComposition { .. })
        ));
    }

    #[test]
    fn test_zero_unit_components_are_skipped() {
        let with_zero = registry(vec![
            Component::new(dai(), ether(50)),
            Component::new(usdc(), BigInt::zero()),
            Component::new(wbtc(), units(1, 4)),
        ]);
        let exchange = uniswap();
        let skipping = quoter_with(with_zero.clone(), exchange.clone());
        let plain = quoter_with(dai_wbtc_basket(), exchange.clone());

        assert_eq!(
            skipping.issue_for_exact_input(&ether(1)).unwrap(),
            plain.issue_for_exact_input(&ether(1)).unwrap()
        );
        assert_eq!(
            skipping.redeem_exact_input_for_eth(&ether(1)).unwrap(),
            plain.redeem_exact_input_for_eth(&ether(1)).unwrap()
        );

        let strict = BasketQuoter::new(
            QuoterConfig::new(weth(), set()).with_strict_units(true),
            with_zero,
            exchange,
            Arc::new(NoOpQuoteObserver),
        );
        assert!(matches!(
            strict.issue_exact_output_for_eth(&ether(1)),
            Err(QuoteError::InvalidComposition { .. })
        ));
    }

    #[test]
    fn test_only_zero_units_is_invalid() {
        let quoter = quoter_with(registry(vec![Component::new(dai(), BigInt::zero())]), uniswap());
        assert!(matches!(
            quoter.redeem_exact_input_for_eth(&ether(1)),
            Err(QuoteError::InvalidComposition { .. })
        ));
    }

    #[test]
    fn test_max_components_limit() {
        let quoter = BasketQuoter::new(
            QuoterConfig::new(weth(), set()).with_max_components(1),
            dai_wbtc_basket(),
            uniswap(),
            Arc::new(NoOpQuoteObserver),
        );
        assert!(matches!(
            quoter.load_composition(),
            Err(QuoteError::InvalidComposition { .. })
        ));
    }

    #[test]
    fn test_base_token_component_is_not_swapped() {
        let registry = registry(vec![
            Component::new(weth(), ether(1) / BigInt::from(10u8)),
            Component::new(dai(), ether(50)),
        ]);
        let exchange = uniswap();
        let quoter = quoter_with(registry, exchange.clone());

        let expected = ether(2) / BigInt::from(10u8)
            + exchange.quote_amount_in(&ether(100), &weth(), &dai()).unwrap();
        assert_eq!(quoter.issue_exact_output_for_eth(&ether(2)).unwrap(), expected);
    }

    /// 1 set = 0.1 WETH + 50 DAI; only DAI is quotable, so any WETH hop would fail
    fn weth_dai_basket_on_fixed_quotes(exchange: FixedQuotes) -> BasketQuoter {
        let registry = registry(vec![
            Component::new(weth(), ether(1) / BigInt::from(10u8)),
            Component::new(dai(), ether(50)),
        ]);
        quoter_with(registry, Arc::new(exchange))
    }

    #[test]
    fn test_issue_for_exact_input_takes_base_component_one_to_one() {
        let quoter = weth_dai_basket_on_fixed_quotes(
            FixedQuotes::default()
                .cost(&weth(), &dai(), ether(4) / BigInt::from(10u8)) // 0.4 ETH per set of DAI
                .out(&weth(), &dai(), ether(150)),
        );

        // unit costs: WETH 0.1 (itself), DAI 0.4; total 0.5
        // shares of 1 ETH: WETH 0.2, DAI 0.8
        // candidates: WETH 0.2 / 0.1 = 2 sets, DAI 150 / 50 = 3 sets
        assert_eq!(quoter.issue_for_exact_input(&ether(1)).unwrap(), ether(2));

        // Paying in the base token is the same quote
        assert_eq!(
            quoter.issue_for_exact_input_token(&weth(), &ether(1)).unwrap(),
            ether(2)
        );
    }

    #[test]
    fn test_redeem_takes_base_component_one_to_one() {
        let quoter = weth_dai_basket_on_fixed_quotes(
            FixedQuotes::default().out(&dai(), &weth(), ether(3) / BigInt::from(10u8)),
        );

        // 2 sets release 0.2 WETH (kept as is) and 100 DAI (sold for 0.3 ETH)
        let expected = ether(5) / BigInt::from(10u8);
        assert_eq!(quoter.redeem_exact_input_for_eth(&ether(2)).unwrap(), expected);
        assert_eq!(
            quoter.redeem_exact_input_for_token(&weth(), &ether(2)).unwrap(),
            expected
        );
    }

    #[test]
    fn test_unavailable_quote_propagates() {
        let registry = registry(vec![Component::new(TokenId::new("illiquid"), ether(1))]);
        let quoter = quoter_with(registry, uniswap());
        assert!(matches!(
            quoter.issue_exact_output_for_eth(&ether(1)),
            Err(QuoteError::QuoteUnavailable { .. })
        ));
    }

    #[test]
    fn test_zero_total_unit_cost_is_arithmetic_error() {
        let a = TokenId::new("a");
        let registry = registry(vec![Component::new(a.clone(), ether(1))]);
        let exchange = FixedQuotes::default()
            .cost(&weth(), &a, BigInt::zero())
            .out(&weth(), &a, ether(1));
        let quoter = quoter_with(registry, Arc::new(exchange));
        assert_eq!(
            quoter.issue_for_exact_input(&ether(1)),
            Err(QuoteError::Arithmetic(NumericError::DivisionByZero))
        );
    }

    // ------------------------------------------------------------------------
    // Economic properties
    // ------------------------------------------------------------------------

    #[test]
    fn test_issue_then_redeem_is_not_profitable() {
        let exchange = uniswap();
        let quoter = quoter_with(dai_wbtc_basket(), exchange.clone());
        let eth_in = ether(1);

        let minted = quoter.issue_for_exact_input(&eth_in).unwrap();

        // Execute the issuance swaps so redemption sees the moved reserves
        let composition = quoter.load_composition().unwrap();
        for component in composition.active_components() {
            let required = precise_mul(&minted, &component.unit);
            exchange
                .swap_exact_output(&required, &weth(), &component.token)
                .unwrap();
        }

        let redeemed = quoter.redeem_exact_input_for_eth(&minted).unwrap();
        assert!(redeemed <= eth_in);
    }

    #[test]
    fn test_exact_output_cost_within_exact_input_budget() {
        let quoter = quoter_with(dai_wbtc_basket(), uniswap());
        let eth_in = ether(1);
        let minted = quoter.issue_for_exact_input(&eth_in).unwrap();
        let cost = quoter.issue_exact_output_for_eth(&minted).unwrap();
        assert!(cost <= eth_in);
    }

    // ------------------------------------------------------------------------
    // Observability
    // ------------------------------------------------------------------------

    #[test]
    fn test_observer_receives_quote_lifecycle() {
        let observer = Arc::new(RecordingQuoteObserver::new());
        let quoter = BasketQuoter::new(
            QuoterConfig::new(weth(), set()),
            dai_wbtc_basket(),
            uniswap(),
            observer.clone(),
        );

        quoter.redeem_exact_input_for_eth(&ether(1)).unwrap();
        let events = observer.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], QuoteEvent::QuoteStarted { .. }));
        assert!(matches!(events[1], QuoteEvent::ComponentQuoted { .. }));
        assert!(matches!(events[2], QuoteEvent::ComponentQuoted { .. }));
        assert!(matches!(events[3], QuoteEvent::QuoteCompleted { .. }));
        assert!(events.iter().all(|e| e.quote_id() == events[0].quote_id()));

        observer.clear();
        let _ = quoter.issue_exact_output_for_eth(&BigInt::zero());
        assert!(observer.events().is_empty());

        let empty = BasketQuoter::new(
            QuoterConfig::new(weth(), set()),
            registry(Vec::new()),
            uniswap(),
            observer.clone(),
        );
        let _ = empty.issue_for_exact_input(&ether(1));
        let events = observer.events();
        assert!(matches!(events.last(), Some(QuoteEvent::QuoteFailed { .. })));
    }
}
