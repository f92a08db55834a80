// ============================================================================
// Best-Price Routing
// Aggregates several exchanges and picks the most favourable quote
// ============================================================================

use crate::domain::{QuoteError, QuoteResult, TokenId};
use crate::interfaces::ExchangeQuoteSource;
use num_bigint::BigInt;
use std::cmp::Ordering;
use std::sync::Arc;

/// Quote source that asks every underlying exchange and keeps the best answer:
/// the largest output for an exact input, the smallest input for an exact output.
///
/// Exchanges that cannot price a pair are skipped. When none can, the last
/// failure is returned unchanged.
pub struct BestPriceExchange {
    name: String,
    exchanges: Vec<Arc<dyn ExchangeQuoteSource>>,
}

impl BestPriceExchange {
    pub fn new(exchanges: Vec<Arc<dyn ExchangeQuoteSource>>) -> Self {
        let name = exchanges
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join("|");
        Self { name, exchanges }
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    fn best_of(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        quote: impl Fn(&dyn ExchangeQuoteSource) -> QuoteResult<BigInt>,
        prefer: Ordering,
    ) -> QuoteResult<BigInt> {
        let mut best: Option<(BigInt, &str)> = None;
        let mut last_err = None;

        for exchange in &self.exchanges {
            match quote(exchange.as_ref()) {
                Ok(amount) => {
                    let better = match &best {
                        Some((current, _)) => amount.cmp(current) == prefer,
                        None => true,
                    };
                    if better {
                        best = Some((amount, exchange.name()));
                    }
                },
                Err(err) => {
                    tracing::trace!(exchange = exchange.name(), %err, "exchange skipped");
                    last_err = Some(err);
                },
            }
        }

        match best {
            Some((amount, source)) => {
                tracing::trace!(%token_in, %token_out, %amount, source, "best route selected");
                Ok(amount)
            },
            None => Err(last_err.unwrap_or_else(|| {
                QuoteError::unavailable(token_in, token_out, "no exchanges configured")
            })),
        }
    }
}

impl ExchangeQuoteSource for BestPriceExchange {
    fn quote_amount_out(
        &self,
        amount_in: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt> {
        self.best_of(
            token_in,
            token_out,
            |exchange| exchange.quote_amount_out(amount_in, token_in, token_out),
            Ordering::Greater,
        )
    }

    fn quote_amount_in(
        &self,
        amount_out: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt> {
        self.best_of(
            token_in,
            token_out,
            |exchange| exchange.quote_amount_in(amount_out, token_in, token_out),
            Ordering::Less,
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::ConstantProductExchange;
    use crate::numeric::ether;

    fn weth() -> TokenId {
        TokenId::new("weth")
    }

    fn dai() -> TokenId {
        TokenId::new("dai")
    }

    fn usdc() -> TokenId {
        TokenId::new("usdc")
    }

    fn venues() -> (Arc<ConstantProductExchange>, Arc<ConstantProductExchange>) {
        let uniswap = Arc::new(ConstantProductExchange::uniswap_v2("uniswap"));
        let sushiswap = Arc::new(ConstantProductExchange::uniswap_v2("sushiswap"));
        // Sushiswap offers more DAI per ETH
        uniswap.add_liquidity(&weth(), ether(10), &dai(), ether(100_000)).unwrap();
        sushiswap.add_liquidity(&weth(), ether(10), &dai(), ether(110_000)).unwrap();
        // Only uniswap lists USDC
        uniswap
            .add_liquidity(&weth(), ether(10), &usdc(), BigInt::from(100_000_000_000u64))
            .unwrap();
        (uniswap, sushiswap)
    }

    #[test]
    fn test_picks_max_output_and_min_input() {
        let (uniswap, sushiswap) = venues();
        let best = BestPriceExchange::new(vec![uniswap.clone(), sushiswap.clone()]);

        let out = best.quote_amount_out(&ether(1), &weth(), &dai()).unwrap();
        assert_eq!(out, sushiswap.quote_amount_out(&ether(1), &weth(), &dai()).unwrap());

        let cost = best.quote_amount_in(&ether(1_000), &weth(), &dai()).unwrap();
        assert_eq!(cost, sushiswap.quote_amount_in(&ether(1_000), &weth(), &dai()).unwrap());

        // Selling DAI for ETH is cheaper where DAI is scarcer
        let back = best.quote_amount_out(&ether(1_000), &dai(), &weth()).unwrap();
        assert_eq!(back, uniswap.quote_amount_out(&ether(1_000), &dai(), &weth()).unwrap());
    }

    #[test]
    fn test_skips_exchanges_without_the_pair() {
        let (uniswap, sushiswap) = venues();
        let best = BestPriceExchange::new(vec![sushiswap, uniswap.clone()]);

        let out = best.quote_amount_out(&ether(1), &weth(), &usdc()).unwrap();
        assert_eq!(out, uniswap.quote_amount_out(&ether(1), &weth(), &usdc()).unwrap());
    }

    #[test]
    fn test_all_unavailable_propagates_error() {
        let (uniswap, sushiswap) = venues();
        let best = BestPriceExchange::new(vec![uniswap, sushiswap]);
        assert!(matches!(
            best.quote_amount_out(&ether(1), &dai(), &usdc()),
            Err(QuoteError::QuoteUnavailable { .. })
        ));

        let empty = BestPriceExchange::new(Vec::new());
        assert!(empty.is_empty());
        assert!(matches!(
            empty.quote_amount_in(&ether(1), &weth(), &dai()),
            Err(QuoteError::QuoteUnavailable { .. })
        ));
    }

    #[test]
    fn test_name_lists_venues() {
        let (uniswap, sushiswap) = venues();
        let best = BestPriceExchange::new(vec![uniswap, sushiswap]);
        assert_eq!(best.name(), "uniswap|sushiswap");
        assert_eq!(best.len(), 2);
    }
}
