// ============================================================================
// Constant-Product Exchange
// In-memory x*y=k pools with router-style quoting and swap execution
// ============================================================================
//
// Quoting follows the Uniswap V2 library:
//
//   amount_out = (in * (F - fee) * reserve_out) / (reserve_in * F + in * (F - fee))
//   amount_in  = (reserve_in * out * F) / ((reserve_out - out) * (F - fee)) + 1
//
// with F = 10_000 basis points. Both round in favour of the pool.

use crate::domain::{QuoteError, QuoteResult, TokenId};
use crate::interfaces::ExchangeQuoteSource;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Basis point denominator for swap fees
pub const FEE_DENOMINATOR_BPS: u32 = 10_000;

/// Uniswap V2 / Sushiswap swap fee (0.30%)
pub const DEFAULT_FEE_BPS: u32 = 30;

// ============================================================================
// Pool
// ============================================================================

/// Reserves of one token pair. `token0 < token1` by identifier ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub token0: TokenId,
    pub token1: TokenId,
    pub reserve0: BigInt,
    pub reserve1: BigInt,
}

impl Pool {
    /// Reserves ordered as (reserve of `token_in`, reserve of the other token)
    fn reserves_for(&self, token_in: &TokenId) -> (&BigInt, &BigInt) {
        if token_in == &self.token0 {
            (&self.reserve0, &self.reserve1)
        } else {
            (&self.reserve1, &self.reserve0)
        }
    }

    fn reserves_for_mut(&mut self, token_in: &TokenId) -> (&mut BigInt, &mut BigInt) {
        if token_in == &self.token0 {
            (&mut self.reserve0, &mut self.reserve1)
        } else {
            (&mut self.reserve1, &mut self.reserve0)
        }
    }

    fn apply_swap(&mut self, token_in: &TokenId, amount_in: &BigInt, amount_out: &BigInt) {
        let (reserve_in, reserve_out) = self.reserves_for_mut(token_in);
        *reserve_in += amount_in;
        *reserve_out -= amount_out;
    }
}

fn ensure_distinct(token_in: &TokenId, token_out: &TokenId) -> QuoteResult<()> {
    if token_in == token_out {
        return Err(QuoteError::unavailable(token_in, token_out, "identical tokens"));
    }
    Ok(())
}

fn pair_key(a: &TokenId, b: &TokenId) -> (TokenId, TokenId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

// ============================================================================
// Pure Quote Math
// ============================================================================

/// Output for an exact input against the given reserves.
pub fn get_amount_out(
    amount_in: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
    fee_bps: u32,
) -> Result<BigInt, &'static str> {
    if !amount_in.is_positive() {
        return Err("insufficient input amount");
    }
    if !reserve_in.is_positive() || !reserve_out.is_positive() {
        return Err("insufficient liquidity");
    }
    let amount_in_with_fee = amount_in * BigInt::from(FEE_DENOMINATOR_BPS - fee_bps);
    let numerator = &amount_in_with_fee * reserve_out;
    let denominator = reserve_in * BigInt::from(FEE_DENOMINATOR_BPS) + amount_in_with_fee;
    Ok(numerator / denominator)
}

/// Input required for an exact output against the given reserves.
pub fn get_amount_in(
    amount_out: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
    fee_bps: u32,
) -> Result<BigInt, &'static str> {
    if !amount_out.is_positive() {
        return Err("insufficient output amount");
    }
    if !reserve_in.is_positive() || amount_out >= reserve_out {
        return Err("insufficient liquidity");
    }
    let numerator = reserve_in * amount_out * BigInt::from(FEE_DENOMINATOR_BPS);
    let denominator = (reserve_out - amount_out) * BigInt::from(FEE_DENOMINATOR_BPS - fee_bps);
    Ok(numerator / denominator + BigInt::one())
}

// ============================================================================
// Exchange
// ============================================================================

/// A set of constant-product pools sharing one fee tier.
pub struct ConstantProductExchange {
    name: String,
    fee_bps: u32,
    pools: RwLock<HashMap<(TokenId, TokenId), Pool>>,
}

impl ConstantProductExchange {
    /// Create an empty exchange.
    ///
    /// # Panics
    /// Panics if `fee_bps` is not below 10_000.
    pub fn new(name: impl Into<String>, fee_bps: u32) -> Self {
        assert!(fee_bps < FEE_DENOMINATOR_BPS, "fee must be below 100%");
        Self {
            name: name.into(),
            fee_bps,
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// Exchange with the standard 0.30% fee
    pub fn uniswap_v2(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_FEE_BPS)
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Deposit liquidity into the `a`/`b` pool, creating it if needed
    ///
    /// # Errors
    /// `QuoteUnavailable` if `a == b`, `ZeroAmount` if either amount is not positive.
    pub fn add_liquidity(
        &self,
        a: &TokenId,
        amount_a: BigInt,
        b: &TokenId,
        amount_b: BigInt,
    ) -> QuoteResult<()> {
        ensure_distinct(a, b)?;
        if !amount_a.is_positive() || !amount_b.is_positive() {
            return Err(QuoteError::ZeroAmount {
                operation: "add_liquidity",
            });
        }

        let key = pair_key(a, b);
        let mut pools = self.pools.write();
        let pool = pools.entry(key.clone()).or_insert_with(|| Pool {
            token0: key.0.clone(),
            token1: key.1.clone(),
            reserve0: BigInt::zero(),
            reserve1: BigInt::zero(),
        });
        let (reserve_a, reserve_b) = pool.reserves_for_mut(a);
        *reserve_a += amount_a;
        *reserve_b += amount_b;
        tracing::debug!(
            exchange = %self.name,
            token0 = %pool.token0,
            token1 = %pool.token1,
            reserve0 = %pool.reserve0,
            reserve1 = %pool.reserve1,
            "liquidity added"
        );
        Ok(())
    }

    /// Current reserves as (reserve of `a`, reserve of `b`)
    pub fn reserves(&self, a: &TokenId, b: &TokenId) -> Option<(BigInt, BigInt)> {
        let pools = self.pools.read();
        pools.get(&pair_key(a, b)).map(|pool| {
            let (ra, rb) = pool.reserves_for(a);
            (ra.clone(), rb.clone())
        })
    }

    fn with_pool<T>(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        f: impl FnOnce(&BigInt, &BigInt) -> Result<T, &'static str>,
    ) -> QuoteResult<T> {
        ensure_distinct(token_in, token_out)?;
        let pools = self.pools.read();
        let pool = pools
            .get(&pair_key(token_in, token_out))
            .ok_or_else(|| QuoteError::unavailable(token_in, token_out, "no pool"))?;
        let (reserve_in, reserve_out) = pool.reserves_for(token_in);
        f(reserve_in, reserve_out).map_err(|reason| QuoteError::unavailable(token_in, token_out, reason))
    }

    /// Chained exact-input quote along `path`; element 0 is `amount_in`
    pub fn amounts_out(&self, amount_in: &BigInt, path: &[TokenId]) -> QuoteResult<Vec<BigInt>> {
        if path.len() < 2 {
            return Err(QuoteError::unavailable(
                path.first().unwrap_or(&TokenId::new("")),
                path.last().unwrap_or(&TokenId::new("")),
                "path needs at least two tokens",
            ));
        }
        let mut amounts = Vec::with_capacity(path.len());
        amounts.push(amount_in.clone());
        for hop in path.windows(2) {
            let next = self.quote_amount_out(&amounts[amounts.len() - 1], &hop[0], &hop[1])?;
            amounts.push(next);
        }
        Ok(amounts)
    }

    /// Chained exact-output quote along `path`; the last element is `amount_out`
    pub fn amounts_in(&self, amount_out: &BigInt, path: &[TokenId]) -> QuoteResult<Vec<BigInt>> {
        if path.len() < 2 {
            return Err(QuoteError::unavailable(
                path.first().unwrap_or(&TokenId::new("")),
                path.last().unwrap_or(&TokenId::new("")),
                "path needs at least two tokens",
            ));
        }
        let mut amounts = vec![BigInt::zero(); path.len()];
        amounts[path.len() - 1] = amount_out.clone();
        for i in (1..path.len()).rev() {
            amounts[i - 1] = self.quote_amount_in(&amounts[i], &path[i - 1], &path[i])?;
        }
        Ok(amounts)
    }

    /// Execute an exact-input swap against the pool, updating reserves
    pub fn swap_exact_input(
        &self,
        amount_in: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt> {
        ensure_distinct(token_in, token_out)?;
        let mut pools = self.pools.write();
        let pool = pools
            .get_mut(&pair_key(token_in, token_out))
            .ok_or_else(|| QuoteError::unavailable(token_in, token_out, "no pool"))?;
        let (reserve_in, reserve_out) = pool.reserves_for(token_in);
        let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)
            .map_err(|reason| QuoteError::unavailable(token_in, token_out, reason))?;
        pool.apply_swap(token_in, amount_in, &amount_out);
        tracing::trace!(
            exchange = %self.name,
            %token_in,
            %token_out,
            %amount_in,
            %amount_out,
            "swap executed"
        );
        Ok(amount_out)
    }

    /// Execute an exact-output swap against the pool, updating reserves
    pub fn swap_exact_output(
        &self,
        amount_out: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt> {
        ensure_distinct(token_in, token_out)?;
        let mut pools = self.pools.write();
        let pool = pools
            .get_mut(&pair_key(token_in, token_out))
            .ok_or_else(|| QuoteError::unavailable(token_in, token_out, "no pool"))?;
        let (reserve_in, reserve_out) = pool.reserves_for(token_in);
        let amount_in = get_amount_in(amount_out, reserve_in, reserve_out, self.fee_bps)
            .map_err(|reason| QuoteError::unavailable(token_in, token_out, reason))?;
        pool.apply_swap(token_in, &amount_in, amount_out);
        tracing::trace!(
            exchange = %self.name,
            %token_in,
            %token_out,
            %amount_in,
            %amount_out,
            "swap executed"
        );
        Ok(amount_in)
    }
}

impl ExchangeQuoteSource for ConstantProductExchange {
    fn quote_amount_out(
        &self,
        amount_in: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt> {
        self.with_pool(token_in, token_out, |reserve_in, reserve_out| {
            get_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)
        })
    }

    fn quote_amount_in(
        &self,
        amount_out: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt> {
        self.with_pool(token_in, token_out, |reserve_in, reserve_out| {
            get_amount_in(amount_out, reserve_in, reserve_out, self.fee_bps)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Tests
// ============================================================================
