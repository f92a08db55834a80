// ============================================================================
// Basic Usage Example
// ============================================================================

use exchange_issuance::numeric::{ether, format_units, parse_units, units};
use exchange_issuance::prelude::*;
use std::sync::Arc;

#[cfg(feature = "logging")]
fn init_logging() {
    if let Err(e) = exchange_issuance::utils::init_logging(None) {
        eprintln!("{}", e);
    }
}

#[cfg(not(feature = "logging"))]
fn init_logging() {}

fn main() {
    init_logging();

    println!("=== Exchange Issuance Example ===\n");

    // Basket: 1 DPI = 50 DAI + 0.0001 WBTC + 25 USDC
    let registry = Arc::new(InMemoryBasketRegistry::new());
    registry.register(BasketComposition::new(
        "dpi",
        [
            Component::new("dai", parse_units("50", 18).unwrap()),
            Component::new("wbtc", parse_units("0.0001", 8).unwrap()),
            Component::new("usdc", parse_units("25", 6).unwrap()),
        ],
    ));
    println!("Registered basket DPI with 3 components\n");

    // Two venues with slightly different DAI prices
    let weth = TokenId::new("weth");
    let uniswap = Arc::new(ConstantProductExchange::uniswap_v2("uniswap"));
    let sushiswap = Arc::new(ConstantProductExchange::uniswap_v2("sushiswap"));
    for exchange in [&uniswap, &sushiswap] {
        exchange.add_liquidity(&weth, ether(100), &"wbtc".into(), units(1, 8)).unwrap();
        exchange.add_liquidity(&weth, ether(100), &"usdc".into(), units(100_000, 6)).unwrap();
    }
    uniswap.add_liquidity(&weth, ether(10), &"dai".into(), ether(100_000)).unwrap();
    sushiswap.add_liquidity(&weth, ether(10), &"dai".into(), ether(102_000)).unwrap();

    let quoter = BasketQuoterBuilder::new("weth", "dpi")
        .with_composition_source(registry.clone())
        .with_exchange(uniswap)
        .with_exchange(sushiswap)
        .best_price_routing()
        .with_observer(Arc::new(LoggingQuoteObserver))
        .build()
        .unwrap();

    println!("Pricing on {}\n", quoter.exchange_name());

    // Issue for an exact amount of ETH
    let eth_in = ether(1);
    match quoter.issue_for_exact_input(&eth_in) {
        Ok(minted) => println!("1 ETH mints {} DPI", format_units(&minted, 18)),
        Err(e) => println!("Issue quote failed: {}", e),
    }

    // Issue an exact amount, paying in USDC
    let usdc_in = units(1_000, 6);
    match quoter.issue_exact_output_for_token(&"usdc".into(), &usdc_in, &ether(5)) {
        Ok(quote) => {
            println!("5 DPI cost {} ETH", format_units(&quote.cost_in_base, 18));
            println!(
                "Paying 1000 USDC (worth {} ETH) refunds {} ETH",
                format_units(&quote.input_value_in_base, 18),
                format_units(&quote.refund, 18)
            );
        },
        Err(e) => println!("Exact output quote failed: {}", e),
    }

    // Redeem
    match quoter.redeem_exact_input_for_token(&"usdc".into(), &ether(5)) {
        Ok(usdc_out) => println!("Redeeming 5 DPI returns {} USDC", format_units(&usdc_out, 6)),
        Err(e) => println!("Redeem quote failed: {}", e),
    }

    // Rebalance and re-quote
    println!("\nRebalancing: DAI unit 50 -> 0 (component skipped)");
    if let Err(e) = registry.set_unit(&"dpi".into(), &"dai".into(), ether(0)) {
        println!("Rebalance failed: {}", e);
    }
    match quoter.redeem_exact_input_for_eth(&ether(5)) {
        Ok(eth_out) => println!("Redeeming 5 DPI returns {} ETH", format_units(&eth_out, 18)),
        Err(e) => println!("Redeem quote failed: {}", e),
    }

    // Invalid requests surface typed errors
    if let Err(e) = quoter.issue_exact_output_for_eth(&ether(0)) {
        println!("\nZero amount rejected: {} ({})", e, e.kind());
    }
}
