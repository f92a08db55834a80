// ============================================================================
// Exchange Module
// Reference implementations of the exchange quote source
// ============================================================================

mod best_price;
mod constant_product;

pub use best_price::BestPriceExchange;
pub use constant_product::{
    get_amount_in, get_amount_out, ConstantProductExchange, Pool, DEFAULT_FEE_BPS,
    FEE_DENOMINATOR_BPS,
};
