//! Fundamental domain value types used throughout the engine.
//!
//! Identifiers, amounts, liquidity units, fees, sqrt prices, range
//! positions, call context and swap requests.  Newtypes with validated
//! constructors enforce their invariants at the boundary.

mod address;
mod amount;
mod asset_pair;
mod basis_points;
mod context;
mod fee_tier;
mod liquidity;
mod position;
mod rounding;
mod sqrt_price;
mod swap;

pub use address::{AccountId, AssetId};
pub use amount::{Amount, MAX_RESERVE};
pub use asset_pair::{AssetPair, Side, sort_assets};
pub use basis_points::{BPS_DENOMINATOR, BasisPoints};
pub use context::{CallContext, Timestamp};
pub use fee_tier::{FeeTier, MAX_FEE_BPS};
pub use liquidity::Liquidity;
pub use position::{Position, PositionKey, PriceRange};
pub use rounding::Rounding;
pub use sqrt_price::{MAX_SQRT_PRICE, SqrtPrice};
pub use swap::{SwapOutcome, SwapRequest};
