//! Instruction handlers for the movie-share marketplace
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Set up the marketplace (admin only, once)
//! - `insert_asset` / `fund_asset` - Publish a movie and seed its pools
//! - `trade` - Buy/sell shares against the step curve
//! - `claim_royalty` - Draw a pro-rata share of accrued royalties
//! - `set_hype_price` - Oracle repost of price and hype data
//! - `get_asset_info` - Read-only asset snapshot

pub mod claim_royalty;
pub mod get_asset_info;
pub mod initialize;
pub mod insert_asset;
pub mod set_hype_price;
pub mod trade;

pub use claim_royalty::*;
pub use get_asset_info::*;
pub use initialize::*;
pub use insert_asset::*;
pub use set_hype_price::*;
pub use trade::*;
