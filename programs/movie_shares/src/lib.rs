//! # Movie Shares: Bonding-Curve Movie Marketplace
//!
//! A marketplace where movies are published as fungible share tokens and
//! traded against per-asset liquidity pools.
//!
//! ## Overview
//!
//! Each published movie gets its own share mint, a pool seeded with the
//! full supply, and a posted per-unit price. Buys and sells settle against
//! the pool on a step curve: the price rises 1% after every buy, falls 1%
//! after every sell (floored at one base unit), and an oracle-fed hype
//! factor scales what buyers pay when a movie is trending.
//!
//! ## How the money flows
//! - 80% of every buy payment backs the reserve that pays sellers out.
//! - 10% accrues to a royalty pool holders can claim pro rata.
//! - 10% goes straight to the movie's publisher.

use anchor_lang::prelude::*;

pub mod curve;
pub mod instructions;
pub mod state;

pub use curve::*;
pub use instructions::*;

// Replace with your deployed program ID
declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Main movie-share marketplace program
#[program]
pub mod movie_shares {
    use super::*;

    /// Initialize the marketplace with global configuration
    pub fn initialize(ctx: Context<Initialize>, oracle: Pubkey) -> Result<()> {
        ctx.accounts.initialize(oracle, &ctx.bumps)
    }

    /// Publish a movie: create the asset record and share mint (Step 1)
    pub fn insert_asset(
        ctx: Context<InsertAsset>,
        id: u64,
        total_supply: u64,
        base_price: u64,
        name: String,
        symbol: String,
    ) -> Result<()> {
        ctx.accounts
            .insert_asset(id, total_supply, base_price, name, symbol, &ctx.bumps)
    }

    /// Fund the pools and open trading (Step 2)
    pub fn fund_asset(ctx: Context<FundAsset>, reserve_seed: u64) -> Result<()> {
        ctx.accounts.fund_asset(reserve_seed)
    }

    /// Buy shares from the pool; returns the units settled
    pub fn buy(ctx: Context<Trade>, units: u64, payment: u64) -> Result<u64> {
        ctx.accounts.buy(units, payment)
    }

    /// Sell shares back to the pool; returns the collateral proceeds
    pub fn sell(ctx: Context<Trade>, units: u64) -> Result<u64> {
        ctx.accounts.sell(units)
    }

    /// Claim the caller's pro-rata share of accrued royalties
    pub fn claim_royalty(ctx: Context<ClaimRoyalty>) -> Result<u64> {
        ctx.accounts.claim_royalty(&ctx.bumps)
    }

    /// Repost an asset's price and hype data (oracle only)
    pub fn set_hype_price(
        ctx: Context<SetHypePrice>,
        hype_factor: u64,
        new_price: u64,
        new_stream_value: u64,
        current_round: u64,
    ) -> Result<()> {
        ctx.accounts
            .set_hype_price(hype_factor, new_price, new_stream_value, current_round)
    }

    /// Read-only snapshot of an asset's pricing and liquidity state
    pub fn get_asset_info(ctx: Context<GetAssetInfo>) -> Result<AssetInfo> {
        ctx.accounts.get_asset_info()
    }
}
