//! Global Marketplace Configuration
//!
//! Protocol-wide settings shared by every published asset.

use anchor_lang::prelude::*;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Marketplace administrator
    pub admin: Pubkey,

    /// Address authorized to push hype/price updates.
    /// In production this is the streaming-metrics oracle service.
    pub oracle: Pubkey,

    /// Collateral token mint all pools trade against (6 decimals)
    pub collateral_mint: Pubkey,

    /// Total assets published so far
    pub asset_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Whether trading is paused
    pub paused: bool,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";
}
