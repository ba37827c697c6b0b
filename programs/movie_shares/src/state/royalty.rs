//! Per-Holder Royalty Claim Tracking
//!
//! Royalties accrue to an asset's pool in epochs (one epoch per buy that
//! lands a royalty tranche). A holder may claim at most once per epoch;
//! this account remembers the newest epoch already claimed against.

use anchor_lang::prelude::*;

/// Claim bookkeeping for one (asset, holder) pair
///
/// Seeds: ["royalty", asset, holder]
#[account]
#[derive(InitSpace)]
pub struct RoyaltyPosition {
    /// The asset this position tracks
    pub asset: Pubkey,

    /// The claiming share holder
    pub holder: Pubkey,

    /// Newest accrual epoch this holder has claimed against
    pub last_claim_epoch: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl RoyaltyPosition {
    pub const SEED: &'static [u8] = b"royalty";
}
