//! Hype/Price Updates
//!
//! The oracle service watches streaming metrics off chain and periodically
//! reposts each asset's price and hype multiplier. Updates carry the
//! ledger round they were computed at; rounds are totally ordered and a
//! stale round is rejected without touching the record.

use anchor_lang::prelude::*;

use crate::state::{Asset, Config};

/// Event emitted when an asset's hype data is reposted
#[event]
pub struct HypePriceUpdated {
    pub asset_id: u64,
    pub hype_factor: u64,
    pub price: u64,
    pub stream_value: u64,
    pub round: u64,
}

/// Accounts for an oracle hype update
#[derive(Accounts)]
pub struct SetHypePrice<'info> {
    /// Oracle authorized to push updates
    #[account(
        constraint = oracle.key() == config.oracle @ HypeError::Unauthorized,
    )]
    pub oracle: Signer<'info>,

    /// Marketplace configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Asset being updated
    #[account(mut)]
    pub asset: Account<'info, Asset>,
}

impl<'info> SetHypePrice<'info> {
    pub fn set_hype_price(
        &mut self,
        hype_factor: u64,
        new_price: u64,
        new_stream_value: u64,
        current_round: u64,
    ) -> Result<()> {
        self.asset
            .record_hype_update(hype_factor, new_price, new_stream_value, current_round)?;

        emit!(HypePriceUpdated {
            asset_id: self.asset.id,
            hype_factor,
            price: new_price,
            stream_value: new_stream_value,
            round: current_round,
        });

        msg!(
            "Asset {} hype update: factor {}, price {}, round {}",
            self.asset.id,
            hype_factor,
            new_price,
            current_round
        );

        Ok(())
    }
}

#[error_code]
pub enum HypeError {
    #[msg("Only the configured oracle can push hype updates")]
    Unauthorized,
}
