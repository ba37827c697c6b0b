//! Royalty Claims
//!
//! Ten percent of every buy payment accrues to the asset's royalty pool.
//! Holders draw a pro-rata share of the pool:
//!
//! ```text
//! payout = royalty_pool * holder_balance / total_supply
//! ```
//!
//! The balance snapshot is the holder's share account at claim time; it is
//! read on chain rather than trusted from the caller. Claims are idempotent
//! per accrual epoch: the position account remembers the newest epoch
//! claimed against, and a repeat claim before new royalties accrue is
//! rejected outright.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::state::{Asset, Config, RoyaltyPosition};

/// Event emitted when a royalty share is paid out
#[event]
pub struct RoyaltyClaimed {
    pub asset_id: u64,
    pub holder: Pubkey,
    pub holder_balance: u64,
    pub payout: u64,
    pub epoch: u64,
}

/// Accounts for a royalty claim
#[derive(Accounts)]
pub struct ClaimRoyalty<'info> {
    /// Share holder claiming their royalty
    #[account(mut)]
    pub holder: Signer<'info>,

    /// Marketplace configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Asset whose royalty pool is drawn on
    #[account(
        mut,
        has_one = share_mint,
        constraint = asset.funded @ RoyaltyError::AssetNotFunded,
    )]
    pub asset: Account<'info, Asset>,

    /// Share token mint
    pub share_mint: InterfaceAccount<'info, Mint>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == config.collateral_mint,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Holder's share account; its balance is the claim snapshot
    #[account(
        associated_token::mint = share_mint,
        associated_token::authority = holder,
    )]
    pub holder_shares: InterfaceAccount<'info, TokenAccount>,

    /// Holder's collateral account receiving the payout
    #[account(
        init_if_needed,
        payer = holder,
        associated_token::mint = collateral_mint,
        associated_token::authority = holder,
    )]
    pub holder_collateral: InterfaceAccount<'info, TokenAccount>,

    /// Pool vault the payout is drawn from
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = asset,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Claim bookkeeping for this (asset, holder) pair
    #[account(
        init_if_needed,
        payer = holder,
        space = 8 + RoyaltyPosition::INIT_SPACE,
        seeds = [RoyaltyPosition::SEED, asset.key().as_ref(), holder.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, RoyaltyPosition>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> ClaimRoyalty<'info> {
    /// Pay the holder their pro-rata royalty share
    pub fn claim_royalty(&mut self, bumps: &ClaimRoyaltyBumps) -> Result<u64> {
        let holder_balance = self.holder_shares.amount;
        let payout = self
            .asset
            .settle_royalty_claim(self.position.last_claim_epoch, holder_balance)?;

        // Stamp the position before any funds move
        self.position.set_inner(RoyaltyPosition {
            asset: self.asset.key(),
            holder: self.holder.key(),
            last_claim_epoch: self.asset.royalty_epoch,
            bump: bumps.position,
        });

        let asset_seeds = &[
            Asset::SEED,
            &self.asset.id.to_le_bytes(),
            &[self.asset.bump],
        ];
        let asset_signer = &[&asset_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.holder_collateral.to_account_info(),
                    authority: self.asset.to_account_info(),
                },
                asset_signer,
            ),
            payout,
            self.collateral_mint.decimals,
        )?;

        emit!(RoyaltyClaimed {
            asset_id: self.asset.id,
            holder: self.holder.key(),
            holder_balance,
            payout,
            epoch: self.asset.royalty_epoch,
        });

        Ok(payout)
    }
}

#[error_code]
pub enum RoyaltyError {
    #[msg("Asset pools have not been funded yet")]
    AssetNotFunded,
}
