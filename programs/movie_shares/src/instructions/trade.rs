//! Share Trading
//!
//! Buying and selling movie shares against an asset's liquidity pool,
//! priced by the hype-weighted step curve.
//!
//! A buy moves the payment out of the trader in two legs (pool tranche to
//! the vault, publisher tranche straight to the publisher) and releases
//! shares from the pool. A sell returns shares to the pool and pays the
//! quoted proceeds from the reserve. All state checks happen before the
//! first transfer, so a rejected trade moves nothing.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::state::{Asset, AssetError, Config};

/// Event emitted when shares are bought
#[event]
pub struct SharesBought {
    pub asset_id: u64,
    pub buyer: Pubkey,
    pub units: u64,
    pub cost: u64,
    pub payment: u64,
}

/// Event emitted when shares are sold
#[event]
pub struct SharesSold {
    pub asset_id: u64,
    pub seller: Pubkey,
    pub units: u64,
    pub proceeds: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Marketplace configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Asset being traded
    #[account(
        mut,
        has_one = share_mint,
        constraint = asset.funded @ TradeError::AssetNotFunded,
    )]
    pub asset: Account<'info, Asset>,

    /// Share token mint
    pub share_mint: InterfaceAccount<'info, Mint>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == config.collateral_mint,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: receives the publisher tranche; pinned to the asset record
    #[account(address = asset.publisher)]
    pub publisher: UncheckedAccount<'info>,

    /// Publisher's collateral account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = collateral_mint,
        associated_token::authority = publisher,
    )]
    pub publisher_collateral: InterfaceAccount<'info, TokenAccount>,

    /// Trader's collateral account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = trader,
    )]
    pub trader_collateral: InterfaceAccount<'info, TokenAccount>,

    /// Trader's share token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = share_mint,
        associated_token::authority = trader,
    )]
    pub trader_shares: InterfaceAccount<'info, TokenAccount>,

    /// Pool vault holding the tradable shares
    #[account(
        mut,
        associated_token::mint = share_mint,
        associated_token::authority = asset,
    )]
    pub share_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool vault holding reserve collateral and the royalty pool
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = asset,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy `units` shares for `payment` collateral
    pub fn buy(&mut self, units: u64, payment: u64) -> Result<u64> {
        require!(!self.config.paused, TradeError::ProtocolPaused);

        let settled = self.asset.settle_buy(units, payment)?;

        // Pool tranche: reserve plus royalty accrual stay in the vault
        let pool_in = settled
            .split
            .reserve
            .checked_add(settled.split.royalty)
            .ok_or(AssetError::Overflow)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            pool_in,
            self.collateral_mint.decimals,
        )?;

        if settled.split.publisher > 0 {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.trader_collateral.to_account_info(),
                        mint: self.collateral_mint.to_account_info(),
                        to: self.publisher_collateral.to_account_info(),
                        authority: self.trader.to_account_info(),
                    },
                ),
                settled.split.publisher,
                self.collateral_mint.decimals,
            )?;
        }

        // Release the shares from the pool
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
                    from: self.share_vault.to_account_info(),
                    mint: self.share_mint.to_account_info(),
                    to: self.trader_shares.to_account_info(),
                    authority: self.asset.to_account_info(),
                },
                asset_signer,
            ),
            units,
            self.share_mint.decimals,
        )?;

        emit!(SharesBought {
            asset_id: self.asset.id,
            buyer: self.trader.key(),
            units,
            cost: settled.cost,
            payment,
        });

        Ok(units)
    }

    /// Sell `units` shares back to the pool
    pub fn sell(&mut self, units: u64) -> Result<u64> {
        require!(!self.config.paused, TradeError::ProtocolPaused);

        let proceeds = self.asset.settle_sell(units)?;

        // Return the shares to the pool
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_shares.to_account_info(),
                    mint: self.share_mint.to_account_info(),
                    to: self.share_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            units,
            self.share_mint.decimals,
        )?;

        // Pay out of the reserve
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
                    to: self.trader_collateral.to_account_info(),
                    authority: self.asset.to_account_info(),
                },
                asset_signer,
            ),
            proceeds,
            self.collateral_mint.decimals,
        )?;

        emit!(SharesSold {
            asset_id: self.asset.id,
            seller: self.trader.key(),
            units,
            proceeds,
        });

        Ok(proceeds)
    }
}

#[error_code]
pub enum TradeError {
    #[msg("Asset pools have not been funded yet")]
    AssetNotFunded,
    #[msg("Marketplace is paused")]
    ProtocolPaused,
}
