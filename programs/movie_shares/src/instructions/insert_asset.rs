//! Asset Publication Pipeline
//!
//! Publishing a movie is split into two atomic steps to stay inside
//! Solana's stack budget:
//!
//! Step 1: InsertAsset - Initializes the asset record and the share mint.
//! Step 2: FundAsset   - Creates the vaults, mints the full supply into the
//!         pool and deposits the publisher's collateral seed.
//!
//! Trading is gated on the `funded` flag, so a half-published asset is
//! visible but inert.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::state::{Asset, Config, SHARE_DECIMALS};

/// Event emitted when an asset record is created
#[event]
pub struct AssetInserted {
    pub asset_id: u64,
    pub share_mint: Pubkey,
    pub publisher: Pubkey,
    pub total_supply: u64,
    pub base_price: u64,
}

/// Event emitted when an asset's pools are funded
#[event]
pub struct AssetFunded {
    pub asset_id: u64,
    pub share_liquidity: u64,
    pub reserve_seed: u64,
}

// =============================================================================
// STEP 1: INSERT ASSET
// =============================================================================

#[derive(Accounts)]
#[instruction(id: u64)]
pub struct InsertAsset<'info> {
    #[account(mut)]
    pub publisher: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = publisher,
        space = 8 + Asset::INIT_SPACE,
        seeds = [Asset::SEED, id.to_le_bytes().as_ref()],
        bump,
    )]
    pub asset: Account<'info, Asset>,

    /// Share mint for this movie; the config PDA keeps mint authority
    #[account(
        init,
        payer = publisher,
        mint::decimals = SHARE_DECIMALS,
        mint::authority = config,
        seeds = [b"share_mint", asset.key().as_ref()],
        bump,
    )]
    pub share_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> InsertAsset<'info> {
    pub fn insert_asset(
        &mut self,
        id: u64,
        total_supply: u64,
        base_price: u64,
        name: String,
        symbol: String,
        bumps: &InsertAssetBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        require!(!self.config.paused, InsertAssetError::ProtocolPaused);
        require!(total_supply > 0, InsertAssetError::InvalidAmount);
        require!(base_price > 0, InsertAssetError::InvalidAmount);
        require!(name.len() <= 64, InsertAssetError::NameTooLong);
        require!(symbol.len() <= 8, InsertAssetError::SymbolTooLong);

        self.asset.set_inner(Asset {
            id,
            publisher: self.publisher.key(),
            name,
            symbol,
            share_mint: self.share_mint.key(),
            total_supply,
            reserve_liquidity: 0,
            share_liquidity: total_supply,
            base_price,
            price: base_price,
            hype_factor: 1,
            last_stream_value: 0,
            last_update_round: 0,
            royalty_pool: 0,
            royalty_epoch: 0,
            funded: false,
            created_at: clock.unix_timestamp,
            bump: bumps.asset,
        });

        self.config.asset_count = self
            .config
            .asset_count
            .checked_add(1)
            .ok_or(InsertAssetError::Overflow)?;

        emit!(AssetInserted {
            asset_id: id,
            share_mint: self.share_mint.key(),
            publisher: self.publisher.key(),
            total_supply,
            base_price,
        });

        Ok(())
    }
}

// =============================================================================
// STEP 2: FUND ASSET
// =============================================================================

#[derive(Accounts)]
pub struct FundAsset<'info> {
    #[account(mut)]
    pub publisher: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        has_one = publisher,
        has_one = share_mint,
        constraint = !asset.funded @ InsertAssetError::AlreadyFunded,
    )]
    pub asset: Account<'info, Asset>,

    #[account(mut)]
    pub share_mint: InterfaceAccount<'info, Mint>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Pool vault holding the tradable shares
    #[account(
        init,
        payer = publisher,
        associated_token::mint = share_mint,
        associated_token::authority = asset,
    )]
    pub share_vault: InterfaceAccount<'info, TokenAccount>,

    /// Pool vault holding reserve collateral and the royalty pool
    #[account(
        init,
        payer = publisher,
        associated_token::mint = collateral_mint,
        associated_token::authority = asset,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Publisher's collateral account funding the reserve seed
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = publisher,
    )]
    pub publisher_collateral: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> FundAsset<'info> {
    pub fn fund_asset(&mut self, reserve_seed: u64) -> Result<()> {
        // Mint the entire supply into the pool; buyers draw from it.
        let config_seeds = &[Config::SEED, &[self.config.bump]];
        let signer_seeds = &[&config_seeds[..]];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.share_mint.to_account_info(),
                    to: self.share_vault.to_account_info(),
                    authority: self.config.to_account_info(),
                },
                signer_seeds,
            ),
            self.asset.total_supply,
        )?;

        if reserve_seed > 0 {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.publisher_collateral.to_account_info(),
                        mint: self.collateral_mint.to_account_info(),
                        to: self.vault.to_account_info(),
                        authority: self.publisher.to_account_info(),
                    },
                ),
                reserve_seed,
                self.collateral_mint.decimals,
            )?;
        }

        self.asset.reserve_liquidity = reserve_seed;
        self.asset.funded = true;

        emit!(AssetFunded {
            asset_id: self.asset.id,
            share_liquidity: self.asset.share_liquidity,
            reserve_seed,
        });

        msg!(
            "Asset {} funded: {} shares, {} reserve",
            self.asset.id,
            self.asset.share_liquidity,
            reserve_seed
        );

        Ok(())
    }
}

#[error_code]
pub enum InsertAssetError {
    #[msg("Supply and base price must be positive")]
    InvalidAmount,
    #[msg("Movie name exceeds 64 bytes")]
    NameTooLong,
    #[msg("Ticker symbol exceeds 8 bytes")]
    SymbolTooLong,
    #[msg("Asset pools were already funded")]
    AlreadyFunded,
    #[msg("Marketplace is paused")]
    ProtocolPaused,
    #[msg("Arithmetic overflow")]
    Overflow,
}
