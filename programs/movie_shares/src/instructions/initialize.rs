//! Marketplace Initialization
//!
//! Sets up the global configuration for the marketplace.
//! This is typically called once during deployment.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::state::Config;

/// Accounts required for marketplace initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Collateral token mint all pools settle in
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the marketplace configuration
    pub fn initialize(&mut self, oracle: Pubkey, bumps: &InitializeBumps) -> Result<()> {
        self.config.set_inner(Config {
            admin: self.admin.key(),
            oracle,
            collateral_mint: self.collateral_mint.key(),
            asset_count: 0,
            bump: bumps.config,
            paused: false,
        });

        msg!("Marketplace initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Oracle: {}", oracle);

        Ok(())
    }
}
