//! Asset Queries
//!
//! Read-only view of an asset record plus its derived spot price,
//! returned through Anchor return data so off-chain clients can simulate
//! the call instead of decoding the raw account. Querying an id that was
//! never published fails account resolution (the NotFound case).

use anchor_lang::prelude::*;

use crate::state::Asset;

/// Snapshot of one asset's pricing and liquidity state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct AssetInfo {
    pub id: u64,
    pub share_mint: Pubkey,
    pub publisher: Pubkey,
    pub total_supply: u64,
    pub reserve_liquidity: u64,
    pub share_liquidity: u64,
    pub base_price: u64,
    pub price: u64,
    /// Posted price times hype factor: what a buyer pays per unit now
    pub spot_price: u64,
    pub hype_factor: u64,
    pub last_stream_value: u64,
    pub last_update_round: u64,
    pub royalty_pool: u64,
    pub funded: bool,
}

/// Accounts for an asset query
#[derive(Accounts)]
pub struct GetAssetInfo<'info> {
    pub asset: Account<'info, Asset>,
}

impl<'info> GetAssetInfo<'info> {
    /// Side-effect-free snapshot of the asset
    pub fn get_asset_info(&self) -> Result<AssetInfo> {
        let asset = &self.asset;
        Ok(AssetInfo {
            id: asset.id,
            share_mint: asset.share_mint,
            publisher: asset.publisher,
            total_supply: asset.total_supply,
            reserve_liquidity: asset.reserve_liquidity,
            share_liquidity: asset.share_liquidity,
            base_price: asset.base_price,
            price: asset.price,
            spot_price: asset.spot_price(),
            hype_factor: asset.hype_factor,
            last_stream_value: asset.last_stream_value,
            last_update_round: asset.last_update_round,
            royalty_pool: asset.royalty_pool,
            funded: asset.funded,
        })
    }
}
