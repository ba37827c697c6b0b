//! Movie-Share Asset State
//!
//! One account per published movie. Holds the liquidity pools, the posted
//! price, the externally-fed hype data and the royalty accrual counters.
//!
//! The liquidity- and price-mutating transitions live here as pure methods
//! so they can be unit tested without token accounts; the instruction
//! handlers only wire them to CPI transfers. Every method validates fully
//! before the first write, so a failed call leaves the record untouched.

use anchor_lang::prelude::*;

use crate::curve::{pro_rata, split_payment, PaymentSplit, StepCurve};

/// Decimals of every share mint, matching the collateral mint.
pub const SHARE_DECIMALS: u8 = 6;

/// Errors raised by asset state transitions
#[error_code]
pub enum AssetError {
    #[msg("Quantity must be positive")]
    InvalidAmount,
    #[msg("Pool cannot cover the requested quantity")]
    InsufficientLiquidity,
    #[msg("Payment does not cover the quoted cost")]
    InsufficientPayment,
    #[msg("Update round is older than the last recorded round")]
    StaleRound,
    #[msg("Already claimed for the current accrual epoch")]
    AlreadyClaimed,
    #[msg("No royalty due for this balance")]
    NothingToClaim,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Settlement figures for one buy
#[derive(Debug)]
pub struct SettledBuy {
    /// Quoted cost the payment was checked against
    pub cost: u64,
    /// How the payment was distributed
    pub split: PaymentSplit,
}

/// Published movie-share asset
///
/// Seeds: ["asset", id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Asset {
    /// Externally assigned marketplace identifier
    pub id: u64,

    /// Royalty-credited creator of the movie
    pub publisher: Pubkey,

    /// Movie title
    #[max_len(64)]
    pub name: String,

    /// Ticker for the share token
    #[max_len(8)]
    pub symbol: String,

    /// The fungible share token
    pub share_mint: Pubkey,

    /// Total tradable units, fixed at creation
    pub total_supply: u64,

    /// Collateral held by the pool to back sells
    pub reserve_liquidity: u64,

    /// Shares remaining in the pool
    pub share_liquidity: u64,

    /// Per-unit price set at publish time
    pub base_price: u64,

    /// Current posted per-unit price
    pub price: u64,

    /// Externally set demand multiplier, >= 1
    pub hype_factor: u64,

    /// Last engagement metric reported by the oracle
    pub last_stream_value: u64,

    /// Round the last oracle update was recorded at; never decreases
    pub last_update_round: u64,

    /// Collateral accrued for holders, not yet claimed
    pub royalty_pool: u64,

    /// Bumped whenever new royalties accrue; claims are idempotent per epoch
    pub royalty_epoch: u64,

    /// Whether the vaults were funded and trading is open
    pub funded: bool,

    /// Unix timestamp of publication
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Asset {
    pub const SEED: &'static [u8] = b"asset";

    /// Price a buyer pays per unit right now (posted price times hype).
    pub fn spot_price(&self) -> u64 {
        self.price.saturating_mul(self.hype_factor)
    }

    /// Settle a buy of `units` shares against `payment` collateral.
    ///
    /// Checks the quote and the pool, then applies the 80/10/10 split:
    /// the reserve tranche joins `reserve_liquidity`, the royalty tranche
    /// joins `royalty_pool` (opening a new claim epoch), the publisher
    /// tranche passes through. The posted price steps up afterwards.
    pub fn settle_buy(&mut self, units: u64, payment: u64) -> Result<SettledBuy> {
        require!(units > 0, AssetError::InvalidAmount);
        require!(self.share_liquidity >= units, AssetError::InsufficientLiquidity);

        let cost = StepCurve::buy_cost(self.price, self.hype_factor, units)?;
        require!(payment >= cost, AssetError::InsufficientPayment);

        let split = split_payment(payment);
        let reserve = self
            .reserve_liquidity
            .checked_add(split.reserve)
            .ok_or(AssetError::Overflow)?;
        let royalty = self
            .royalty_pool
            .checked_add(split.royalty)
            .ok_or(AssetError::Overflow)?;

        self.share_liquidity -= units;
        self.reserve_liquidity = reserve;
        self.royalty_pool = royalty;
        if split.royalty > 0 {
            self.royalty_epoch = self
                .royalty_epoch
                .checked_add(1)
                .ok_or(AssetError::Overflow)?;
        }
        self.price = StepCurve::step_up(self.price);

        Ok(SettledBuy { cost, split })
    }

    /// Settle a sell of `units` shares, returning the collateral proceeds.
    ///
    /// Shares re-entering the pool may never exceed `total_supply`, and the
    /// reserve must cover the quote in full. The posted price steps down.
    pub fn settle_sell(&mut self, units: u64) -> Result<u64> {
        require!(units > 0, AssetError::InvalidAmount);

        let restored = self
            .share_liquidity
            .checked_add(units)
            .ok_or(AssetError::Overflow)?;
        require!(restored <= self.total_supply, AssetError::InvalidAmount);

        let (proceeds, new_price) = StepCurve::sell_proceeds(self.price, units)?;
        require!(
            self.reserve_liquidity >= proceeds,
            AssetError::InsufficientLiquidity
        );

        self.share_liquidity = restored;
        self.reserve_liquidity -= proceeds;
        self.price = new_price;

        Ok(proceeds)
    }

    /// Record an oracle hype/price update.
    ///
    /// Rounds are totally ordered: an update carrying a round older than
    /// the last recorded one is rejected and nothing changes.
    pub fn record_hype_update(
        &mut self,
        hype_factor: u64,
        new_price: u64,
        stream_value: u64,
        current_round: u64,
    ) -> Result<()> {
        require!(hype_factor >= 1, AssetError::InvalidAmount);
        require!(new_price >= 1, AssetError::InvalidAmount);
        require!(
            current_round >= self.last_update_round,
            AssetError::StaleRound
        );

        self.hype_factor = hype_factor;
        self.price = new_price;
        self.last_stream_value = stream_value;
        self.last_update_round = current_round;

        Ok(())
    }

    /// Pro-rata royalty owed to a holder of `holder_balance` shares.
    pub fn royalty_due(&self, holder_balance: u64) -> Result<u64> {
        pro_rata(self.royalty_pool, holder_balance, self.total_supply)
    }

    /// Settle a royalty claim for a holder of `holder_balance` shares whose
    /// position was last stamped at `last_claimed_epoch`.
    ///
    /// One claim per accrual epoch: a holder who already claimed against
    /// the current epoch is rejected with `AlreadyClaimed`, and a claim
    /// before any royalty ever accrued (or for a zero share) pays nothing
    /// and fails `NothingToClaim`. On success the payout is deducted from
    /// the pool and the caller stamps the position at `royalty_epoch`.
    pub fn settle_royalty_claim(
        &mut self,
        last_claimed_epoch: u64,
        holder_balance: u64,
    ) -> Result<u64> {
        require!(self.royalty_epoch > 0, AssetError::NothingToClaim);
        require!(
            last_claimed_epoch < self.royalty_epoch,
            AssetError::AlreadyClaimed
        );

        let payout = self.royalty_due(holder_balance)?;
        require!(payout > 0, AssetError::NothingToClaim);

        self.royalty_pool = self
            .royalty_pool
            .checked_sub(payout)
            .ok_or(AssetError::Overflow)?;

        Ok(payout)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn freshly_funded(total_supply: u64, base_price: u64, reserve_seed: u64) -> Asset {
        Asset {
            id: 7,
            publisher: Pubkey::new_unique(),
            name: "Meridian Nights".to_string(),
            symbol: "MRDN".to_string(),
            share_mint: Pubkey::new_unique(),
            total_supply,
            reserve_liquidity: reserve_seed,
            share_liquidity: total_supply,
            base_price,
            price: base_price,
            hype_factor: 1,
            last_stream_value: 0,
            last_update_round: 0,
            royalty_pool: 0,
            royalty_epoch: 0,
            funded: true,
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn first_buy_charges_base_price_and_drains_pool() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);

        let settled = asset.settle_buy(1_000, 100_000_000).unwrap();

        assert_eq!(settled.cost, 1_000 * 100_000);
        assert_eq!(asset.share_liquidity, 999_000);
        assert_eq!(asset.reserve_liquidity, 80_000_000);
        assert_eq!(asset.royalty_pool, 10_000_000);
        assert_eq!(asset.royalty_epoch, 1);
        assert_eq!(asset.price, 101_000);
    }

    #[test]
    fn buy_rejects_short_payment() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        let before_price = asset.price;

        let err = asset.settle_buy(1_000, 99_999_999).unwrap_err();

        assert_eq!(err, AssetError::InsufficientPayment.into());
        assert_eq!(asset.share_liquidity, 1_000_000);
        assert_eq!(asset.reserve_liquidity, 0);
        assert_eq!(asset.price, before_price);
    }

    #[test]
    fn buy_bigger_than_pool_fails_and_leaves_liquidity_untouched() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.share_liquidity = 500;

        let err = asset.settle_buy(501, u64::MAX).unwrap_err();

        assert_eq!(err, AssetError::InsufficientLiquidity.into());
        assert_eq!(asset.share_liquidity, 500);
        assert_eq!(asset.reserve_liquidity, 0);
        assert_eq!(asset.royalty_pool, 0);
    }

    #[test]
    fn buy_rejects_zero_units() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        let err = asset.settle_buy(0, 1_000_000).unwrap_err();
        assert_eq!(err, AssetError::InvalidAmount.into());
    }

    #[test]
    fn hype_scales_the_quote() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.hype_factor = 3;

        assert_eq!(asset.spot_price(), 300_000);
        let err = asset.settle_buy(10, 2_999_999).unwrap_err();
        assert_eq!(err, AssetError::InsufficientPayment.into());

        let settled = asset.settle_buy(10, 3_000_000).unwrap();
        assert_eq!(settled.cost, 3_000_000);
    }

    #[test]
    fn sell_pays_from_reserve_and_steps_down() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.settle_buy(1_000, 100_000_000).unwrap();

        // price is 101_000; sell quotes at 99_990
        let proceeds = asset.settle_sell(500).unwrap();

        assert_eq!(proceeds, 500 * 99_990);
        assert_eq!(asset.price, 99_990);
        assert_eq!(asset.share_liquidity, 999_500);
        assert_eq!(asset.reserve_liquidity, 80_000_000 - proceeds);
    }

    #[test]
    fn sell_cannot_exceed_total_supply() {
        let mut asset = freshly_funded(1_000, 100_000, u64::MAX);

        let err = asset.settle_sell(1).unwrap_err();

        assert_eq!(err, AssetError::InvalidAmount.into());
        assert_eq!(asset.share_liquidity, 1_000);
    }

    #[test]
    fn sell_fails_when_reserve_cannot_cover() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.share_liquidity = 999_000;

        let err = asset.settle_sell(1_000).unwrap_err();

        assert_eq!(err, AssetError::InsufficientLiquidity.into());
        assert_eq!(asset.share_liquidity, 999_000);
        assert_eq!(asset.reserve_liquidity, 0);
    }

    #[test]
    fn round_trip_never_nets_a_gain() {
        let mut asset = freshly_funded(1_000_000, 100_000, 1_000_000_000_000);

        let settled = asset.settle_buy(1_000, 100_000_000).unwrap();
        let proceeds = asset.settle_sell(1_000).unwrap();

        assert!(proceeds <= settled.cost);
        assert_eq!(asset.share_liquidity, 1_000_000);
    }

    #[test]
    fn price_survives_a_long_sell_off() {
        let mut asset = freshly_funded(1_000_000, 100, u64::MAX / 2);
        asset.share_liquidity = 900_000;

        for _ in 0..2_000 {
            asset.settle_sell(1).unwrap();
        }

        assert!(asset.price >= 1);
        assert!(asset.share_liquidity > 0);
        assert!(asset.spot_price() > 0);
    }

    #[test]
    fn stale_round_is_rejected_without_side_effects() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.record_hype_update(5, 200_000, 9_000, 40).unwrap();

        let err = asset.record_hype_update(9, 50_000, 1, 39).unwrap_err();

        assert_eq!(err, AssetError::StaleRound.into());
        assert_eq!(asset.hype_factor, 5);
        assert_eq!(asset.price, 200_000);
        assert_eq!(asset.last_stream_value, 9_000);
        assert_eq!(asset.last_update_round, 40);
    }

    #[test]
    fn equal_round_updates_are_accepted() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.record_hype_update(2, 150_000, 100, 40).unwrap();
        asset.record_hype_update(3, 160_000, 120, 40).unwrap();

        assert_eq!(asset.hype_factor, 3);
        assert_eq!(asset.last_update_round, 40);
    }

    #[test]
    fn hype_update_rejects_zeroed_price_or_factor() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);

        assert!(asset.record_hype_update(0, 100_000, 0, 1).is_err());
        assert!(asset.record_hype_update(1, 0, 0, 1).is_err());
        assert_eq!(asset.price, 100_000);
        assert_eq!(asset.hype_factor, 1);
    }

    #[test]
    fn royalty_is_pro_rata_and_drains_the_pool() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.settle_buy(1_000, 100_000_000).unwrap();
        assert_eq!(asset.royalty_pool, 10_000_000);

        // Holder owns the 1_000 units just bought: 0.1% of supply.
        let payout = asset.settle_royalty_claim(0, 1_000).unwrap();
        assert_eq!(payout, 10_000);
        assert_eq!(asset.royalty_pool, 9_990_000);
    }

    #[test]
    fn second_claim_against_the_same_epoch_is_rejected() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.settle_buy(1_000, 100_000_000).unwrap();
        assert_eq!(asset.royalty_epoch, 1);

        let first = asset.settle_royalty_claim(0, 1_000).unwrap();
        assert_eq!(first, 10_000);

        // Position is now stamped at epoch 1; same snapshot again.
        let err = asset.settle_royalty_claim(1, 1_000).unwrap_err();
        assert_eq!(err, AssetError::AlreadyClaimed.into());
        assert_eq!(asset.royalty_pool, 9_990_000);

        // A fresh buy opens epoch 2 and the same holder can claim again.
        let settled = asset.settle_buy(1_000, 101_000_000).unwrap();
        assert_eq!(settled.cost, 101_000_000);
        assert_eq!(asset.royalty_epoch, 2);

        let second = asset.settle_royalty_claim(1, 2_000).unwrap();
        assert!(second > 0);
        assert_eq!(asset.royalty_pool, 9_990_000 + 10_100_000 - second);
    }

    #[test]
    fn claim_before_any_accrual_is_nothing_to_claim() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        assert_eq!(asset.royalty_epoch, 0);

        let err = asset.settle_royalty_claim(0, 1_000).unwrap_err();

        assert_eq!(err, AssetError::NothingToClaim.into());
        assert_eq!(asset.royalty_pool, 0);
    }

    #[test]
    fn claim_with_zero_balance_pays_nothing() {
        let mut asset = freshly_funded(1_000_000, 100_000, 0);
        asset.settle_buy(1_000, 100_000_000).unwrap();

        let err = asset.settle_royalty_claim(0, 0).unwrap_err();

        assert_eq!(err, AssetError::NothingToClaim.into());
        assert_eq!(asset.royalty_pool, 10_000_000);
    }
}
