//! # Hype-Weighted Step Curve
//!
//! Pricing model for movie-share pools.
//!
//! ## The posted price
//!
//! Each asset carries a single posted per-unit price. A trade settles the
//! whole requested quantity at that price, then nudges the posting:
//!
//! ```text
//! buy cost      = price * units * hype_factor
//! after a buy   : price -> price + price / 100      (up 1%)
//!
//! sell proceeds = step_down(price) * units
//! after a sell  : price -> step_down(price)
//! step_down(p)  = max(p - p / 100, 1)               (down 1%, floored at 1)
//! ```
//!
//! The posted price therefore rises monotonically with cumulative net
//! buying and falls with net selling, but can never reach zero. Quoting a
//! sale at the already-stepped-down price means a buy immediately followed
//! by a sell of the same units settles at `0.99 * 1.01 * price < price`,
//! so a round trip always loses the spread and never mints free collateral.
//!
//! ## The payment split
//!
//! Every buy payment is divided three ways:
//!
//! ```text
//! 80%  -> reserve liquidity (backs future sells)
//! 10%  -> royalty pool (distributable to share holders)
//! 10%  -> the publisher, paid out immediately
//! ```
//!
//! Integer division remainders land in the publisher tranche, so the three
//! parts always sum to the exact payment.

use anchor_lang::prelude::*;

/// Errors raised by the pure pricing math
#[error_code]
pub enum CurveError {
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Quantity must be positive")]
    ZeroQuantity,
    #[msg("Supply must be positive")]
    ZeroSupply,
}

/// Post-trade price adjustment, in percent of the posted price.
pub const PRICE_STEP_PCT: u128 = 1;

/// The posted price never drops below one base unit of collateral.
pub const PRICE_FLOOR: u64 = 1;

/// Share of a buy payment kept as reserve liquidity, in percent.
pub const RESERVE_SHARE_PCT: u128 = 80;

/// Share of a buy payment accrued to the royalty pool, in percent.
pub const ROYALTY_SHARE_PCT: u128 = 10;

/// How a buy payment is distributed. All three parts sum to the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSplit {
    /// Retained in the pool to back future sells.
    pub reserve: u64,
    /// Accrued to the holder royalty pool.
    pub royalty: u64,
    /// Paid straight through to the publisher.
    pub publisher: u64,
}

/// Step-curve quoting for a single asset pool.
pub struct StepCurve;

impl StepCurve {
    /// Collateral a buyer owes for `units` shares at the current posting.
    ///
    /// `cost = price * units * hype_factor`, computed in u128 and rejected
    /// if it does not fit back into the ledger's u64 amounts.
    pub fn buy_cost(price: u64, hype_factor: u64, units: u64) -> Result<u64> {
        require!(units > 0, CurveError::ZeroQuantity);

        let cost = (price as u128)
            .checked_mul(units as u128)
            .ok_or(CurveError::Overflow)?
            .checked_mul(hype_factor as u128)
            .ok_or(CurveError::Overflow)?;

        u64::try_from(cost).map_err(|_| CurveError::Overflow.into())
    }

    /// Collateral released for selling `units` shares.
    ///
    /// Quoted at the stepped-down price, which also becomes the new
    /// posting. The hype factor applies to buys only.
    pub fn sell_proceeds(price: u64, units: u64) -> Result<(u64, u64)> {
        require!(units > 0, CurveError::ZeroQuantity);

        let new_price = Self::step_down(price);
        let proceeds = (new_price as u128)
            .checked_mul(units as u128)
            .ok_or(CurveError::Overflow)?;

        Ok((u64::try_from(proceeds).map_err(|_| CurveError::Overflow)?, new_price))
    }

    /// Posted price after a buy: up one percent.
    pub fn step_up(price: u64) -> u64 {
        let bump = ((price as u128) * PRICE_STEP_PCT / 100) as u64;
        price.saturating_add(bump)
    }

    /// Posted price after a sell: down one percent, never below the floor.
    pub fn step_down(price: u64) -> u64 {
        let cut = ((price as u128) * PRICE_STEP_PCT / 100) as u64;
        (price - cut).max(PRICE_FLOOR)
    }
}

/// Split a buy payment 80/10/10 between reserve, royalty pool and publisher.
///
/// Rounding remainders go to the publisher tranche, matching the exact
/// payment in total.
pub fn split_payment(payment: u64) -> PaymentSplit {
    let reserve = ((payment as u128) * RESERVE_SHARE_PCT / 100) as u64;
    let royalty = ((payment as u128) * ROYALTY_SHARE_PCT / 100) as u64;
    PaymentSplit {
        reserve,
        royalty,
        publisher: payment - reserve - royalty,
    }
}

/// Pro-rata share of `pool` owed to a holder of `balance` out of `supply`.
///
/// `share = pool * balance / supply`, rounded down. With `balance <= supply`
/// the result never exceeds the pool.
pub fn pro_rata(pool: u64, balance: u64, supply: u64) -> Result<u64> {
    require!(supply > 0, CurveError::ZeroSupply);

    let share = (pool as u128)
        .checked_mul(balance as u128)
        .ok_or(CurveError::Overflow)?
        / (supply as u128);

    u64::try_from(share).map_err(|_| CurveError::Overflow.into())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_cost_is_price_times_units_times_hype() {
        let cost = StepCurve::buy_cost(100_000, 1, 1_000).unwrap();
        assert_eq!(cost, 100_000_000);

        let hyped = StepCurve::buy_cost(100_000, 3, 1_000).unwrap();
        assert_eq!(hyped, 300_000_000);
    }

    #[test]
    fn buy_cost_rejects_zero_units() {
        assert!(StepCurve::buy_cost(100_000, 1, 0).is_err());
    }

    #[test]
    fn buy_cost_rejects_overflowing_quotes() {
        assert!(StepCurve::buy_cost(u64::MAX, u64::MAX, u64::MAX).is_err());
        assert!(StepCurve::buy_cost(u64::MAX, 1, 2).is_err());
    }

    #[test]
    fn step_up_adds_one_percent() {
        assert_eq!(StepCurve::step_up(100_000), 101_000);
        // Sub-percent prices round the bump to zero
        assert_eq!(StepCurve::step_up(50), 50);
    }

    #[test]
    fn step_down_never_reaches_zero() {
        assert_eq!(StepCurve::step_down(100_000), 99_000);
        assert_eq!(StepCurve::step_down(1), 1);
        assert_eq!(StepCurve::step_down(0), PRICE_FLOOR);

        let mut price = 100_000u64;
        for _ in 0..10_000 {
            price = StepCurve::step_down(price);
        }
        assert_eq!(price, PRICE_FLOOR);
    }

    #[test]
    fn sell_quotes_at_stepped_down_price() {
        let (proceeds, new_price) = StepCurve::sell_proceeds(101_000, 1_000).unwrap();
        assert_eq!(new_price, 99_990);
        assert_eq!(proceeds, 99_990_000);
    }

    #[test]
    fn round_trip_never_gains() {
        // Buy at the posted price, then immediately sell the same units.
        for price in [1u64, 73, 10_000, 100_000, 5_000_000_000] {
            for units in [1u64, 999, 1_000_000] {
                let cost = StepCurve::buy_cost(price, 1, units).unwrap();
                let after_buy = StepCurve::step_up(price);
                let (proceeds, _) = StepCurve::sell_proceeds(after_buy, units).unwrap();
                assert!(
                    proceeds <= cost,
                    "round trip gained at price {price} units {units}"
                );
            }
        }
    }

    #[test]
    fn split_sums_to_payment() {
        for payment in [0u64, 1, 99, 100, 101, 100_000_000, u64::MAX] {
            let split = split_payment(payment);
            assert_eq!(split.reserve + split.royalty + split.publisher, payment);
            assert!(split.reserve >= split.royalty);
        }

        let split = split_payment(100_000_000);
        assert_eq!(split.reserve, 80_000_000);
        assert_eq!(split.royalty, 10_000_000);
        assert_eq!(split.publisher, 10_000_000);
    }

    #[test]
    fn pro_rata_share_is_proportional() {
        // Holder of 10% of the supply gets 10% of the pool.
        assert_eq!(pro_rata(10_000_000, 100_000, 1_000_000).unwrap(), 1_000_000);
        // Full supply drains the pool exactly.
        assert_eq!(pro_rata(10_000_000, 1_000_000, 1_000_000).unwrap(), 10_000_000);
        // Zero balance claims nothing.
        assert_eq!(pro_rata(10_000_000, 0, 1_000_000).unwrap(), 0);
        // Rounds down.
        assert_eq!(pro_rata(10, 1, 3).unwrap(), 3);
    }

    #[test]
    fn pro_rata_rejects_zero_supply() {
        assert!(pro_rata(10, 1, 0).is_err());
    }
}
