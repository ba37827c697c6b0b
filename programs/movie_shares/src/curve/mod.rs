//! # Pricing Module
//!
//! Pure math behind the movie-share pools: the hype-weighted step curve
//! that quotes buys and sells, the 80/10/10 payment split, and the
//! pro-rata royalty distribution.
//!
//! Everything here is side-effect free and operates on plain integers so
//! the instruction handlers stay thin and the pricing properties can be
//! unit tested without a ledger.

pub mod step_curve;

pub use step_curve::*;
