//! State accounts for the movie-share marketplace

pub mod asset;
pub mod config;
pub mod royalty;

pub use asset::*;
pub use config::*;
pub use royalty::*;
