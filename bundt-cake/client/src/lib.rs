//! Client for the token-metadata escrow instructions

pub mod client;
pub mod escrow;

pub use escrow::Escrow;
