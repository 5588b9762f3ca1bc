//! Crate defining the instruction interface for the token-metadata escrow
//! ("Bundt Cake") feature

#![allow(clippy::integer_arithmetic)]
#![deny(missing_docs)]
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod instruction;
pub mod pda;
pub mod schema;
pub mod state;

// Export current sdk types for downstream users building with a different sdk version
pub use solana_program;
// Export borsh for downstream users
pub use borsh;

solana_program::declare_id!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// Seed prefix shared by every token-metadata PDA
pub const PREFIX: &str = "metadata";

/// Seed suffix of master edition accounts
pub const EDITION: &str = "edition";

/// Seed of escrow accounts and escrow constraint models
pub const ESCROW_PREFIX: &str = "escrow";

/// Longest name accepted for an escrow constraint model or constraint.
/// PDA seeds are limited to 32 bytes.
pub const MAX_NAME_LENGTH: usize = 32;
