//! Argument and handle types shared by the escrow instructions

use {
    crate::pda::{find_master_edition_address, find_metadata_address},
    borsh::{BorshDeserialize, BorshSerialize},
    solana_program::pubkey::Pubkey,
};

/// Amount moved by a transfer into escrow unless told otherwise
pub const DEFAULT_TRANSFER_AMOUNT: u64 = 1;

/// Constraint slot used by a transfer into escrow unless told otherwise
pub const DEFAULT_CONSTRAINT_INDEX: u64 = 1;

/// Args for the `CreateEscrowConstraintModelAccount` instruction
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct CreateEscrowConstraintModelAccountArgs {
    /// Name of the model, also part of its address seeds
    pub name: String,
}

/// Args for the `AddConstraintToEscrowConstraintModel` instruction
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct AddConstraintToEscrowConstraintModelArgs {
    /// Constraint appended to the model
    pub constraint: EscrowConstraint,
}

/// Args for the `TransferIntoEscrow` instruction
#[derive(Clone, Copy, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct TransferIntoEscrowArgs {
    /// Number of tokens to move into the escrow
    pub amount: u64,
    /// Index of the constraint in the model the deposit is checked against
    pub index: u64,
}

impl Default for TransferIntoEscrowArgs {
    fn default() -> Self {
        Self {
            amount: DEFAULT_TRANSFER_AMOUNT,
            index: DEFAULT_CONSTRAINT_INDEX,
        }
    }
}

/// Args for the `TransferOutOfEscrow` instruction
#[derive(Clone, Copy, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct TransferOutOfEscrowArgs {
    /// Number of tokens to move out of the escrow
    pub amount: u64,
}

/// What a constraint slot accepts
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub enum EscrowConstraintType {
    /// Anything goes
    None,
    /// Only members of the given verified collection
    Collection(Pubkey),
    /// Only the listed mints
    Tokens(Vec<Pubkey>),
}

/// One slot of an escrow constraint model
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct EscrowConstraint {
    /// Human readable slot name
    pub name: String,
    /// Maximum number of tokens the slot may hold
    pub token_limit: u64,
    /// Which tokens are accepted
    pub constraint_type: EscrowConstraintType,
}

/// Addresses identifying an NFT (or semi-fungible token) to token-metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nft {
    /// Mint of the token
    pub mint: Pubkey,
    /// Metadata account of the mint
    pub metadata: Pubkey,
    /// Master edition account of the mint
    pub edition: Pubkey,
}

impl Nft {
    /// Derive the metadata and edition addresses of `mint` under `program_id`
    pub fn from_mint(program_id: &Pubkey, mint: &Pubkey) -> Self {
        Self {
            mint: *mint,
            metadata: find_metadata_address(program_id, mint).0,
            edition: find_master_edition_address(program_id, mint).0,
        }
    }
}
