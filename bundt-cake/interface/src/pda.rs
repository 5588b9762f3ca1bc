//! Program derived addresses used by the escrow instructions

use {
    crate::{EDITION, ESCROW_PREFIX, PREFIX},
    solana_program::pubkey::Pubkey,
    spl_associated_token_account::get_associated_token_address,
};

/// Find the metadata account address of `mint`
pub fn find_metadata_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PREFIX.as_bytes(), &program_id.to_bytes(), &mint.to_bytes()],
        program_id,
    )
}

/// Find the master edition account address of `mint`
pub fn find_master_edition_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            PREFIX.as_bytes(),
            &program_id.to_bytes(),
            &mint.to_bytes(),
            EDITION.as_bytes(),
        ],
        program_id,
    )
}

/// Find the escrow account address attached to the NFT `mint`
pub fn find_escrow_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            PREFIX.as_bytes(),
            &program_id.to_bytes(),
            &mint.to_bytes(),
            ESCROW_PREFIX.as_bytes(),
        ],
        program_id,
    )
}

/// Find the escrow constraint model address created by `update_authority`
/// under `name`
pub fn find_escrow_constraint_model_address(
    program_id: &Pubkey,
    update_authority: &Pubkey,
    name: &str,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            ESCROW_PREFIX.as_bytes(),
            &update_authority.to_bytes(),
            name.as_bytes(),
        ],
        program_id,
    )
}

/// Token account of the escrow holding tokens of `attribute_mint`
pub fn get_escrow_attribute_address(escrow: &Pubkey, attribute_mint: &Pubkey) -> Pubkey {
    get_associated_token_address(escrow, attribute_mint)
}
