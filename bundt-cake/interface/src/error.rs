//! Interface error types

use {
    num_derive::FromPrimitive,
    solana_program::{
        decode_error::DecodeError,
        msg,
        program_error::{PrintProgramError, ProgramError},
    },
    thiserror::Error,
};

/// Errors that may be returned while building or decoding escrow instructions.
#[repr(u32)]
#[derive(Clone, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum EscrowError {
    /// Instruction discriminator is not part of the escrow interface
    #[error("Unknown escrow instruction")]
    UnknownInstruction = 0x0e5c_0000,
    /// Instruction arguments could not be deserialized
    #[error("Malformed escrow instruction data")]
    InvalidInstructionData,
    /// Number of account keys does not match the instruction schema
    #[error("Incorrect number of accounts for escrow instruction")]
    AccountCountMismatch,
    /// Name does not fit in a PDA seed
    #[error("Escrow name is too long")]
    NameTooLong,
}

impl From<EscrowError> for ProgramError {
    fn from(e: EscrowError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for EscrowError {
    fn type_of() -> &'static str {
        "EscrowError"
    }
}

impl PrintProgramError for EscrowError {
    fn print<E>(&self)
    where
        E: 'static
            + std::error::Error
            + DecodeError<E>
            + PrintProgramError
            + num_traits::FromPrimitive,
    {
        match self {
            EscrowError::UnknownInstruction => msg!("Unknown escrow instruction"),
            EscrowError::InvalidInstructionData => msg!("Malformed escrow instruction data"),
            EscrowError::AccountCountMismatch => {
                msg!("Incorrect number of accounts for escrow instruction")
            }
            EscrowError::NameTooLong => msg!("Escrow name is too long"),
        }
    }
}
