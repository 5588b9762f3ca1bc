//! Declarative description of every escrow instruction.
//!
//! Each instruction is one [`InstructionSchema`]: its discriminator byte and
//! the ordered account table the program expects. Encoders in
//! [`crate::instruction`] never list accounts by hand, they zip caller keys
//! against these tables, so regenerating from the program's IDL only means
//! regenerating this file.

use {
    crate::error::EscrowError,
    solana_program::{instruction::AccountMeta, pubkey::Pubkey},
};

/// Access flags of one account slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountSpec {
    /// Slot name, as the program's IDL calls it
    pub name: &'static str,
    /// Whether the program writes to the account
    pub writable: bool,
    /// Whether the account must sign the transaction
    pub signer: bool,
}

impl AccountSpec {
    const fn new(name: &'static str, writable: bool, signer: bool) -> Self {
        Self {
            name,
            writable,
            signer,
        }
    }

    /// `[]` slot
    pub const fn readonly(name: &'static str) -> Self {
        Self::new(name, false, false)
    }

    /// `[w]` slot
    pub const fn writable(name: &'static str) -> Self {
        Self::new(name, true, false)
    }

    /// `[s]` slot
    pub const fn signer(name: &'static str) -> Self {
        Self::new(name, false, true)
    }

    /// `[w, s]` slot
    pub const fn writable_signer(name: &'static str) -> Self {
        Self::new(name, true, true)
    }

    /// Account meta for `pubkey` placed in this slot
    pub fn meta(&self, pubkey: Pubkey) -> AccountMeta {
        if self.writable {
            AccountMeta::new(pubkey, self.signer)
        } else {
            AccountMeta::new_readonly(pubkey, self.signer)
        }
    }
}

/// Wire description of one instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionSchema {
    /// Instruction name
    pub name: &'static str,
    /// First byte of the instruction data
    pub discriminator: u8,
    /// Accounts in the order the program reads them
    pub accounts: &'static [AccountSpec],
}

impl InstructionSchema {
    /// Zip `keys` against the account table
    pub fn account_metas(&self, keys: &[Pubkey]) -> Result<Vec<AccountMeta>, EscrowError> {
        if keys.len() != self.accounts.len() {
            return Err(EscrowError::AccountCountMismatch);
        }
        Ok(self
            .accounts
            .iter()
            .zip(keys)
            .map(|(spec, key)| spec.meta(*key))
            .collect())
    }

    /// Position of the slot called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.accounts.iter().position(|spec| spec.name == name)
    }
}

/// `CreateEscrowAccount`
pub const CREATE_ESCROW_ACCOUNT: InstructionSchema = InstructionSchema {
    name: "CreateEscrowAccount",
    discriminator: 38,
    accounts: &[
        AccountSpec::writable("escrow"),
        AccountSpec::writable("metadata"),
        AccountSpec::readonly("mint"),
        AccountSpec::readonly("edition"),
        AccountSpec::writable_signer("payer"),
        AccountSpec::readonly("system_program"),
    ],
};

/// `CloseEscrowAccount`
pub const CLOSE_ESCROW_ACCOUNT: InstructionSchema = InstructionSchema {
    name: "CloseEscrowAccount",
    discriminator: 39,
    accounts: &[
        AccountSpec::writable("escrow"),
        AccountSpec::writable("metadata"),
        AccountSpec::readonly("mint"),
        AccountSpec::readonly("token_account"),
        AccountSpec::readonly("edition"),
        AccountSpec::writable_signer("payer"),
        AccountSpec::readonly("system_program"),
    ],
};

/// `TransferOutOfEscrow`
pub const TRANSFER_OUT_OF_ESCROW: InstructionSchema = InstructionSchema {
    name: "TransferOutOfEscrow",
    discriminator: 40,
    accounts: &[
        AccountSpec::readonly("escrow"),
        AccountSpec::writable("metadata"),
        AccountSpec::writable_signer("payer"),
        AccountSpec::readonly("attribute_mint"),
        AccountSpec::writable("attribute_src"),
        AccountSpec::writable("attribute_dst"),
        AccountSpec::readonly("escrow_mint"),
        AccountSpec::readonly("escrow_account"),
        AccountSpec::readonly("system_program"),
        AccountSpec::readonly("ata_program"),
        AccountSpec::readonly("token_program"),
        AccountSpec::readonly("sysvar_instructions"),
    ],
};

/// `TransferIntoEscrow`
pub const TRANSFER_INTO_ESCROW: InstructionSchema = InstructionSchema {
    name: "TransferIntoEscrow",
    discriminator: 41,
    accounts: &[
        AccountSpec::writable("escrow"),
        AccountSpec::writable_signer("payer"),
        AccountSpec::readonly("attribute_mint"),
        AccountSpec::writable("attribute_src"),
        AccountSpec::writable("attribute_dst"),
        AccountSpec::readonly("attribute_metadata"),
        AccountSpec::readonly("escrow_mint"),
        AccountSpec::readonly("escrow_account"),
        AccountSpec::readonly("constraint_model"),
        AccountSpec::readonly("system_program"),
        AccountSpec::readonly("ata_program"),
        AccountSpec::readonly("token_program"),
        AccountSpec::readonly("rent"),
    ],
};

/// `CreateEscrowConstraintModelAccount`
pub const CREATE_ESCROW_CONSTRAINT_MODEL_ACCOUNT: InstructionSchema = InstructionSchema {
    name: "CreateEscrowConstraintModelAccount",
    discriminator: 42,
    accounts: &[
        AccountSpec::writable("escrow_constraint_model"),
        AccountSpec::writable_signer("payer"),
        AccountSpec::signer("update_authority"),
        AccountSpec::readonly("system_program"),
    ],
};

/// `AddConstraintToEscrowConstraintModel`
pub const ADD_CONSTRAINT_TO_ESCROW_CONSTRAINT_MODEL: InstructionSchema = InstructionSchema {
    name: "AddConstraintToEscrowConstraintModel",
    discriminator: 43,
    accounts: &[
        AccountSpec::writable("escrow_constraint_model"),
        AccountSpec::writable_signer("payer"),
        AccountSpec::signer("update_authority"),
        AccountSpec::readonly("system_program"),
    ],
};

/// Every escrow instruction, ordered by discriminator
pub const SCHEMAS: [&InstructionSchema; 6] = [
    &CREATE_ESCROW_ACCOUNT,
    &CLOSE_ESCROW_ACCOUNT,
    &TRANSFER_OUT_OF_ESCROW,
    &TRANSFER_INTO_ESCROW,
    &CREATE_ESCROW_CONSTRAINT_MODEL_ACCOUNT,
    &ADD_CONSTRAINT_TO_ESCROW_CONSTRAINT_MODEL,
];

/// Look up the schema owning `discriminator`
pub fn schema_for(discriminator: u8) -> Option<&'static InstructionSchema> {
    SCHEMAS
        .iter()
        .copied()
        .find(|schema| schema.discriminator == discriminator)
}
