//! Instruction types

use {
    crate::{
        error::EscrowError,
        pda::{find_escrow_address, find_escrow_constraint_model_address},
        schema::{self, InstructionSchema},
        state::{
            AddConstraintToEscrowConstraintModelArgs, CreateEscrowConstraintModelAccountArgs,
            EscrowConstraint, Nft, TransferIntoEscrowArgs, TransferOutOfEscrowArgs,
        },
        MAX_NAME_LENGTH,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    solana_program::{
        instruction::Instruction, program_error::ProgramError, pubkey::Pubkey, system_program,
        sysvar,
    },
    spl_associated_token_account::get_associated_token_address,
};

/// Escrow instructions of the token-metadata program.
///
/// Account tables live in [`crate::schema`]; every variant maps to exactly
/// one [`InstructionSchema`].
#[derive(Clone, Debug, PartialEq)]
pub enum EscrowInstruction {
    /// Creates the escrow account attached to an NFT.
    ///
    /// Accounts: see [`schema::CREATE_ESCROW_ACCOUNT`]
    CreateEscrowAccount,

    /// Closes an empty escrow account and returns its rent to the payer.
    ///
    /// Accounts: see [`schema::CLOSE_ESCROW_ACCOUNT`]
    CloseEscrowAccount,

    /// Moves tokens held by an escrow back to the payer.
    ///
    /// Accounts: see [`schema::TRANSFER_OUT_OF_ESCROW`]
    TransferOutOfEscrow(TransferOutOfEscrowArgs),

    /// Moves tokens from the payer into an escrow, checked against one
    /// constraint of the escrow's constraint model.
    ///
    /// Accounts: see [`schema::TRANSFER_INTO_ESCROW`]
    TransferIntoEscrow(TransferIntoEscrowArgs),

    /// Creates an empty, named escrow constraint model.
    ///
    /// Accounts: see [`schema::CREATE_ESCROW_CONSTRAINT_MODEL_ACCOUNT`]
    CreateEscrowConstraintModelAccount(CreateEscrowConstraintModelAccountArgs),

    /// Appends a constraint to an escrow constraint model.
    ///
    /// Accounts: see [`schema::ADD_CONSTRAINT_TO_ESCROW_CONSTRAINT_MODEL`]
    AddConstraintToEscrowConstraintModel(AddConstraintToEscrowConstraintModelArgs),
}

impl EscrowInstruction {
    /// Wire description of this instruction
    pub fn schema(&self) -> &'static InstructionSchema {
        match self {
            Self::CreateEscrowAccount => &schema::CREATE_ESCROW_ACCOUNT,
            Self::CloseEscrowAccount => &schema::CLOSE_ESCROW_ACCOUNT,
            Self::TransferOutOfEscrow(_) => &schema::TRANSFER_OUT_OF_ESCROW,
            Self::TransferIntoEscrow(_) => &schema::TRANSFER_INTO_ESCROW,
            Self::CreateEscrowConstraintModelAccount(_) => {
                &schema::CREATE_ESCROW_CONSTRAINT_MODEL_ACCOUNT
            }
            Self::AddConstraintToEscrowConstraintModel(_) => {
                &schema::ADD_CONSTRAINT_TO_ESCROW_CONSTRAINT_MODEL
            }
        }
    }

    /// Unpacks a byte buffer into an [EscrowInstruction](enum.EscrowInstruction.html).
    pub fn unpack(input: &[u8]) -> Result<Self, EscrowError> {
        let (&discriminator, rest) = input
            .split_first()
            .ok_or(EscrowError::InvalidInstructionData)?;
        Ok(match discriminator {
            d if d == schema::CREATE_ESCROW_ACCOUNT.discriminator => {
                expect_empty(rest)?;
                Self::CreateEscrowAccount
            }
            d if d == schema::CLOSE_ESCROW_ACCOUNT.discriminator => {
                expect_empty(rest)?;
                Self::CloseEscrowAccount
            }
            d if d == schema::TRANSFER_OUT_OF_ESCROW.discriminator => {
                Self::TransferOutOfEscrow(decode(rest)?)
            }
            d if d == schema::TRANSFER_INTO_ESCROW.discriminator => {
                Self::TransferIntoEscrow(decode(rest)?)
            }
            d if d == schema::CREATE_ESCROW_CONSTRAINT_MODEL_ACCOUNT.discriminator => {
                Self::CreateEscrowConstraintModelAccount(decode(rest)?)
            }
            d if d == schema::ADD_CONSTRAINT_TO_ESCROW_CONSTRAINT_MODEL.discriminator => {
                Self::AddConstraintToEscrowConstraintModel(decode(rest)?)
            }
            _ => return Err(EscrowError::UnknownInstruction),
        })
    }

    /// Packs an [EscrowInstruction](enum.EscrowInstruction.html) into a byte buffer.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = vec![self.schema().discriminator];
        match self {
            Self::CreateEscrowAccount | Self::CloseEscrowAccount => {}
            Self::TransferOutOfEscrow(args) => buf.append(&mut args.try_to_vec().unwrap()),
            Self::TransferIntoEscrow(args) => buf.append(&mut args.try_to_vec().unwrap()),
            Self::CreateEscrowConstraintModelAccount(args) => {
                buf.append(&mut args.try_to_vec().unwrap())
            }
            Self::AddConstraintToEscrowConstraintModel(args) => {
                buf.append(&mut args.try_to_vec().unwrap())
            }
        };
        buf
    }

    /// Build the instruction for `program_id`, with `keys` in schema order
    pub fn to_instruction(
        &self,
        program_id: &Pubkey,
        keys: &[Pubkey],
    ) -> Result<Instruction, EscrowError> {
        Ok(Instruction {
            program_id: *program_id,
            accounts: self.schema().account_metas(keys)?,
            data: self.pack(),
        })
    }
}

fn expect_empty(rest: &[u8]) -> Result<(), EscrowError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(EscrowError::InvalidInstructionData)
    }
}

fn decode<T: BorshDeserialize>(rest: &[u8]) -> Result<T, EscrowError> {
    T::try_from_slice(rest).map_err(|_| EscrowError::InvalidInstructionData)
}

fn check_name(name: &str) -> Result<(), EscrowError> {
    if name.len() > MAX_NAME_LENGTH {
        Err(EscrowError::NameTooLong)
    } else {
        Ok(())
    }
}

/// Creates a `CreateEscrowAccount` instruction for the escrow of `escrow_nft`
pub fn create_escrow_account(
    program_id: &Pubkey,
    escrow_nft: &Nft,
    payer: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let (escrow, _) = find_escrow_address(program_id, &escrow_nft.mint);
    EscrowInstruction::CreateEscrowAccount
        .to_instruction(
            program_id,
            &[
                escrow,
                escrow_nft.metadata,
                escrow_nft.mint,
                escrow_nft.edition,
                *payer,
                system_program::id(),
            ],
        )
        .map_err(Into::into)
}

/// Creates a `CloseEscrowAccount` instruction for the escrow of `escrow_nft`
pub fn close_escrow_account(
    program_id: &Pubkey,
    escrow_nft: &Nft,
    payer: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let (escrow, _) = find_escrow_address(program_id, &escrow_nft.mint);
    let token_account = get_associated_token_address(payer, &escrow_nft.mint);
    EscrowInstruction::CloseEscrowAccount
        .to_instruction(
            program_id,
            &[
                escrow,
                escrow_nft.metadata,
                escrow_nft.mint,
                token_account,
                escrow_nft.edition,
                *payer,
                system_program::id(),
            ],
        )
        .map_err(Into::into)
}

/// Creates a `TransferIntoEscrow` instruction.
///
/// Tokens of `attribute.mint` move from the payer's associated token account
/// to the escrow's associated token account. `escrow_address` is taken as
/// given so callers can reuse the value returned when the escrow was created.
#[allow(clippy::too_many_arguments)]
pub fn transfer_into_escrow(
    program_id: &Pubkey,
    escrow_nft: &Nft,
    escrow_address: &Pubkey,
    attribute: &Nft,
    constraint_model: &Pubkey,
    payer: &Pubkey,
    args: TransferIntoEscrowArgs,
) -> Result<Instruction, ProgramError> {
    let attribute_src = get_associated_token_address(payer, &attribute.mint);
    let attribute_dst = get_associated_token_address(escrow_address, &attribute.mint);
    let escrow_account = get_associated_token_address(payer, &escrow_nft.mint);
    EscrowInstruction::TransferIntoEscrow(args)
        .to_instruction(
            program_id,
            &[
                *escrow_address,
                *payer,
                attribute.mint,
                attribute_src,
                attribute_dst,
                attribute.metadata,
                escrow_nft.mint,
                escrow_account,
                *constraint_model,
                system_program::id(),
                spl_associated_token_account::id(),
                spl_token::id(),
                sysvar::rent::id(),
            ],
        )
        .map_err(Into::into)
}

/// Creates a `TransferOutOfEscrow` instruction moving `attribute_mint`
/// tokens from the escrow back to the payer
pub fn transfer_out_of_escrow(
    program_id: &Pubkey,
    escrow_nft: &Nft,
    attribute_mint: &Pubkey,
    payer: &Pubkey,
    args: TransferOutOfEscrowArgs,
) -> Result<Instruction, ProgramError> {
    let (escrow, _) = find_escrow_address(program_id, &escrow_nft.mint);
    let attribute_src = get_associated_token_address(&escrow, attribute_mint);
    let attribute_dst = get_associated_token_address(payer, attribute_mint);
    let escrow_account = get_associated_token_address(payer, &escrow_nft.mint);
    EscrowInstruction::TransferOutOfEscrow(args)
        .to_instruction(
            program_id,
            &[
                escrow,
                escrow_nft.metadata,
                *payer,
                *attribute_mint,
                attribute_src,
                attribute_dst,
                escrow_nft.mint,
                escrow_account,
                system_program::id(),
                spl_associated_token_account::id(),
                spl_token::id(),
                sysvar::instructions::id(),
            ],
        )
        .map_err(Into::into)
}

/// Creates a `CreateEscrowConstraintModelAccount` instruction
pub fn create_escrow_constraint_model_account(
    program_id: &Pubkey,
    payer: &Pubkey,
    update_authority: &Pubkey,
    name: String,
) -> Result<Instruction, ProgramError> {
    check_name(&name)?;
    let (model, _) = find_escrow_constraint_model_address(program_id, update_authority, &name);
    EscrowInstruction::CreateEscrowConstraintModelAccount(CreateEscrowConstraintModelAccountArgs {
        name,
    })
    .to_instruction(
        program_id,
        &[model, *payer, *update_authority, system_program::id()],
    )
    .map_err(Into::into)
}

/// Creates an `AddConstraintToEscrowConstraintModel` instruction
pub fn add_constraint_to_escrow_constraint_model(
    program_id: &Pubkey,
    escrow_constraint_model: &Pubkey,
    payer: &Pubkey,
    update_authority: &Pubkey,
    constraint: EscrowConstraint,
) -> Result<Instruction, ProgramError> {
    check_name(&constraint.name)?;
    EscrowInstruction::AddConstraintToEscrowConstraintModel(
        AddConstraintToEscrowConstraintModelArgs { constraint },
    )
    .to_instruction(
        program_id,
        &[
            *escrow_constraint_model,
            *payer,
            *update_authority,
            system_program::id(),
        ],
    )
    .map_err(Into::into)
}
