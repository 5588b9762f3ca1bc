use {
    crate::client::{ProgramClient, ProgramClientError, SendOptions},
    bundt_cake_interface::{
        instruction,
        pda::{find_escrow_address, find_escrow_constraint_model_address},
        state::{EscrowConstraint, Nft, TransferIntoEscrowArgs, TransferOutOfEscrowArgs},
    },
    log::{debug, info},
    solana_sdk::{
        account::Account,
        instruction::Instruction,
        program_error::ProgramError,
        pubkey::Pubkey,
        signature::{Signature, Signer},
        transaction::Transaction,
    },
    std::{fmt, sync::Arc},
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum EscrowClientError {
    #[error("client error: {0}")]
    Client(ProgramClientError),
    #[error("program error: {0}")]
    Program(#[from] ProgramError),
    #[error("account not found")]
    AccountNotFound,
}

pub type EscrowResult<T> = Result<T, EscrowClientError>;

/// Sequences escrow instructions for one fee payer.
///
/// Every call fetches a fresh blockhash, signs with the payer and submits a
/// single transaction. Nothing is retried and nothing waits for confirmation.
pub struct Escrow {
    client: Arc<dyn ProgramClient>,
    program_id: Pubkey,
    payer: Arc<dyn Signer>,
}

impl fmt::Debug for Escrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Escrow")
            .field("program_id", &self.program_id)
            .field("payer", &self.payer.pubkey())
            .finish()
    }
}

impl Escrow {
    pub fn new(
        client: Arc<dyn ProgramClient>,
        program_id: &Pubkey,
        payer: Arc<dyn Signer>,
    ) -> Self {
        Escrow {
            client,
            program_id: *program_id,
            payer,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Address of the escrow attached to `mint`
    pub fn get_escrow_address(&self, mint: &Pubkey) -> Pubkey {
        find_escrow_address(&self.program_id, mint).0
    }

    /// Handle for the NFT minted by `mint`
    pub fn nft(&self, mint: &Pubkey) -> Nft {
        Nft::from_mint(&self.program_id, mint)
    }

    async fn process_ixs(
        &self,
        instructions: &[Instruction],
        options: SendOptions,
    ) -> EscrowResult<Signature> {
        let latest_blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .map_err(EscrowClientError::Client)?;

        let mut tx = Transaction::new_with_payer(instructions, Some(&self.payer.pubkey()));
        tx.try_sign(&vec![self.payer.as_ref()], latest_blockhash)
            .map_err(|error| EscrowClientError::Client(error.into()))?;

        let signature = self
            .client
            .send_transaction(&tx, options)
            .await
            .map_err(EscrowClientError::Client)?;
        debug!("submitted {} with blockhash {}", signature, latest_blockhash);
        Ok(signature)
    }

    /// Create the escrow account attached to `escrow_nft`.
    ///
    /// Returns the escrow address once the transaction is submitted; whether
    /// it lands is not checked.
    pub async fn create_escrow_account(&self, escrow_nft: &Nft) -> EscrowResult<Pubkey> {
        let escrow = self.get_escrow_address(&escrow_nft.mint);
        info!("Creating escrow {} for mint {}", escrow, escrow_nft.mint);
        self.process_ixs(
            &[instruction::create_escrow_account(
                &self.program_id,
                escrow_nft,
                &self.payer.pubkey(),
            )?],
            SendOptions::default(),
        )
        .await?;
        Ok(escrow)
    }

    /// Deposit tokens of `attribute` into the escrow at `escrow_address`.
    ///
    /// Submitted with preflight disabled; the outcome is not verified.
    pub async fn transfer_into_escrow(
        &self,
        escrow_nft: &Nft,
        escrow_address: &Pubkey,
        attribute: &Nft,
        constraint_model: &Pubkey,
        args: TransferIntoEscrowArgs,
    ) -> EscrowResult<Signature> {
        info!(
            "Transferring {} of {} into escrow {} (constraint {})",
            args.amount, attribute.mint, escrow_address, args.index
        );
        self.process_ixs(
            &[instruction::transfer_into_escrow(
                &self.program_id,
                escrow_nft,
                escrow_address,
                attribute,
                constraint_model,
                &self.payer.pubkey(),
                args,
            )?],
            SendOptions::skip_preflight(),
        )
        .await
    }

    /// Withdraw tokens of `attribute_mint` from the escrow of `escrow_nft`
    pub async fn transfer_out_of_escrow(
        &self,
        escrow_nft: &Nft,
        attribute_mint: &Pubkey,
        args: TransferOutOfEscrowArgs,
    ) -> EscrowResult<Signature> {
        info!(
            "Transferring {} of {} out of escrow {}",
            args.amount,
            attribute_mint,
            self.get_escrow_address(&escrow_nft.mint)
        );
        self.process_ixs(
            &[instruction::transfer_out_of_escrow(
                &self.program_id,
                escrow_nft,
                attribute_mint,
                &self.payer.pubkey(),
                args,
            )?],
            SendOptions::default(),
        )
        .await
    }

    /// Close the escrow of `escrow_nft`
    pub async fn close_escrow_account(&self, escrow_nft: &Nft) -> EscrowResult<Signature> {
        info!("Closing escrow {}", self.get_escrow_address(&escrow_nft.mint));
        self.process_ixs(
            &[instruction::close_escrow_account(
                &self.program_id,
                escrow_nft,
                &self.payer.pubkey(),
            )?],
            SendOptions::default(),
        )
        .await
    }

    /// Create a constraint model named `name`, with the payer as update
    /// authority. Returns the model address and the transaction signature.
    pub async fn create_escrow_constraint_model(
        &self,
        name: &str,
    ) -> EscrowResult<(Pubkey, Signature)> {
        let payer = self.payer.pubkey();
        // Builder rejects names too long to seed the address, so it goes first.
        let ix = instruction::create_escrow_constraint_model_account(
            &self.program_id,
            &payer,
            &payer,
            name.to_string(),
        )?;
        let (model, _) = find_escrow_constraint_model_address(&self.program_id, &payer, name);
        info!("Creating escrow constraint model {} ({})", model, name);
        let signature = self.process_ixs(&[ix], SendOptions::default()).await?;
        Ok((model, signature))
    }

    /// Append `constraint` to the model at `escrow_constraint_model`
    pub async fn add_constraint(
        &self,
        escrow_constraint_model: &Pubkey,
        constraint: EscrowConstraint,
    ) -> EscrowResult<Signature> {
        let payer = self.payer.pubkey();
        info!(
            "Adding constraint {} to model {}",
            constraint.name, escrow_constraint_model
        );
        self.process_ixs(
            &[instruction::add_constraint_to_escrow_constraint_model(
                &self.program_id,
                escrow_constraint_model,
                &payer,
                &payer,
                constraint,
            )?],
            SendOptions::default(),
        )
        .await
    }

    /// Retrieve the escrow account attached to `mint`
    pub async fn get_escrow_account(&self, mint: &Pubkey) -> EscrowResult<Account> {
        self.client
            .get_account(self.get_escrow_address(mint))
            .await
            .map_err(EscrowClientError::Client)?
            .ok_or(EscrowClientError::AccountNotFound)
    }
}
