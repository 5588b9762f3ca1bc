use {
    crate::{
        clap_app::{CommandName, ConstraintKind, Error, AMOUNT_ARG, ATTRIBUTE_MINT_ARG, MINT_ARG},
        config::Config,
        output::{
            CliAddresses, CliClient, CliConstraintModel, CliEscrow, CliEscrowAccount, CliTransfer,
        },
    },
    bundt_cake_client::{escrow::EscrowClientError, Escrow},
    bundt_cake_interface::{
        pda::{find_escrow_address, get_escrow_attribute_address},
        state::{
            EscrowConstraint, EscrowConstraintType, Nft, TransferIntoEscrowArgs,
            TransferOutOfEscrowArgs, DEFAULT_TRANSFER_AMOUNT,
        },
    },
    clap::ArgMatches,
    log::{info, warn},
    solana_clap_utils::input_parsers::{pubkey_of, pubkeys_of, value_of},
    solana_cli_output::CliSignature,
    solana_sdk::{pubkey::Pubkey, signature::Signer},
    spl_associated_token_account::get_associated_token_address,
    std::str::FromStr,
};

pub type CommandResult = Result<String, Error>;

fn escrow_client(config: &Config) -> Result<Escrow, Error> {
    Ok(Escrow::new(
        config.program_client.clone(),
        &config.program_id,
        config.default_signer()?,
    ))
}

fn command_create(config: &Config, amount: Option<u64>) -> CommandResult {
    let escrow = escrow_client(config)?;
    if let Some(amount) = amount {
        warn!("amount {} is not used by create", amount);
    }
    info!("Client ready for {} on {}", escrow.payer(), config.json_rpc_url);

    Ok(config.output_format.formatted_string(&CliClient {
        payer: escrow.payer().to_string(),
        json_rpc_url: config.json_rpc_url.clone(),
        program_id: escrow.program_id().to_string(),
        ignored_amount: amount,
    }))
}

async fn command_create_escrow(config: &Config, mint: Pubkey) -> CommandResult {
    let escrow = escrow_client(config)?;
    let nft = escrow.nft(&mint);
    let address = escrow.create_escrow_account(&nft).await?;

    Ok(config.output_format.formatted_string(&CliEscrow {
        mint: mint.to_string(),
        escrow: address.to_string(),
    }))
}

async fn command_transfer_in(
    config: &Config,
    mint: Pubkey,
    attribute_mint: Pubkey,
    constraint_model: Pubkey,
    args: TransferIntoEscrowArgs,
) -> CommandResult {
    let escrow = escrow_client(config)?;
    let escrow_nft = escrow.nft(&mint);
    let escrow_address = escrow.get_escrow_address(&mint);
    let attribute = escrow.nft(&attribute_mint);

    let signature = escrow
        .transfer_into_escrow(
            &escrow_nft,
            &escrow_address,
            &attribute,
            &constraint_model,
            args,
        )
        .await?;

    Ok(config.output_format.formatted_string(&CliTransfer {
        escrow: escrow_address.to_string(),
        attribute_mint: attribute_mint.to_string(),
        amount: args.amount,
        index: Some(args.index),
        signature: signature.to_string(),
    }))
}

async fn command_transfer_out(
    config: &Config,
    mint: Pubkey,
    attribute_mint: Pubkey,
    amount: u64,
) -> CommandResult {
    let escrow = escrow_client(config)?;
    let escrow_nft = escrow.nft(&mint);

    let signature = escrow
        .transfer_out_of_escrow(
            &escrow_nft,
            &attribute_mint,
            TransferOutOfEscrowArgs { amount },
        )
        .await?;

    Ok(config.output_format.formatted_string(&CliTransfer {
        escrow: escrow.get_escrow_address(&mint).to_string(),
        attribute_mint: attribute_mint.to_string(),
        amount,
        index: None,
        signature: signature.to_string(),
    }))
}

async fn command_close_escrow(config: &Config, mint: Pubkey) -> CommandResult {
    let escrow = escrow_client(config)?;
    let signature = escrow.close_escrow_account(&escrow.nft(&mint)).await?;

    Ok(config.output_format.formatted_string(&CliSignature {
        signature: signature.to_string(),
    }))
}

async fn command_create_constraint_model(config: &Config, name: String) -> CommandResult {
    let escrow = escrow_client(config)?;
    let (address, signature) = escrow.create_escrow_constraint_model(&name).await?;

    Ok(config.output_format.formatted_string(&CliConstraintModel {
        name,
        address: address.to_string(),
        signature: signature.to_string(),
    }))
}

async fn command_add_constraint(
    config: &Config,
    model: Pubkey,
    constraint: EscrowConstraint,
) -> CommandResult {
    let escrow = escrow_client(config)?;
    let signature = escrow.add_constraint(&model, constraint).await?;

    Ok(config.output_format.formatted_string(&CliSignature {
        signature: signature.to_string(),
    }))
}

fn command_address(
    config: &Config,
    mint: Pubkey,
    attribute_mint: Option<Pubkey>,
    owner: Pubkey,
) -> CommandResult {
    let escrow_nft = Nft::from_mint(&config.program_id, &mint);
    let (escrow, _) = find_escrow_address(&config.program_id, &mint);

    Ok(config.output_format.formatted_string(&CliAddresses {
        mint: mint.to_string(),
        escrow: escrow.to_string(),
        metadata: escrow_nft.metadata.to_string(),
        edition: escrow_nft.edition.to_string(),
        owner: owner.to_string(),
        escrow_token_account: get_associated_token_address(&owner, &mint).to_string(),
        attribute_mint: attribute_mint.map(|mint| mint.to_string()),
        attribute_source: attribute_mint
            .map(|mint| get_associated_token_address(&owner, &mint).to_string()),
        attribute_destination: attribute_mint
            .map(|mint| get_escrow_attribute_address(&escrow, &mint).to_string()),
    }))
}

async fn command_show_escrow(config: &Config, mint: Pubkey) -> CommandResult {
    let escrow = escrow_client(config)?;
    let address = escrow.get_escrow_address(&mint);

    let account = match escrow.get_escrow_account(&mint).await {
        Ok(account) => Some(account),
        Err(EscrowClientError::AccountNotFound) => None,
        Err(err) => return Err(err.into()),
    };

    Ok(config.output_format.formatted_string(&CliEscrowAccount {
        escrow: address.to_string(),
        exists: account.is_some(),
        owner: account.as_ref().map(|account| account.owner.to_string()),
        lamports: account.as_ref().map_or(0, |account| account.lamports),
        data_len: account.as_ref().map_or(0, |account| account.data.len()),
    }))
}

fn constraint_of(arg_matches: &ArgMatches<'_>) -> Result<EscrowConstraint, Error> {
    let name = arg_matches.value_of("name").unwrap().to_string();
    let token_limit = value_of::<u64>(arg_matches, "token_limit").unwrap();
    let kind = ConstraintKind::from_str(arg_matches.value_of("constraint_type").unwrap())?;

    let constraint_type = match kind {
        ConstraintKind::None => EscrowConstraintType::None,
        ConstraintKind::Collection => EscrowConstraintType::Collection(
            pubkey_of(arg_matches, "collection").ok_or("--collection is required")?,
        ),
        ConstraintKind::Tokens => EscrowConstraintType::Tokens(
            pubkeys_of(arg_matches, "token").ok_or("at least one --token is required")?,
        ),
    };

    Ok(EscrowConstraint {
        name,
        token_limit,
        constraint_type,
    })
}

pub async fn process_command(
    sub_command: &CommandName,
    sub_matches: &ArgMatches<'_>,
    config: &Config,
) -> CommandResult {
    match (sub_command, sub_matches) {
        (CommandName::Create, arg_matches) => {
            let amount = value_of::<u64>(arg_matches, AMOUNT_ARG.name);
            command_create(config, amount)
        }
        (CommandName::CreateEscrow, arg_matches) => {
            let mint = pubkey_of(arg_matches, MINT_ARG.name).unwrap();
            command_create_escrow(config, mint).await
        }
        (CommandName::TransferIn, arg_matches) => {
            let mint = pubkey_of(arg_matches, MINT_ARG.name).unwrap();
            let attribute_mint = pubkey_of(arg_matches, ATTRIBUTE_MINT_ARG.name).unwrap();
            let constraint_model = pubkey_of(arg_matches, "constraint_model").unwrap();
            let defaults = TransferIntoEscrowArgs::default();
            let args = TransferIntoEscrowArgs {
                amount: value_of(arg_matches, AMOUNT_ARG.name).unwrap_or(defaults.amount),
                index: value_of(arg_matches, "index").unwrap_or(defaults.index),
            };
            command_transfer_in(config, mint, attribute_mint, constraint_model, args).await
        }
        (CommandName::TransferOut, arg_matches) => {
            let mint = pubkey_of(arg_matches, MINT_ARG.name).unwrap();
            let attribute_mint = pubkey_of(arg_matches, ATTRIBUTE_MINT_ARG.name).unwrap();
            let amount = value_of(arg_matches, AMOUNT_ARG.name).unwrap_or(DEFAULT_TRANSFER_AMOUNT);
            command_transfer_out(config, mint, attribute_mint, amount).await
        }
        (CommandName::CloseEscrow, arg_matches) => {
            let mint = pubkey_of(arg_matches, MINT_ARG.name).unwrap();
            command_close_escrow(config, mint).await
        }
        (CommandName::CreateConstraintModel, arg_matches) => {
            let name = arg_matches.value_of("name").unwrap().to_string();
            command_create_constraint_model(config, name).await
        }
        (CommandName::AddConstraint, arg_matches) => {
            let model = pubkey_of(arg_matches, "model").unwrap();
            let constraint = constraint_of(arg_matches)?;
            command_add_constraint(config, model, constraint).await
        }
        (CommandName::Address, arg_matches) => {
            let mint = pubkey_of(arg_matches, MINT_ARG.name).unwrap();
            let attribute_mint = pubkey_of(arg_matches, ATTRIBUTE_MINT_ARG.name);
            let owner = match pubkey_of(arg_matches, "owner") {
                Some(owner) => owner,
                None => config.default_signer()?.pubkey(),
            };
            command_address(config, mint, attribute_mint, owner)
        }
        (CommandName::ShowEscrow, arg_matches) => {
            let mint = pubkey_of(arg_matches, MINT_ARG.name).unwrap();
            command_show_escrow(config, mint).await
        }
    }
}
