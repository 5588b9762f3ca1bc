use {
    assert_matches::assert_matches,
    async_trait::async_trait,
    bundt_cake_cli::{
        clap_app::*,
        command::{process_command, CommandResult},
        config::Config,
        output::{CliAddresses, CliClient, CliConstraintModel, CliEscrow, CliEscrowAccount},
    },
    bundt_cake_client::client::{ProgramClient, ProgramClientResult, SendOptions},
    bundt_cake_interface::{
        id,
        instruction::EscrowInstruction,
        pda::{find_escrow_address, find_escrow_constraint_model_address},
        state::{
            AddConstraintToEscrowConstraintModelArgs, EscrowConstraint, EscrowConstraintType,
            TransferIntoEscrowArgs, TransferOutOfEscrowArgs,
        },
    },
    solana_cli_output::OutputFormat,
    solana_sdk::{
        account::Account,
        hash::Hash,
        pubkey::Pubkey,
        signature::{write_keypair_file, Keypair, Signature, Signer},
        transaction::Transaction,
    },
    std::{
        io,
        str::FromStr,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    },
    tempfile::NamedTempFile,
};

#[derive(Default)]
struct RecordingClient {
    reject_sends: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<(Transaction, SendOptions)>>,
}

impl RecordingClient {
    fn sent(&self) -> Vec<(Transaction, SendOptions)> {
        self.sent.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgramClient for RecordingClient {
    async fn get_latest_blockhash(&self) -> ProgramClientResult<Hash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        options: SendOptions,
    ) -> ProgramClientResult<Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((transaction.clone(), options));
        if self.reject_sends {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::Other,
                "Transaction simulation failed: Blockhash not found",
            )));
        }
        Ok(transaction.signatures[0])
    }

    async fn get_account(&self, _address: Pubkey) -> ProgramClientResult<Option<Account>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

fn clone_keypair(keypair: &Keypair) -> Keypair {
    Keypair::from_bytes(&keypair.to_bytes()).unwrap()
}

fn test_config(client: Arc<RecordingClient>, payer: &Keypair) -> Config {
    Config {
        default_signer: Some(Arc::new(clone_keypair(payer))),
        keypair_path: String::new(),
        program_client: client,
        json_rpc_url: "http://localhost:8899".to_string(),
        program_id: id(),
        output_format: OutputFormat::JsonCompact,
        verbose: false,
    }
}

async fn process_test_command(config: &Config, args: &[&str]) -> CommandResult {
    let default_program_id = id().to_string();
    let app_matches = app(&default_program_id).get_matches_from(args);
    let (sub_command, matches) = app_matches.subcommand();
    let sub_command = CommandName::from_str(sub_command).unwrap();
    process_command(&sub_command, matches.unwrap(), config).await
}

fn only_instruction(transaction: &Transaction) -> EscrowInstruction {
    assert_eq!(transaction.message.instructions.len(), 1);
    EscrowInstruction::unpack(&transaction.message.instructions[0].data).unwrap()
}

#[tokio::test]
async fn create_performs_no_network_action() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);

    let result = process_test_command(&config, &["bundt-cake", "create", "-a", "5"])
        .await
        .unwrap();
    let output: CliClient = serde_json::from_str(&result).unwrap();
    assert_eq!(output.payer, payer.pubkey().to_string());
    assert_eq!(output.ignored_amount, Some(5));
    assert_eq!(client.calls(), 0);

    let result = process_test_command(&config, &["bundt-cake", "create"])
        .await
        .unwrap();
    let output: CliClient = serde_json::from_str(&result).unwrap();
    assert_eq!(output.ignored_amount, None);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn create_escrow() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let mint = Pubkey::new_unique();

    let result = process_test_command(
        &config,
        &["bundt-cake", "create-escrow", "--mint", &mint.to_string()],
    )
    .await
    .unwrap();
    let output: CliEscrow = serde_json::from_str(&result).unwrap();
    assert_eq!(
        output.escrow,
        find_escrow_address(&id(), &mint).0.to_string()
    );

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].1.skip_preflight);
    assert_eq!(
        only_instruction(&sent[0].0),
        EscrowInstruction::CreateEscrowAccount
    );
}

#[tokio::test]
async fn transfer_in_defaults_to_one_token_and_first_constraint() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let mint = Pubkey::new_unique().to_string();
    let attribute_mint = Pubkey::new_unique().to_string();
    let model = Pubkey::new_unique().to_string();

    process_test_command(
        &config,
        &[
            "bundt-cake",
            "transfer-in",
            "--mint",
            &mint,
            "--attribute-mint",
            &attribute_mint,
            "--constraint-model",
            &model,
        ],
    )
    .await
    .unwrap();

    process_test_command(
        &config,
        &[
            "bundt-cake",
            "transfer-in",
            "--mint",
            &mint,
            "--attribute-mint",
            &attribute_mint,
            "--constraint-model",
            &model,
            "--amount",
            "3",
            "--index",
            "2",
        ],
    )
    .await
    .unwrap();

    let sent = client.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|(_, options)| options.skip_preflight));
    assert_eq!(
        sent[0].0.message.instructions[0].data,
        [vec![41], 1u64.to_le_bytes().to_vec(), 1u64.to_le_bytes().to_vec()].concat()
    );
    assert_eq!(
        only_instruction(&sent[1].0),
        EscrowInstruction::TransferIntoEscrow(TransferIntoEscrowArgs {
            amount: 3,
            index: 2
        })
    );
}

#[tokio::test]
async fn transfer_out_and_close() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let mint = Pubkey::new_unique().to_string();
    let attribute_mint = Pubkey::new_unique().to_string();

    process_test_command(
        &config,
        &[
            "bundt-cake",
            "transfer-out",
            "--mint",
            &mint,
            "--attribute-mint",
            &attribute_mint,
        ],
    )
    .await
    .unwrap();
    process_test_command(&config, &["bundt-cake", "close-escrow", "--mint", &mint])
        .await
        .unwrap();

    let sent = client.sent();
    assert_eq!(
        only_instruction(&sent[0].0),
        EscrowInstruction::TransferOutOfEscrow(TransferOutOfEscrowArgs { amount: 1 })
    );
    assert_eq!(
        only_instruction(&sent[1].0),
        EscrowInstruction::CloseEscrowAccount
    );
}

#[tokio::test]
async fn rejected_transaction_fails_the_command_without_retry() {
    let client = Arc::new(RecordingClient {
        reject_sends: true,
        ..RecordingClient::default()
    });
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let mint = Pubkey::new_unique().to_string();

    let err = process_test_command(&config, &["bundt-cake", "create-escrow", "--mint", &mint])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Blockhash not found"));
    assert_eq!(client.sent().len(), 1);
}

#[tokio::test]
async fn constraint_models() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);

    let result = process_test_command(
        &config,
        &["bundt-cake", "create-constraint-model", "--name", "backpack"],
    )
    .await
    .unwrap();
    let output: CliConstraintModel = serde_json::from_str(&result).unwrap();
    let model = find_escrow_constraint_model_address(&id(), &payer.pubkey(), "backpack").0;
    assert_eq!(output.address, model.to_string());

    let hat = Pubkey::new_unique();
    let cap = Pubkey::new_unique();
    process_test_command(
        &config,
        &[
            "bundt-cake",
            "add-constraint",
            "--model",
            &model.to_string(),
            "--name",
            "hats",
            "--token-limit",
            "2",
            "--constraint-type",
            "tokens",
            "--token",
            &hat.to_string(),
            "--token",
            &cap.to_string(),
        ],
    )
    .await
    .unwrap();

    let sent = client.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        only_instruction(&sent[1].0),
        EscrowInstruction::AddConstraintToEscrowConstraintModel(
            AddConstraintToEscrowConstraintModelArgs {
                constraint: EscrowConstraint {
                    name: "hats".to_string(),
                    token_limit: 2,
                    constraint_type: EscrowConstraintType::Tokens(vec![hat, cap]),
                }
            }
        )
    );
}

#[tokio::test]
async fn overlong_model_name_is_rejected_before_sending() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let name = "n".repeat(33);

    let result = process_test_command(
        &config,
        &["bundt-cake", "create-constraint-model", "--name", &name],
    )
    .await;
    assert_matches!(result, Err(_));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn address_is_derived_offline() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let mint = Pubkey::new_unique();
    let attribute_mint = Pubkey::new_unique();

    let result = process_test_command(
        &config,
        &[
            "bundt-cake",
            "address",
            "--mint",
            &mint.to_string(),
            "--attribute-mint",
            &attribute_mint.to_string(),
        ],
    )
    .await
    .unwrap();
    let output: CliAddresses = serde_json::from_str(&result).unwrap();
    assert_eq!(output.escrow, find_escrow_address(&id(), &mint).0.to_string());
    assert_eq!(output.owner, payer.pubkey().to_string());
    assert!(output.attribute_destination.is_some());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn show_missing_escrow() {
    let client = Arc::new(RecordingClient::default());
    let payer = Keypair::new();
    let config = test_config(client.clone(), &payer);
    let mint = Pubkey::new_unique().to_string();

    let result = process_test_command(&config, &["bundt-cake", "show-escrow", "--mint", &mint])
        .await
        .unwrap();
    let output: CliEscrowAccount = serde_json::from_str(&result).unwrap();
    assert!(!output.exists);
    assert_eq!(output.owner, None);
    assert!(client.sent().is_empty());
}

#[test]
fn config_reads_keypair_and_endpoint_from_arguments() {
    let payer = Keypair::new();
    let keypair_file = NamedTempFile::new().unwrap();
    write_keypair_file(&payer, &keypair_file).unwrap();
    let keypair_path = keypair_file.path().to_str().unwrap();

    let default_program_id = id().to_string();
    let app_matches = app(&default_program_id).get_matches_from(vec![
        "bundt-cake",
        "-e",
        "localnet",
        "-k",
        keypair_path,
        "--output",
        "json",
        "create",
    ]);
    let (_, matches) = app_matches.subcommand();
    let matches = matches.unwrap();
    let client = Arc::new(RecordingClient::default());
    let config = Config::new_with_client(
        matches,
        bundt_cake_cli::config::json_rpc_url(matches),
        client,
    )
    .unwrap();

    assert_eq!(config.default_signer().unwrap().pubkey(), payer.pubkey());
    assert_eq!(config.json_rpc_url, "http://localhost:8899");
    assert_eq!(config.program_id, id());
    assert_matches!(config.output_format, OutputFormat::Json);
}

#[test]
fn missing_keypair_only_fails_when_a_signer_is_needed() {
    let default_program_id = id().to_string();
    let app_matches = app(&default_program_id).get_matches_from(vec![
        "bundt-cake",
        "-k",
        "/nonexistent/id.json",
        "create",
    ]);
    let (_, matches) = app_matches.subcommand();
    let client = Arc::new(RecordingClient::default());
    let config = Config::new_with_client(matches.unwrap(), String::new(), client).unwrap();
    let err = config.default_signer().err().unwrap();
    assert!(err.to_string().contains("/nonexistent/id.json"));
}

#[tokio::test]
async fn address_with_owner_needs_no_keypair() {
    let client = Arc::new(RecordingClient::default());
    let config = Config {
        default_signer: None,
        keypair_path: "/nonexistent/id.json".to_string(),
        program_client: client.clone(),
        json_rpc_url: "http://localhost:8899".to_string(),
        program_id: id(),
        output_format: OutputFormat::JsonCompact,
        verbose: false,
    };
    let mint = Pubkey::new_unique();
    let owner = Pubkey::new_unique();

    let result = process_test_command(
        &config,
        &[
            "bundt-cake",
            "address",
            "--mint",
            &mint.to_string(),
            "--owner",
            &owner.to_string(),
        ],
    )
    .await
    .unwrap();
    let output: CliAddresses = serde_json::from_str(&result).unwrap();
    assert_eq!(output.owner, owner.to_string());
    assert_eq!(client.calls(), 0);

    let err = process_test_command(
        &config,
        &["bundt-cake", "address", "--mint", &mint.to_string()],
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/id.json"));
}
