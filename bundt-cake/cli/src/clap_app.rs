use {
    clap::{crate_description, crate_name, crate_version, App, AppSettings, Arg, SubCommand},
    solana_clap_utils::{
        input_validators::{is_parsable, is_pubkey, is_url},
        ArgConstant,
    },
    std::fmt,
    strum::VariantNames,
    strum_macros::{AsRefStr, EnumString, EnumVariantNames, IntoStaticStr},
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub const MINT_ARG: ArgConstant<'static> = ArgConstant {
    name: "mint",
    long: "mint",
    help: "Mint of the NFT the escrow is attached to",
};

pub const ATTRIBUTE_MINT_ARG: ArgConstant<'static> = ArgConstant {
    name: "attribute_mint",
    long: "attribute-mint",
    help: "Mint of the token held by the escrow",
};

pub const AMOUNT_ARG: ArgConstant<'static> = ArgConstant {
    name: "amount",
    long: "amount",
    help: "Number of tokens to move",
};

pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum CommandName {
    Create,
    CreateEscrow,
    TransferIn,
    TransferOut,
    CloseEscrow,
    CreateConstraintModel,
    AddConstraint,
    Address,
    ShowEscrow,
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Cluster selected with `--env`
#[derive(
    AsRefStr, Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumVariantNames, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    pub fn url(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Localnet => "http://localhost:8899",
        }
    }
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumVariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum ConstraintKind {
    None,
    Collection,
    Tokens,
}

fn mint_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(MINT_ARG.name)
        .long(MINT_ARG.long)
        .validator(is_pubkey)
        .value_name("MINT_ADDRESS")
        .takes_value(true)
        .required(true)
        .help(MINT_ARG.help)
}

fn attribute_mint_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(ATTRIBUTE_MINT_ARG.name)
        .long(ATTRIBUTE_MINT_ARG.long)
        .validator(is_pubkey)
        .value_name("MINT_ADDRESS")
        .takes_value(true)
        .help(ATTRIBUTE_MINT_ARG.help)
}

fn amount_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(AMOUNT_ARG.name)
        .long(AMOUNT_ARG.long)
        .validator(is_parsable::<u64>)
        .value_name("AMOUNT")
        .takes_value(true)
        .help(AMOUNT_ARG.help)
}

pub fn app<'a, 'b>(default_program_id: &'a str) -> App<'a, 'b> {
    App::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg({
            let arg = Arg::with_name("config_file")
                .short("C")
                .long("config")
                .value_name("PATH")
                .takes_value(true)
                .global(true)
                .help("Configuration file to use");
            if let Some(ref config_file) = *solana_cli_config::CONFIG_FILE {
                arg.default_value(config_file)
            } else {
                arg
            }
        })
        .arg(
            Arg::with_name("env")
                .short("e")
                .long("env")
                .value_name("CLUSTER")
                .takes_value(true)
                .global(true)
                .possible_values(Cluster::VARIANTS)
                .default_value(Cluster::Devnet.into())
                .help("Cluster to operate on"),
        )
        .arg(
            Arg::with_name("json_rpc_url")
                .short("r")
                .long("rpc")
                .value_name("URL")
                .takes_value(true)
                .global(true)
                .validator(is_url)
                .help("JSON RPC URL for the cluster. Overrides --env."),
        )
        .arg(
            Arg::with_name("keypair")
                .short("k")
                .long("keypair")
                .value_name("KEYPAIR")
                .takes_value(true)
                .global(true)
                .help("Filepath of the signing keypair. Default from the configuration file."),
        )
        .arg(
            Arg::with_name("log_level")
                .short("l")
                .long("log-level")
                .value_name("LEVEL")
                .takes_value(true)
                .global(true)
                .possible_values(LOG_LEVELS)
                .default_value("info")
                .help("Log level. When given, overrides RUST_LOG."),
        )
        .arg(
            Arg::with_name("program_id")
                .long("program-id")
                .value_name("ADDRESS")
                .takes_value(true)
                .global(true)
                .validator(is_pubkey)
                .default_value(default_program_id)
                .help("Token metadata program id"),
        )
        .arg(
            Arg::with_name("output_format")
                .long("output")
                .value_name("FORMAT")
                .global(true)
                .takes_value(true)
                .possible_values(&["json", "json-compact"])
                .help("Return information in specified output format"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .takes_value(false)
                .global(true)
                .help("Show additional information"),
        )
        .subcommand(
            SubCommand::with_name(CommandName::Create.into())
                .about("Set up a client for the configured cluster and keypair")
                .arg(
                    amount_arg()
                        .short("a")
                        .help("Amount to escrow. Currently ignored."),
                ),
        )
        .subcommand(
            SubCommand::with_name(CommandName::CreateEscrow.into())
                .about("Create the escrow account attached to an NFT")
                .arg(mint_arg()),
        )
        .subcommand(
            SubCommand::with_name(CommandName::TransferIn.into())
                .about("Deposit tokens into an escrow")
                .arg(mint_arg())
                .arg(attribute_mint_arg().required(true))
                .arg(
                    Arg::with_name("constraint_model")
                        .long("constraint-model")
                        .validator(is_pubkey)
                        .value_name("ADDRESS")
                        .takes_value(true)
                        .required(true)
                        .help("Constraint model governing the escrow"),
                )
                .arg(amount_arg().default_value("1"))
                .arg(
                    Arg::with_name("index")
                        .long("index")
                        .validator(is_parsable::<u64>)
                        .value_name("INDEX")
                        .takes_value(true)
                        .default_value("1")
                        .help("Index of the constraint the deposit satisfies"),
                ),
        )
        .subcommand(
            SubCommand::with_name(CommandName::TransferOut.into())
                .about("Withdraw tokens from an escrow")
                .arg(mint_arg())
                .arg(attribute_mint_arg().required(true))
                .arg(amount_arg().default_value("1")),
        )
        .subcommand(
            SubCommand::with_name(CommandName::CloseEscrow.into())
                .about("Close the escrow account attached to an NFT")
                .arg(mint_arg()),
        )
        .subcommand(
            SubCommand::with_name(CommandName::CreateConstraintModel.into())
                .about("Create an escrow constraint model owned by the keypair")
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .value_name("NAME")
                        .takes_value(true)
                        .required(true)
                        .help("Name of the model, at most 32 bytes"),
                ),
        )
        .subcommand(
            SubCommand::with_name(CommandName::AddConstraint.into())
                .about("Append a constraint to an escrow constraint model")
                .arg(
                    Arg::with_name("model")
                        .long("model")
                        .validator(is_pubkey)
                        .value_name("ADDRESS")
                        .takes_value(true)
                        .required(true)
                        .help("Constraint model address"),
                )
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .value_name("NAME")
                        .takes_value(true)
                        .required(true)
                        .help("Name of the constraint"),
                )
                .arg(
                    Arg::with_name("token_limit")
                        .long("token-limit")
                        .validator(is_parsable::<u64>)
                        .value_name("LIMIT")
                        .takes_value(true)
                        .required(true)
                        .help("Maximum number of tokens the constraint admits"),
                )
                .arg(
                    Arg::with_name("constraint_type")
                        .long("constraint-type")
                        .value_name("TYPE")
                        .takes_value(true)
                        .possible_values(ConstraintKind::VARIANTS)
                        .default_value(ConstraintKind::None.as_ref())
                        .help("What the constraint admits"),
                )
                .arg(
                    Arg::with_name("collection")
                        .long("collection")
                        .validator(is_pubkey)
                        .value_name("MINT_ADDRESS")
                        .takes_value(true)
                        .required_if("constraint_type", ConstraintKind::Collection.as_ref())
                        .help("Collection mint, for --constraint-type collection"),
                )
                .arg(
                    Arg::with_name("token")
                        .long("token")
                        .validator(is_pubkey)
                        .value_name("MINT_ADDRESS")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required_if("constraint_type", ConstraintKind::Tokens.as_ref())
                        .help("Admitted mint, for --constraint-type tokens. May be repeated."),
                ),
        )
        .subcommand(
            SubCommand::with_name(CommandName::Address.into())
                .about("Derive escrow addresses without contacting the cluster")
                .arg(mint_arg())
                .arg(attribute_mint_arg())
                .arg(
                    Arg::with_name("owner")
                        .long("owner")
                        .validator(is_pubkey)
                        .value_name("ADDRESS")
                        .takes_value(true)
                        .help("Holder of the escrow NFT. Defaults to the keypair address."),
                ),
        )
        .subcommand(
            SubCommand::with_name(CommandName::ShowEscrow.into())
                .about("Display the escrow account attached to an NFT")
                .arg(mint_arg()),
        )
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    #[test]
    fn cluster_monikers() {
        assert_eq!(
            Cluster::from_str("mainnet-beta").unwrap(),
            Cluster::MainnetBeta
        );
        assert_eq!(Cluster::from_str("localnet").unwrap().url(), "http://localhost:8899");
        assert!(Cluster::from_str("mainnet").is_err());
        assert_eq!(Cluster::VARIANTS.len(), 4);
    }

    #[test]
    fn subcommand_names_parse() {
        for name in ["create", "create-escrow", "transfer-in", "show-escrow"] {
            assert_eq!(CommandName::from_str(name).unwrap().to_string(), name);
        }
        assert_eq!(
            CommandName::from_str("create-constraint-model").unwrap(),
            CommandName::CreateConstraintModel
        );
    }
}
