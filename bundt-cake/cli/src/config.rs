use {
    crate::clap_app::{Cluster, Error},
    bundt_cake_client::client::{ProgramClient, ProgramRpcClient},
    clap::ArgMatches,
    solana_clap_utils::input_parsers::pubkey_of,
    solana_cli_output::OutputFormat,
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_sdk::{
        commitment_config::CommitmentConfig,
        pubkey::Pubkey,
        signature::{read_keypair_file, Signer},
    },
    std::{str::FromStr, sync::Arc},
};

pub struct Config {
    /// Signer already in hand; when `None` it is read from `keypair_path` on
    /// first use, so offline commands run without a keypair.
    pub default_signer: Option<Arc<dyn Signer>>,
    pub keypair_path: String,
    pub program_client: Arc<dyn ProgramClient>,
    pub json_rpc_url: String,
    pub program_id: Pubkey,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl Config {
    /// Build a config talking to the cluster selected on the command line
    pub fn new(matches: &ArgMatches<'_>) -> Result<Self, Error> {
        let json_rpc_url = json_rpc_url(matches);
        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            json_rpc_url.clone(),
            CommitmentConfig::confirmed(),
        ));
        let program_client: Arc<dyn ProgramClient> = Arc::new(ProgramRpcClient::new(rpc_client));
        Self::new_with_client(matches, json_rpc_url, program_client)
    }

    pub fn new_with_client(
        matches: &ArgMatches<'_>,
        json_rpc_url: String,
        program_client: Arc<dyn ProgramClient>,
    ) -> Result<Self, Error> {
        let cli_config = load_cli_config(matches)?;
        let keypair_path = matches
            .value_of("keypair")
            .unwrap_or(&cli_config.keypair_path)
            .to_string();

        let program_id = pubkey_of(matches, "program_id").unwrap_or_else(bundt_cake_interface::id);

        let verbose = matches.is_present("verbose");
        let output_format = matches
            .value_of("output_format")
            .map(|value| match value {
                "json" => OutputFormat::Json,
                "json-compact" => OutputFormat::JsonCompact,
                _ => unreachable!(),
            })
            .unwrap_or(if verbose {
                OutputFormat::DisplayVerbose
            } else {
                OutputFormat::Display
            });

        Ok(Self {
            default_signer: None,
            keypair_path,
            program_client,
            json_rpc_url,
            program_id,
            output_format,
            verbose,
        })
    }

    /// Signer paying for and signing transactions
    pub fn default_signer(&self) -> Result<Arc<dyn Signer>, Error> {
        if let Some(signer) = &self.default_signer {
            return Ok(signer.clone());
        }
        let keypair = read_keypair_file(&self.keypair_path)
            .map_err(|err| format!("failed to read keypair `{}`: {}", self.keypair_path, err))?;
        Ok(Arc::new(keypair))
    }
}

fn load_cli_config(matches: &ArgMatches<'_>) -> Result<solana_cli_config::Config, Error> {
    match matches.value_of("config_file") {
        // The default path need not exist.
        Some(config_file)
            if matches.occurrences_of("config_file") > 0
                || std::path::Path::new(config_file).exists() =>
        {
            solana_cli_config::Config::load(config_file)
                .map_err(|_| format!("Could not find config file `{}`", config_file).into())
        }
        _ => Ok(solana_cli_config::Config::default()),
    }
}

/// `--rpc` if given, otherwise the URL of the `--env` cluster
pub fn json_rpc_url(matches: &ArgMatches<'_>) -> String {
    if let Some(url) = matches.value_of("json_rpc_url") {
        return url.to_string();
    }
    matches
        .value_of("env")
        .and_then(|env| Cluster::from_str(env).ok())
        .unwrap_or(Cluster::Devnet)
        .url()
        .to_string()
}

#[cfg(test)]
mod tests {
    use {super::*, crate::clap_app::app};

    fn url_for(args: &[&str]) -> String {
        let program_id = bundt_cake_interface::id().to_string();
        let matches = app(&program_id).get_matches_from(args);
        let (_, sub_matches) = matches.subcommand();
        json_rpc_url(sub_matches.unwrap())
    }

    #[test]
    fn rpc_url_selection() {
        assert_eq!(
            url_for(&["bundt-cake", "create"]),
            "https://api.devnet.solana.com"
        );
        assert_eq!(
            url_for(&["bundt-cake", "-e", "mainnet-beta", "create"]),
            "https://api.mainnet-beta.solana.com"
        );
        assert_eq!(
            url_for(&[
                "bundt-cake",
                "-e",
                "testnet",
                "-r",
                "http://127.0.0.1:8899",
                "create"
            ]),
            "http://127.0.0.1:8899"
        );
    }
}
