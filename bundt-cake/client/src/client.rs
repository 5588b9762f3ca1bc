//! Network seam between the escrow helpers and a cluster

use {
    async_trait::async_trait,
    solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig},
    solana_sdk::{
        account::Account, hash::Hash, pubkey::Pubkey, signature::Signature,
        transaction::Transaction,
    },
    std::{fmt, sync::Arc},
};

/// Error raised by a [`ProgramClient`]
pub type ProgramClientError = Box<dyn std::error::Error + Send + Sync>;
/// Result of a [`ProgramClient`] call
pub type ProgramClientResult<T> = Result<T, ProgramClientError>;

/// How a transaction is handed to the cluster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Skip the RPC node's simulation of the transaction before forwarding it
    pub skip_preflight: bool,
}

impl SendOptions {
    /// Submit without preflight simulation
    pub fn skip_preflight() -> Self {
        Self {
            skip_preflight: true,
        }
    }
}

/// Generic client interface for programs.
#[async_trait]
pub trait ProgramClient: Send + Sync {
    /// Blockhash to sign new transactions with
    async fn get_latest_blockhash(&self) -> ProgramClientResult<Hash>;

    /// Submit a signed transaction, without waiting for confirmation
    async fn send_transaction(
        &self,
        transaction: &Transaction,
        options: SendOptions,
    ) -> ProgramClientResult<Signature>;

    /// Fetch an account, `None` if it does not exist
    async fn get_account(&self, address: Pubkey) -> ProgramClientResult<Option<Account>>;
}

/// Program client for the nonblocking `RpcClient` from crate `solana-client`.
pub struct ProgramRpcClient {
    client: Arc<RpcClient>,
}

impl fmt::Debug for ProgramRpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramRpcClient").finish()
    }
}

impl ProgramRpcClient {
    /// Wrap an RPC client
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProgramClient for ProgramRpcClient {
    async fn get_latest_blockhash(&self) -> ProgramClientResult<Hash> {
        self.client.get_latest_blockhash().await.map_err(Into::into)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        options: SendOptions,
    ) -> ProgramClientResult<Signature> {
        self.client
            .send_transaction_with_config(
                transaction,
                RpcSendTransactionConfig {
                    skip_preflight: options.skip_preflight,
                    ..RpcSendTransactionConfig::default()
                },
            )
            .await
            .map_err(Into::into)
    }

    async fn get_account(&self, address: Pubkey) -> ProgramClientResult<Option<Account>> {
        Ok(self
            .client
            .get_account_with_commitment(&address, self.client.commitment())
            .await?
            .value)
    }
}
