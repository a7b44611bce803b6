//! The deployment driver: builds, signs and broadcasts the creation
//! transaction for a compiled contract, then waits for it to be mined.

use alloy_consensus::{SignableTransaction, TxEip1559};
use alloy_eips::eip2718::Encodable2718;
use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, B256, Bytes, TxKind, U256};
use alloy_signer::SignerSync;
use anyhow::{Context, Result};

use crate::{ContractArtifact, NetworkProfile, abi, rpc};

/// Maximum time to wait for the deployment transaction to be mined.
const RECEIPT_TIMEOUT_SECS: u64 = 300;

/// Fixed priority fee for the deployment transaction (1 gwei).
const PRIORITY_FEE_WEI: u128 = 1_000_000_000;

/// Handle to a contract created by a deployment. Exists only for the process
/// lifetime; the persistent form is [`crate::DeploymentRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The deployed contract address.
    pub address: Address,
    /// Hash of the deployment transaction.
    pub transaction_hash: B256,
    /// Block the deployment was mined in.
    pub block_number: u64,
}

/// Drives a single contract deployment against a [`NetworkProfile`].
pub struct ContractDeployer {
    network: NetworkProfile,
    client: reqwest::Client,
}

impl ContractDeployer {
    /// Create a deployer for the given network profile.
    pub fn new(network: NetworkProfile) -> Result<Self> {
        let client = rpc::create_client()?;
        Ok(Self { network, client })
    }

    /// Deploy `artifact` with the given ABI-encoded constructor arguments.
    ///
    /// Submits one creation transaction and suspends until it is mined.
    /// Once broadcast the transaction cannot be retracted; there are no
    /// retries. Every failure propagates to the caller.
    pub async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: &Bytes,
    ) -> Result<DeployedContract> {
        let url = self.network.rpc_url.as_str();
        let signer = self.network.signer();
        let from = signer.address();

        // An unreachable endpoint fails here, before anything is signed.
        let chain_id = rpc::query_chain_id(&self.client, url).await.with_context(|| {
            format!(
                "Failed to reach the RPC endpoint for network {}",
                self.network.name
            )
        })?;

        if let Some(expected) = self.network.chain_id {
            if chain_id != expected {
                anyhow::bail!(
                    "RPC endpoint serves chain ID {} but network {} expects {}",
                    chain_id,
                    self.network.name,
                    expected
                );
            }
        }

        let input = abi::init_code(&artifact.bytecode, constructor_args);

        let nonce = rpc::query_transaction_count(&self.client, url, &from)
            .await
            .context("Failed to query deployer account nonce")?;
        let gas_price = rpc::query_gas_price(&self.client, url)
            .await
            .context("Failed to query gas price")?;
        let gas_limit = rpc::estimate_gas(&self.client, url, &from, &input)
            .await
            .context("Failed to estimate deployment gas")?;

        tracing::info!(
            contract = %artifact.contract_name,
            network = %self.network.name,
            deployer = %from,
            nonce,
            gas_limit,
            "Deploying contract..."
        );

        let tx = TxEip1559 {
            chain_id,
            nonce,
            gas_limit,
            max_fee_per_gas: gas_price * 2,
            max_priority_fee_per_gas: PRIORITY_FEE_WEI,
            to: TxKind::Create,
            value: U256::ZERO,
            access_list: AccessList::default(),
            input,
        };

        let signature = signer
            .sign_hash_sync(&tx.signature_hash())
            .context("Failed to sign deployment transaction")?;
        let signed = tx.into_signed(signature);
        let raw: Bytes = signed.encoded_2718().into();
        let tx_hash = *signed.hash();

        rpc::send_raw_transaction(&self.client, url, &raw)
            .await
            .context("Failed to broadcast deployment transaction")?;

        tracing::info!(tx_hash = %tx_hash, "Transaction sent, waiting for it to be mined...");

        let receipt = rpc::wait_for_receipt(&self.client, url, &tx_hash, RECEIPT_TIMEOUT_SECS)
            .await
            .context("Failed waiting for the deployment receipt")?;

        if receipt.status != 1 {
            anyhow::bail!("Deployment transaction {} reverted", tx_hash);
        }

        let address = receipt
            .contract_address
            .context("No contract address in deployment receipt")?;

        tracing::info!(
            address = %address,
            block_number = receipt.block_number,
            "Contract deployed"
        );

        Ok(DeployedContract {
            address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}
