//! Argument groups every generated subcommand flattens in.

use clap::Args;
use tracing::debug;

use crate::backend::ContractBackend;
use crate::parse;
use crate::tx::{BlockIdentifier, TransactionConfig, TransactionOverrides};
use crate::value::{Address, U256};

/// Flags for read-only subcommands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CallArgs {
    /// Network to connect to
    #[arg(long)]
    pub network: String,

    /// Address of the deployed contract
    #[arg(long, value_parser = parse::address)]
    pub address: Option<Address>,

    /// Block to call against: "latest" or a block number
    #[arg(long = "block-number", default_value = "latest")]
    pub block_number: BlockIdentifier,
}

/// Flags for state-mutating subcommands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TransactArgs {
    /// Network to connect to
    #[arg(long)]
    pub network: String,

    /// Address of the deployed contract
    #[arg(long, value_parser = parse::address)]
    pub address: Option<Address>,

    /// Path to the signer's keystore file
    #[arg(long)]
    pub sender: String,

    /// Keystore password
    #[arg(long, env = "ABIFORGE_KEYSTORE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Gas price (wei)
    #[arg(long = "gas-price", value_parser = parse::uint_parser(256))]
    pub gas_price: Option<U256>,

    /// Max fee per gas for EIP-1559 transactions (wei)
    #[arg(long = "max-fee-per-gas", value_parser = parse::uint_parser(256))]
    pub max_fee_per_gas: Option<U256>,

    /// Max priority fee per gas for EIP-1559 transactions (wei)
    #[arg(long = "max-priority-fee-per-gas", value_parser = parse::uint_parser(256))]
    pub max_priority_fee_per_gas: Option<U256>,

    /// Confirmations to wait for
    #[arg(long)]
    pub confirmations: Option<u64>,

    /// Transaction nonce
    #[arg(long)]
    pub nonce: Option<u64>,

    /// Value to send with the transaction (wei)
    #[arg(long, value_parser = parse::uint_parser(256))]
    pub value: Option<U256>,

    /// Print the full transaction receipt
    #[arg(long)]
    pub verbose: bool,
}

impl TransactArgs {
    /// Only the flags that were actually given.
    pub fn overrides(&self) -> TransactionOverrides {
        TransactionOverrides {
            gas_price: self.gas_price,
            max_fee: self.max_fee_per_gas,
            priority_fee: self.max_priority_fee_per_gas,
            required_confs: self.confirmations,
            nonce: self.nonce,
            value: self.value,
        }
    }

    /// Resolve the signer through `backend` and attach the overrides.
    pub fn transaction_config<B: ContractBackend>(
        &self,
        backend: &B,
    ) -> Result<TransactionConfig<B::Signer>, B::Error> {
        let from = backend.load_account(&self.sender, self.password.as_deref())?;
        let overrides = self.overrides();
        debug!(sender = %self.sender, ?overrides, "assembled transaction config");
        Ok(TransactionConfig::new(from).with_overrides(overrides))
    }
}
