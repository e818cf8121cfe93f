use alloy_primitives::{Address, U256, utils::parse_ether};
use anyhow::{Context, Result};
use serde::Serialize;
use std::str::FromStr;

const BSC_MAINNET_CHAIN_ID: u64 = 56;
const BSC_TESTNET_CHAIN_ID: u64 = 97;

const DEFAULT_CREATION_FEE_WEI: u64 = 350_000_000_000_000_000; // 0.35 BNB
const DEFAULT_GAS_LIMIT: u64 = 3_000_000;

/// Serialized verbatim into the wallet's add-chain request.
#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Everything the flow needs to know about one deployment target. The
/// factory address and fee are injected here instead of being scattered as
/// inline constants, so adding a network is a configuration change only.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
    pub factory_address: Address,
    pub creation_fee_wei: U256,
    pub gas_limit: u64,
}

impl NetworkConfig {
    pub fn bsc_mainnet(factory_address: Address) -> Self {
        NetworkConfig {
            chain_id: BSC_MAINNET_CHAIN_ID,
            chain_name: "Binance Smart Chain".to_string(),
            native_currency: NativeCurrency {
                name: "BNB".to_string(),
                symbol: "BNB".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://bsc-dataseed1.binance.org".to_string()],
            block_explorer_urls: vec!["https://bscscan.com/".to_string()],
            factory_address,
            creation_fee_wei: U256::from(DEFAULT_CREATION_FEE_WEI),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    pub fn bsc_testnet(factory_address: Address) -> Self {
        NetworkConfig {
            chain_id: BSC_TESTNET_CHAIN_ID,
            chain_name: "Binance Smart Chain Testnet".to_string(),
            native_currency: NativeCurrency {
                name: "BNB".to_string(),
                symbol: "tBNB".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://data-seed-prebsc-1-s1.binance.org:8545".to_string()],
            block_explorer_urls: vec!["https://testnet.bscscan.com/".to_string()],
            factory_address,
            creation_fee_wei: U256::from(DEFAULT_CREATION_FEE_WEI),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    /// Chain id in the 0x-prefixed hex form wallet providers expect.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub wallet_rpc_url: String,
    pub database_url: String,
    pub target_chain_id: u64,
    pub networks: Vec<NetworkConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let wallet_rpc_url = std::env::var("WALLET_RPC_URL")
            .context("WALLET_RPC_URL must be set in .env")?;

        let factory_address_str = std::env::var("FACTORY_ADDRESS")
            .context("FACTORY_ADDRESS must be set in .env")?;

        let factory_address = Address::from_str(&factory_address_str)
            .context("Invalid FACTORY_ADDRESS format")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./token-creator.db".to_string());

        let target_chain_id = match std::env::var("TARGET_CHAIN_ID") {
            Ok(raw) => raw.parse().context("Invalid TARGET_CHAIN_ID")?,
            Err(_) => BSC_MAINNET_CHAIN_ID,
        };

        let mut networks = vec![
            NetworkConfig::bsc_mainnet(factory_address),
            NetworkConfig::bsc_testnet(factory_address),
        ];

        if let Ok(raw) = std::env::var("CREATION_FEE") {
            let fee = parse_ether(&raw).context("Invalid CREATION_FEE format")?;
            for network in &mut networks {
                network.creation_fee_wei = fee;
            }
        }

        if let Ok(raw) = std::env::var("GAS_LIMIT") {
            let gas_limit = raw.parse().context("Invalid GAS_LIMIT")?;
            for network in &mut networks {
                network.gas_limit = gas_limit;
            }
        }

        Ok(Config {
            wallet_rpc_url,
            database_url,
            target_chain_id,
            networks,
        })
    }

    pub fn network(&self, chain_id: u64) -> Option<&NetworkConfig> {
        self.networks.iter().find(|network| network.chain_id == chain_id)
    }

    pub fn target_network(&self) -> Result<&NetworkConfig> {
        self.network(self.target_chain_id)
            .with_context(|| format!("No network configured for chain id {}", self.target_chain_id))
    }
}
