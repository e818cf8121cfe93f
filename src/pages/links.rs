//! Chain-aware external links. Addresses and hashes arrive as plain strings
//! from the command line; beyond a presence check they are passed through
//! untouched, matching the explorer's own tolerance.

const BSC_MAINNET_CHAIN_ID: u64 = 56;

fn explorer_base(chain_id: u64) -> &'static str {
    if chain_id == BSC_MAINNET_CHAIN_ID {
        "https://bscscan.com"
    } else {
        "https://testnet.bscscan.com"
    }
}

pub fn explorer_address_url(chain_id: u64, address: &str) -> String {
    format!("{}/address/{}", explorer_base(chain_id), address)
}

pub fn explorer_tx_url(chain_id: u64, tx_hash: &str) -> String {
    format!("{}/tx/{}", explorer_base(chain_id), tx_hash)
}

/// The "Verify and Publish" view for a contract.
pub fn verification_url(chain_id: u64, address: &str) -> String {
    format!("{}/address/{}#code", explorer_base(chain_id), address)
}

pub fn contract_write_url(chain_id: u64, address: &str) -> String {
    format!("{}/address/{}#writeContract", explorer_base(chain_id), address)
}

pub fn contract_read_url(chain_id: u64, address: &str) -> String {
    format!("{}/address/{}#readContract", explorer_base(chain_id), address)
}

pub fn pancake_add_liquidity_url(address: &str) -> String {
    format!("https://pancakeswap.finance/add/{address}")
}

pub fn pancake_swap_url(address: &str) -> String {
    format!("https://pancakeswap.finance/swap?outputCurrency={address}")
}
