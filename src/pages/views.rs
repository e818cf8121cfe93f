use crate::config::NetworkConfig;
use crate::pages::links;
use crate::submitter::TokenCreationResult;
use alloy_primitives::{U256, utils::format_units};
use comfy_table::{Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

const DISCLAIMER: &str = "This service is recommended for gaming mechanics and experimental \
purposes only. We do not endorse or encourage any fraudulent schemes, rug pulls, or illegal \
activities. Users are solely responsible for their actions and compliance with local regulations.";

/// "0.35", not "0.350000000000000000".
pub fn format_native_amount(amount_wei: U256) -> String {
    let formatted = format_units(amount_wei, 18u8).unwrap_or_else(|_| amount_wei.to_string());
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn fee_line(network: &NetworkConfig) -> String {
    format!(
        "{} {}",
        format_native_amount(network.creation_fee_wei),
        network.native_currency.symbol
    )
}

pub fn render_welcome(network: &NetworkConfig) -> String {
    let fee = fee_line(network);
    let mut out = String::new();
    out.push_str("Secure Token Creator\n");
    out.push_str("====================\n\n");
    out.push_str("Create your own secure token with advanced anti-bot and anti-dump protection.\n");
    out.push_str(&format!("Flat price: {fee} per token, all security features included.\n\n"));
    out.push_str("  * Advanced Security - anti-bot & anti-dump protection built-in\n");
    out.push_str(&format!("  * Fair Price       - just {fee} for a professional token\n"));
    out.push_str("  * Ready to Use     - instant deployment, no coding needed\n\n");
    out.push_str("Connect a wallet to get started, then run `tokenctl create`.\n\n");
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

pub fn render_create_banner(network: &NetworkConfig) -> String {
    format!(
        "Create Your Token\n-----------------\nJust {} for your own secure token. \
The creator and whitelisted addresses are excluded from sell-side fees; \
everyone else can buy freely.\n",
        fee_line(network)
    )
}

pub fn render_success(result: &TokenCreationResult) -> String {
    let token_address = format!("{}", result.token_address);
    let tx_hash = format!("{}", result.transaction_hash);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Field", "Value"]);
    table.add_row(vec![Cell::new("Token Address"), Cell::new(&token_address)]);
    table.add_row(vec![Cell::new("Transaction Hash"), Cell::new(&tx_hash)]);

    format!(
        "Token created successfully!\n\n{}\n\nNext: tokenctl details --address {} --tx {}\n",
        table, token_address, tx_hash
    )
}

pub fn render_details(chain_id: u64, address: &str, tx_hash: Option<&str>) -> String {
    if address.is_empty() {
        return "Invalid token address. Please pass a valid token address via --address.\n"
            .to_string();
    }

    let mut out = String::new();
    out.push_str("Your Token Details\n");
    out.push_str("==================\n\n");

    out.push_str("Ready to use: your token is already deployed and fully functional. \
Contract verification is optional and only needed if you want to make the \
contract code public.\n\n");
    out.push_str("Security note: by default only the token creator and whitelisted \
addresses can sell; anyone can buy. This is the anti-bot/anti-dump measure.\n\n");

    out.push_str("Quick actions:\n");
    out.push_str(&format!(
        "  View on BSCScan:      {}\n",
        links::explorer_address_url(chain_id, address)
    ));
    out.push_str(&format!(
        "  Add liquidity:        {}\n",
        links::pancake_add_liquidity_url(address)
    ));
    out.push_str(&format!(
        "  Trade on PancakeSwap: {}\n\n",
        links::pancake_swap_url(address)
    ));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Field", "Value"]);
    table.add_row(vec![Cell::new("Token Address"), Cell::new(address)]);
    if let Some(tx_hash) = tx_hash {
        table.add_row(vec![Cell::new("Creation Transaction"), Cell::new(tx_hash)]);
    }
    out.push_str(&table.to_string());
    out.push_str("\n\n");

    out.push_str(&render_function_guide());
    out.push('\n');

    out.push_str("Contract verification (optional):\n");
    out.push_str("  Verification makes your contract code public; the token works without it.\n");
    out.push_str(&format!(
        "  1. Open {}\n",
        links::verification_url(chain_id, address)
    ));
    out.push_str("  2. Click \"Verify and Publish\"\n");
    out.push_str("  3. Compiler type: Solidity (Single file), version v0.8.19, license MIT\n");
    out.push_str("  4. Optimization: Yes, 200 runs\n");
    out.push_str("  5. Paste both Token.sol and TokenFactory.sol sources\n");
    out.push_str("  6. Constructor arguments: copy the input data after the bytecode from the creation transaction\n\n");

    out.push_str("Add liquidity:\n");
    out.push_str("  1. Visit PancakeSwap's liquidity page\n");
    out.push_str("  2. Select your token and a BNB/BUSD pair\n");
    out.push_str("  3. Enter the token and BNB/BUSD amounts (recommended initial liquidity: $500-1000)\n");
    out.push_str("  4. Click \"Supply\" and confirm the transaction\n\n");

    out.push_str("Marketing setup:\n");
    out.push_str("  - Submit your token to CoinGecko and CoinMarketCap\n");
    out.push_str("  - Create social media accounts for your token\n");
    out.push_str("  - Join relevant crypto communities\n\n");

    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

pub fn render_manage(chain_id: u64, address: &str) -> String {
    if address.is_empty() {
        return "Invalid token address. Please pass a valid token address via --address.\n"
            .to_string();
    }

    let mut out = String::new();
    out.push_str("Manage Your Token\n");
    out.push_str("=================\n\n");
    out.push_str(&format!(
        "Read functions:  {}\n",
        links::contract_read_url(chain_id, address)
    ));
    out.push_str(&format!(
        "Write functions: {}\n\n",
        links::contract_write_url(chain_id, address)
    ));
    out.push_str(&render_function_guide());
    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

pub fn render_guide() -> String {
    let mut out = String::new();
    out.push_str("Complete Token Guide\n");
    out.push_str("====================\n\n");

    out.push_str("1. Contract verification\n");
    out.push_str("   - Go to BSCScan and search for your token address\n");
    out.push_str("   - Click \"Verify and Publish\" in the Contract tab\n");
    out.push_str("   - Compiler type: Solidity (Single file)\n");
    out.push_str("   - Optimization: Yes, 200 runs\n");
    out.push_str("   - Constructor arguments: the input data after the contract bytecode\n");
    out.push_str("     in your creation transaction\n\n");

    out.push_str("2. Adding liquidity\n");
    out.push_str("   - Visit https://pancakeswap.finance/add\n");
    out.push_str("   - Select your token and a BNB/BUSD pair\n");
    out.push_str("   - Enter the amounts and click \"Supply\"\n");
    out.push_str("   - Recommended initial liquidity: $500-1000 worth of BNB/BUSD\n\n");

    out.push_str(&render_function_guide());
    out.push('\n');

    out.push_str("3. Important links\n");
    out.push_str("   - BSCScan:     https://bscscan.com\n");
    out.push_str("   - PancakeSwap: https://pancakeswap.finance\n\n");

    out.push_str("Important:\n");
    out.push_str("  - Always test functions with small amounts first\n");
    out.push_str("  - Keep your private keys secure\n");
    out.push_str("  - Consider locking liquidity for trust\n\n");

    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

fn render_function_guide() -> String {
    let mut out = String::new();
    out.push_str("Contract functions guide:\n");
    out.push_str("  Read functions:\n");
    out.push_str("    name()                      - the name of your token\n");
    out.push_str("    symbol()                    - the token symbol\n");
    out.push_str("    decimals()                  - number of decimals (18)\n");
    out.push_str("    totalSupply()               - total supply of tokens\n");
    out.push_str("    balanceOf(account)          - token balance of an address\n");
    out.push_str("    allowance(owner, spender)   - approved spending amount\n");
    out.push_str("  Write functions:\n");
    out.push_str("    transfer(to, amount)        - send tokens to another address\n");
    out.push_str("    approve(spender, amount)    - allow another address to spend your tokens\n");
    out.push_str("    transferFrom(from, to, amount) - transfer after approval\n");
    out.push_str("    increaseAllowance(spender, addedValue)      - raise a spender's allowance\n");
    out.push_str("    decreaseAllowance(spender, subtractedValue) - lower a spender's allowance\n");
    out
}
