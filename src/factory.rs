use crate::request::ValidatedRequest;
use alloy::rpc::types::Log;
use alloy::sol;
use alloy::sol_types::{SolCall, SolEvent};
use alloy_primitives::Bytes;

sol! {
    struct TokenParams {
        string name;
        string symbol;
        uint256 totalSupply;
        address[] whitelist;
    }

    function createToken(TokenParams params) payable returns (address token);

    event TokenCreated(address token, address creator);
}

/// ABI-encodes the factory's creation entry point for a validated request.
pub fn encode_create_call(request: &ValidatedRequest) -> Bytes {
    let call = createTokenCall {
        params: TokenParams {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            totalSupply: request.total_supply_wei,
            whitelist: request.whitelist.clone(),
        },
    };
    call.abi_encode().into()
}

pub fn decode_token_created(log: &Log) -> anyhow::Result<TokenCreated> {
    let log_data = log.data();
    let decoded = TokenCreated::decode_raw_log(log.topics(), &log_data.data)?;
    Ok(decoded)
}

/// Scans a receipt's emitted events for the first decodable TokenCreated.
/// Logs that merely share the signature topic but fail the typed decode are
/// skipped rather than trusted.
pub fn find_token_created(logs: &[Log]) -> Option<TokenCreated> {
    logs.iter()
        .filter(|log| log.topics().first() == Some(&TokenCreated::SIGNATURE_HASH))
        .find_map(|log| decode_token_created(log).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, LogData, U256};

    fn rpc_log(address: Address, data: LogData) -> Log {
        Log {
            inner: alloy_primitives::Log { address, data },
            block_hash: None,
            block_number: None,
            block_timestamp: None,
            transaction_hash: None,
            transaction_index: None,
            log_index: None,
            removed: false,
        }
    }

    fn token_created_log(token: Address, creator: Address) -> Log {
        let event = TokenCreated { token, creator };
        rpc_log(Address::repeat_byte(0xfa), event.encode_log_data())
    }

    #[test]
    fn decodes_emitted_token_created() {
        let token = Address::repeat_byte(0x11);
        let creator = Address::repeat_byte(0xcc);
        let log = token_created_log(token, creator);

        let decoded = decode_token_created(&log).unwrap();
        assert_eq!(decoded.token, token);
        assert_eq!(decoded.creator, creator);
    }

    #[test]
    fn finds_event_among_unrelated_logs() {
        let token = Address::repeat_byte(0x11);
        let unrelated = rpc_log(
            Address::repeat_byte(0xee),
            LogData::new_unchecked(vec![B256::repeat_byte(0xab)], Bytes::new()),
        );
        let logs = vec![unrelated, token_created_log(token, Address::repeat_byte(0xcc))];

        let found = find_token_created(&logs).unwrap();
        assert_eq!(found.token, token);
    }

    #[test]
    fn missing_event_yields_none() {
        let unrelated = rpc_log(
            Address::repeat_byte(0xee),
            LogData::new_unchecked(vec![B256::repeat_byte(0xab)], Bytes::new()),
        );
        assert!(find_token_created(&[unrelated]).is_none());
        assert!(find_token_created(&[]).is_none());
    }

    #[test]
    fn garbage_data_under_right_topic_is_skipped() {
        let bad = rpc_log(
            Address::repeat_byte(0xfa),
            LogData::new_unchecked(vec![TokenCreated::SIGNATURE_HASH], Bytes::from(vec![0x01])),
        );
        assert!(find_token_created(&[bad]).is_none());
    }

    #[test]
    fn encodes_creation_calldata_with_selector() {
        let request = ValidatedRequest {
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            total_supply_wei: U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18)),
            whitelist: vec![Address::repeat_byte(0x44)],
        };

        let calldata = encode_create_call(&request);
        assert_eq!(&calldata[..4], &createTokenCall::SELECTOR[..]);
        assert!(calldata.len() > 4);
    }
}
