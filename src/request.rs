use crate::error::CreatorError;
use alloy_primitives::{
    Address, U256,
    utils::{ParseUnits, parse_units},
};
use regex::Regex;
use std::str::FromStr;

/// Every token minted through the factory uses 18 decimal places.
pub const TOKEN_DECIMALS: u8 = 18;

const ADDRESS_PATTERN: &str = r"^0x[a-fA-F0-9]{40}$";

fn invalid(field: &'static str, reason: impl Into<String>) -> CreatorError {
    CreatorError::InvalidRequest {
        field,
        reason: reason.into(),
    }
}

/// Ordered set of distinct fee-exempt addresses. Entries are validated on
/// the way in, so a whitelist can never hold a malformed address.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    entries: Vec<Address>,
}

impl Whitelist {
    /// Adds an address given as raw user input. Returns false when the
    /// address is already present (duplicates are silently ignored); a
    /// malformed entry is rejected without mutating the set.
    pub fn add(&mut self, raw: &str) -> Result<bool, CreatorError> {
        let matches_pattern = Regex::new(ADDRESS_PATTERN)
            .map(|re| re.is_match(raw))
            .unwrap_or(false);
        if !matches_pattern {
            return Err(invalid("whitelist", format!("invalid address format: {raw}")));
        }

        let address = Address::from_str(raw)
            .map_err(|_| invalid("whitelist", format!("invalid address format: {raw}")))?;

        if self.entries.contains(&address) {
            return Ok(false);
        }

        self.entries.push(address);
        Ok(true)
    }

    pub fn remove(&mut self, address: &Address) {
        self.entries.retain(|entry| entry != address);
    }

    pub fn entries(&self) -> &[Address] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// User-entered token parameters, as typed. Validation turns this into a
/// [`ValidatedRequest`] ready for ABI encoding.
#[derive(Debug, Clone, Default)]
pub struct TokenCreationForm {
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
    pub whitelist: Whitelist,
}

#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub name: String,
    pub symbol: String,
    pub total_supply_wei: U256,
    pub whitelist: Vec<Address>,
}

impl TokenCreationForm {
    /// Whether the submit control should be enabled: name, symbol and total
    /// supply present, and the supply a strictly positive decimal number.
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<ValidatedRequest, CreatorError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("name", "must not be empty"));
        }

        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(invalid("symbol", "must not be empty"));
        }

        let supply = self.total_supply.trim();
        if supply.is_empty() {
            return Err(invalid("totalSupply", "must not be empty"));
        }

        let parsed = parse_units(supply, TOKEN_DECIMALS)
            .map_err(|e| invalid("totalSupply", e.to_string()))?;
        let total_supply_wei = match parsed {
            ParseUnits::U256(value) if !value.is_zero() => value,
            _ => return Err(invalid("totalSupply", "must be a strictly positive number")),
        };

        Ok(ValidatedRequest {
            name: name.to_string(),
            symbol: symbol.to_string(),
            total_supply_wei,
            whitelist: self.whitelist.entries().to_vec(),
        })
    }

    /// Resets every field, as the UI does after a successful creation.
    pub fn clear(&mut self) {
        self.name.clear();
        self.symbol.clear();
        self.total_supply.clear();
        self.whitelist.clear();
    }
}
