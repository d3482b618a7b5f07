//! Syntax checks for `0x`-prefixed 20-byte hex addresses.

use alloy::primitives::Address;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern is a valid regex")
});

/// Returns true when `candidate` is `0x` followed by exactly 40 hex digits,
/// in any case.
pub fn is_address_format(candidate: &str) -> bool {
    ADDRESS_PATTERN.is_match(candidate)
}

/// Stricter than [`is_address_format`]: mixed-case input must carry a valid
/// EIP-55 checksum. Single-case input is accepted as is.
pub fn is_valid_address(candidate: &str) -> bool {
    if !is_address_format(candidate) {
        return false;
    }
    let digits = &candidate[2..];
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }
    match Address::from_str(candidate) {
        Ok(address) => address.to_checksum(None) == candidate,
        Err(_) => false,
    }
}

/// Lowercase form used for comparisons and for the signed message.
pub fn normalize(address: &str) -> String {
    address.to_ascii_lowercase()
}
