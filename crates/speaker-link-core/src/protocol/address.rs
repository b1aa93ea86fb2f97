//! Address validation for manually added speakers.

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

/// Four dot-separated groups of one to three digits
const ADDRESS_PATTERN: &str = r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$";

fn address_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ADDRESS_PATTERN).expect("address pattern is valid"))
}

/// Validate a dotted-quad address, each octet 0-255.
///
/// Surrounding whitespace is ignored. Leading zeros are accepted and read as
/// decimal.
pub fn validate_address(input: &str) -> Result<Ipv4Addr, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidAddress(trimmed.to_string());

    let caps = address_regex().captures(trimmed).ok_or_else(invalid)?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let value: u16 = caps[i + 1].parse().map_err(|_| invalid())?;
        *octet = u8::try_from(value).map_err(|_| invalid())?;
    }

    Ok(Ipv4Addr::from(octets))
}
