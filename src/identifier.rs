//! Protocol identifiers hidden in hashed token names.
//!
//! Channel, connection and client ends are represented on chain by
//! one-of-a-kind tokens. Cardano token names are at most 32 bytes, too short
//! for the base auth token identity plus a variable-length identifier, so the
//! token name is built as
//!
//! `sha3(base policy ++ base name)[..40] ++ sha3(domain salt)[..8] ++ hex(identifier)`
//!
//! with hashes taken as lowercase hex strings. The prefix is reproducible from
//! public data, and the identifier is recovered by stripping it.
use crate::std::{borrow::ToOwned, string::String, vec::Vec};

use parity_scale_codec::{Decode, Encode};
use sha3::{Digest, Sha3_256};

use crate::error::IdentifierError;

/// Number of hex characters kept from the base token hash.
pub const BASE_TOKEN_HASH_LEN: usize = 40;

/// Number of hex characters kept from the domain salt hash.
pub const SALT_HASH_LEN: usize = 8;

/// Domain salt for channel identifiers.
pub const CHANNEL_SALT: &str = "channel";

/// Domain salt for connection identifiers.
pub const CONNECTION_SALT: &str = "connection";

/// Domain salt for client identifiers.
pub const CLIENT_SALT: &str = "ibc_client";

/// Cardano native asset identity, used as authorization capability.
#[derive(Clone, Debug, Decode, Encode, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AuthToken {
    /// Minting policy id, hex.
    pub policy_id: String,

    /// Asset name, hex.
    pub name: String,
}

/// SHA3-256 digest as lowercase hex.
///
/// Same function is used for identifier prefixes and for voucher token
/// names, so that identifiers derived by different components match.
pub fn sha3_256_hex(data: &[u8]) -> String {
    hex::encode(Sha3_256::digest(data))
}

/// Voucher token name for a full denom path.
pub fn voucher_token_name(full_denom_path: &str) -> String {
    sha3_256_hex(full_denom_path.as_bytes())
}

fn decode_hex(input: &str) -> Result<Vec<u8>, IdentifierError> {
    hex::decode(input).map_err(|_| IdentifierError::InvalidHexInput {
        input: input.to_owned(),
    })
}

/// Token name prefix for given base token and domain salt.
pub fn derive_prefix(base_token: &AuthToken, domain_salt: &str) -> Result<String, IdentifierError> {
    let mut base_bytes = decode_hex(&base_token.policy_id)?;
    base_bytes.extend_from_slice(&decode_hex(&base_token.name)?);

    let base_part = sha3_256_hex(&base_bytes);
    let salt_part = sha3_256_hex(domain_salt.as_bytes());

    let mut prefix = String::with_capacity(BASE_TOKEN_HASH_LEN + SALT_HASH_LEN);
    prefix.push_str(&base_part[..BASE_TOKEN_HASH_LEN]);
    prefix.push_str(&salt_part[..SALT_HASH_LEN]);
    Ok(prefix)
}

/// Token name carrying `identifier` under given base token and salt.
pub fn encode_identifier(
    base_token: &AuthToken,
    domain_salt: &str,
    identifier: &str,
) -> Result<String, IdentifierError> {
    let mut token_name = derive_prefix(base_token, domain_salt)?;
    token_name.push_str(&hex::encode(identifier.as_bytes()));
    Ok(token_name)
}

/// Recover identifier from token name.
///
/// Returns `Ok(None)` if the token name was not derived from this base token
/// and salt. All occurrences of the prefix are removed before the remainder
/// is decoded, `Ok(Some(""))` means the prefix was found with nothing after
/// it.
pub fn recover_identifier(
    token_name_hex: &str,
    base_token: &AuthToken,
    domain_salt: &str,
) -> Result<Option<String>, IdentifierError> {
    let prefix = derive_prefix(base_token, domain_salt)?;
    if !token_name_hex.contains(&prefix) {
        return Ok(None);
    }

    let identifier_hex = token_name_hex.replace(&prefix, "");
    let identifier_bytes = decode_hex(&identifier_hex)?;
    match String::from_utf8(identifier_bytes) {
        Ok(identifier) => Ok(Some(identifier)),
        Err(_) => Err(IdentifierError::NotUtf8 {
            hex: identifier_hex,
        }),
    }
}

/// Recover channel identifier, e.g. `channel-12`.
pub fn recover_channel_id(
    token_name_hex: &str,
    base_token: &AuthToken,
) -> Result<Option<String>, IdentifierError> {
    recover_identifier(token_name_hex, base_token, CHANNEL_SALT)
}

/// Recover connection identifier, e.g. `connection-3`.
pub fn recover_connection_id(
    token_name_hex: &str,
    base_token: &AuthToken,
) -> Result<Option<String>, IdentifierError> {
    recover_identifier(token_name_hex, base_token, CONNECTION_SALT)
}

/// Recover client identifier, e.g. `ibc_client-0`.
pub fn recover_client_id(
    token_name_hex: &str,
    base_token: &AuthToken,
) -> Result<Option<String>, IdentifierError> {
    recover_identifier(token_name_hex, base_token, CLIENT_SALT)
}
