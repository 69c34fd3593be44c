//! Byte-exact datum encoding for host state and handler UTxOs.
//!
//! Each call produces the datum of a new output, datums are never updated in
//! place. Output is lowercase hex of definite-length CBOR, see [`crate::cbor`].
use crate::std::{string::String, vec::Vec};

use crate::cbor::{
    write_constr, write_fixed_hex_bytes, write_hex_bytes, write_small_uint_array, write_uint,
    write_uint64,
};
use crate::error::CborError;
use crate::identifier::AuthToken;

/// Length of state root hash, bytes.
pub const STATE_ROOT_LEN: usize = 32;

/// Length of Cardano minting policy id, bytes.
pub const POLICY_ID_LEN: usize = 28;

/// IBC host state fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostState {
    pub version: u64,

    /// Commitment root over the whole IBC store, hex, 32 bytes.
    pub ibc_state_root: String,
    pub next_client_sequence: u64,
    pub next_connection_sequence: u64,
    pub next_channel_sequence: u64,

    /// Ports bound so far. Bounded by protocol design, at most 23 entries.
    pub bound_port: Vec<u64>,

    /// POSIX time in milliseconds, always encoded as 8-byte integer.
    pub last_update_time: u64,
}

/// Datum of the host state UTxO.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostStateDatum {
    pub state: HostState,

    /// Policy id of the host state NFT, hex, 28 bytes.
    pub nft_policy: String,
}

/// IBC handler fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandlerState {
    pub next_client_sequence: u64,
    pub next_connection_sequence: u64,
    pub next_channel_sequence: u64,
    pub bound_port: Vec<u64>,

    /// Commitment root, hex.
    pub ibc_state_root: String,
}

/// Datum of the handler UTxO.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandlerDatum {
    pub state: HandlerState,

    /// Handler auth token.
    pub token: AuthToken,
}

/// Encode [`HostStateDatum`] into hex.
pub fn encode_host_state(datum: &HostStateDatum) -> Result<String, CborError> {
    let state = &datum.state;
    let mut out = Vec::new();

    write_constr(&mut out, 0, 2)?;

    write_constr(&mut out, 0, 7)?;
    write_uint(&mut out, state.version);
    write_fixed_hex_bytes(
        &mut out,
        "ibc_state_root",
        &state.ibc_state_root,
        STATE_ROOT_LEN,
    )?;
    write_uint(&mut out, state.next_client_sequence);
    write_uint(&mut out, state.next_connection_sequence);
    write_uint(&mut out, state.next_channel_sequence);
    write_small_uint_array(&mut out, "bound_port", &state.bound_port)?;
    write_uint64(&mut out, state.last_update_time);

    write_fixed_hex_bytes(&mut out, "nft_policy", &datum.nft_policy, POLICY_ID_LEN)?;

    Ok(hex::encode(out))
}

/// Encode [`HandlerDatum`] into hex.
pub fn encode_handler(datum: &HandlerDatum) -> Result<String, CborError> {
    let state = &datum.state;
    let mut out = Vec::new();

    write_constr(&mut out, 0, 2)?;

    write_constr(&mut out, 0, 5)?;
    write_uint(&mut out, state.next_client_sequence);
    write_uint(&mut out, state.next_connection_sequence);
    write_uint(&mut out, state.next_channel_sequence);
    write_small_uint_array(&mut out, "bound_port", &state.bound_port)?;
    write_hex_bytes(&mut out, "ibc_state_root", &state.ibc_state_root)?;

    write_constr(&mut out, 0, 2)?;
    write_hex_bytes(&mut out, "token.policy_id", &datum.token.policy_id)?;
    write_hex_bytes(&mut out, "token.name", &datum.token.name)?;

    Ok(hex::encode(out))
}
