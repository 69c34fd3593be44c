//! This crate adapts IBC protocol data to an eUTxO ledger with Plutus
//! validators.
//!
//! IBC is designed around a string-keyed state machine. On an eUTxO ledger
//! the IBC state lives in datums of unspent outputs, protocol objects are
//! represented by one-of-a-kind tokens with fixed-size names, and validators
//! compare serialized datums byte for byte. This crate contains the pieces of
//! protocol logic needed on the off-chain side to bridge the two worlds.
//!
//! # ICS-20 denom traces
//!
//! Full denom path `transfer/channel-7/gamm/pool/1` is a sequence of
//! `(port, channel)` hops followed by the base denomination. Base
//! denominations may contain slashes themselves, so hops are consumed
//! greedily from the front while the segments look like
//! `<port>/channel-<digits>`. See [`denom`].
//!
//! # Identifiers in token names
//!
//! Channel, connection and client identifiers are carried in the names of
//! auth tokens, after a prefix built from truncated SHA3-256 hashes of the
//! base auth token and of a domain salt. The prefix is reproducible from
//! public data, so the identifier is recovered by stripping it. See
//! [`identifier`].
//!
//! # Datums
//!
//! Host state and handler datums are encoded as definite-length CBOR with
//! shortest-form integers. Generic encoders produce indefinite-length
//! arrays which validators reject. See [`datum`] and [`cbor`].
//!
//! # Voucher provenance
//!
//! Voucher token names are hashes of the full denom path. To index vouchers,
//! the path is reconstructed from the transaction that minted or refunded the
//! voucher, by matching the packet carried in the channel redeemer with the
//! voucher redeemer. Redeemers are decoded with a
//! [`RedeemerDecoder`](crate::traits::RedeemerDecoder), and
//! [`PlutusRedeemerDecoder`] is provided for the Plutus data layout of the
//! IBC validators. See [`provenance`].
//!
//! # Example
//! ```
//! # #[cfg(feature = "std")]
//! # {
//! use ibc_utxo_adapter::{
//!     denom::{compose, split},
//!     identifier::{encode_identifier, recover_channel_id, AuthToken, CHANNEL_SALT},
//! };
//!
//! // Base denomination with slashes is kept intact.
//! let trace = split("transfer/channel-7/gamm/pool/1").unwrap();
//! assert_eq!(trace.path, "transfer/channel-7");
//! assert_eq!(trace.base_denom, "gamm/pool/1");
//! assert_eq!(compose(&trace), "transfer/channel-7/gamm/pool/1");
//!
//! // Channel auth token name and the channel identifier it carries.
//! let handler_token = AuthToken {
//!     policy_id: "8b5a4f0a7b6d2c1e9f3a5b7c9d1e3f5a7b9c1d3e5f7a9b1c3d5e7f9a".to_string(),
//!     name: "68616e646c6572".to_string(),
//! };
//! let token_name = encode_identifier(&handler_token, CHANNEL_SALT, "channel-12").unwrap();
//! assert_eq!(token_name.len(), 48 + 2 * "channel-12".len());
//!
//! let channel_id = recover_channel_id(&token_name, &handler_token).unwrap();
//! assert_eq!(channel_id.as_deref(), Some("channel-12"));
//!
//! // Token minted under different base token carries no channel identifier.
//! let other_token = AuthToken {
//!     policy_id: handler_token.policy_id.clone(),
//!     name: "6f74686572".to_string(),
//! };
//! assert_eq!(recover_channel_id(&token_name, &other_token).unwrap(), None);
//! # }
//! ```
//!
//! # Example
//! ```
//! # #[cfg(feature = "std")]
//! # {
//! use ibc_utxo_adapter::datum::{encode_handler, HandlerDatum, HandlerState};
//! use ibc_utxo_adapter::identifier::AuthToken;
//!
//! let datum = HandlerDatum {
//!     state: HandlerState {
//!         next_client_sequence: 1,
//!         next_connection_sequence: 0,
//!         next_channel_sequence: 0,
//!         bound_port: vec![100],
//!         ibc_state_root: "00".repeat(32),
//!     },
//!     token: AuthToken {
//!         policy_id: "ab".repeat(28),
//!         name: "".to_string(),
//!     },
//! };
//!
//! let encoded = encode_handler(&datum).unwrap();
//!
//! // Constructor 0 with two fields, then constructor 0 with five fields,
//! // all with definite-length headers.
//! assert!(encoded.starts_with("d87982d87985010000811864"));
//! # }
//! ```
#![no_std]
#![deny(unused_crate_dependencies)]

pub mod cbor;
pub mod datum;
pub mod denom;
pub mod error;
pub mod identifier;
pub mod plutus;
pub mod provenance;
pub mod redeemer;
pub mod traits;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate alloc as std;

pub use crate::denom::DenomTrace;
pub use crate::identifier::AuthToken;
pub use crate::plutus::PlutusRedeemerDecoder;
pub use crate::provenance::{resolve, resolve_batch, TraceDerivation, VoucherTraceCandidate};
