//! Errors.
use crate::std::string::String;

#[cfg(feature = "std")]
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[cfg(not(feature = "std"))]
use core::fmt::{Display, Formatter, Result as FmtResult};

/// Error in parsing ICS-20 denom trace.
#[derive(Debug, Eq, PartialEq)]
pub enum DenomError {
    /// Input is empty, or has an empty `/`-delimited segment.
    MalformedTrace { input: String },

    /// Nothing left for the base denomination after the hops are consumed.
    MissingBaseDenom { input: String },
}

impl DenomError {
    fn error_text(&self) -> String {
        match &self {
            DenomError::MalformedTrace { input } => format!("Denom trace \"{input}\" is malformed: expected non-empty segments separated by single slashes."),
            DenomError::MissingBaseDenom { input } => format!("Denom trace \"{input}\" has no base denomination after the port/channel hops."),
        }
    }
}

/// Error in hashed token name processing.
#[derive(Debug, Eq, PartialEq)]
pub enum IdentifierError {
    /// Token name or auth token parts are not valid hex.
    InvalidHexInput { input: String },

    /// Identifier bytes recovered from token name are not valid UTF-8.
    NotUtf8 { hex: String },
}

impl IdentifierError {
    fn error_text(&self) -> String {
        match &self {
            IdentifierError::InvalidHexInput { input } => {
                format!("Expected hex string, received \"{input}\".")
            }
            IdentifierError::NotUtf8 { hex } => {
                format!("Identifier part {hex} of the token name is not a valid UTF-8 string.")
            }
        }
    }
}

/// Error in definite-length CBOR datum encoding.
#[derive(Debug, Eq, PartialEq)]
pub enum CborError {
    /// Odd length or non-hex characters in a bytestring field.
    InvalidHexInput { field: &'static str },

    /// Bytestring or array exceeds the size class the encoder supports.
    UnsupportedLength {
        field: &'static str,
        length: usize,
        max: usize,
    },

    /// Plutus constructor index has no compact tag.
    ConstructorIndexOutOfRange { index: u64, max: u64 },

    /// Fixed-width bytestring field has unexpected length.
    WrongByteLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl CborError {
    fn error_text(&self) -> String {
        match &self {
            CborError::InvalidHexInput { field } => format!("Field {field} is not a valid hex string."),
            CborError::UnsupportedLength { field, length, max } => format!("Field {field} has length {length}, encoder supports at most {max}."),
            CborError::ConstructorIndexOutOfRange { index, max } => format!("Constructor index {index} is out of range, encoder supports indices up to {max}."),
            CborError::WrongByteLength { field, expected, found } => format!("Field {field} must be exactly {expected} bytes long, got {found} bytes."),
        }
    }
}

/// Error in redeemer decoding.
///
/// Decoding errors never abort provenance resolution, the redeemer is
/// considered not applicable.
#[derive(Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// Redeemer is not a hex string.
    InvalidHexInput,

    /// Data ended before the item was complete.
    UnexpectedEnd,

    /// Data is not well-formed CBOR.
    MalformedCbor { position: Option<usize> },

    /// Bytes remain after the top-level item.
    TrailingBytes { position: usize },

    /// CBOR item not used by Plutus data.
    UnsupportedItem { item: &'static str },

    /// Items are nested deeper than the decoder allows.
    DepthLimit { max: usize },

    /// Value has a different Plutus data shape than the schema requires.
    UnexpectedShape { expected: &'static str },

    /// Constructor index not defined for the redeemer type.
    UnknownConstructor { redeemer: &'static str, index: u64 },

    /// Spend channel redeemer is a valid channel action, but carries no packet.
    NotPacketRedeemer { index: u64 },

    /// Constructor has fewer fields than the schema requires.
    MissingField { redeemer: &'static str, field: &'static str },

    /// Redeemer purpose tag is not known.
    UnknownPurpose { purpose: String },
}

impl DecodeError {
    fn error_text(&self) -> String {
        match &self {
            DecodeError::InvalidHexInput => String::from("Redeemer is not a valid hex string."),
            DecodeError::UnexpectedEnd => String::from("Redeemer data ended unexpectedly."),
            DecodeError::MalformedCbor { position } => match position {
                Some(position) => format!("Redeemer data is not valid CBOR, error at position {position}."),
                None => String::from("Redeemer data is not valid CBOR."),
            },
            DecodeError::TrailingBytes { position } => format!("Redeemer data has unused bytes starting at position {position}."),
            DecodeError::UnsupportedItem { item } => format!("Redeemer data contains {item}, which is not Plutus data."),
            DecodeError::DepthLimit { max } => format!("Redeemer data is nested deeper than {max} levels."),
            DecodeError::UnexpectedShape { expected } => format!("Redeemer data does not match expected shape, expected {expected}."),
            DecodeError::UnknownConstructor { redeemer, index } => format!("Constructor index {index} is not defined for {redeemer}."),
            DecodeError::NotPacketRedeemer { index } => format!("Spend channel redeemer with constructor index {index} does not carry a packet."),
            DecodeError::MissingField { redeemer, field } => format!("Redeemer {redeemer} has no field {field}."),
            DecodeError::UnknownPurpose { purpose } => format!("Unknown redeemer purpose \"{purpose}\"."),
        }
    }
}

/// Implement [`Display`] for errors in both `std` and `no_std` cases.
/// Implement `Error` for `std` case.
macro_rules! impl_display_and_error {
    ($($ty: ty), *) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    write!(f, "{}", self.error_text())
                }
            }

            #[cfg(feature = "std")]
            impl Error for $ty {
                fn source(&self) -> Option<&(dyn Error + 'static)> {
                    None
                }
            }
        )*
    }
}

impl_display_and_error!(CborError, DecodeError, DenomError, IdentifierError);
