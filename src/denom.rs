//! ICS-20 denom trace parsing and composition.
//!
//! Full denom path is a `/`-joined sequence of `(port, channel)` hops followed
//! by the base denomination, for example `transfer/channel-7/gamm/pool/1`.
//!
//! Base denomination may itself contain slashes (`gamm/pool/1`,
//! `factory/<address>/<subdenom>`), so the path is not simply everything but
//! the last segment. Hops are consumed greedily from the front while each
//! segment pair looks like `<non-empty port>/channel-<digits>`, and everything
//! after the first non-matching pair is the base denomination.
use crate::std::{
    borrow::ToOwned,
    string::{String, ToString},
    vec::Vec,
};

#[cfg(not(feature = "std"))]
use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
#[cfg(feature = "std")]
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use parity_scale_codec::{Decode, Encode};

use crate::error::DenomError;

/// Separator between segments of a full denom path.
pub const SEPARATOR: char = '/';

/// Prefix of every valid channel identifier.
pub const CHANNEL_ID_PREFIX: &str = "channel-";

/// Denom trace, full denom path split into hops and base denomination.
#[derive(Clone, Debug, Decode, Encode, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DenomTrace {
    /// Slash-joined `(port, channel)` hops, empty for native denominations.
    pub path: String,

    /// Base denomination, never empty.
    pub base_denom: String,
}

/// Check that the segment is a channel identifier, `channel-<digits>`.
pub fn is_channel_id(segment: &str) -> bool {
    match segment.strip_prefix(CHANNEL_ID_PREFIX) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Split full denom path into [`DenomTrace`].
pub fn split(full_denom_path: &str) -> Result<DenomTrace, DenomError> {
    if full_denom_path.trim().is_empty() {
        return Err(DenomError::MalformedTrace {
            input: full_denom_path.to_owned(),
        });
    }

    let segments: Vec<&str> = full_denom_path.split(SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(DenomError::MalformedTrace {
            input: full_denom_path.to_owned(),
        });
    }

    let mut hops_end = 0;
    while let Some(&[port, channel]) = segments.get(hops_end..hops_end + 2) {
        if port.is_empty() || !is_channel_id(channel) {
            break;
        }
        hops_end += 2;
    }

    let (path_segments, base_segments) = segments.split_at(hops_end);
    if base_segments.is_empty() {
        return Err(DenomError::MissingBaseDenom {
            input: full_denom_path.to_owned(),
        });
    }

    Ok(DenomTrace {
        path: path_segments.join("/"),
        base_denom: base_segments.join("/"),
    })
}

/// Compose full denom path from [`DenomTrace`].
pub fn compose(trace: &DenomTrace) -> String {
    if trace.path.is_empty() {
        trace.base_denom.to_owned()
    } else {
        format!("{}{SEPARATOR}{}", trace.path, trace.base_denom)
    }
}

impl DenomTrace {
    /// Native denomination, i.e. no hops at all.
    pub fn is_native(&self) -> bool {
        self.path.is_empty()
    }

    /// Check if the first hop is `port/channel`.
    ///
    /// On a sending chain this means the receiving chain is the source of
    /// the token (the voucher goes back home), on a receiving chain this means
    /// the token returns to its source.
    pub fn has_prefix(&self, port: &str, channel: &str) -> bool {
        match self.path.strip_prefix(port) {
            Some(rest) => match rest.strip_prefix(SEPARATOR) {
                Some(rest) => match rest.strip_prefix(channel) {
                    Some(tail) => tail.is_empty() || tail.starts_with(SEPARATOR),
                    None => false,
                },
                None => false,
            },
            None => false,
        }
    }

    /// Prepend hop `port/channel`, as a chain receiving a token it is not
    /// the source of does.
    pub fn add_prefix(&mut self, port: &str, channel: &str) {
        self.path = if self.path.is_empty() {
            format!("{port}{SEPARATOR}{channel}")
        } else {
            format!("{port}{SEPARATOR}{channel}{SEPARATOR}{}", self.path)
        };
    }

    /// Remove first hop if it is `port/channel`. Returns `true` if the hop
    /// was removed.
    pub fn remove_prefix(&mut self, port: &str, channel: &str) -> bool {
        if !self.has_prefix(port, channel) {
            return false;
        }
        let hop_len = port.len() + channel.len() + 1;
        self.path = match self.path.get(hop_len + 1..) {
            Some(rest) => rest.to_string(),
            None => String::new(),
        };
        true
    }
}

impl FromStr for DenomTrace {
    type Err = DenomError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split(s)
    }
}

impl Display for DenomTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", compose(self))
    }
}
