//! Decoded redeemers of the channel and voucher validators.
//!
//! Byte-array fields are kept as hex strings, the way the transaction
//! builder and the chain indexer exchange them. Comparisons between them must
//! be case-insensitive.
use crate::std::{borrow::ToOwned, string::String};

#[cfg(not(feature = "std"))]
use core::str::FromStr;
#[cfg(feature = "std")]
use std::str::FromStr;

use crate::error::DecodeError;

/// IBC height.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Height {
    pub revision_number: u64,
    pub revision_height: u64,
}

/// IBC packet, as carried in channel redeemers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Packet {
    pub sequence: u64,
    pub source_port: String,
    pub source_channel: String,
    pub destination_port: String,
    pub destination_channel: String,

    /// Application payload, hex. For ICS-20 this is UTF-8 JSON.
    pub data: String,
    pub timeout_height: Height,
    pub timeout_timestamp: u64,
}

/// Channel spending actions that carry a packet.
///
/// Other channel actions (handshake steps, closing, sending) never produce
/// vouchers and are rejected by decoders with
/// [`DecodeError::NotPacketRedeemer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SpendChannelRedeemer {
    RecvPacket { packet: Packet },
    TimeoutPacket { packet: Packet },
    AcknowledgePacket { packet: Packet, acknowledgement: String },
}

impl SpendChannelRedeemer {
    pub fn packet(&self) -> &Packet {
        match &self {
            SpendChannelRedeemer::RecvPacket { packet } => packet,
            SpendChannelRedeemer::TimeoutPacket { packet } => packet,
            SpendChannelRedeemer::AcknowledgePacket {
                packet,
                acknowledgement: _,
            } => packet,
        }
    }
}

/// Voucher minting policy actions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MintVoucherRedeemer {
    MintVoucher {
        packet_source_port: String,
        packet_source_channel: String,
        packet_dest_port: String,
        packet_dest_channel: String,
    },
    BurnVoucher {
        packet_source_port: String,
        packet_source_channel: String,
    },
    RefundVoucher {
        packet_source_port: String,
        packet_source_channel: String,
    },
}

/// Script purpose a redeemer is supplied for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedeemerPurpose {
    Spend,
    Mint,
    Publish,
    Withdraw,
    Vote,
    Propose,
}

impl FromStr for RedeemerPurpose {
    type Err = DecodeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spend" => Ok(RedeemerPurpose::Spend),
            "mint" => Ok(RedeemerPurpose::Mint),
            "cert" | "publish" => Ok(RedeemerPurpose::Publish),
            "reward" | "withdraw" => Ok(RedeemerPurpose::Withdraw),
            "vote" => Ok(RedeemerPurpose::Vote),
            "propose" => Ok(RedeemerPurpose::Propose),
            _ => Err(DecodeError::UnknownPurpose {
                purpose: s.to_owned(),
            }),
        }
    }
}

/// Redeemer observed in a transaction, not yet decoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionRedeemer {
    pub purpose: RedeemerPurpose,
    pub redeemer_hex: String,
}

impl TransactionRedeemer {
    pub fn new(purpose: RedeemerPurpose, redeemer_hex: &str) -> Self {
        Self {
            purpose,
            redeemer_hex: redeemer_hex.to_owned(),
        }
    }
}
