//! Plutus data decoding and redeemer decoder of the IBC validators.
//!
//! CBOR itself is parsed by `ciborium`, which accepts everything the ledger
//! may put into a redeemer: definite and indefinite arrays and maps, chunked
//! byte strings, tags. The value is then mapped into [`PlutusData`], reading
//! compact and general constructor tags.
use crate::std::{string::String, vec::Vec};

use ciborium::value::Value;

use crate::cbor::{CONSTR_TAG_BASE, CONSTR_TAG_EXTENDED_BASE, CONSTR_TAG_GENERAL};
use crate::error::DecodeError;
use crate::redeemer::{Height, MintVoucherRedeemer, Packet, SpendChannelRedeemer};
use crate::traits::RedeemerDecoder;

/// Maximum nesting of Plutus data items.
pub const MAX_DEPTH: usize = 64;

/// Constructor index of `RecvPacket` in spend channel redeemer.
pub const RECV_PACKET: u64 = 2;

/// Constructor index of `TimeoutPacket` in spend channel redeemer.
pub const TIMEOUT_PACKET: u64 = 3;

/// Constructor index of `AcknowledgePacket` in spend channel redeemer.
pub const ACKNOWLEDGE_PACKET: u64 = 4;

/// Number of spend channel redeemer variants, `ChanOpenAck` through
/// `RefreshUtxo`.
pub const SPEND_CHANNEL_VARIANTS: u64 = 9;

/// Constructor index of `MintVoucher`.
pub const MINT_VOUCHER: u64 = 0;

/// Constructor index of `BurnVoucher`.
pub const BURN_VOUCHER: u64 = 1;

/// Constructor index of `RefundVoucher`.
pub const REFUND_VOUCHER: u64 = 2;

/// Plutus data value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlutusData {
    Constr { index: u64, fields: Vec<PlutusData> },
    Map(Vec<(PlutusData, PlutusData)>),
    List(Vec<PlutusData>),
    Int(i128),
    Bytes(Vec<u8>),
}

/// Constructor index of a compact constructor tag.
fn compact_constructor_index(tag: u64) -> Option<u64> {
    match tag {
        121..=127 => Some(tag - CONSTR_TAG_BASE),
        1280..=1400 => Some(tag - CONSTR_TAG_EXTENDED_BASE + 7),
        _ => None,
    }
}

fn list_from_values(values: Vec<Value>, depth: usize) -> Result<Vec<PlutusData>, DecodeError> {
    values
        .into_iter()
        .map(|value| data_from_value(value, depth))
        .collect()
}

fn data_from_value(value: Value, depth: usize) -> Result<PlutusData, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthLimit { max: MAX_DEPTH });
    }
    match value {
        Value::Integer(integer) => Ok(PlutusData::Int(i128::from(integer))),
        Value::Bytes(bytes) => Ok(PlutusData::Bytes(bytes)),
        Value::Array(items) => Ok(PlutusData::List(list_from_values(items, depth + 1)?)),
        Value::Map(entries) => {
            let mut map = Vec::with_capacity(entries.len());
            for (key, value) in entries.into_iter() {
                map.push((
                    data_from_value(key, depth + 1)?,
                    data_from_value(value, depth + 1)?,
                ));
            }
            Ok(PlutusData::Map(map))
        }
        Value::Tag(CONSTR_TAG_GENERAL, inner) => {
            let pair = match *inner {
                Value::Array(pair) => pair,
                _ => {
                    return Err(DecodeError::UnexpectedShape {
                        expected: "general constructor [index, fields]",
                    })
                }
            };
            match <[Value; 2]>::try_from(pair) {
                Ok([Value::Integer(index), Value::Array(fields)]) => Ok(PlutusData::Constr {
                    index: u64::try_from(index).map_err(|_| DecodeError::UnexpectedShape {
                        expected: "non-negative constructor index",
                    })?,
                    fields: list_from_values(fields, depth + 1)?,
                }),
                _ => Err(DecodeError::UnexpectedShape {
                    expected: "general constructor [index, fields]",
                }),
            }
        }
        Value::Tag(tag, inner) => {
            let index =
                compact_constructor_index(tag).ok_or(DecodeError::UnsupportedItem { item: "tag" })?;
            match *inner {
                Value::Array(fields) => Ok(PlutusData::Constr {
                    index,
                    fields: list_from_values(fields, depth + 1)?,
                }),
                _ => Err(DecodeError::UnexpectedShape {
                    expected: "constructor field list",
                }),
            }
        }
        Value::Text(_) => Err(DecodeError::UnsupportedItem { item: "text string" }),
        Value::Float(_) => Err(DecodeError::UnsupportedItem { item: "float" }),
        Value::Bool(_) => Err(DecodeError::UnsupportedItem { item: "bool" }),
        Value::Null => Err(DecodeError::UnsupportedItem { item: "null" }),
        _ => Err(DecodeError::UnsupportedItem {
            item: "simple value",
        }),
    }
}

/// Decode Plutus data, the whole input must be a single item.
pub fn decode_plutus_data(data: &[u8]) -> Result<PlutusData, DecodeError> {
    let mut rest = data;
    let value: Value = ciborium::de::from_reader(&mut rest).map_err(|e| match e {
        ciborium::de::Error::Io(_) => DecodeError::UnexpectedEnd,
        ciborium::de::Error::Syntax(position) => DecodeError::MalformedCbor {
            position: Some(position),
        },
        ciborium::de::Error::Semantic(position, _) => DecodeError::MalformedCbor { position },
        ciborium::de::Error::RecursionLimitExceeded => DecodeError::DepthLimit { max: MAX_DEPTH },
    })?;
    if !rest.is_empty() {
        return Err(DecodeError::TrailingBytes {
            position: data.len() - rest.len(),
        });
    }
    data_from_value(value, 0)
}

/// Decode Plutus data given as hex.
pub fn decode_plutus_data_hex(data_hex: &str) -> Result<PlutusData, DecodeError> {
    let data = hex::decode(data_hex).map_err(|_| DecodeError::InvalidHexInput)?;
    decode_plutus_data(&data)
}

impl PlutusData {
    fn as_constr(&self, expected: &'static str) -> Result<(u64, &[PlutusData]), DecodeError> {
        match &self {
            PlutusData::Constr { index, fields } => Ok((*index, fields.as_slice())),
            _ => Err(DecodeError::UnexpectedShape { expected }),
        }
    }

    fn as_hex(&self, expected: &'static str) -> Result<String, DecodeError> {
        match &self {
            PlutusData::Bytes(bytes) => Ok(hex::encode(bytes)),
            _ => Err(DecodeError::UnexpectedShape { expected }),
        }
    }

    fn as_u64(&self, expected: &'static str) -> Result<u64, DecodeError> {
        match &self {
            PlutusData::Int(value) => {
                u64::try_from(*value).map_err(|_| DecodeError::UnexpectedShape { expected })
            }
            _ => Err(DecodeError::UnexpectedShape { expected }),
        }
    }
}

fn field<'a>(
    fields: &'a [PlutusData],
    position: usize,
    redeemer: &'static str,
    field: &'static str,
) -> Result<&'a PlutusData, DecodeError> {
    fields
        .get(position)
        .ok_or(DecodeError::MissingField { redeemer, field })
}

fn height_from_data(data: &PlutusData) -> Result<Height, DecodeError> {
    let (_, fields) = data.as_constr("Height constructor")?;
    Ok(Height {
        revision_number: field(fields, 0, "Height", "revision_number")?
            .as_u64("revision_number integer")?,
        revision_height: field(fields, 1, "Height", "revision_height")?
            .as_u64("revision_height integer")?,
    })
}

/// Read [`Packet`] from its Plutus data form.
pub fn packet_from_data(data: &PlutusData) -> Result<Packet, DecodeError> {
    let (_, fields) = data.as_constr("Packet constructor")?;
    Ok(Packet {
        sequence: field(fields, 0, "Packet", "sequence")?.as_u64("sequence integer")?,
        source_port: field(fields, 1, "Packet", "source_port")?.as_hex("source_port bytes")?,
        source_channel: field(fields, 2, "Packet", "source_channel")?
            .as_hex("source_channel bytes")?,
        destination_port: field(fields, 3, "Packet", "destination_port")?
            .as_hex("destination_port bytes")?,
        destination_channel: field(fields, 4, "Packet", "destination_channel")?
            .as_hex("destination_channel bytes")?,
        data: field(fields, 5, "Packet", "data")?.as_hex("data bytes")?,
        timeout_height: height_from_data(field(fields, 6, "Packet", "timeout_height")?)?,
        timeout_timestamp: field(fields, 7, "Packet", "timeout_timestamp")?
            .as_u64("timeout_timestamp integer")?,
    })
}

/// Redeemer decoder for the Plutus data layout of the IBC validators.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlutusRedeemerDecoder;

impl RedeemerDecoder for PlutusRedeemerDecoder {
    fn decode_spend_channel(
        &self,
        redeemer_hex: &str,
    ) -> Result<SpendChannelRedeemer, DecodeError> {
        let data = decode_plutus_data_hex(redeemer_hex)?;
        let (index, fields) = data.as_constr("SpendChannelRedeemer constructor")?;
        match index {
            RECV_PACKET => Ok(SpendChannelRedeemer::RecvPacket {
                packet: packet_from_data(field(fields, 0, "RecvPacket", "packet")?)?,
            }),
            TIMEOUT_PACKET => Ok(SpendChannelRedeemer::TimeoutPacket {
                packet: packet_from_data(field(fields, 0, "TimeoutPacket", "packet")?)?,
            }),
            ACKNOWLEDGE_PACKET => Ok(SpendChannelRedeemer::AcknowledgePacket {
                packet: packet_from_data(field(fields, 0, "AcknowledgePacket", "packet")?)?,
                acknowledgement: field(fields, 1, "AcknowledgePacket", "acknowledgement")?
                    .as_hex("acknowledgement bytes")?,
            }),
            index if index < SPEND_CHANNEL_VARIANTS => {
                Err(DecodeError::NotPacketRedeemer { index })
            }
            index => Err(DecodeError::UnknownConstructor {
                redeemer: "SpendChannelRedeemer",
                index,
            }),
        }
    }

    fn decode_mint_voucher(&self, redeemer_hex: &str) -> Result<MintVoucherRedeemer, DecodeError> {
        let data = decode_plutus_data_hex(redeemer_hex)?;
        let (index, fields) = data.as_constr("MintVoucherRedeemer constructor")?;
        match index {
            MINT_VOUCHER => Ok(MintVoucherRedeemer::MintVoucher {
                packet_source_port: field(fields, 0, "MintVoucher", "packet_source_port")?
                    .as_hex("packet_source_port bytes")?,
                packet_source_channel: field(fields, 1, "MintVoucher", "packet_source_channel")?
                    .as_hex("packet_source_channel bytes")?,
                packet_dest_port: field(fields, 2, "MintVoucher", "packet_dest_port")?
                    .as_hex("packet_dest_port bytes")?,
                packet_dest_channel: field(fields, 3, "MintVoucher", "packet_dest_channel")?
                    .as_hex("packet_dest_channel bytes")?,
            }),
            BURN_VOUCHER => Ok(MintVoucherRedeemer::BurnVoucher {
                packet_source_port: field(fields, 0, "BurnVoucher", "packet_source_port")?
                    .as_hex("packet_source_port bytes")?,
                packet_source_channel: field(fields, 1, "BurnVoucher", "packet_source_channel")?
                    .as_hex("packet_source_channel bytes")?,
            }),
            REFUND_VOUCHER => Ok(MintVoucherRedeemer::RefundVoucher {
                packet_source_port: field(fields, 0, "RefundVoucher", "packet_source_port")?
                    .as_hex("packet_source_port bytes")?,
                packet_source_channel: field(fields, 1, "RefundVoucher", "packet_source_channel")?
                    .as_hex("packet_source_channel bytes")?,
            }),
            index => Err(DecodeError::UnknownConstructor {
                redeemer: "MintVoucherRedeemer",
                index,
            }),
        }
    }
}
