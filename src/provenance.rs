//! Voucher provenance from the redeemers of a single transaction.
//!
//! Voucher tokens are named by the hash of their full denom path, so the path
//! cannot be read back from the token. It can be reconstructed from the
//! transaction that minted (or refunded) the voucher: the channel redeemer
//! carries the packet with ICS-20 payload, and the voucher redeemer names the
//! channel ends. Matching the two gives the packet event and the full denom
//! path.
//!
//! | packet event | voucher action  | full denom path                    |
//! |--------------|-----------------|------------------------------------|
//! | receive      | `MintVoucher`   | `dest_port/dest_channel/denom`     |
//! | acknowledge  | `RefundVoucher` | `source_port/source_channel/denom` |
//! | timeout      | `RefundVoucher` | `denom`                            |
//!
//! Redeemers that do not decode and packets that are not ICS-20 transfers are
//! skipped, resolution never fails as a whole.
use crate::std::{collections::BTreeSet, string::String, vec::Vec};

#[cfg(feature = "std")]
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(not(feature = "std"))]
use core::fmt::{Display, Formatter, Result as FmtResult};

use parity_scale_codec::{Decode, Encode};
use serde::Deserialize;

use crate::denom::SEPARATOR;
use crate::identifier::voucher_token_name;
use crate::redeemer::{
    MintVoucherRedeemer, Packet, RedeemerPurpose, SpendChannelRedeemer, TransactionRedeemer,
};
use crate::traits::RedeemerDecoder;

/// ICS-20 fungible token transfer payload.
///
/// Exactly these five string fields, anything else is not a transfer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FungibleTokenPacketData {
    pub denom: String,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    pub memo: String,
}

/// Packet event the channel redeemer represents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PacketKind {
    Recv,
    Ack,
    Timeout,
}

/// ICS-20 packet found in the transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PacketContext {
    pub kind: PacketKind,
    pub packet: Packet,
    pub denom: String,
}

/// Voucher action relevant for provenance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoucherCaseType {
    Mint,
    Refund,
}

/// Voucher mint or refund found in the transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoucherMintCase {
    pub case_type: VoucherCaseType,
    pub redeemer: MintVoucherRedeemer,
}

/// How the voucher denom path was derived.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TraceDerivation {
    RecvMint,
    AckRefund,
    TimeoutRefund,
}

impl TraceDerivation {
    pub fn as_str(&self) -> &'static str {
        match &self {
            TraceDerivation::RecvMint => "recv_mint",
            TraceDerivation::AckRefund => "ack_refund",
            TraceDerivation::TimeoutRefund => "timeout_refund",
        }
    }
}

impl Display for TraceDerivation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Voucher token with reconstructed full denom path.
#[derive(Clone, Debug, Decode, Encode, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VoucherTraceCandidate {
    /// Voucher token name, lowercase hex.
    pub voucher_token_name: String,
    pub full_denom_path: String,
    pub derivation: TraceDerivation,
}

impl VoucherTraceCandidate {
    fn new(full_denom_path: String, derivation: TraceDerivation) -> Self {
        Self {
            voucher_token_name: voucher_token_name(&full_denom_path),
            full_denom_path,
            derivation,
        }
    }
}

/// Parse packet payload as ICS-20 transfer. `None` if it is anything else.
pub fn parse_ics20_payload(data_hex: &str) -> Option<FungibleTokenPacketData> {
    let data = hex::decode(data_hex).ok()?;
    serde_json::from_slice::<FungibleTokenPacketData>(&data).ok()
}

/// Text of a hex-encoded port or channel identifier.
fn identifier_text(identifier_hex: &str) -> Option<String> {
    let bytes = hex::decode(identifier_hex).ok()?;
    String::from_utf8(bytes).ok()
}

/// Full denom path of `denom` with hop `port/channel` prepended.
///
/// Port and channel are hex, `None` if either is not UTF-8 text. The denom is
/// taken as received, without parsing it as a denom trace.
fn prefixed_path(port_hex: &str, channel_hex: &str, denom: &str) -> Option<String> {
    let port = identifier_text(port_hex)?;
    let channel = identifier_text(channel_hex)?;
    Some(format!("{port}{SEPARATOR}{channel}{SEPARATOR}{denom}"))
}

/// Collect ICS-20 packets from decodable channel redeemers.
pub fn packet_contexts<D: RedeemerDecoder>(
    decoder: &D,
    redeemers: &[TransactionRedeemer],
) -> Vec<PacketContext> {
    let mut contexts = Vec::new();
    for transaction_redeemer in redeemers.iter() {
        if transaction_redeemer.purpose != RedeemerPurpose::Spend {
            continue;
        }
        let spend_redeemer =
            match decoder.decode_spend_channel(&transaction_redeemer.redeemer_hex) {
                Ok(spend_redeemer) => spend_redeemer,
                Err(e) => {
                    log::debug!("spend redeemer skipped: {e}");
                    continue;
                }
            };
        let kind = match spend_redeemer {
            SpendChannelRedeemer::RecvPacket { .. } => PacketKind::Recv,
            SpendChannelRedeemer::AcknowledgePacket { .. } => PacketKind::Ack,
            SpendChannelRedeemer::TimeoutPacket { .. } => PacketKind::Timeout,
        };
        let packet = spend_redeemer.packet();
        match parse_ics20_payload(&packet.data) {
            Some(payload) => contexts.push(PacketContext {
                kind,
                packet: packet.clone(),
                denom: payload.denom,
            }),
            None => log::debug!(
                "packet {} from {}/{} is not an ICS-20 transfer",
                packet.sequence,
                packet.source_port,
                packet.source_channel
            ),
        }
    }
    contexts
}

/// Collect voucher mints and refunds from decodable minting redeemers.
pub fn voucher_cases<D: RedeemerDecoder>(
    decoder: &D,
    redeemers: &[TransactionRedeemer],
) -> Vec<VoucherMintCase> {
    let mut cases = Vec::new();
    for transaction_redeemer in redeemers.iter() {
        if transaction_redeemer.purpose != RedeemerPurpose::Mint {
            continue;
        }
        let redeemer = match decoder.decode_mint_voucher(&transaction_redeemer.redeemer_hex) {
            Ok(redeemer) => redeemer,
            Err(e) => {
                log::debug!("mint redeemer skipped: {e}");
                continue;
            }
        };
        let case_type = match redeemer {
            MintVoucherRedeemer::MintVoucher { .. } => VoucherCaseType::Mint,
            MintVoucherRedeemer::RefundVoucher { .. } => VoucherCaseType::Refund,
            MintVoucherRedeemer::BurnVoucher { .. } => continue,
        };
        cases.push(VoucherMintCase {
            case_type,
            redeemer,
        });
    }
    cases
}

/// Candidates for a single voucher case.
fn correlate(case: &VoucherMintCase, contexts: &[PacketContext]) -> Vec<VoucherTraceCandidate> {
    let mut candidates = Vec::new();
    match &case.redeemer {
        MintVoucherRedeemer::MintVoucher {
            packet_source_port,
            packet_source_channel,
            packet_dest_port,
            packet_dest_channel,
        } => {
            for context in contexts.iter() {
                let packet = &context.packet;
                if context.kind == PacketKind::Recv
                    && packet.source_port.eq_ignore_ascii_case(packet_source_port)
                    && packet.source_channel.eq_ignore_ascii_case(packet_source_channel)
                    && packet.destination_port.eq_ignore_ascii_case(packet_dest_port)
                    && packet
                        .destination_channel
                        .eq_ignore_ascii_case(packet_dest_channel)
                {
                    match prefixed_path(
                        &packet.destination_port,
                        &packet.destination_channel,
                        &context.denom,
                    ) {
                        Some(full_denom_path) => candidates.push(VoucherTraceCandidate::new(
                            full_denom_path,
                            TraceDerivation::RecvMint,
                        )),
                        None => log::debug!(
                            "packet {} destination port or channel is not UTF-8",
                            packet.sequence
                        ),
                    }
                }
            }
        }
        MintVoucherRedeemer::RefundVoucher {
            packet_source_port,
            packet_source_channel,
        } => {
            for context in contexts.iter() {
                let packet = &context.packet;
                if !packet.source_port.eq_ignore_ascii_case(packet_source_port)
                    || !packet.source_channel.eq_ignore_ascii_case(packet_source_channel)
                {
                    continue;
                }
                let candidate = match context.kind {
                    PacketKind::Ack => prefixed_path(
                        &packet.source_port,
                        &packet.source_channel,
                        &context.denom,
                    )
                    .map(|path| VoucherTraceCandidate::new(path, TraceDerivation::AckRefund)),
                    PacketKind::Timeout => Some(VoucherTraceCandidate::new(
                        context.denom.clone(),
                        TraceDerivation::TimeoutRefund,
                    )),
                    PacketKind::Recv => continue,
                };
                match candidate {
                    Some(candidate) => candidates.push(candidate),
                    None => log::debug!(
                        "packet {} source port or channel is not UTF-8",
                        packet.sequence
                    ),
                }
            }
        }
        MintVoucherRedeemer::BurnVoucher { .. } => {}
    }
    candidates
}

/// Resolve voucher provenance for the redeemers of one transaction.
///
/// Empty set if nothing in the transaction correlates.
pub fn resolve<D: RedeemerDecoder>(
    decoder: &D,
    redeemers: &[TransactionRedeemer],
) -> BTreeSet<VoucherTraceCandidate> {
    let contexts = packet_contexts(decoder, redeemers);
    let cases = voucher_cases(decoder, redeemers);

    let mut candidates = BTreeSet::new();
    for case in cases.iter() {
        for candidate in correlate(case, &contexts) {
            log::trace!(
                "voucher {} traced to {} ({})",
                candidate.voucher_token_name,
                candidate.full_denom_path,
                candidate.derivation.as_str()
            );
            candidates.insert(candidate);
        }
    }
    candidates
}

/// Resolve many transactions independently and merge the results.
pub fn resolve_batch<'a, D, I>(decoder: &D, transactions: I) -> BTreeSet<VoucherTraceCandidate>
where
    D: RedeemerDecoder,
    I: IntoIterator<Item = &'a [TransactionRedeemer]>,
{
    let mut merged = BTreeSet::new();
    for redeemers in transactions {
        merged.append(&mut resolve(decoder, redeemers));
    }
    merged
}
