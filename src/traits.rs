//! Traits for redeemer decoding.
use crate::error::DecodeError;
use crate::redeemer::{MintVoucherRedeemer, SpendChannelRedeemer};

/// Decoder of validator redeemers.
///
/// Provenance resolution treats any decoding error as "redeemer not
/// applicable", transactions routinely bundle redeemers of unrelated scripts.
///
/// [`PlutusRedeemerDecoder`](crate::plutus::PlutusRedeemerDecoder) decodes
/// the Plutus data layout of the IBC validators.
pub trait RedeemerDecoder {
    /// Decode redeemer of spending the channel UTxO.
    fn decode_spend_channel(&self, redeemer_hex: &str)
        -> Result<SpendChannelRedeemer, DecodeError>;

    /// Decode redeemer of the voucher minting policy.
    fn decode_mint_voucher(&self, redeemer_hex: &str) -> Result<MintVoucherRedeemer, DecodeError>;
}
