#[cfg(feature = "std")]
use ibc_utxo_adapter::{
    denom::split,
    provenance::resolve,
    redeemer::{RedeemerPurpose, TransactionRedeemer},
    PlutusRedeemerDecoder,
};

#[cfg(feature = "std")]
fn main() {
    // Redeemers of a transaction receiving `uatom` on `transfer/channel-9`
    // from `transfer/channel-1` on the counterparty chain. First is the
    // `RecvPacket` redeemer spending the channel UTxO, second is the
    // `MintVoucher` redeemer of the voucher minting policy.
    let redeemers = [
        TransactionRedeemer::new(
            RedeemerPurpose::Spend,
            "d87b83d8798801487472616e73666572496368616e6e656c2d31487472616e73666572496368616e6e656c2d3958647b2264656e6f6d223a227561746f6d222c22616d6f756e74223a2231303030222c2273656e646572223a22636f736d6f733173656e646572222c227265636569766572223a22616464725f74657374317265636569766572222c226d656d6f223a22227dd8798200000040d879820000",
        ),
        TransactionRedeemer::new(
            RedeemerPurpose::Mint,
            "d87984487472616e73666572496368616e6e656c2d31487472616e73666572496368616e6e656c2d39",
        ),
    ];

    let candidates = resolve(&PlutusRedeemerDecoder, &redeemers);
    println!("vouchers traced: {}", candidates.len());
    for candidate in candidates.iter() {
        let trace = split(&candidate.full_denom_path).unwrap();
        println!(
            "voucher {}: path \"{}\", base denom \"{}\", {}",
            candidate.voucher_token_name, trace.path, trace.base_denom, candidate.derivation
        );
    }
}

#[cfg(not(feature = "std"))]
fn main() {
    panic!("Demos should be run under std.");
}
