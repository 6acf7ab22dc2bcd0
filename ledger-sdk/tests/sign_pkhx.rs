//! Builds, signs, serializes and re-parses a transaction through the
//! umbrella crate only.

use ledger_sdk::primitives::ec::KeyPair;
use ledger_sdk::script::Script;
use ledger_sdk::transaction::{
    PkhKeyMap, SignerConfig, Tx, TxInput, TxOutBnMap, TxOutput, TxSignature, TxSigner,
};

#[test]
fn test_fund_then_spend() {
    let _ = ledger_sdk::logging::init_logging("ledger_transaction=debug");

    let owner = KeyPair::random();
    let mut keys = PkhKeyMap::new();
    keys.add(owner.clone());

    let mut funding = Tx::new(1, 0);
    funding.add_input(TxInput::from_coinbase(Script::new()));
    funding.add_output(TxOutput::new(5000, Script::pkhx_1h_output(&owner.pkh())));
    funding.add_output(TxOutput::new(7000, Script::pkhx_90d_output(&owner.pkh())));
    assert!(funding.is_coinbase());

    let mut utxos = TxOutBnMap::new();
    utxos.add_tx_outputs(&funding, 10);

    let recipient = KeyPair::random();
    let mut spend = Tx::new(1, 0);
    spend.add_input(TxInput::new(funding.id(), 0, Script::expired_pkhx_input()));
    spend.add_input(TxInput::new(funding.id(), 1, Script::unexpired_pkhx_input_placeholder()));
    spend.add_output(TxOutput::new(11_000, Script::pkhx_90d_output(&recipient.pkh())));

    // block 20: the 1h lock (6 blocks) has expired, the 90d lock has not
    TxSigner::new(&mut spend, &utxos, &keys, SignerConfig::new(20))
        .sign_all()
        .expect("should sign");

    let parsed = Tx::from_hex(&spend.to_hex()).expect("should parse");
    assert_eq!(parsed, spend);
    assert!(parsed.inputs[0].script.is_expired_pkhx_input());
    assert!(parsed.inputs[1].script.is_standard_input());
    assert!(parsed.outputs[0].script.is_standard_output());

    let chunks = parsed.inputs[1].script.chunks();
    let sig = TxSignature::from_bytes(chunks[0].data().expect("sig")).expect("valid sig");
    let spent = Script::pkhx_90d_output(&owner.pkh()).to_bytes();
    assert!(parsed
        .verify_input(1, &owner.pub_key, &sig, &spent, 7000)
        .expect("verify"));
}
