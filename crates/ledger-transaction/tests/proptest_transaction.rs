use proptest::prelude::*;

use ledger_primitives::ec::Pkh;
use ledger_script::{Script, ScriptChunk};
use ledger_transaction::{Tx, TxInput, TxOutput};

/// Scripts built from pushes and plain opcodes, so they always re-encode
/// to the bytes they decode from.
fn arb_script() -> impl Strategy<Value = Script> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..80).prop_map(|data| {
            Script::from_chunks(vec![ScriptChunk::from_data(data).unwrap()])
        }),
        prop::array::uniform32(any::<u8>())
            .prop_map(|hash| Script::pkhx_90d_output(&Pkh::new(hash))),
        Just(Script::unexpired_pkhx_input_placeholder()),
        Just(Script::expired_pkhx_input()),
        Just(Script::new()),
    ]
}

/// Strategy to generate a random transaction.
fn arb_transaction() -> impl Strategy<Value = Tx> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()), // prev tx id
        any::<u32>(),                        // prev out index
        arb_script(),
        any::<u32>(), // sequence
    )
        .prop_map(|(prev_tx_id, prev_out_index, script, sequence)| {
            let mut input = TxInput::new(prev_tx_id, prev_out_index, script);
            input.sequence = sequence;
            input
        });

    let arb_output =
        (any::<u64>(), arb_script()).prop_map(|(value, script)| TxOutput::new(value, script));

    (
        any::<u8>(), // version
        prop::collection::vec(arb_input, 0..4),
        prop::collection::vec(arb_output, 0..4),
        any::<u64>(), // lock num
    )
        .prop_map(|(version, inputs, outputs, lock_num)| {
            let mut tx = Tx::new(version, lock_num);
            for i in inputs {
                tx.add_input(i);
            }
            for o in outputs {
                tx.add_output(o);
            }
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_serialize_deserialize_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let tx2 = Tx::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&tx2, &tx);
        prop_assert_eq!(tx2.to_bytes(), bytes);
    }

    #[test]
    fn transaction_hex_roundtrip(tx in arb_transaction()) {
        let hex_str = tx.to_hex();
        let tx2 = Tx::from_hex(&hex_str).unwrap();
        prop_assert_eq!(tx.id(), tx2.id());
    }

    /// Every strict prefix of a valid encoding is rejected.
    #[test]
    fn truncated_transaction_is_rejected(
        tx in arb_transaction(),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = tx.to_bytes();
        let len = cut.index(bytes.len());
        prop_assert!(Tx::from_bytes(&bytes[..len]).is_err());
    }
}
