use proptest::prelude::*;

use ledger_script::opcodes::{opcode_to_name, OP_DUP, OP_PUSHDATA4};
use ledger_script::{Script, ScriptChunk};

/// Named opcodes that are not pushes.
fn named_opcode() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("named non-push opcode", |op| {
        !(0x01..=OP_PUSHDATA4).contains(op) && opcode_to_name(*op).is_some()
    })
}

fn chunk() -> impl Strategy<Value = ScriptChunk> {
    prop_oneof![
        named_opcode().prop_map(ScriptChunk::Opcode),
        prop::collection::vec(any::<u8>(), 0..300)
            .prop_map(|data| ScriptChunk::from_data(data).unwrap()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn script_bytes_roundtrip(chunks in prop::collection::vec(chunk(), 0..16)) {
        let script = Script::from_chunks(chunks);
        let decoded = Script::from_bytes(&script.to_bytes()).unwrap();
        prop_assert_eq!(decoded, script);
    }

    #[test]
    fn script_asm_roundtrip(chunks in prop::collection::vec(chunk(), 0..16)) {
        let script = Script::from_chunks(chunks);
        let asm = script.to_asm().unwrap();
        let parsed = Script::from_asm(&asm).unwrap();
        prop_assert_eq!(parsed, script);
    }

    #[test]
    fn script_hex_roundtrip(chunks in prop::collection::vec(chunk(), 0..16)) {
        let script = Script::from_chunks(chunks);
        let parsed = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(parsed.to_bytes(), script.to_bytes());
    }

    /// Decoding arbitrary bytes never panics; whatever decodes re-encodes to
    /// the same bytes.
    #[test]
    fn decode_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(script) = Script::from_bytes(&data) {
            prop_assert_eq!(script.to_bytes(), data);
        }
    }

    #[test]
    fn truncated_push_is_rejected(len in 1u8..=0x4b, extra in 0usize..4) {
        let available = (len as usize).saturating_sub(extra + 1);
        let mut bytes = vec![OP_DUP, len];
        bytes.extend(std::iter::repeat(0xab).take(available));
        prop_assert!(Script::from_bytes(&bytes).is_err());
    }
}
