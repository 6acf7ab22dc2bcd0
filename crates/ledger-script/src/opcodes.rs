//! Opcode byte values and their text names.
//!
//! Names are written without an `OP_` prefix in the text form of a script
//! (`DUP`, `DOUBLEBLAKE3`, `1`). Lookup is case-sensitive.

// Constants and push data
pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;

// Small integers
pub const OP_1: u8 = 0x51;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_4: u8 = 0x54;
pub const OP_5: u8 = 0x55;
pub const OP_6: u8 = 0x56;
pub const OP_7: u8 = 0x57;
pub const OP_8: u8 = 0x58;
pub const OP_9: u8 = 0x59;
pub const OP_10: u8 = 0x5a;
pub const OP_11: u8 = 0x5b;
pub const OP_12: u8 = 0x5c;
pub const OP_13: u8 = 0x5d;
pub const OP_14: u8 = 0x5e;
pub const OP_15: u8 = 0x5f;
pub const OP_16: u8 = 0x60;

// Flow control
pub const OP_IF: u8 = 0x63;
pub const OP_NOTIF: u8 = 0x64;
pub const OP_VERIF: u8 = 0x65;
pub const OP_VERNOTIF: u8 = 0x66;
pub const OP_ELSE: u8 = 0x67;
pub const OP_ENDIF: u8 = 0x68;
pub const OP_VERIFY: u8 = 0x69;
pub const OP_RETURN: u8 = 0x6a;

// Stack
pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_2DROP: u8 = 0x6d;
pub const OP_2DUP: u8 = 0x6e;
pub const OP_3DUP: u8 = 0x6f;
pub const OP_2OVER: u8 = 0x70;
pub const OP_2ROT: u8 = 0x71;
pub const OP_2SWAP: u8 = 0x72;
pub const OP_IFDUP: u8 = 0x73;
pub const OP_DEPTH: u8 = 0x74;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_NIP: u8 = 0x77;
pub const OP_OVER: u8 = 0x78;
pub const OP_PICK: u8 = 0x79;
pub const OP_ROLL: u8 = 0x7a;
pub const OP_ROT: u8 = 0x7b;
pub const OP_SWAP: u8 = 0x7c;
pub const OP_TUCK: u8 = 0x7d;

// Splice
pub const OP_CAT: u8 = 0x7e;
pub const OP_SUBSTR: u8 = 0x7f;
pub const OP_LEFT: u8 = 0x80;
pub const OP_RIGHT: u8 = 0x81;
pub const OP_SIZE: u8 = 0x82;

// Bitwise logic
pub const OP_INVERT: u8 = 0x83;
pub const OP_AND: u8 = 0x84;
pub const OP_OR: u8 = 0x85;
pub const OP_XOR: u8 = 0x86;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;

// Arithmetic
pub const OP_1ADD: u8 = 0x8b;
pub const OP_1SUB: u8 = 0x8c;
pub const OP_2MUL: u8 = 0x8d;
pub const OP_2DIV: u8 = 0x8e;
pub const OP_NEGATE: u8 = 0x8f;
pub const OP_ABS: u8 = 0x90;
pub const OP_NOT: u8 = 0x91;
pub const OP_0NOTEQUAL: u8 = 0x92;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
pub const OP_MUL: u8 = 0x95;
pub const OP_DIV: u8 = 0x96;
pub const OP_MOD: u8 = 0x97;
pub const OP_LSHIFT: u8 = 0x98;
pub const OP_RSHIFT: u8 = 0x99;
pub const OP_BOOLAND: u8 = 0x9a;
pub const OP_BOOLOR: u8 = 0x9b;
pub const OP_NUMEQUAL: u8 = 0x9c;
pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
pub const OP_LESSTHAN: u8 = 0x9f;
pub const OP_GREATERTHAN: u8 = 0xa0;
pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
pub const OP_MIN: u8 = 0xa3;
pub const OP_MAX: u8 = 0xa4;
pub const OP_WITHIN: u8 = 0xa5;

// Crypto
pub const OP_BLAKE3: u8 = 0xa6;
pub const OP_DOUBLEBLAKE3: u8 = 0xa7;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

// Locktime
pub const OP_CHECKLOCKABSVERIFY: u8 = 0xb1;
pub const OP_CHECKLOCKRELVERIFY: u8 = 0xb2;

/// Every named opcode, in ascending byte order.
pub const OPCODE_NAMES: &[(u8, &str)] = &[
    (OP_0, "0"),
    (OP_PUSHDATA1, "PUSHDATA1"),
    (OP_PUSHDATA2, "PUSHDATA2"),
    (OP_PUSHDATA4, "PUSHDATA4"),
    (OP_1NEGATE, "1NEGATE"),
    (OP_1, "1"),
    (OP_2, "2"),
    (OP_3, "3"),
    (OP_4, "4"),
    (OP_5, "5"),
    (OP_6, "6"),
    (OP_7, "7"),
    (OP_8, "8"),
    (OP_9, "9"),
    (OP_10, "10"),
    (OP_11, "11"),
    (OP_12, "12"),
    (OP_13, "13"),
    (OP_14, "14"),
    (OP_15, "15"),
    (OP_16, "16"),
    (OP_IF, "IF"),
    (OP_NOTIF, "NOTIF"),
    (OP_VERIF, "VERIF"),
    (OP_VERNOTIF, "VERNOTIF"),
    (OP_ELSE, "ELSE"),
    (OP_ENDIF, "ENDIF"),
    (OP_VERIFY, "VERIFY"),
    (OP_RETURN, "RETURN"),
    (OP_TOALTSTACK, "TOALTSTACK"),
    (OP_FROMALTSTACK, "FROMALTSTACK"),
    (OP_2DROP, "2DROP"),
    (OP_2DUP, "2DUP"),
    (OP_3DUP, "3DUP"),
    (OP_2OVER, "2OVER"),
    (OP_2ROT, "2ROT"),
    (OP_2SWAP, "2SWAP"),
    (OP_IFDUP, "IFDUP"),
    (OP_DEPTH, "DEPTH"),
    (OP_DROP, "DROP"),
    (OP_DUP, "DUP"),
    (OP_NIP, "NIP"),
    (OP_OVER, "OVER"),
    (OP_PICK, "PICK"),
    (OP_ROLL, "ROLL"),
    (OP_ROT, "ROT"),
    (OP_SWAP, "SWAP"),
    (OP_TUCK, "TUCK"),
    (OP_CAT, "CAT"),
    (OP_SUBSTR, "SUBSTR"),
    (OP_LEFT, "LEFT"),
    (OP_RIGHT, "RIGHT"),
    (OP_SIZE, "SIZE"),
    (OP_INVERT, "INVERT"),
    (OP_AND, "AND"),
    (OP_OR, "OR"),
    (OP_XOR, "XOR"),
    (OP_EQUAL, "EQUAL"),
    (OP_EQUALVERIFY, "EQUALVERIFY"),
    (OP_1ADD, "1ADD"),
    (OP_1SUB, "1SUB"),
    (OP_2MUL, "2MUL"),
    (OP_2DIV, "2DIV"),
    (OP_NEGATE, "NEGATE"),
    (OP_ABS, "ABS"),
    (OP_NOT, "NOT"),
    (OP_0NOTEQUAL, "0NOTEQUAL"),
    (OP_ADD, "ADD"),
    (OP_SUB, "SUB"),
    (OP_MUL, "MUL"),
    (OP_DIV, "DIV"),
    (OP_MOD, "MOD"),
    (OP_LSHIFT, "LSHIFT"),
    (OP_RSHIFT, "RSHIFT"),
    (OP_BOOLAND, "BOOLAND"),
    (OP_BOOLOR, "BOOLOR"),
    (OP_NUMEQUAL, "NUMEQUAL"),
    (OP_NUMEQUALVERIFY, "NUMEQUALVERIFY"),
    (OP_NUMNOTEQUAL, "NUMNOTEQUAL"),
    (OP_LESSTHAN, "LESSTHAN"),
    (OP_GREATERTHAN, "GREATERTHAN"),
    (OP_LESSTHANOREQUAL, "LESSTHANOREQUAL"),
    (OP_GREATERTHANOREQUAL, "GREATERTHANOREQUAL"),
    (OP_MIN, "MIN"),
    (OP_MAX, "MAX"),
    (OP_WITHIN, "WITHIN"),
    (OP_BLAKE3, "BLAKE3"),
    (OP_DOUBLEBLAKE3, "DOUBLEBLAKE3"),
    (OP_CHECKSIG, "CHECKSIG"),
    (OP_CHECKSIGVERIFY, "CHECKSIGVERIFY"),
    (OP_CHECKMULTISIG, "CHECKMULTISIG"),
    (OP_CHECKMULTISIGVERIFY, "CHECKMULTISIGVERIFY"),
    (OP_CHECKLOCKABSVERIFY, "CHECKLOCKABSVERIFY"),
    (OP_CHECKLOCKRELVERIFY, "CHECKLOCKRELVERIFY"),
];

/// Return the text name of an opcode, if it has one.
///
/// Direct-push opcodes `0x01..=0x4b` and unassigned bytes have no name.
pub fn opcode_to_name(op: u8) -> Option<&'static str> {
    OPCODE_NAMES
        .binary_search_by_key(&op, |(byte, _)| *byte)
        .ok()
        .map(|idx| OPCODE_NAMES[idx].1)
}

/// Look up an opcode by its exact, case-sensitive text name.
pub fn name_to_opcode(name: &str) -> Option<u8> {
    OPCODE_NAMES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(byte, _)| *byte)
}

/// Whether `op` is one of the small-number opcodes `0`, `1NEGATE`, `1`..`16`.
pub fn is_small_number(op: u8) -> bool {
    op == OP_0 || op == OP_1NEGATE || (OP_1..=OP_16).contains(&op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in OPCODE_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].1, pair[1].1);
        }
    }

    #[test]
    fn test_name_lookup_roundtrip() {
        for (byte, name) in OPCODE_NAMES {
            assert_eq!(name_to_opcode(name), Some(*byte));
            assert_eq!(opcode_to_name(*byte), Some(*name));
        }
    }

    #[test]
    fn test_hash_opcodes() {
        assert_eq!(name_to_opcode("BLAKE3"), Some(0xa6));
        assert_eq!(name_to_opcode("DOUBLEBLAKE3"), Some(0xa7));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(name_to_opcode("dup"), None);
        assert_eq!(name_to_opcode("OP_DUP"), None);
        assert_eq!(name_to_opcode("DUP"), Some(OP_DUP));
    }

    #[test]
    fn test_unnamed_bytes() {
        assert_eq!(opcode_to_name(0x01), None);
        assert_eq!(opcode_to_name(0x4b), None);
        assert_eq!(opcode_to_name(0x50), None);
        assert_eq!(opcode_to_name(0xff), None);
    }

    #[test]
    fn test_small_numbers() {
        assert!(is_small_number(OP_0));
        assert!(is_small_number(OP_16));
        assert!(is_small_number(OP_1NEGATE));
        assert!(!is_small_number(OP_PUSHDATA1));
        assert!(!is_small_number(OP_DUP));
    }
}
