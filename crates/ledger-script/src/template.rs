//! Spend templates: constructors and shape classifiers.
//!
//! Classification inspects only the chunk count, opcodes at fixed positions,
//! payload lengths, and the two-byte lock constants. Embedded key hashes are
//! the only payloads read in full.
//!
//! Relative locks are counted in blocks:
//! - PKHX 1h: 6 blocks.
//! - PKHX 90d: 12960 blocks.
//! - PKHXR 1h/40m: expiry after 6 blocks, recovery after 4 blocks.
//! - PKHXR 90d/60d: expiry after 12960 blocks, recovery after 8640 blocks.

use ledger_primitives::buf::VarBuf;
use ledger_primitives::ec::public_key::PUB_KEY_SIZE;
use ledger_primitives::ec::Pkh;

use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::Script;

/// Size of a transaction signature slot: one hash-type byte and a 64-byte
/// compact signature.
pub const SIG_SIZE: usize = 65;

pub const PKHX_1H_LOCK_REL: u64 = 6;
pub const PKHX_90D_LOCK_REL: u64 = 12960;
pub const PKHXR_1H_40M_LOCK_REL: u64 = 6;
pub const PKHXR_1H_40M_RECOVERY_REL: u64 = 4;
pub const PKHXR_90D_60D_LOCK_REL: u64 = 12960;
pub const PKHXR_90D_60D_RECOVERY_REL: u64 = 8640;

const PKH_OUTPUT_LEN: usize = 5;
const PKHX_OUTPUT_LEN: usize = 12;
const PKHXR_OUTPUT_LEN: usize = 23;

// ---------------------------------------------------------------------------
// Lock variants
// ---------------------------------------------------------------------------

/// Relative lock of a PKHX output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PkhxLock {
    OneHour,
    NinetyDays,
}

impl PkhxLock {
    /// Blocks after creation before the expired spend path opens.
    pub fn lock_rel(self) -> u64 {
        match self {
            PkhxLock::OneHour => PKHX_1H_LOCK_REL,
            PkhxLock::NinetyDays => PKHX_90D_LOCK_REL,
        }
    }

    /// Whether an output created at `created_block` has expired by `working_block`.
    pub fn is_expired(self, working_block: u64, created_block: u64) -> bool {
        working_block >= created_block.saturating_add(self.lock_rel())
    }

    fn lock_chunk(self) -> LockChunk {
        match self {
            PkhxLock::OneHour => LockChunk::Small(OP_6),
            PkhxLock::NinetyDays => LockChunk::Pushed(PKHX_90D_LOCK_REL as u16),
        }
    }
}

/// Expiry and recovery locks of a PKHXR output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PkhxrLock {
    OneHourFortyMinutes,
    NinetyDaysSixtyDays,
}

impl PkhxrLock {
    pub fn lock_rel(self) -> u64 {
        match self {
            PkhxrLock::OneHourFortyMinutes => PKHXR_1H_40M_LOCK_REL,
            PkhxrLock::NinetyDaysSixtyDays => PKHXR_90D_60D_LOCK_REL,
        }
    }

    pub fn recovery_rel(self) -> u64 {
        match self {
            PkhxrLock::OneHourFortyMinutes => PKHXR_1H_40M_RECOVERY_REL,
            PkhxrLock::NinetyDaysSixtyDays => PKHXR_90D_60D_RECOVERY_REL,
        }
    }

    pub fn is_expired(self, working_block: u64, created_block: u64) -> bool {
        working_block >= created_block.saturating_add(self.lock_rel())
    }

    /// Whether the recovery key may spend yet.
    pub fn is_recoverable(self, working_block: u64, created_block: u64) -> bool {
        working_block >= created_block.saturating_add(self.recovery_rel())
    }

    fn lock_chunk(self) -> LockChunk {
        match self {
            PkhxrLock::OneHourFortyMinutes => LockChunk::Small(OP_6),
            PkhxrLock::NinetyDaysSixtyDays => LockChunk::Pushed(PKHXR_90D_60D_LOCK_REL as u16),
        }
    }

    fn recovery_chunk(self) -> LockChunk {
        match self {
            PkhxrLock::OneHourFortyMinutes => LockChunk::Small(OP_4),
            PkhxrLock::NinetyDaysSixtyDays => {
                LockChunk::Pushed(PKHXR_90D_60D_RECOVERY_REL as u16)
            }
        }
    }
}

/// How a lock constant appears in a script: a small-number opcode, or a
/// two-byte big-endian push.
#[derive(Clone, Copy)]
enum LockChunk {
    Small(u8),
    Pushed(u16),
}

impl LockChunk {
    fn to_chunk(self) -> ScriptChunk {
        match self {
            LockChunk::Small(op) => ScriptChunk::Opcode(op),
            LockChunk::Pushed(value) => push(&value.to_be_bytes()),
        }
    }

    fn matches(self, chunk: &ScriptChunk) -> bool {
        match self {
            LockChunk::Small(op) => *chunk == ScriptChunk::Opcode(op),
            LockChunk::Pushed(value) => {
                chunk.data().map_or(false, |data| data == &value.to_be_bytes()[..])
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Output classification
// ---------------------------------------------------------------------------

/// A recognized output script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputTemplate {
    /// `DUP DOUBLEBLAKE3 <pkh> EQUALVERIFY CHECKSIG`
    Pkh { pkh: Pkh },
    /// Key-hash spend, or anyone after the relative lock elapses.
    Pkhx { pkh: Pkh, lock: PkhxLock },
    /// Key-hash spend, recovery-key spend after the recovery lock, or anyone
    /// after the expiry lock.
    Pkhxr {
        pkh: Pkh,
        recovery_pkh: Pkh,
        lock: PkhxrLock,
    },
}

impl OutputTemplate {
    /// The key hash of the primary spend path.
    pub fn pkh(&self) -> &Pkh {
        match self {
            OutputTemplate::Pkh { pkh }
            | OutputTemplate::Pkhx { pkh, .. }
            | OutputTemplate::Pkhxr { pkh, .. } => pkh,
        }
    }

    /// Build the output script for this template.
    pub fn to_script(&self) -> Script {
        match *self {
            OutputTemplate::Pkh { pkh } => Script::pkh_output(&pkh),
            OutputTemplate::Pkhx { pkh, lock } => pkhx_output(&pkh, lock),
            OutputTemplate::Pkhxr { pkh, recovery_pkh, lock } => {
                pkhxr_output(&pkh, &recovery_pkh, lock)
            }
        }
    }
}

/// A push built from a payload known to fit PUSHDATA1.
fn push(data: &[u8]) -> ScriptChunk {
    ScriptChunk::Push {
        op: OP_PUSHDATA1,
        data: VarBuf::from(data),
    }
}

fn op(op: u8) -> ScriptChunk {
    ScriptChunk::Opcode(op)
}

fn is_op(chunk: &ScriptChunk, expected: u8) -> bool {
    *chunk == ScriptChunk::Opcode(expected)
}

/// The 32-byte hash carried by a push, if `chunk` is one.
fn hash_at(chunk: &ScriptChunk) -> Option<Pkh> {
    chunk.data().and_then(|data| Pkh::from_bytes(data).ok())
}

/// A push holding either nothing or exactly `size` bytes.
fn is_slot(chunk: &ScriptChunk, size: usize) -> bool {
    chunk
        .data()
        .map_or(false, |data| data.is_empty() || data.len() == size)
}

/// `IF DUP DOUBLEBLAKE3 <pkh> EQUALVERIFY CHECKSIG ELSE`, the shared head of
/// the expiring templates. Returns the embedded hash.
fn match_pkh_branch(chunks: &[ScriptChunk]) -> Option<Pkh> {
    if !(is_op(&chunks[0], OP_IF)
        && is_op(&chunks[1], OP_DUP)
        && is_op(&chunks[2], OP_DOUBLEBLAKE3)
        && is_op(&chunks[4], OP_EQUALVERIFY)
        && is_op(&chunks[5], OP_CHECKSIG)
        && is_op(&chunks[6], OP_ELSE))
    {
        return None;
    }
    hash_at(&chunks[3])
}

fn match_pkh(chunks: &[ScriptChunk]) -> Option<OutputTemplate> {
    let shape = is_op(&chunks[0], OP_DUP)
        && is_op(&chunks[1], OP_DOUBLEBLAKE3)
        && is_op(&chunks[3], OP_EQUALVERIFY)
        && is_op(&chunks[4], OP_CHECKSIG);
    if !shape {
        return None;
    }
    hash_at(&chunks[2]).map(|pkh| OutputTemplate::Pkh { pkh })
}

fn match_pkhx(chunks: &[ScriptChunk]) -> Option<OutputTemplate> {
    let pkh = match_pkh_branch(chunks)?;
    let tail = is_op(&chunks[8], OP_CHECKLOCKRELVERIFY)
        && is_op(&chunks[9], OP_DROP)
        && is_op(&chunks[10], OP_1)
        && is_op(&chunks[11], OP_ENDIF);
    if !tail {
        return None;
    }
    [PkhxLock::OneHour, PkhxLock::NinetyDays]
        .into_iter()
        .find(|lock| lock.lock_chunk().matches(&chunks[7]))
        .map(|lock| OutputTemplate::Pkhx { pkh, lock })
}

fn match_pkhxr(chunks: &[ScriptChunk]) -> Option<OutputTemplate> {
    let pkh = match_pkh_branch(chunks)?;
    let shape = is_op(&chunks[7], OP_IF)
        && is_op(&chunks[9], OP_CHECKLOCKRELVERIFY)
        && is_op(&chunks[10], OP_DROP)
        && is_op(&chunks[11], OP_DUP)
        && is_op(&chunks[12], OP_DOUBLEBLAKE3)
        && is_op(&chunks[14], OP_EQUALVERIFY)
        && is_op(&chunks[15], OP_CHECKSIG)
        && is_op(&chunks[16], OP_ELSE)
        && is_op(&chunks[18], OP_CHECKLOCKRELVERIFY)
        && is_op(&chunks[19], OP_DROP)
        && is_op(&chunks[20], OP_1)
        && is_op(&chunks[21], OP_ENDIF)
        && is_op(&chunks[22], OP_ENDIF);
    if !shape {
        return None;
    }
    let recovery_pkh = hash_at(&chunks[13])?;
    [PkhxrLock::OneHourFortyMinutes, PkhxrLock::NinetyDaysSixtyDays]
        .into_iter()
        .find(|lock| {
            lock.recovery_chunk().matches(&chunks[8]) && lock.lock_chunk().matches(&chunks[17])
        })
        .map(|lock| OutputTemplate::Pkhxr {
            pkh,
            recovery_pkh,
            lock,
        })
}

fn pkhx_output(pkh: &Pkh, lock: PkhxLock) -> Script {
    Script::from_chunks(vec![
        op(OP_IF),
        op(OP_DUP),
        op(OP_DOUBLEBLAKE3),
        push(pkh.as_bytes()),
        op(OP_EQUALVERIFY),
        op(OP_CHECKSIG),
        op(OP_ELSE),
        lock.lock_chunk().to_chunk(),
        op(OP_CHECKLOCKRELVERIFY),
        op(OP_DROP),
        op(OP_1),
        op(OP_ENDIF),
    ])
}

fn pkhxr_output(pkh: &Pkh, recovery_pkh: &Pkh, lock: PkhxrLock) -> Script {
    Script::from_chunks(vec![
        op(OP_IF),
        op(OP_DUP),
        op(OP_DOUBLEBLAKE3),
        push(pkh.as_bytes()),
        op(OP_EQUALVERIFY),
        op(OP_CHECKSIG),
        op(OP_ELSE),
        op(OP_IF),
        lock.recovery_chunk().to_chunk(),
        op(OP_CHECKLOCKRELVERIFY),
        op(OP_DROP),
        op(OP_DUP),
        op(OP_DOUBLEBLAKE3),
        push(recovery_pkh.as_bytes()),
        op(OP_EQUALVERIFY),
        op(OP_CHECKSIG),
        op(OP_ELSE),
        lock.lock_chunk().to_chunk(),
        op(OP_CHECKLOCKRELVERIFY),
        op(OP_DROP),
        op(OP_1),
        op(OP_ENDIF),
        op(OP_ENDIF),
    ])
}

impl Script {
    // -----------------------------------------------------------------------
    // Output templates
    // -----------------------------------------------------------------------

    /// Classify this script as one of the known output templates.
    ///
    /// Dispatches on the chunk count, then checks a fixed set of positions.
    pub fn output_template(&self) -> Option<OutputTemplate> {
        let chunks = self.chunks();
        match chunks.len() {
            PKH_OUTPUT_LEN => match_pkh(chunks),
            PKHX_OUTPUT_LEN => match_pkhx(chunks),
            PKHXR_OUTPUT_LEN => match_pkhxr(chunks),
            _ => None,
        }
    }

    pub fn pkh_output(pkh: &Pkh) -> Self {
        Script::from_chunks(vec![
            op(OP_DUP),
            op(OP_DOUBLEBLAKE3),
            push(pkh.as_bytes()),
            op(OP_EQUALVERIFY),
            op(OP_CHECKSIG),
        ])
    }

    pub fn is_pkh_output(&self) -> bool {
        matches!(self.output_template(), Some(OutputTemplate::Pkh { .. }))
    }

    pub fn pkhx_1h_output(pkh: &Pkh) -> Self {
        pkhx_output(pkh, PkhxLock::OneHour)
    }

    pub fn is_pkhx_1h_output(&self) -> bool {
        matches!(
            self.output_template(),
            Some(OutputTemplate::Pkhx {
                lock: PkhxLock::OneHour,
                ..
            })
        )
    }

    pub fn pkhx_90d_output(pkh: &Pkh) -> Self {
        pkhx_output(pkh, PkhxLock::NinetyDays)
    }

    pub fn is_pkhx_90d_output(&self) -> bool {
        matches!(
            self.output_template(),
            Some(OutputTemplate::Pkhx {
                lock: PkhxLock::NinetyDays,
                ..
            })
        )
    }

    pub fn pkhxr_1h_40m_output(pkh: &Pkh, recovery_pkh: &Pkh) -> Self {
        pkhxr_output(pkh, recovery_pkh, PkhxrLock::OneHourFortyMinutes)
    }

    pub fn is_pkhxr_1h_40m_output(&self) -> bool {
        matches!(
            self.output_template(),
            Some(OutputTemplate::Pkhxr {
                lock: PkhxrLock::OneHourFortyMinutes,
                ..
            })
        )
    }

    pub fn pkhxr_90d_60d_output(pkh: &Pkh, recovery_pkh: &Pkh) -> Self {
        pkhxr_output(pkh, recovery_pkh, PkhxrLock::NinetyDaysSixtyDays)
    }

    pub fn is_pkhxr_90d_60d_output(&self) -> bool {
        matches!(
            self.output_template(),
            Some(OutputTemplate::Pkhxr {
                lock: PkhxrLock::NinetyDaysSixtyDays,
                ..
            })
        )
    }

    /// Outputs accepted for relay: the expiring key-hash templates.
    pub fn is_standard_output(&self) -> bool {
        matches!(self.output_template(), Some(OutputTemplate::Pkhx { .. }))
    }

    // -----------------------------------------------------------------------
    // Input templates
    // -----------------------------------------------------------------------

    /// `<sig> <pubkey>`
    pub fn pkh_input(sig: &[u8; SIG_SIZE], pub_key: &[u8; PUB_KEY_SIZE]) -> Self {
        Script::from_chunks(vec![push(sig), push(pub_key)])
    }

    /// A PKH input with zero-filled slots of the final sizes.
    pub fn pkh_input_placeholder() -> Self {
        Self::pkh_input(&[0u8; SIG_SIZE], &[0u8; PUB_KEY_SIZE])
    }

    /// Two pushes, each empty or of signature / public key size.
    pub fn is_pkh_input(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 2 && is_slot(&chunks[0], SIG_SIZE) && is_slot(&chunks[1], PUB_KEY_SIZE)
    }

    /// `<sig> <pubkey> 1`: spend through the key-hash branch.
    pub fn unexpired_pkhx_input(sig: &[u8; SIG_SIZE], pub_key: &[u8; PUB_KEY_SIZE]) -> Self {
        Script::from_chunks(vec![push(sig), push(pub_key), op(OP_1)])
    }

    pub fn unexpired_pkhx_input_placeholder() -> Self {
        Self::unexpired_pkhx_input(&[0u8; SIG_SIZE], &[0u8; PUB_KEY_SIZE])
    }

    pub fn is_unexpired_pkhx_input(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 3
            && is_slot(&chunks[0], SIG_SIZE)
            && is_slot(&chunks[1], PUB_KEY_SIZE)
            && is_op(&chunks[2], OP_1)
    }

    /// `0`: take the lock branch, no signature needed.
    pub fn expired_pkhx_input() -> Self {
        Script::from_chunks(vec![op(OP_0)])
    }

    pub fn is_expired_pkhx_input(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 1 && is_op(&chunks[0], OP_0)
    }

    /// Same shape as the unexpired PKHX input.
    pub fn unexpired_pkhxr_input(sig: &[u8; SIG_SIZE], pub_key: &[u8; PUB_KEY_SIZE]) -> Self {
        Self::unexpired_pkhx_input(sig, pub_key)
    }

    pub fn is_unexpired_pkhxr_input(&self) -> bool {
        self.is_unexpired_pkhx_input()
    }

    /// `<sig> <pubkey> 1 0`: spend through the recovery branch.
    pub fn recovery_pkhxr_input(sig: &[u8; SIG_SIZE], pub_key: &[u8; PUB_KEY_SIZE]) -> Self {
        Script::from_chunks(vec![push(sig), push(pub_key), op(OP_1), op(OP_0)])
    }

    pub fn recovery_pkhxr_input_placeholder() -> Self {
        Self::recovery_pkhxr_input(&[0u8; SIG_SIZE], &[0u8; PUB_KEY_SIZE])
    }

    pub fn is_recovery_pkhxr_input(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 4
            && is_slot(&chunks[0], SIG_SIZE)
            && is_slot(&chunks[1], PUB_KEY_SIZE)
            && is_op(&chunks[2], OP_1)
            && is_op(&chunks[3], OP_0)
    }

    /// `0 0`: take the expiry branch.
    pub fn expired_pkhxr_input() -> Self {
        Script::from_chunks(vec![op(OP_0), op(OP_0)])
    }

    pub fn is_expired_pkhxr_input(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 2 && is_op(&chunks[0], OP_0) && is_op(&chunks[1], OP_0)
    }

    /// Inputs accepted for relay: push-only spends of the PKHX templates.
    pub fn is_standard_input(&self) -> bool {
        self.is_push_only() && (self.is_unexpired_pkhx_input() || self.is_expired_pkhx_input())
    }
}
