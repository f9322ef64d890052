//! Algebraic fallback used when the exact table has no entry.
//!
//! Each slot of the chunk has its own base ASCII offset plus the symbol's
//! ordinal value and a position-dependent term. The formulas were fitted to
//! the recorded table; outside the recorded keys the output is a best-effort
//! extrapolation, not verified legacy behaviour.

use crate::core::chunk::Chunk;

/// Chunk for `value` at `position`. Never fails.
pub fn generate(value: u8, position: usize) -> Chunk {
    let v = value as u64;
    let p = position as u64;
    Chunk::from_codes_clamped([slot0(v, p), slot1(v, p), slot2(v, p), slot3(v, p)].map(saturate))
}

/// Raw (unclamped) code for a single slot, mostly useful for diagnostics.
pub fn slot_code(slot: usize, value: u8, position: usize) -> Option<u64> {
    let (v, p) = (value as u64, position as u64);
    match slot {
        0 => Some(slot0(v, p)),
        1 => Some(slot1(v, p)),
        2 => Some(slot2(v, p)),
        3 => Some(slot3(v, p)),
        _ => None,
    }
}

fn slot0(v: u64, p: u64) -> u64 {
    59 + v + p / 10
}

fn slot1(v: u64, p: u64) -> u64 {
    52 + v + p % 4
}

fn slot2(v: u64, p: u64) -> u64 {
    match p {
        0 => 57 + v,
        1 => 56 + v,
        _ => 55 + v + p % 8,
    }
}

fn slot3(v: u64, p: u64) -> u64 {
    match p {
        0 => 51 + v,
        1 => 56 + v,
        _ => 50 + v + p % 6,
    }
}

fn saturate(code: u64) -> u32 {
    u32::try_from(code).unwrap_or(u32::MAX)
}
