//! Workload builders for dynarr benchmarks.
//!
//! - [`random_indices`]: deterministic index streams via seed
//! - [`churn_pattern`]: append/pop sequences that cross capacity
//!   boundaries in both directions
//! - [`filled`]: a typed array pre-loaded with `0..n`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr_buffer::{ArrayError, DynamicArray};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Append a value.
    Append(u64),
    /// Pop the last element.
    Pop,
}

/// Generate `count` indices in `0..len`, reproducible from `seed`.
pub fn random_indices(len: usize, count: usize, seed: u64) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.next_u64() % len as u64) as usize)
        .collect()
}

/// Build an append/pop workload of `rounds` waves.
///
/// Each wave appends `peak` values then pops all but a random remainder
/// below `peak / 4`, so every wave exercises growth and at least one
/// shrink. The live length never goes negative.
pub fn churn_pattern(peak: usize, rounds: usize, seed: u64) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops = Vec::with_capacity(peak * rounds * 2);
    let mut live = 0usize;
    for _ in 0..rounds {
        while live < peak {
            ops.push(Op::Append(rng.next_u64()));
            live += 1;
        }
        let floor = (rng.next_u64() % (peak as u64 / 4).max(1)) as usize;
        while live > floor {
            ops.push(Op::Pop);
            live -= 1;
        }
    }
    ops
}

/// Apply `ops` to `array`, stopping at the first error.
pub fn run_churn(array: &mut DynamicArray<u64>, ops: &[Op]) -> Result<(), ArrayError> {
    for op in ops {
        match *op {
            Op::Append(v) => array.append(v)?,
            Op::Pop => {
                array.pop()?;
            }
        }
    }
    Ok(())
}

/// A typed array holding `0..n`.
pub fn filled(n: u64) -> Result<DynamicArray<u64>, ArrayError> {
    let mut a = DynamicArray::new()?;
    for v in 0..n {
        a.append(v)?;
    }
    Ok(a)
}
