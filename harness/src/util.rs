use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use ahash::RandomState;

/// Wall-clock seed for draws that must differ between otherwise identical
/// invocations (execution ordering, time-seeded runs).
pub(crate) fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0x5eed, |d| d.as_nanos() as u64)
}

// Fixed keys: value checksums must agree between runs and between map
// implementations.
pub(crate) fn checksum_hasher() -> RandomState {
    RandomState::with_seeds(
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    )
}
