//! Deterministic xorshift64 generator used to vary plans week to week.
//!
//! Not suitable for anything security related.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// A zero seed would lock xorshift at zero, so it is floored to 1.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    /// Seeds from the start of the plan's week plus the player's
    /// regeneration counter.
    pub fn for_week(week_start: NaiveDate, regeneration_count: u32) -> Self {
        Self::new(week_hash(week_start).wrapping_add(u64::from(regeneration_count)))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `[0, upper)`. Returns 0 when `upper` is 0.
    pub fn next_below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() % upper as u64) as usize
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i + 1);
            items.swap(i, j);
        }
    }

    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }
}

/// Stable hash of a week start: splitmix64 over its midnight UTC timestamp.
fn week_hash(week_start: NaiveDate) -> u64 {
    let timestamp = week_start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default();

    let mut z = (timestamp as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
