// Copyright 2026 Maurice S. Barnum
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;
use std::time::Instant;

use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::Uniform;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::warn;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::maps::MapUnderTest;
use crate::util::checksum_hasher;

/// Index stream shared by every phase. Resetting between phases re-seeds the
/// generator, so two maps replaying the same seed see byte-identical
/// operations no matter how a phase is sliced.
pub(crate) struct OpSequence {
    rng: StdRng,
    seed: u64,
    reuse: Option<Uniform<usize>>,
    probe: Option<Uniform<usize>>,
    effective: usize,
}

impl OpSequence {
    pub(crate) fn new(seed: u64, effective: usize, space: usize) -> Self {
        // An empty range is not an error here, just a degenerate workload.
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            reuse: Uniform::new(0, effective).ok(),
            probe: Uniform::new(0, space).ok(),
            effective,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Corpus index for insert number `i`: one sequential pass over the
    /// effective keys, then random overwrites among them.
    pub(crate) fn insert_index(&mut self, i: usize) -> usize {
        if i < self.effective {
            i
        } else {
            self.reuse.as_ref().map_or(0, |d| d.sample(&mut self.rng))
        }
    }

    /// Corpus index for one lookup, drawn from the whole search space so the
    /// never-inserted tail produces misses.
    pub(crate) fn probe_index(&mut self) -> usize {
        self.probe.as_ref().map_or(0, |d| d.sample(&mut self.rng))
    }
}

/// Timings and counters from one workload pass over one map.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    pub insert_total: Duration,
    pub lookup_total: Duration,
    pub remove_total: Duration,
    pub insert_ns: f64,
    pub lookup_ns: f64,
    pub remove_ns: f64,
    /// XOR of the content hashes of every value a lookup found.
    pub checksum: u64,
    pub found_lookups: u64,
    pub removed: u64,
    pub lookups_attempted: usize,
    pub removes_attempted: usize,
    pub collisions: Option<u64>,
}

impl RunStats {
    pub fn hit_rate(&self) -> f64 {
        if self.lookups_attempted == 0 {
            0.0
        } else {
            self.found_lookups as f64 / self.lookups_attempted as f64
        }
    }

    pub fn removal_rate(&self) -> f64 {
        if self.removes_attempted == 0 {
            0.0
        } else {
            self.removed as f64 / self.removes_attempted as f64
        }
    }
}

/// Runs the three timed phases against one map.
pub struct WorkloadDriver<'a> {
    config: &'a Config,
    corpus: &'a Corpus,
}

impl<'a> WorkloadDriver<'a> {
    pub fn new(config: &'a Config, corpus: &'a Corpus) -> Self {
        Self { config, corpus }
    }

    /// Insert, then look up, then remove, timing each phase. `seed` drives
    /// the operation sequence; passing the same seed replays the identical
    /// workload against another map.
    pub fn run(&self, map: &mut dyn MapUnderTest, seed: u64) -> RunStats {
        let mut stats = RunStats::default();
        if self.corpus.is_empty() {
            warn!("empty key corpus, nothing to measure");
            return stats;
        }

        let keys = self.corpus.keys();
        let mut seq = OpSequence::new(seed, self.corpus.effective_keys(), keys.len());
        let hasher = checksum_hasher();

        let inserts = self.config.inserts();
        let start = Instant::now();
        insert_pass(map, keys, &mut seq, inserts);
        stats.insert_total = start.elapsed();
        stats.insert_ns = per_op_nanos(stats.insert_total, inserts);

        seq.reset();
        stats.lookups_attempted = self.config.lookups();
        let start = Instant::now();
        for _ in 0..stats.lookups_attempted {
            let key = &keys[seq.probe_index()];
            if let Some(value) = map.get(key) {
                // XOR of content hashes: order-independent, and forces the
                // compiler to materialize every lookup result.
                stats.checksum ^= hasher.hash_one(value);
                stats.found_lookups += 1;
            }
        }
        stats.lookup_total = start.elapsed();
        stats.lookup_ns = per_op_nanos(stats.lookup_total, stats.lookups_attempted);
        std::hint::black_box(stats.checksum);

        seq.reset();
        stats.removes_attempted = self.config.removes().min(keys.len());
        let start = Instant::now();
        for key in &keys[..stats.removes_attempted] {
            if map.remove(key).is_some() {
                stats.removed += 1;
            }
        }
        stats.remove_total = start.elapsed();
        stats.remove_ns = per_op_nanos(stats.remove_total, stats.removes_attempted);

        stats.collisions = map.collisions();
        debug!(
            found = stats.found_lookups,
            removed = stats.removed,
            checksum = stats.checksum,
            "workload pass complete"
        );
        stats
    }

    /// Insert phase alone, for maps created at their default capacity. Gives
    /// the cost of inserting while the table grows and rehashes.
    pub fn measure_growth(&self, map: &mut dyn MapUnderTest, seed: u64) -> f64 {
        if self.corpus.is_empty() {
            return 0.0;
        }
        let keys = self.corpus.keys();
        let mut seq = OpSequence::new(seed, self.corpus.effective_keys(), keys.len());
        let inserts = self.config.inserts();
        let start = Instant::now();
        insert_pass(map, keys, &mut seq, inserts);
        per_op_nanos(start.elapsed(), inserts)
    }
}

fn insert_pass(map: &mut dyn MapUnderTest, keys: &[String], seq: &mut OpSequence, inserts: usize) {
    for i in 0..inserts {
        let key = &keys[seq.insert_index(i)];
        // Fresh allocations on purpose: the maps must compare key content,
        // not addresses.
        map.put(key.clone(), key.clone());
    }
}

fn per_op_nanos(total: Duration, ops: usize) -> f64 {
    if ops == 0 {
        0.0
    } else {
        total.as_nanos() as f64 / ops as f64
    }
}
