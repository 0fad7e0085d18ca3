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

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::warn;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::maps::MapSpec;
use crate::util::time_seed;
use crate::workload::RunStats;
use crate::workload::WorkloadDriver;

/// Which map runs first within a repetition. Flipped per repetition so that
/// cache warming and allocator state do not systematically favor one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecOrder {
    ReferenceFirst,
    CandidateFirst,
}

impl ExecOrder {
    pub fn coin_flip(rng: &mut StdRng) -> Self {
        if rng.random::<bool>() {
            ExecOrder::ReferenceFirst
        } else {
            ExecOrder::CandidateFirst
        }
    }
}

impl std::fmt::Display for ExecOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecOrder::ReferenceFirst => f.write_str("reference first"),
            ExecOrder::CandidateFirst => f.write_str("candidate first"),
        }
    }
}

/// Relative speed difference per phase. Positive means the candidate was
/// faster than the reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct Improvement {
    pub insert: f64,
    pub lookup: f64,
    pub remove: f64,
}

impl Improvement {
    pub fn between(reference: &RunStats, candidate: &RunStats) -> Self {
        Self {
            insert: percent(reference.insert_ns, candidate.insert_ns),
            lookup: percent(reference.lookup_ns, candidate.lookup_ns),
            remove: percent(reference.remove_ns, candidate.remove_ns),
        }
    }
}

/// `(reference - candidate) / reference`, as a percentage. Zero when the
/// reference measured zero, rather than an infinity that would poison
/// downstream aggregation.
pub fn percent(reference: f64, candidate: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (reference - candidate) / reference * 100.0
    }
}

/// One map's results within a repetition.
#[derive(Clone, Debug)]
pub struct MapRun {
    pub name: &'static str,
    pub grow_ns: f64,
    pub stats: RunStats,
}

/// Results of one reference-versus-candidate repetition.
#[derive(Clone, Debug)]
pub struct Repetition {
    pub index: usize,
    pub order: ExecOrder,
    pub seed: u64,
    pub reference: MapRun,
    pub candidate: MapRun,
    pub improvement: Improvement,
}

impl Repetition {
    /// Both maps saw the same operations, so equal data means equal
    /// checksums. A disagreement means one map returned wrong values.
    pub fn checksums_agree(&self) -> bool {
        self.reference.stats.checksum == self.candidate.stats.checksum
    }
}

/// Runs the workload against both maps, repetition by repetition, and hands
/// each finished repetition to `observe`. Repetitions are reported
/// individually and never aggregated.
pub struct BenchRunner<'a> {
    config: &'a Config,
    corpus: &'a Corpus,
    reference: MapSpec,
    candidate: MapSpec,
    repetitions: usize,
}

impl<'a> BenchRunner<'a> {
    pub fn new(
        config: &'a Config,
        corpus: &'a Corpus,
        reference: MapSpec,
        candidate: MapSpec,
        repetitions: usize,
    ) -> Self {
        Self {
            config,
            corpus,
            reference,
            candidate,
            repetitions: repetitions.max(1),
        }
    }

    pub fn run(&self, mut observe: impl FnMut(&Repetition)) {
        let driver = WorkloadDriver::new(self.config, self.corpus);
        // The coin flip must differ between repetitions even though the
        // workload seed may not, so it gets its own time-seeded generator.
        let mut order_rng = StdRng::seed_from_u64(time_seed());

        for index in 1..=self.repetitions {
            let seed = if self.config.time_seeded_runs() {
                let seed = time_seed();
                debug!(seed, "time-seeded repetition");
                seed
            } else {
                self.corpus.run_seed()
            };
            let order = ExecOrder::coin_flip(&mut order_rng);
            let (first, second) = match order {
                ExecOrder::ReferenceFirst => (self.reference, self.candidate),
                ExecOrder::CandidateFirst => (self.candidate, self.reference),
            };

            let first_run = self.measure(&driver, first, seed);
            let second_run = self.measure(&driver, second, seed);
            let (reference, candidate) = match order {
                ExecOrder::ReferenceFirst => (first_run, second_run),
                ExecOrder::CandidateFirst => (second_run, first_run),
            };

            let repetition = Repetition {
                index,
                order,
                seed,
                improvement: Improvement::between(&reference.stats, &candidate.stats),
                reference,
                candidate,
            };
            if !repetition.checksums_agree() {
                warn!(
                    reference = repetition.reference.stats.checksum,
                    candidate = repetition.candidate.stats.checksum,
                    "value checksums disagree, the maps returned different data"
                );
            }
            observe(&repetition);
        }
    }

    fn measure(&self, driver: &WorkloadDriver<'_>, spec: MapSpec, seed: u64) -> MapRun {
        let mut growth_map = spec.create(0);
        let grow_ns = driver.measure_growth(growth_map.as_mut(), seed);
        drop(growth_map);

        let mut map = spec.create(self.config.initial_capacity());
        let stats = driver.run(map.as_mut(), seed);
        MapRun {
            name: spec.name,
            grow_ns,
            stats,
        }
    }
}
