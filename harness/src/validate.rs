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

use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::maps::MapUnderTest;
use crate::workload::OpSequence;

/// How strictly sizes are compared during the insert phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidateMode {
    /// Compare `len()` after every insert.
    #[default]
    SizeChecked,
    /// Prime the candidate with the full key list and skip size checks.
    /// For maps whose sizing strategy makes intermediate sizes diverge.
    ExpectedKeys,
}

/// Mismatch counts from one validation run. Zero everywhere means the
/// candidate behaved exactly like the reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationReport {
    pub size_mismatches: u64,
    pub lookup_mismatches: u64,
    pub remove_mismatches: u64,
}

impl ValidationReport {
    pub fn mismatches(&self) -> u64 {
        self.size_mismatches + self.lookup_mismatches + self.remove_mismatches
    }

    pub fn is_validated(&self) -> bool {
        self.mismatches() == 0
    }
}

/// Replays one workload against two maps in lockstep and compares what they
/// return. Never stops early: the full mismatch picture is worth more than
/// the first divergence.
pub struct DifferentialValidator<'a> {
    config: &'a Config,
    corpus: &'a Corpus,
}

impl<'a> DifferentialValidator<'a> {
    pub fn new(config: &'a Config, corpus: &'a Corpus) -> Self {
        Self { config, corpus }
    }

    pub fn run(
        &self,
        reference: &mut dyn MapUnderTest,
        candidate: &mut dyn MapUnderTest,
        mode: ValidateMode,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.corpus.is_empty() {
            warn!("empty key corpus, nothing to validate");
            return report;
        }

        let keys = self.corpus.keys();
        if mode == ValidateMode::ExpectedKeys {
            candidate.expect_keys(keys);
        }
        let mut seq =
            OpSequence::new(self.corpus.run_seed(), self.corpus.effective_keys(), keys.len());

        let inserts = self.config.inserts();
        for i in 0..inserts {
            let key = &keys[seq.insert_index(i)];
            reference.put(key.clone(), key.clone());
            candidate.put(key.clone(), key.clone());
            if mode == ValidateMode::SizeChecked && reference.len() != candidate.len() {
                warn!(
                    key = %key,
                    reference = reference.len(),
                    candidate = candidate.len(),
                    "size mismatch after insert"
                );
                report.size_mismatches += 1;
            }
        }

        seq.reset();
        let lookups = self.config.lookups();
        for _ in 0..lookups {
            let key = &keys[seq.probe_index()];
            let expected = reference.get(key);
            let actual = candidate.get(key);
            if expected != actual {
                warn!(key = %key, ?expected, ?actual, "lookup mismatch");
                report.lookup_mismatches += 1;
            }
        }

        seq.reset();
        let removes = self.config.removes().min(keys.len());
        for key in &keys[..removes] {
            let expected = reference.remove(key);
            let actual = candidate.remove(key);
            if expected != actual {
                warn!(key = %key, ?expected, ?actual, "remove mismatch");
                report.remove_mismatches += 1;
            }
        }

        if report.is_validated() {
            info!(inserts, lookups, removes, ?mode, "maps validated");
        } else {
            warn!(
                size = report.size_mismatches,
                lookup = report.lookup_mismatches,
                remove = report.remove_mismatches,
                "maps NOT validated"
            );
        }
        report
    }
}
