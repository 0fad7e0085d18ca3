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

use std::fmt;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::Error;
use crate::Result;

/// How the key corpus is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Random alphanumeric keys with lengths uniform in `[min, max]`.
    Random { min: usize, max: usize },
    /// First whitespace-delimited token of each non-blank line.
    File { path: PathBuf },
    /// Like `File`, but the token must start with a letter.
    WordnetDict { path: PathBuf },
}

impl FromStr for KeyStrategy {
    type Err = Error;

    /// Parse `random:<min>[-<max>]`, `file:<path>`, or `wordnetdict:<path>`.
    fn from_str(s: &str) -> Result<Self> {
        let (scheme, arg) = s
            .split_once(':')
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))?;
        match scheme {
            "random" => {
                let parse = |t: &str| {
                    t.parse::<usize>().map_err(|source| Error::InvalidKeyLength {
                        spec: s.to_string(),
                        source,
                    })
                };
                let (min, max) = match arg.split_once('-') {
                    Some((lo, hi)) => (parse(lo)?, parse(hi)?),
                    None => {
                        let n = parse(arg)?;
                        (n, n)
                    }
                };
                Ok(KeyStrategy::Random { min, max })
            }
            "file" | "wordnetdict" => {
                if arg.is_empty() {
                    return Err(Error::MissingPath(s.to_string()));
                }
                let path = PathBuf::from(arg);
                Ok(if scheme == "file" {
                    KeyStrategy::File { path }
                } else {
                    KeyStrategy::WordnetDict { path }
                })
            }
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

impl Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::Random { min, max } if max > min => write!(f, "random:{min}-{max}"),
            KeyStrategy::Random { min, .. } => write!(f, "random:{min}"),
            KeyStrategy::File { path } => write!(f, "file:{}", path.display()),
            KeyStrategy::WordnetDict { path } => write!(f, "wordnetdict:{}", path.display()),
        }
    }
}

/// Workload parameters, immutable for the duration of one benchmark run.
#[derive(Clone, Debug)]
pub struct Config {
    strategy: KeyStrategy,
    prefix: String,
    requested_keys: usize,
    inserts: usize,
    lookups: usize,
    removes: usize,
    seed: i64, // negative requests a fresh time seed per repetition
    unsuccessful_fraction: f64,
    initial_capacity_fraction: f64,
}

impl Config {
    pub fn strategy(&self) -> &KeyStrategy {
        &self.strategy
    }
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    pub fn requested_keys(&self) -> usize {
        self.requested_keys
    }
    pub fn inserts(&self) -> usize {
        self.inserts
    }
    pub fn lookups(&self) -> usize {
        self.lookups
    }
    pub fn removes(&self) -> usize {
        self.removes
    }
    pub fn seed(&self) -> i64 {
        self.seed
    }
    pub fn unsuccessful_fraction(&self) -> f64 {
        self.unsuccessful_fraction
    }
    pub fn initial_capacity_fraction(&self) -> f64 {
        self.initial_capacity_fraction
    }

    /// Seed for corpus generation. A negative configured seed still produces
    /// a deterministic corpus; only the per-repetition run seeds go to the
    /// wall clock.
    pub fn corpus_seed(&self) -> u64 {
        self.seed as u64
    }

    /// Whether each repetition should draw a fresh time-based run seed.
    pub fn time_seeded_runs(&self) -> bool {
        self.seed < 0
    }

    /// Corpus size: inflates the requested key count so the configured
    /// fraction of uniform probes over the corpus lands on keys the insert
    /// phase never writes.
    pub fn search_space(&self) -> usize {
        (self.requested_keys as f64 / (1.0 - self.unsuccessful_fraction)) as usize
    }

    /// Pre-sizing for timed runs, as a fraction of the insert count.
    pub fn initial_capacity(&self) -> usize {
        (self.inserts as f64 * self.initial_capacity_fraction) as usize
    }
}

#[derive(Clone)]
pub struct Builder {
    c: Config,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            c: Config {
                strategy: KeyStrategy::Random { min: 32, max: 32 },
                prefix: String::new(),
                requested_keys: 1_000_000,
                inserts: 1_000_000,
                lookups: 5_000_000,
                removes: 500_000,
                seed: 1234,
                unsuccessful_fraction: 0.0,
                initial_capacity_fraction: 0.5,
            },
        }
    }

    pub fn new_from(config: &Config) -> Self {
        Self { c: config.clone() }
    }

    #[must_use]
    pub fn strategy(mut self, x: KeyStrategy) -> Self {
        self.c.strategy = x;
        self
    }

    #[must_use]
    pub fn prefix(mut self, x: impl Into<String>) -> Self {
        self.c.prefix = x.into();
        self
    }

    #[must_use]
    pub fn requested_keys(mut self, x: usize) -> Self {
        self.c.requested_keys = x;
        self
    }

    #[must_use]
    pub fn inserts(mut self, x: usize) -> Self {
        self.c.inserts = x;
        self
    }

    #[must_use]
    pub fn lookups(mut self, x: usize) -> Self {
        self.c.lookups = x;
        self
    }

    #[must_use]
    pub fn removes(mut self, x: usize) -> Self {
        self.c.removes = x;
        self
    }

    #[must_use]
    pub fn seed(mut self, x: i64) -> Self {
        self.c.seed = x;
        self
    }

    #[must_use]
    pub fn unsuccessful_fraction(mut self, x: f64) -> Self {
        self.c.unsuccessful_fraction = x;
        self
    }

    #[must_use]
    pub fn initial_capacity_fraction(mut self, x: f64) -> Self {
        self.c.initial_capacity_fraction = x;
        self
    }

    /// Finalize the configuration. Inconsistent settings are normalized, not
    /// rejected: a benchmark invocation should always produce a run.
    pub fn build(mut self) -> Config {
        if let KeyStrategy::Random { min, max } = &mut self.c.strategy
            && *max < *min
        {
            debug!(min = *min, max = *max, "random key length max below min, raising max");
            *max = *min;
        }

        if !(0.0..1.0).contains(&self.c.unsuccessful_fraction) {
            debug!(
                fraction = self.c.unsuccessful_fraction,
                "unsuccessful fraction outside [0, 1), forcing 0"
            );
            self.c.unsuccessful_fraction = 0.0;
        }

        // Fewer inserts than keys means part of the corpus is never written,
        // so no separate absent region can be guaranteed.
        if self.c.inserts < self.c.requested_keys && self.c.unsuccessful_fraction != 0.0 {
            debug!(
                inserts = self.c.inserts,
                keys = self.c.requested_keys,
                "insert count below key count, forcing unsuccessful fraction to 0"
            );
            self.c.unsuccessful_fraction = 0.0;
        }

        self.c
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
