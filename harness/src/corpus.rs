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

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use rand::RngCore;
use rand::distr::Distribution;
use rand::distr::Uniform;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::config::KeyStrategy;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Key corpus for one run: every key the workload may touch, in fixed order.
///
/// The leading `effective_keys` entries are the keys the insert phase
/// guarantees to write; any tail beyond that exists only to give lookups a
/// supply of keys that are never inserted.
#[derive(Clone, Debug)]
pub struct Corpus {
    keys: Vec<String>,
    effective_keys: usize,
    run_seed: u64,
}

impl Corpus {
    /// Generate the corpus, then derive the operation-phase seed from the
    /// generator's resulting state. Corpus content and operation order stay
    /// decorrelated while both replay from the one top-level seed.
    pub fn generate(config: &Config, rng: &mut StdRng) -> Self {
        let start = Instant::now();
        let search_space = config.search_space();
        let keys = match config.strategy() {
            KeyStrategy::Random { min, max } => {
                random_keys(config.prefix(), *min, *max, search_space, rng)
            }
            KeyStrategy::File { path } => file_keys(config.prefix(), path, search_space, false),
            KeyStrategy::WordnetDict { path } => {
                file_keys(config.prefix(), path, search_space, true)
            }
        };

        let effective_keys = if keys.len() < search_space {
            debug!(
                requested = config.requested_keys(),
                actual = keys.len(),
                "key source exhausted, adjusting requested key count"
            );
            keys.len()
        } else {
            config.requested_keys()
        };

        let total_len: usize = keys.iter().map(String::len).sum();
        let avg_len = if keys.is_empty() {
            0.0
        } else {
            total_len as f64 / keys.len() as f64
        };
        info!(
            keys = keys.len(),
            extra = keys.len().saturating_sub(effective_keys),
            avg_len,
            elapsed = ?start.elapsed(),
            "generated key corpus"
        );

        let run_seed = rng.next_u64();
        Self {
            keys,
            effective_keys,
            run_seed,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Count of leading corpus entries the insert phase covers.
    pub fn effective_keys(&self) -> usize {
        self.effective_keys
    }

    /// Seed for the operation-sequence generator.
    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }
}

fn random_keys(
    prefix: &str,
    min: usize,
    max: usize,
    count: usize,
    rng: &mut StdRng,
) -> Vec<String> {
    let mut keys = Vec::with_capacity(count);
    if count == 0 {
        return keys;
    }
    // Both ranges are nonempty: the builder normalizes min <= max, and the
    // alphabet is a fixed constant.
    let lengths = Uniform::new_inclusive(min, max).unwrap();
    let chars = Uniform::new(0, ALPHABET.len()).unwrap();
    for _ in 0..count {
        let len = lengths.sample(rng);
        let mut key = String::with_capacity(prefix.len() + len);
        key.push_str(prefix);
        for _ in 0..len {
            key.push(ALPHABET[chars.sample(rng)] as char);
        }
        keys.push(key);
    }
    keys
}

fn file_keys(prefix: &str, path: &Path, limit: usize, letters_only: bool) -> Vec<String> {
    let mut keys = Vec::new();
    if limit == 0 {
        return keys;
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open key source");
            return keys;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "read failed, keeping keys read so far");
                break;
            }
        };
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        if letters_only && !token.chars().next().is_some_and(char::is_alphabetic) {
            continue;
        }
        let mut key = String::with_capacity(prefix.len() + token.len());
        key.push_str(prefix);
        key.push_str(token);
        keys.push(key);
        if keys.len() >= limit {
            break;
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use rand::SeedableRng;
    use std::io::Write;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_random_exact_length() {
        let config = Builder::new()
            .strategy(KeyStrategy::Random { min: 5, max: 5 })
            .requested_keys(1_000)
            .inserts(1_000)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert_eq!(1_000, corpus.len());
        assert_eq!(1_000, corpus.effective_keys());
        assert!(corpus.keys().iter().all(|k| k.len() == 5));
    }

    #[test]
    fn test_random_length_range_inclusive() {
        let config = Builder::new()
            .strategy(KeyStrategy::Random { min: 3, max: 6 })
            .requested_keys(2_000)
            .inserts(2_000)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert!(corpus.keys().iter().all(|k| (3..=6).contains(&k.len())));
        // Both endpoints should appear over 2000 draws from 4 lengths.
        assert!(corpus.keys().iter().any(|k| k.len() == 3));
        assert!(corpus.keys().iter().any(|k| k.len() == 6));
    }

    #[test]
    fn test_prefix_and_alphabet() {
        let config = Builder::new()
            .strategy(KeyStrategy::Random { min: 8, max: 8 })
            .prefix("bench/")
            .requested_keys(100)
            .inserts(100)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(7));
        for key in corpus.keys() {
            let tail = key.strip_prefix("bench/").expect("prefix applied");
            assert_eq!(8, tail.len());
            assert!(tail.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_search_space_inflation() {
        let config = Builder::new()
            .strategy(KeyStrategy::Random { min: 4, max: 4 })
            .requested_keys(1_000)
            .inserts(1_000)
            .unsuccessful_fraction(0.5)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert_eq!(2_000, corpus.len());
        assert_eq!(1_000, corpus.effective_keys());
    }

    #[test]
    fn test_deterministic_given_seed() {
        let config = Builder::new()
            .strategy(KeyStrategy::Random { min: 2, max: 12 })
            .requested_keys(500)
            .inserts(500)
            .build();
        let a = Corpus::generate(&config, &mut rng(1234));
        let b = Corpus::generate(&config, &mut rng(1234));
        assert_eq!(a.keys(), b.keys());
        assert_eq!(a.run_seed(), b.run_seed());

        let c = Corpus::generate(&config, &mut rng(4321));
        assert_ne!(a.keys(), c.keys());
    }

    fn write_lines(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_file_exhaustion_adjusts_key_count() {
        let lines: Vec<String> = (0..3_000).map(|i| format!("word{i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let f = write_lines(&refs);

        let config = Builder::new()
            .strategy(KeyStrategy::File {
                path: f.path().to_path_buf(),
            })
            .requested_keys(10_000)
            .inserts(10_000)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert_eq!(3_000, corpus.len());
        assert_eq!(3_000, corpus.effective_keys());
    }

    #[test]
    fn test_file_stops_at_search_space() {
        let f = write_lines(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let config = Builder::new()
            .strategy(KeyStrategy::File {
                path: f.path().to_path_buf(),
            })
            .requested_keys(4)
            .inserts(4)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert_eq!(vec!["a", "b", "c", "d"], corpus.keys());
        assert_eq!(4, corpus.effective_keys());
    }

    #[test]
    fn test_file_takes_first_token_and_skips_blanks() {
        let f = write_lines(&["alpha 12 xx", "", "   ", "\tbeta\tgamma", "delta"]);
        let config = Builder::new()
            .strategy(KeyStrategy::File {
                path: f.path().to_path_buf(),
            })
            .prefix("k:")
            .requested_keys(100)
            .inserts(100)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert_eq!(vec!["k:alpha", "k:beta", "k:delta"], corpus.keys());
    }

    #[test]
    fn test_wordnetdict_filters_non_letters() {
        let f = write_lines(&["apple 1", "42nd street", "Banana", "_under", "éclair 9"]);
        let config = Builder::new()
            .strategy(KeyStrategy::WordnetDict {
                path: f.path().to_path_buf(),
            })
            .requested_keys(100)
            .inserts(100)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert_eq!(vec!["apple", "Banana", "éclair"], corpus.keys());
        assert_eq!(3, corpus.effective_keys());
    }

    #[test_log::test]
    fn test_read_failure_keeps_partial_corpus() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"alpha 1\nbeta 2\n\xff\xfe broken\ngamma 3\n").unwrap();
        f.flush().unwrap();

        let config = Builder::new()
            .strategy(KeyStrategy::File {
                path: f.path().to_path_buf(),
            })
            .requested_keys(100)
            .inserts(100)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        // The unreadable line ends the read; everything before it survives.
        assert_eq!(vec!["alpha", "beta"], corpus.keys());
        assert_eq!(2, corpus.effective_keys());
    }

    #[test_log::test]
    fn test_missing_file_degrades_to_empty_corpus() {
        let config = Builder::new()
            .strategy(KeyStrategy::File {
                path: "/nonexistent/definitely/missing.txt".into(),
            })
            .requested_keys(100)
            .inserts(100)
            .build();
        let corpus = Corpus::generate(&config, &mut rng(42));
        assert!(corpus.is_empty());
        assert_eq!(0, corpus.effective_keys());
    }
}
