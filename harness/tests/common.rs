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

use std::cell::RefCell;
use std::collections::HashMap;

use mapbench::Config;
use mapbench::config::Builder;
use mapbench::config::KeyStrategy;
use mapbench::maps::MapUnderTest;

#[allow(dead_code)]
pub fn small_config() -> Config {
    Builder::new()
        .strategy(KeyStrategy::Random { min: 8, max: 8 })
        .requested_keys(300)
        .inserts(400)
        .lookups(800)
        .removes(150)
        .build()
}

/// One observed map operation, key only.
#[allow(dead_code)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Put(String),
    Get(String),
    Remove(String),
}

/// Correct map that logs every operation it sees, so two runs can be
/// compared operation by operation.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingMap {
    inner: HashMap<String, String>,
    // get() only has &self, so the log sits behind a RefCell.
    ops: RefCell<Vec<Op>>,
}

impl RecordingMap {
    #[allow(dead_code)]
    pub fn take_ops(&mut self) -> Vec<Op> {
        self.ops.get_mut().drain(..).collect()
    }
}

impl MapUnderTest for RecordingMap {
    fn put(&mut self, key: String, value: String) -> Option<String> {
        self.ops.get_mut().push(Op::Put(key.clone()));
        self.inner.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.ops.borrow_mut().push(Op::Get(key.to_string()));
        self.inner.get(key).map(String::as_str)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.ops.get_mut().push(Op::Remove(key.to_string()));
        self.inner.remove(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Deliberately broken map: silently drops every `period`-th new insert.
/// Produces size, lookup, and remove divergences against a correct map.
#[allow(dead_code)]
pub struct LossyMap {
    inner: HashMap<String, String>,
    period: usize,
    puts: usize,
}

impl LossyMap {
    #[allow(dead_code)]
    pub fn new(period: usize) -> Self {
        assert!(period > 0);
        Self {
            inner: HashMap::new(),
            period,
            puts: 0,
        }
    }
}

impl MapUnderTest for LossyMap {
    fn put(&mut self, key: String, value: String) -> Option<String> {
        self.puts += 1;
        if self.puts % self.period == 0 && !self.inner.contains_key(&key) {
            return None;
        }
        self.inner.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.inner.remove(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Correct content, unusual accounting: reports its size rounded up to the
/// next power of two unless it was told the expected keys beforehand.
/// Models maps whose sizing strategy only settles once the key set is known.
#[allow(dead_code)]
#[derive(Default)]
pub struct BucketCountMap {
    inner: HashMap<String, String>,
    exact_len: bool,
}

impl MapUnderTest for BucketCountMap {
    fn put(&mut self, key: String, value: String) -> Option<String> {
        self.inner.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.inner.remove(key)
    }

    fn len(&self) -> usize {
        if self.exact_len {
            self.inner.len()
        } else {
            self.inner.len().next_power_of_two()
        }
    }

    fn expect_keys(&mut self, keys: &[String]) {
        self.inner.reserve(keys.len());
        self.exact_len = true;
    }
}
