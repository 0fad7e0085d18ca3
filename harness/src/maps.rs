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

use std::collections::HashMap;
use std::hash::BuildHasher;

/// The surface a map must expose to be benchmarked or validated.
///
/// Semantics follow `std::collections::HashMap`: `put` and `remove` return
/// the previous value if the key was present.
pub trait MapUnderTest {
    fn put(&mut self, key: String, value: String) -> Option<String>;
    fn get(&self, key: &str) -> Option<&str>;
    fn remove(&mut self, key: &str) -> Option<String>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Internal collision counter, if the implementation keeps one.
    fn collisions(&self) -> Option<u64> {
        None
    }

    /// Hint that exactly these keys are about to be inserted. Implementations
    /// with unusual sizing strategies may pre-shape themselves here; the
    /// default does nothing.
    fn expect_keys(&mut self, _keys: &[String]) {}
}

/// Named constructor for a map implementation. `build` receives the initial
/// capacity to reserve (0 for implementation defaults).
#[derive(Clone, Copy)]
pub struct MapSpec {
    pub name: &'static str,
    pub build: fn(usize) -> Box<dyn MapUnderTest>,
}

impl MapSpec {
    pub fn create(&self, capacity: usize) -> Box<dyn MapUnderTest> {
        (self.build)(capacity)
    }
}

impl std::fmt::Debug for MapSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSpec").field("name", &self.name).finish()
    }
}

/// The trusted baseline: `HashMap` with the standard SipHash hasher.
pub fn reference_spec() -> MapSpec {
    MapSpec {
        name: "std",
        build: |capacity| Box::new(HashedMap::<std::hash::RandomState>::new(capacity)),
    }
}

/// Hasher behind the candidate map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashStrategy {
    #[default]
    Ahash,
    Sip,
}

impl HashStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            HashStrategy::Ahash => "ahash",
            HashStrategy::Sip => "sip",
        }
    }

    pub fn candidate_spec(&self) -> MapSpec {
        match self {
            HashStrategy::Ahash => MapSpec {
                name: "ahash",
                build: |capacity| Box::new(HashedMap::<ahash::RandomState>::new(capacity)),
            },
            HashStrategy::Sip => MapSpec {
                name: "sip",
                build: |capacity| Box::new(HashedMap::<std::hash::RandomState>::new(capacity)),
            },
        }
    }
}

struct HashedMap<S: BuildHasher> {
    inner: HashMap<String, String, S>,
}

impl<S: BuildHasher + Default> HashedMap<S> {
    fn new(capacity: usize) -> Self {
        Self {
            inner: HashMap::with_capacity_and_hasher(capacity, S::default()),
        }
    }
}

impl<S: BuildHasher> MapUnderTest for HashedMap<S> {
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
        self.inner.len()
    }

    fn expect_keys(&mut self, keys: &[String]) {
        self.inner
            .reserve(keys.len().saturating_sub(self.inner.len()));
    }
}
