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

pub mod config;
pub mod corpus;
pub mod errors;
pub mod maps;
pub mod report;
pub mod validate;
pub mod workload;
mod util;

pub use config::Config;
pub use corpus::Corpus;
pub use errors::*;

pub type Result<T> = std::result::Result<T, Error>;
