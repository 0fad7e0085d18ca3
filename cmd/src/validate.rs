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

use mapbench::Config;
use mapbench::Corpus;
use mapbench::maps::MapSpec;
use mapbench::validate::DifferentialValidator;
use mapbench::validate::ValidateMode;

pub fn run(
    config: &Config,
    corpus: &Corpus,
    reference: MapSpec,
    candidate: MapSpec,
    mode: ValidateMode,
) -> anyhow::Result<()> {
    println!("Map Validation: {} vs {}", reference.name, candidate.name);
    println!("=========================================");
    println!(
        "Mode: {}",
        match mode {
            ValidateMode::SizeChecked => "size-checked",
            ValidateMode::ExpectedKeys => "expected-keys",
        }
    );
    println!();

    let validator = DifferentialValidator::new(config, corpus);
    let mut reference_map = reference.create(0);
    let mut candidate_map = candidate.create(0);
    let report = validator.run(reference_map.as_mut(), candidate_map.as_mut(), mode);

    if report.is_validated() {
        println!("maps validated");
    } else {
        println!(
            "maps NOT validated: {} mismatches (size {}, lookup {}, remove {})",
            report.mismatches(),
            report.size_mismatches,
            report.lookup_mismatches,
            report.remove_mismatches
        );
    }
    // Success exit either way: automation reads the verdict line, not the
    // exit code.
    Ok(())
}
