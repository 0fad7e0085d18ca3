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
use mapbench::report::BenchRunner;
use mapbench::report::MapRun;
use mapbench::report::Repetition;
use mapbench::report::percent;

pub fn run(
    config: &Config,
    corpus: &Corpus,
    reference: MapSpec,
    candidate: MapSpec,
    reps: usize,
    collisions: bool,
) -> anyhow::Result<()> {
    let reps = reps.max(1);
    println!("Map Benchmark: {} vs {}", reference.name, candidate.name);
    println!("=========================================");
    println!(
        "Keys: {} ({} in corpus), inserts: {}, lookups: {}, removes: {}",
        corpus.effective_keys(),
        corpus.len(),
        config.inserts(),
        config.lookups(),
        config.removes()
    );
    println!();

    let runner = BenchRunner::new(config, corpus, reference, candidate, reps);
    runner.run(|rep| print_repetition(rep, reps, collisions));
    Ok(())
}

fn print_repetition(rep: &Repetition, reps: usize, collisions: bool) {
    println!("--- repetition {}/{} ({}) ---", rep.index, reps, rep.order);
    print_map_run(&rep.reference, collisions);
    print_map_run(&rep.candidate, collisions);
    if !rep.checksums_agree() {
        println!("  WARNING: checksums disagree, the maps returned different data");
    }
    println!(
        "  Improvement: insert {:+.1}% | lookup {:+.1}% | remove {:+.1}% | grow {:+.1}%",
        rep.improvement.insert,
        rep.improvement.lookup,
        rep.improvement.remove,
        percent(rep.reference.grow_ns, rep.candidate.grow_ns)
    );
    println!();
}

fn print_map_run(run: &MapRun, collisions: bool) {
    let s = &run.stats;
    println!(
        "  {:<8} insert {} | lookup {} | remove {} | grow {}",
        run.name,
        format_nanos(s.insert_ns),
        format_nanos(s.lookup_ns),
        format_nanos(s.remove_ns),
        format_nanos(run.grow_ns)
    );
    println!(
        "  {:<8} hits {}/{} ({:.1}%), removed {}/{}, checksum {:#018x}",
        "",
        s.found_lookups,
        s.lookups_attempted,
        100.0 * s.hit_rate(),
        s.removed,
        s.removes_attempted,
        s.checksum
    );
    if collisions {
        match s.collisions {
            Some(n) => println!("  {:<8} collisions: {n}", ""),
            None => println!("  {:<8} collisions: not tracked", ""),
        }
    }
}

fn format_nanos(nanos_per_op: f64) -> String {
    if nanos_per_op < 1000.0 {
        format!("{:.1} ns/op", nanos_per_op)
    } else if nanos_per_op < 1_000_000.0 {
        format!("{:.2} µs/op", nanos_per_op / 1000.0)
    } else {
        format!("{:.2} ms/op", nanos_per_op / 1_000_000.0)
    }
}
