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

use clap::CommandFactory;
use clap::Parser;
use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use mapbench::Corpus;
use mapbench::config::Builder;
use mapbench::config::KeyStrategy;
use mapbench::maps::HashStrategy;
use mapbench::maps::reference_spec;
use mapbench::validate::ValidateMode;

mod bench;
mod log;
mod validate;

use log::LogArgs;

#[derive(Parser, Debug)]
struct WorkloadArgs {
    /// Key generation strategy: `random:<len>`, `random:<min>-<max>`,
    /// `file:<path>`, or `wordnetdict:<path>`
    #[arg(
        short = 'k',
        long = "key-strategy",
        default_value = "random:32",
        value_parser = parse_strategy
    )]
    key_strategy: KeyStrategy,

    /// Prepended to every key
    #[arg(short = 'p', long = "key-prefix", default_value = "")]
    prefix: String,

    /// Distinct keys the insert phase covers
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    keys: usize,

    /// Insert operations per run
    #[arg(short = 'i', long, default_value_t = 1_000_000)]
    inserts: usize,

    /// Lookup operations per run
    #[arg(short = 'l', long, default_value_t = 5_000_000)]
    lookups: usize,

    /// Remove operations per run
    #[arg(short = 'r', long, default_value_t = 500_000)]
    removes: usize,

    /// Seed for key generation and operation order. Negative draws a fresh
    /// seed from the clock for every repetition.
    #[arg(short = 's', long, default_value_t = 1234, allow_negative_numbers = true)]
    seed: i64,

    /// Fraction of lookups that should miss, in [0, 1)
    #[arg(short = 'f', long = "unsuccessful", default_value_t = 0.0)]
    unsuccessful_fraction: f64,

    /// Initial map capacity as a fraction of the insert count
    #[arg(long = "init", default_value_t = 0.5)]
    initial_capacity_fraction: f64,
}

fn parse_strategy(s: &str) -> Result<KeyStrategy, String> {
    s.parse::<KeyStrategy>().map_err(|e| e.to_string())
}

/// Candidate-map hasher.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum HasherArg {
    Ahash,
    Sip,
}

impl From<HasherArg> for HashStrategy {
    fn from(arg: HasherArg) -> Self {
        match arg {
            HasherArg::Ahash => HashStrategy::Ahash,
            HasherArg::Sip => HashStrategy::Sip,
        }
    }
}

#[derive(Parser)]
#[command(name = "mapbench", version, about = "hash map benchmark and validation harness")]
pub struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(flatten)]
    workload: WorkloadArgs,

    /// Benchmark repetitions, each reported on its own
    #[arg(long = "reps", default_value_t = 1)]
    reps: usize,

    /// Hasher behind the candidate map
    #[arg(long, value_enum, default_value_t = HasherArg::Ahash)]
    hasher: HasherArg,

    /// Extra outputs and modes: `col` prints collision counters, `valid8`
    /// validates instead of benchmarking, `valid8-expkeys` validates with
    /// the expected-keys hint
    #[arg(long = "dump", value_delimiter = ',')]
    dump: Vec<String>,
}

struct Dump {
    collisions: bool,
    validate: Option<ValidateMode>,
}

impl Dump {
    fn from_args(values: &[String]) -> Self {
        let mut dump = Self {
            collisions: false,
            validate: None,
        };
        for value in values {
            match value.as_str() {
                "col" => dump.collisions = true,
                "valid8" => dump.validate = Some(ValidateMode::SizeChecked),
                "valid8-expkeys" => dump.validate = Some(ValidateMode::ExpectedKeys),
                other => warn!(option = other, "ignoring unknown dump option"),
            }
        }
        dump
    }
}

fn main() -> anyhow::Result<()> {
    // Every flag has a default, so a bare invocation would otherwise start a
    // multi-million-operation benchmark by surprise.
    if std::env::args().len() < 2 {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    let cli = Cli::parse();
    cli.log.setup("info")?;

    let w = &cli.workload;
    let config = Builder::new()
        .strategy(w.key_strategy.clone())
        .prefix(w.prefix.clone())
        .requested_keys(w.keys)
        .inserts(w.inserts)
        .lookups(w.lookups)
        .removes(w.removes)
        .seed(w.seed)
        .unsuccessful_fraction(w.unsuccessful_fraction)
        .initial_capacity_fraction(w.initial_capacity_fraction)
        .build();

    let mut rng = StdRng::seed_from_u64(config.corpus_seed());
    let corpus = Corpus::generate(&config, &mut rng);

    let dump = Dump::from_args(&cli.dump);
    let reference = reference_spec();
    let candidate = HashStrategy::from(cli.hasher).candidate_spec();

    if let Some(mode) = dump.validate {
        validate::run(&config, &corpus, reference, candidate, mode)
    } else {
        bench::run(
            &config,
            &corpus,
            reference,
            candidate,
            cli.reps,
            dump.collisions,
        )
    }
}
