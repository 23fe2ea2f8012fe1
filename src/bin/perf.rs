use arbitrary::{unstructured::Unstructured, Arbitrary};
use log::{info, warn};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use rbset::RbTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "ops", default_value = "1000000")] // default 1M
    ops: usize,

    #[structopt(long = "capacity", default_value = "1024")]
    capacity: usize,

    #[structopt(long = "validate")]
    validate: bool,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Insert(u64),
    Erase(u64),
    Find(u64),
    Min,
    Max,
    ToArray,
}

fn main() {
    let opts = Opt::from_args();

    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u64> = RbTree::new();

    // initial load
    let start = time::Instant::now();
    let mut dups = 0;
    for _i in 0..opts.loads {
        if index.insert(rng.gen::<u64>()).is_err() {
            dups += 1;
        }
    }
    info!(
        "loaded {} items ({} duplicates) in {:?}",
        index.len(),
        dups,
        start.elapsed()
    );

    do_incremental(&mut rng, &opts, &mut index);

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("iter over {} keys, took {:?}", n, start.elapsed());

    if opts.validate {
        match index.validate() {
            Ok(stats) => info!("validate {:?}", stats),
            Err(err) => warn!("validate failed {}", err),
        }
    }

    let start = time::Instant::now();
    index.clear();
    info!("clear, took {:?}", start.elapsed());
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RbTree<u64>) {
    let mut counts = [0_usize; 6];
    let mut buf = vec![0_u64; opts.capacity];

    let start = time::Instant::now();
    for _i in 0..opts.ops {
        let bytes = rng.gen::<[u8; 16]>();
        let mut uns = Unstructured::new(&bytes);
        let op: Op = match uns.arbitrary() {
            Ok(op) => op,
            Err(_) => continue,
        };

        match op {
            Op::Insert(key) => {
                counts[0] += 1;
                index.insert(key).ok();
            }
            Op::Erase(key) => {
                counts[1] += 1;
                // random keys are rarely present, erase near the key instead.
                let next = index.range(key..).next();
                if let Some(handle) = next.and_then(|k| index.find(k)).map(|n| n.handle()) {
                    index.erase(handle).ok();
                }
            }
            Op::Find(key) => {
                counts[2] += 1;
                index.find(&key);
            }
            Op::Min => {
                counts[3] += 1;
                index.min();
            }
            Op::Max => {
                counts[4] += 1;
                index.max();
            }
            Op::ToArray => {
                counts[5] += 1;
                index.to_array(&mut buf);
            }
        }
    }

    info!(
        "incremental for {} operations {:?}, took {:?}",
        opts.ops,
        counts,
        start.elapsed()
    );
}
