//! Matrix multiply throughput harness
//!
//! Multiplies random square matrices of power-of-two sizes with one row FMA strategy
//! and reports the time per product.

use anyhow::{ensure, Context, Result};
use clap::{value_parser, Arg, Command};
use gfkern::config::parse_byte;
use gfkern::{mat_mul, Capabilities, KernelConfig, MatrixShape, NibbleKernel};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = Command::new("gfmatmul")
        .version(env!("CARGO_PKG_VERSION"))
        .about("GF(2^8) matrix multiplication throughput")
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .help("Row FMA strategy: base, external-simd, affine-general, affine-dedicated")
                .value_name("KIND")
                .default_value("base"),
        )
        .arg(
            Arg::new("reduction")
                .long("reduction")
                .help("Reduction byte of the field modulus")
                .value_name("BYTE")
                .value_parser(parse_byte),
        )
        .arg(
            Arg::new("primitive")
                .long("primitive")
                .help("Primitive element for the exp/log tables")
                .value_name("BYTE")
                .value_parser(parse_byte),
        )
        .arg(
            Arg::new("min-size")
                .long("min-size")
                .help("Smallest matrix dimension")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("16"),
        )
        .arg(
            Arg::new("max-size")
                .long("max-size")
                .help("Largest matrix dimension")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("1024"),
        )
        .arg(
            Arg::new("iterations")
                .short('i')
                .long("iterations")
                .help("Products per size; the fastest one is reported")
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .default_value("3"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the random matrix contents")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .default_value("42"),
        )
        .get_matches();

    let config = KernelConfig::from_args(&matches)?;
    let min_size = *matches.get_one::<usize>("min-size").unwrap_or(&16);
    let max_size = *matches.get_one::<usize>("max-size").unwrap_or(&1024);
    let iterations = *matches.get_one::<usize>("iterations").unwrap_or(&3);
    let seed = *matches.get_one::<u64>("seed").unwrap_or(&42);

    ensure!(min_size > 0, "--min-size must be at least 1");
    ensure!(min_size <= max_size, "--min-size exceeds --max-size");
    ensure!(iterations > 0, "--iterations must be at least 1");

    let field = config
        .build_field()
        .context("Failed to build GF(2^8) tables")?;
    let caps = Capabilities::detect();
    let nibble = NibbleKernel::new(&field, caps);
    let fma = config
        .select(&field, caps, &nibble)
        .with_context(|| format!("Cannot use the {} strategy", config.strategy))?;

    info!(
        "Strategy {} over reduction byte {:#04x}, seed {}",
        config.strategy, config.params.reduction, seed
    );
    debug!("Capabilities: {:?}, nibble level {:?}", caps, nibble.level());

    let mut rng = StdRng::seed_from_u64(seed);
    let sizes = std::iter::successors(Some(min_size), |&n| n.checked_mul(2))
        .take_while(|&n| n <= max_size);

    for n in sizes {
        let shape = MatrixShape::square(n);
        let len = shape.result_len()?;
        let mut left = vec![0u8; len];
        let mut right = vec![0u8; len];
        let mut result = vec![0u8; len];
        rng.fill(&mut left[..]);
        rng.fill(&mut right[..]);

        let mut best = f64::INFINITY;
        for _ in 0..iterations {
            let start = Instant::now();
            mat_mul(&left, &right, shape, &fma, &mut result)
                .with_context(|| format!("Matrix multiply failed for n={n}"))?;
            best = best.min(start.elapsed().as_secs_f64());
        }

        // One row update touches `cols` bytes, and there are rows * inner of them
        let bytes = (n as f64).powi(3);
        println!(
            "{}/{}: {:.3} ms, {:.1} MB/s",
            config.strategy.bench_name(),
            n,
            best * 1e3,
            bytes / best / 1e6
        );
    }

    Ok(())
}
