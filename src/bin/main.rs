use std::time::Instant;

use bttb_fft::{
    BttbError, BttbSpec, Ordering, Symmetry, Validation, bccb_first_column, bttb,
    embedding_first_column, eigenvalues, product, transposed_product, utils::max_abs_diff,
};
use clap::Parser;
use ndarray::ArrayView1;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{info, warn};
use tracing_forest::{ForestLayer, util::LevelFilter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of blocks Q along each block dimension.
    #[arg(short = 'q', long, default_value = "64")]
    nblocks: usize,

    /// Number of points P along each block dimension.
    #[arg(short = 'p', long, default_value = "64")]
    npoints: usize,

    #[arg(short = 's', long, default_value = "symm-symm")]
    symmetry: Symmetry,

    #[arg(short = 'o', long, default_value = "row")]
    ordering: Ordering,

    #[arg(long, default_value = "0")]
    seed: u64,

    /// Skip input validation on every call.
    #[arg(long)]
    no_check: bool,

    /// Largest order Q·P for which the dense product is computed as a reference.
    #[arg(long, default_value = "4096")]
    dense_limit: usize,
}

fn main() -> Result<(), BttbError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    let validation = Validation::from(!args.no_check);
    let (q, p) = (args.nblocks, args.npoints);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let spec = BttbSpec::random(args.symmetry, q, p, &mut rng);
    let v: Vec<f64> = (0..spec.order()).map(|_| rng.random_range(-1.0..1.0)).collect();

    println!("=========================================");
    println!(
        "BTTB {} with {q}x{q} blocks of {p}x{p} points (order {}), {} ordering",
        args.symmetry,
        spec.order(),
        args.ordering
    );

    let time = Instant::now();
    let handle = bccb_first_column(&spec, validation)?;
    let spectral = eigenvalues(&handle, args.ordering, validation)?;
    let setup_time = time.elapsed();

    let time = Instant::now();
    let w = product(&spectral, &v, validation)?;
    let product_time = time.elapsed();

    println!("Setup time: {} µs", setup_time.as_micros());
    println!("Product time: {} µs", product_time.as_micros());

    if args.symmetry.is_pure() {
        // The first column alone describes pure-symmetry matrices.
        let time = Instant::now();
        let b0 = spec.first_column();
        let compact = embedding_first_column(&b0, q, p, args.symmetry, validation)?;
        let compact_time = time.elapsed();
        if compact != handle {
            warn!("compact embedding disagrees with the table-driven one");
        }
        println!("Compact embedding time: {} µs", compact_time.as_micros());

        let factor = args.symmetry.transposition_factor()?;
        let wt = transposed_product(&spectral, &v, validation)?;
        info!(
            factor,
            norm = wt.iter().map(|x| x * x).sum::<f64>().sqrt(),
            "transposed product"
        );
    }

    if spec.order() <= args.dense_limit {
        let time = Instant::now();
        let expected = bttb(&spec, validation)?.dot(&ArrayView1::from(&v));
        let dense_time = time.elapsed();
        println!("Dense product time: {} µs", dense_time.as_micros());
        println!("Max abs error: {:.3e}", max_abs_diff(&w, &expected));
    } else {
        println!(
            "Skipping dense reference: order {} above --dense-limit {}",
            spec.order(),
            args.dense_limit
        );
    }

    Ok(())
}
