mod cli;
mod display;


use crate::cli::CLI;
use crate::display::DisplayList;
use anyhow::anyhow;
use clap::Parser;
use tracing::info;


fn main() -> anyhow::Result<()> {
    let args = CLI::parse();

    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV)
            .unwrap_or("info".to_string()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mask = args.build_mask()?;
    let factor = args.factor;

    info!(
        mask = %args.mask,
        data_len = args.data.len(),
        factor,
        "running mask demo"
    );

    let mul = move |x: &i32| {
        x.checked_mul(factor).ok_or_else(|| anyhow!("{} * {} overflows i32", x, factor))
    };

    println!("Mask size: {}", mask.size());
    println!("Mask: {}", DisplayList(mask.iter()));

    let mut sliced = args.data.clone();
    mask.slice(&mut sliced);
    println!("slice:\n{}", DisplayList(sliced.iter()));

    let transformed = mask.try_transform(&args.data, mul)?;
    println!("transform:\n{}", DisplayList(transformed.iter()));

    let sliced_transformed = mask.try_slice_and_transform(&args.data, mul)?;
    println!("slice_and_transform:\n{}", DisplayList(sliced_transformed.iter()));

    Ok(())
}
