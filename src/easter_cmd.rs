use anyhow::{Context, Result};
use computus::{gauss_easter, EasterResult};

use crate::cli::EasterArgs;
use crate::config::Config;
use crate::dataset;

/// Show both dates of Easter for a single year.
pub fn run(args: EasterArgs, config: &Config) -> Result<()> {
    let path = args.dataset.as_deref().or(config.dataset.path.as_deref());
    let comparison = dataset::comparison(path)?;
    let year = args.year;

    let astronomical = comparison
        .astronomical(year)
        .with_context(|| format!("cannot compute astronomical Easter for {year}"))?;
    let ecclesiastical = gauss_easter(year);
    let result = EasterResult::new(year, astronomical.sunday, ecclesiastical);

    println!("March equinox:         {}", astronomical.equinox);
    println!("Paschal full moon:     {}", astronomical.full_moon);
    println!("Astronomical Easter:   {}", result.astronomical);
    println!("Ecclesiastical Easter: {}", result.ecclesiastical);
    match result.divergence() {
        Some(divergence) => println!("Easter is {divergence}."),
        None => println!("Both methods agree."),
    }
    Ok(())
}
