use anyhow::{Context, Result};
use computus::ephemeris::{Ephemeris, MeanElements, TabulatedEphemeris};
use computus::{Date, Duration, Instant};

use crate::cli::GenerateArgs;

/// Sample the analytic model into an ephemeris table.
pub fn run(args: GenerateArgs) -> Result<()> {
    if args.step_hours == 0 {
        anyhow::bail!("--step-hours must be at least 1");
    }
    let model = MeanElements::new();
    let (mut start, mut end) = model.coverage();
    // One spare year either side, so the table supports exactly from..=to.
    if let Some(from) = args.from {
        start = Instant::from_date(Date::new(from - 1, 1, 1)?);
    }
    if let Some(to) = args.to {
        end = Instant::from_date(Date::new(to + 1, 12, 31)?);
    }
    if start >= end {
        anyhow::bail!("table would end before it starts");
    }

    let step = Duration::hours(args.step_hours as i64);
    let table = TabulatedEphemeris::sample(&model, start, end, step)?;
    table
        .save(&args.output)
        .with_context(|| format!("failed to write ephemeris: {}", args.output.display()))?;
    println!(
        "Wrote {} samples from {} to {} to {}",
        table.samples().len(),
        start,
        end,
        args.output.display()
    );
    Ok(())
}
