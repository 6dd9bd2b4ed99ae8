use std::path::Path;

use anyhow::{Context, Result};
use computus::ephemeris::{Ephemeris, MeanElements, TabulatedEphemeris};
use computus::Comparison;

pub type DynEphemeris = Box<dyn Ephemeris + Send + Sync>;

/// The table at `path` if one is given, otherwise the built-in analytic model.
pub fn open(path: Option<&Path>) -> Result<DynEphemeris> {
    match path {
        Some(path) => {
            let table = TabulatedEphemeris::load(path)
                .with_context(|| format!("failed to load ephemeris: {}", path.display()))?;
            Ok(Box::new(table))
        }
        None => {
            log::info!("no ephemeris table given, using the analytic model");
            Ok(Box::new(MeanElements::new()))
        }
    }
}

pub fn comparison(path: Option<&Path>) -> Result<Comparison<DynEphemeris>> {
    let ephemeris = open(path)?;
    Comparison::new(ephemeris).context("ephemeris cannot be used for Easter")
}
