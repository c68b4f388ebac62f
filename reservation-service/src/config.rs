use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shared::Table;

pub const DEFAULT_SEED_TABLES: &str = "1:4,2:4,3:6,4:6,5:8";

#[derive(Debug, Parser)]
#[command(name = "reservation-service")]
pub struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Directory holding the browser front end.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Tables created at startup, as comma-separated `id:seats` pairs.
    #[arg(long, env = "SEED_TABLES", default_value = DEFAULT_SEED_TABLES)]
    pub tables: String,
}

impl Args {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn seed_tables(&self) -> Result<Vec<Table>> {
        parse_seed_tables(&self.tables)
    }
}

/// Parses `1:4,2:4,3:6` into available tables, keeping the given order.
pub fn parse_seed_tables(raw: &str) -> Result<Vec<Table>> {
    let mut tables = Vec::new();
    let mut seen = HashSet::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (id, seats) = entry
            .split_once(':')
            .with_context(|| format!("Seed table `{entry}` is not of the form id:seats"))?;

        let id: u32 = id
            .trim()
            .parse()
            .with_context(|| format!("Invalid table id in `{entry}`"))?;
        let seats: u32 = seats
            .trim()
            .parse()
            .with_context(|| format!("Invalid seat count in `{entry}`"))?;

        if id == 0 || seats == 0 {
            bail!("Seed table `{entry}` must have a positive id and seat count");
        }
        if !seen.insert(id) {
            bail!("Table {id} is listed more than once");
        }

        tables.push(Table {
            id,
            seats,
            available: true,
        });
    }

    if tables.is_empty() {
        bail!("At least one seed table is required");
    }

    Ok(tables)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
