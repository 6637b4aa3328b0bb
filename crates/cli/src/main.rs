use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

use campus_core::{
    config::{self, AppConfig},
    Registry, Roster,
};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config)?;

    let roster = match &config.roster_path {
        Some(path) => Roster::load(path)?,
        None => {
            tracing::info!("No roster configured, using demo roster");
            Roster::demo()
        }
    };

    let mut registry = Registry::new();
    roster.seed(&mut registry).context("failed to seed registry")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_dashboards(&registry, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write every account's dashboard, separated by blank lines.
fn print_dashboards(registry: &Registry, out: &mut impl Write) -> Result<()> {
    for (index, account) in registry.accounts().into_iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        registry.view_dashboard(account, out)?;
    }
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let log_dir = &config.log_dir;
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("campus.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(registry: &Registry) -> Result<String> {
        let mut out = Vec::new();
        print_dashboards(registry, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn demo_roster_prints_all_dashboards_in_kind_order() -> Result<()> {
        let mut registry = Registry::new();
        Roster::demo().seed(&mut registry)?;

        assert_eq!(
            printed(&registry)?,
            "Viewing generic user dashboard.\n\n\
             Instructor Dashboard for Dr. Lee:\n - Algorithms\n\n\
             Student Dashboard for Amy:\n - Algorithms\n"
        );
        Ok(())
    }

    #[test]
    fn empty_registry_prints_nothing() -> Result<()> {
        assert_eq!(printed(&Registry::new())?, "");
        Ok(())
    }

    #[test]
    fn single_account_has_no_separator() -> Result<()> {
        let mut registry = Registry::new();
        registry.register_instructor("Dr. Lee", "lee@uni.edu", "E-100");

        assert_eq!(printed(&registry)?, "Instructor Dashboard for Dr. Lee:\n");
        Ok(())
    }
}
