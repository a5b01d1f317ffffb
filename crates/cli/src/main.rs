use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use verso_app::{RunOptions, RunReport};
use verso_kernel::scenario::Group;
use verso_kernel::Settings;

/// Scenario runner for the bookstore demo API.
#[derive(Parser, Debug)]
#[command(name = "verso", version, about)]
struct Cli {
    /// Run only scenarios in this group (smoke, regression, security, integration)
    #[arg(long, value_name = "GROUP")]
    group: Option<String>,

    /// Number of scenarios allowed in flight at once
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Fixture seed, for reproducible payloads
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the configured target base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Write a JSON report into the report directory
    #[arg(long)]
    report: bool,

    /// Delete previous reports before running
    #[arg(long)]
    clean: bool,
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(match try_run(cli) {
        Ok(report) if report.summary.success() => 0,
        Ok(_) => 1,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    });
}

fn try_run(cli: Cli) -> anyhow::Result<RunReport> {
    let settings = Settings::load().with_context(|| "failed to load VERSO settings")?;
    verso_telemetry::init(settings.telemetry.log_format);

    tracing::info!(base_url = %settings.api.base_url, "verso cli starting");

    let group = cli
        .group
        .as_deref()
        .map(Group::from_str)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let report_dir = settings.report.dir.clone();
    if cli.clean {
        verso_app::report::clean(Path::new(&report_dir))?;
    }

    let report = verso_app::run(
        settings,
        RunOptions {
            group,
            threads: cli.threads,
            seed: cli.seed,
            base_url: cli.base_url,
        },
    )?;

    print!("{}", report.render_text());
    if cli.report {
        let path = report.write_json(Path::new(&report_dir))?;
        println!("report: {}", path.display());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_flag_surface() {
        let cli = Cli::try_parse_from([
            "verso",
            "--group",
            "smoke",
            "--threads",
            "5",
            "--seed",
            "42",
            "--base-url",
            "http://localhost:9999",
            "--report",
            "--clean",
        ])
        .unwrap();

        assert_eq!(cli.group.as_deref(), Some("smoke"));
        assert_eq!(cli.threads, Some(5));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9999"));
        assert!(cli.report);
        assert!(cli.clean);
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let cli = Cli::try_parse_from(["verso"]).unwrap();
        assert!(cli.group.is_none());
        assert!(cli.threads.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.report);
        assert!(!cli.clean);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["verso", "--retry"]).is_err());
    }

    #[test]
    fn group_values_parse_through_the_kernel_type() {
        for raw in ["smoke", "regression", "security", "integration"] {
            assert!(Group::from_str(raw).is_ok());
        }
        assert!(Group::from_str("nightly").is_err());
    }
}
