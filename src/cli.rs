use std::env;
use std::path::PathBuf;

use crate::sim::series::TimeScale;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub days: Option<usize>,
    pub scale: Option<TimeScale>,
    pub export_dir: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    parse_args_from(env::args().skip(1).collect())
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut opts = parse_options(&args)?;

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.scenario.is_none() && opts.preset.is_none() {
        opts.preset = Some("default".to_string());
    }

    Ok(opts)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--days" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --days (expected a day count)")?;
                let days = raw
                    .parse::<usize>()
                    .map_err(|_| {
                        format!("--days value \"{raw}\" is not a non-negative integer")
                    })?;
                opts.days = Some(days);
            }
            "--scale" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --scale (expected day, month or year)",
                )?;
                opts.scale = Some(raw.parse()?);
            }
            "--export" => {
                i += 1;
                let dir = args.next_or_err(i, "missing value for --export (expected a directory)")?;
                if opts.export_dir.replace(PathBuf::from(dir)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "--json" => opts.json = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(port);
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("ev-demand-sim: stochastic EV charging demand simulator");
    eprintln!();
    eprintln!("Usage: ev-demand-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!("  --preset <name>     Use a built-in preset (default, quiet_street, busy_depot)");
    eprintln!("  --seed <u64>        Override random seed");
    eprintln!("  --days <n>          Override number of days to simulate");
    eprintln!("  --scale <scale>     Series to print: day (hourly), month (daily), year (monthly)");
    eprintln!("  --export <dir>      Write hourly/daily/monthly/heatmap CSV files");
    eprintln!("  --json              Print the full result as JSON instead of a report");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve             Start REST API server after simulation");
        eprintln!("  --port <u16>        API server port (default: 3000)");
    }
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the default preset is used.");
}
