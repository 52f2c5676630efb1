//! EV demand simulator entry point: CLI wiring and config-driven engine run.

use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_demand_sim::cli::{self, CliOptions};
use ev_demand_sim::config::ScenarioConfig;
use ev_demand_sim::io::export::export_dir;
use ev_demand_sim::sim::engine::Engine;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ev_demand_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    // --scenario takes priority; the parser fills in the default preset otherwise
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("default"))
    };

    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(scale) = cli.scale {
        scenario.simulation.time_scale = scale;
    }
    if let Some(days) = cli.days {
        scenario.simulation.days = Some(days);
    }

    scenario
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if cli.help {
        cli::print_usage();
        return;
    }

    init_tracing();

    let scenario = load_scenario(&cli);
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let params = scenario.to_parameters();
    let seed = scenario.simulation.seed;
    info!(
        charge_points = params.charge_point_count,
        arrival_pct = params.arrival_probability_multiplier,
        power_kw = params.charging_power_per_point_kw,
        days = params.days_to_simulate,
        seed,
        "Starting simulation"
    );

    let result = Engine::seeded(&params, seed).run().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        let scale = scenario.simulation.time_scale;
        println!("--- {scale} view ---");
        for point in result.series(scale) {
            println!("{point}");
        }
        println!("\n{}", result.summary);
    }

    if let Some(ref dir) = cli.export_dir {
        if let Err(e) = export_dir(&result, dir) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(dir = %dir.display(), "CSV series written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(ev_demand_sim::api::AppState {
            parameters: params,
            seed,
            result,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(3000)));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(ev_demand_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
