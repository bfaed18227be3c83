use orbitsim::{bench_drift_curve, bench_step};
use orbitsim::{AsciiRenderer, ConsoleReporter, NullReporter, Reporter};
use orbitsim::{Scenario, ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Render {
    Console, // text log of every body per step
    Ascii,   // redraw a terminal grid
    Quiet,   // just run, summary only
}

#[derive(Parser, Debug)]
#[command(about = "Integrate planets around a fixed central mass")]
struct Args {
    /// Scenario YAML; bare names are looked up in `scenarios/`
    #[arg(short, long, default_value = "solar_system.yaml")]
    file_name: String,

    /// Override the configured number of steps
    #[arg(long)]
    steps: Option<usize>,

    #[arg(long, value_enum, default_value_t = Render::Console)]
    render: Render,

    /// Report every N-th step
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Run the benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let path = scenario_path(&args.file_name);
    let mut cfg = ScenarioConfig::from_yaml_file(&path)
        .with_context(|| format!("loading scenario {}", path.display()))?;

    if let Some(steps) = args.steps {
        cfg.parameters.steps = steps;
    }

    Scenario::build_scenario(cfg).with_context(|| format!("invalid scenario {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_step()?;
        bench_drift_curve()?;
        return Ok(());
    }

    let scenario = load_scenario(&args)?;

    let mut reporter: Box<dyn Reporter> = match args.render {
        Render::Console => Box::new(ConsoleReporter::stdout(args.every)),
        Render::Ascii => Box::new(AsciiRenderer::from_display(&scenario.display, scenario.extent(), args.every)),
        Render::Quiet => Box::new(NullReporter),
    };

    if let Some(central) = scenario.system.central() {
        println!("{central}");
    }
    for line in scenario.system.show_bodies() {
        println!("{line}");
    }

    let mut sim = Simulation::from_scenario(scenario)?;
    let summary = sim.run(reporter.as_mut())?;

    info!("finished {} steps, t = {}", summary.steps, summary.t);
    for d in &summary.bodies {
        println!(
            "{}: r {:.6} -> {:.6} (drift {:.3e})",
            d.initial.name,
            d.initial.radius,
            d.last.radius,
            d.radius_drift()
        );
    }

    Ok(())
}
