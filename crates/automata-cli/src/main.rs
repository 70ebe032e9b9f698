use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reward_automata_core::config::AutomataConfig;
use reward_automata_core::field::Field;
use reward_automata_core::generator::FieldGenerator;
use reward_automata_core::metrics::RunSummary;
use reward_automata_core::reward::RewardPlan;
use reward_automata_core::rng::derive_generator_rng;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const WARMUP_FRAMES: usize = 3;
const BENCHMARK_FRAMES: usize = 20;
const BENCHMARK_SEED: u64 = 42;
const BENCHMARK_GRID_SIZES: [usize; 4] = [32, 64, 128, 256];

#[derive(Parser)]
#[command(name = "reward-automata")]
#[command(about = "Headless driver for the reward animation field generator")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate frames from a config file
    Run {
        /// Path to config file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of frames to generate
        #[arg(long, default_value_t = 100)]
        frames: usize,

        /// Record frame statistics every N frames
        #[arg(long, default_value_t = 10)]
        sample_every: usize,
    },
    /// Play the reward animation for a finished level without a display
    Reward {
        /// Level that was just completed
        #[arg(long)]
        level: u32,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Measure frame throughput for several grid sizes
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: &Path) -> Result<AutomataConfig> {
    let file = File::open(path).context("failed to open config file")?;
    let reader = BufReader::new(file);
    let config: AutomataConfig =
        serde_json::from_reader(reader).context("failed to parse config")?;
    config.validate().context("Config validation error")?;
    Ok(config)
}

fn write_outputs(out_dir: &Path, summary: &RunSummary, final_frame: &Field) -> Result<()> {
    std::fs::create_dir_all(out_dir).context("failed to create output directory")?;
    let summary_file =
        File::create(out_dir.join("summary.json")).context("failed to create summary file")?;
    serde_json::to_writer_pretty(summary_file, summary).context("failed to write summary")?;
    let frame_file = File::create(out_dir.join("final_frame.json"))
        .context("failed to create final frame file")?;
    serde_json::to_writer(frame_file, &final_frame.to_rows())
        .context("failed to write final frame")?;
    Ok(())
}

fn report(summary: &RunSummary, out: Option<&Path>, generator: &FieldGenerator) -> Result<()> {
    if let Some(out_dir) = out {
        write_outputs(out_dir, summary, generator.field())?;
        println!("Run complete. Results saved to {:?}", out_dir);
    } else {
        println!(
            "Run complete. {} frames, peak amplitude {:.4}",
            summary.frames,
            summary.peak_amplitude()
        );
    }
    Ok(())
}

fn run_benchmark(grid_size: usize, index: usize) -> Result<f64> {
    let mut generator = FieldGenerator::new(
        grid_size,
        0.5,
        derive_generator_rng(BENCHMARK_SEED, index),
    )
    .context("Benchmark generator initialization error")?;

    for _ in 0..WARMUP_FRAMES {
        generator.generate_frame();
    }

    let start = Instant::now();
    for _ in 0..BENCHMARK_FRAMES {
        generator.generate_frame();
    }
    let elapsed = start.elapsed().as_secs_f64();
    let frames_per_sec = frames_per_second(BENCHMARK_FRAMES, elapsed);

    println!("--- {grid_size}x{grid_size} grid ---");
    println!(
        "  Avg frame:     {:.2} ms ({frames_per_sec:.1} frames/sec)",
        1000.0 * elapsed / BENCHMARK_FRAMES as f64
    );
    Ok(frames_per_sec)
}

fn frames_per_second(frames: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        frames as f64 / elapsed_secs
    } else {
        f64::INFINITY
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = AutomataConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p reward-automata-cli --release -- benchmark");
                eprintln!();
            }
            println!("=== Field Generator Benchmark ===");
            println!("Warmup: {WARMUP_FRAMES} frames, Benchmark: {BENCHMARK_FRAMES} frames");
            println!();
            for (index, grid_size) in BENCHMARK_GRID_SIZES.into_iter().enumerate() {
                run_benchmark(grid_size, index)?;
            }
        }
        Commands::Run {
            config,
            out,
            frames,
            sample_every,
        } => {
            let automata_config = load_config(&config)?;
            info!(path = ?config, "loaded config");
            debug!(?automata_config, "resolved config");
            println!("Generating {} frames...", frames);

            let mut generator = FieldGenerator::from_config(&automata_config)
                .context("Generator initialization error")?;
            let summary = generator.run(frames, sample_every);
            report(&summary, out.as_deref(), &generator)?;
        }
        Commands::Reward { level, out } => {
            let plan = RewardPlan::for_level(level).context("Reward plan error")?;
            info!(
                level = plan.level,
                beauty_factor = plan.beauty_factor,
                frames = plan.frame_count,
                "playing reward animation"
            );
            let mut generator = plan
                .generator()
                .context("Generator initialization error")?;
            let summary = generator.run(plan.frame_count, plan.frame_count);
            report(&summary, out.as_deref(), &generator)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from(["reward-automata", "run", "--config", "cfg.json"])
            .expect("run should parse");
        match cli.command {
            Commands::Run {
                frames,
                sample_every,
                out,
                ..
            } => {
                assert_eq!(frames, 100);
                assert_eq!(sample_every, 10);
                assert!(out.is_none());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn frames_per_second_handles_zero_elapsed() {
        assert_eq!(frames_per_second(10, 2.0), 5.0);
        assert!(frames_per_second(10, 0.0).is_infinite());
    }

    #[test]
    fn load_config_rejects_invalid_grid() {
        let path = std::env::temp_dir().join("reward_automata_zero_grid.json");
        std::fs::write(&path, r#"{"grid_size": 0}"#).expect("write temp config");
        let err = load_config(&path).expect_err("zero grid must fail validation");
        assert!(format!("{err:#}").contains("grid_size must be greater than 0"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn outputs_are_written_as_json() {
        let out_dir = std::env::temp_dir().join("reward_automata_outputs_test");
        let mut generator = FieldGenerator::new(6, 0.5, derive_generator_rng(1, 0))
            .expect("generator");
        let summary = generator.run(3, 1);
        write_outputs(&out_dir, &summary, generator.field()).expect("outputs written");

        let summary_json = std::fs::read_to_string(out_dir.join("summary.json")).expect("summary");
        let parsed: RunSummary = serde_json::from_str(&summary_json).expect("summary parses");
        assert_eq!(parsed.samples.len(), 3);

        let frame_json =
            std::fs::read_to_string(out_dir.join("final_frame.json")).expect("final frame");
        let rows: Vec<Vec<f64>> = serde_json::from_str(&frame_json).expect("frame parses");
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.len() == 6));
        let _ = std::fs::remove_dir_all(&out_dir);
    }
}
