//! Headless planet generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p orbis-app -- --preset default` to regenerate a saved planet,
//! or `cargo run -p orbis-app -- --random-offset --save-preset mine` to roll a new one.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use orbis_app::{PipelineError, PlanetPipeline};
use orbis_config::{CliArgs, Config, PlanetSettings, PresetStore};
use orbis_planet::RecordingSink;
use rand::Rng;
use tracing::{error, info, warn};

/// Noise offsets rolled by `--random-offset` fall in `0..RANDOM_OFFSET_RANGE`.
const RANDOM_OFFSET_RANGE: u32 = 100_000;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("orbis"))
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orbis_log::init_logging(Some(&log_dir), Some(&config));

    match run(&args, &config, &config_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn preset_store(config: &Config, config_dir: &Path) -> PresetStore {
    let dir = &config.presets.directory;
    if dir.is_absolute() {
        PresetStore::new(dir)
    } else {
        PresetStore::new(config_dir.join(dir))
    }
}

fn run(args: &CliArgs, config: &Config, config_dir: &Path) -> Result<(), PipelineError> {
    let store = preset_store(config, config_dir);

    if args.list_presets {
        for name in store.list()? {
            println!("{name}");
        }
        return Ok(());
    }

    let mut pipeline = PlanetPipeline::from_config(config)?;

    let preset_name = args
        .preset
        .as_deref()
        .unwrap_or(&config.presets.default_preset);
    let mut settings = match store.load(preset_name)? {
        Some(settings) => {
            info!("Loaded preset '{}'", preset_name);
            pipeline.replay_forest_of(&settings);
            settings
        }
        None => {
            if args.preset.is_some() {
                warn!("Preset '{}' not found, using defaults", preset_name);
            }
            PlanetSettings::default()
        }
    };

    if let Some(count) = args.tree_count {
        settings.tree_count = count;
    }
    if args.random_offset {
        settings.noise_offset = rand::rng().random_range(0..RANDOM_OFFSET_RANGE) as f32;
        info!("Random noise offset {}", settings.noise_offset);
    }
    if let Some(seed) = args.seed {
        pipeline.request_seed(seed);
    }

    let mut sink = RecordingSink::new();
    let report = pipeline.run_pass(&mut settings, &mut sink)?;
    info!(
        "Planet ready: {} vertices, {} triangles, {} trees (seed {}), ocean scale {:.6}, {:.1} ms",
        sink.total_vertices(),
        sink.total_triangles(),
        report.instance_count,
        report.instancing_seed,
        report.generation.ocean_scale,
        report.generation.elapsed.as_secs_f64() * 1000.0
    );

    if let Some(name) = &args.save_preset {
        let path = store.save(name, &settings)?;
        info!("Saved preset to {}", path.display());
    }
    Ok(())
}
