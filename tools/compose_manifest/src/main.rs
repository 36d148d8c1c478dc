use manifest_core::config::{ColumnConfig, CONFIG_ENV_VAR};
use manifest_core::error::CoreResult;
use manifest_core::manifest::{emit_manifests, EmitOptions, EmitReport};
use manifest_core::normalize::Normalizer;
use manifest_core::paths::BaseDir;
use manifest_core::transcript::build_transcript_map;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

const USAGE: &str = "usage: compose_manifest <origin csv> <data dir> <output prefix>";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        println!("{}", USAGE);
        std::process::exit(1);
    }

    let base = match BaseDir::from_current_exe() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("cannot locate program directory: {}", e);
            std::process::exit(1);
        }
    };

    let origin = Path::new(&args[1]);
    if !origin.exists() {
        eprintln!("csv: {} does not exist", origin.display());
        println!("{}", USAGE);
        std::process::exit(1);
    }

    // Same resolution the emitter applies, so validation and use agree.
    let data_dir = base.resolve(&args[2]);
    match fs::symlink_metadata(&data_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            eprintln!("data directory: {} is not a directory", data_dir.display());
            println!("{}", USAGE);
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("data directory: {} does not exist", data_dir.display());
            println!("{}", USAGE);
            std::process::exit(1);
        }
    }

    let env_config = std::env::var(CONFIG_ENV_VAR).ok();
    let config_path = ColumnConfig::locate(&base, env_config.as_deref());
    let config = match ColumnConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("cannot load config {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&config) {
        Ok(json) => log::info!("config {}:\n{}", config_path.display(), json),
        Err(e) => log::warn!("cannot echo config: {}", e),
    }

    match compose(origin, &base, &args[2], &args[3], &config) {
        Ok(report) => {
            if report.failed() > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn compose(
    origin: &Path,
    base: &BaseDir,
    data_dir: &str,
    output_prefix: &str,
    config: &ColumnConfig,
) -> CoreResult<EmitReport> {
    let normalizer = Normalizer::standard()?;
    let reader = BufReader::new(File::open(origin)?);
    let parsed = build_transcript_map(reader, config, &normalizer)?;
    log::info!(
        "{} transcripts from {} lines ({} skipped)",
        parsed.map.len(),
        parsed.lines_read,
        parsed.lines_skipped
    );

    let report = emit_manifests(
        &parsed.map,
        base,
        data_dir,
        output_prefix,
        &EmitOptions::default(),
    )?;

    let unmatched = report.unmatched_keys(&parsed.map);
    for key in &unmatched {
        log::debug!("no file for transcript key {}", key);
    }
    if !unmatched.is_empty() {
        log::info!("{} transcript keys matched no file", unmatched.len());
    }
    log::info!(
        "manifests written={} failed={} rows={} lines_skipped={}",
        report.written(),
        report.failed(),
        report.total_rows(),
        parsed.lines_skipped
    );
    Ok(report)
}
