/// Batch entry point.
///
/// Loads the merged record file once, then summarizes and renders each
/// enabled dataset in registry order. The run fails fast: the first
/// dataset error (structural input problem, empty target bucket, I/O)
/// stops the batch with a non-zero exit.

use std::env;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use dotenv::dotenv;

use hazmap_service::analysis::aggregate::aggregate;
use hazmap_service::analysis::select::select_notable_cities;
use hazmap_service::config::{self, Config};
use hazmap_service::datasets::{self, DatasetSpec};
use hazmap_service::ingest::records::{self, RawRecord};
use hazmap_service::logging::{self, Component};
use hazmap_service::render::{self, map_html};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(Component::System, None, &e.to_string());
            eprintln!("hazmap_service: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let config_path = env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let (mut cfg, loaded) = config::load_or_default(Path::new(&config_path))?;
    cfg.apply_env_overrides();

    let level = logging::parse_level(&cfg.logging.level)
        .ok_or_else(|| format!("unknown log level '{}'", cfg.logging.level))?;
    logging::init_logger(level, cfg.logging.file.as_deref(), cfg.logging.timestamps);

    if loaded {
        logging::info(Component::Config, None, &format!("loaded '{}'", config_path));
    } else {
        logging::warn(
            Component::Config,
            None,
            &format!("config '{}' not found, using defaults", config_path),
        );
    }

    let data_path = Path::new(&cfg.input.data_file);
    let raw = records::load_records(data_path)?;
    logging::info(
        Component::Ingest,
        None,
        &format!("{} records loaded from '{}'", raw.len(), data_path.display()),
    );

    let output_dir = Path::new(&cfg.output.directory);
    render::prepare_output_dir(output_dir, cfg.output.clean)?;

    for key in &cfg.datasets.enabled {
        let Some(dataset) = datasets::find_dataset(key) else {
            logging::warn(Component::Config, Some(key), "unknown dataset key, skipping");
            continue;
        };
        run_dataset(dataset, &raw, &cfg, output_dir)?;
    }

    Ok(())
}

/// Runs one dataset end to end: normalize, aggregate, select, render.
fn run_dataset(
    dataset: &DatasetSpec,
    raw: &[RawRecord],
    cfg: &Config,
    output_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let normalized =
        records::normalize_all(dataset.key, raw, dataset.kind, cfg.input.on_invalid)?;
    let summary = aggregate(&normalized, dataset.kind, dataset.target_bucket)?;
    let notable = select_notable_cities(&summary.cities);

    let page = map_html::render_map(dataset, &summary, notable.as_ref())?;
    let path = render::write_map(output_dir, dataset.output_file, &page)?;

    logging::log_dataset_summary(
        dataset.key,
        raw.len(),
        summary.heat_points.len(),
        summary.cities.len(),
        &path.display().to_string(),
    );
    Ok(())
}
