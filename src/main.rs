// main.rs - CLI entry point

use env_logger::Env;
use log::{debug, info};
use pst2t_summarize::cli::Config;
use pst2t_summarize::prelude::*;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    // Logging level may come from the config, so init only after the merge
    init_logging(args.verbose);
    debug!("{}", pst2t_summarize::get_info());
    if let Some(config_path) = &args.config {
        info!("Loaded configuration from: {}", config_path);
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| SummaryError::InvalidParameter {
                parameter: "threads".to_string(),
                reason: e.to_string(),
            })?;
    }

    let validated = validate_args(&args)?;

    let start = Instant::now();
    let outcome = run_sample(&validated.paths, &validated.options)?;

    info!(
        "[summarize] {} done: {} summary fields in {:.2?}",
        validated.paths.sample_id,
        outcome.summary.len(),
        start.elapsed()
    );
    if validated.options.dry_run {
        for (key, value) in outcome.summary.iter() {
            println!("{}\t{}", key, value);
        }
    }
    Ok(())
}
