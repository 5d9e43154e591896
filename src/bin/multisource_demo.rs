use std::env;

use multisource::{SourcesConfig, build_driver_from_config};
use tracing_subscriber::EnvFilter;

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: multisource-demo <sources.yaml|sources.json>");
            std::process::exit(1);
        }
    };

    let config = SourcesConfig::from_path(&config_path)?;
    let driver = build_driver_from_config(config)?;
    tracing::debug!(slots = driver.slots().len(), policy = ?driver.error_policy(), "driver ready");

    let mut stdout = tokio::io::stdout();
    driver.run(&mut stdout).await?;

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_blocking() {
        eprintln!("multisource-demo error: {e}");
        std::process::exit(1);
    }
}

fn run_blocking() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run())
}
