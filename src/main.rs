use anyhow::{Context, Result};
use featureprep::{pipeline, Config, DEFAULT_CONFIG_PATH};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout only carries the result line) ──
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) settings ─────────────────────────────────────────────────
    let config = Config::load(DEFAULT_CONFIG_PATH)
        .with_context(|| format!("loading {}", DEFAULT_CONFIG_PATH))?;

    // ─── 3) run the pipeline ─────────────────────────────────────────
    let summary = pipeline::run(&config).context("building features")?;

    println!("{}", summary.confirmation());
    Ok(())
}
