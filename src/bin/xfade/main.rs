//! xfade - live crossfade mixer demo
//!
//! Run with: cargo run --bin xfade
//!
//! The terminal belongs to the UI, so log output (block overruns and the like)
//! goes to `xfade.log` in the system temp directory. Set `RUST_LOG` to change
//! the level; the default is `warn`.

mod app;
mod engine;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use app::Xfade;
use color_eyre::eyre::WrapErr;

fn log_path() -> PathBuf {
    std::env::temp_dir().join("xfade.log")
}

fn init_logging() -> color_eyre::Result<()> {
    let path = log_path();
    let file = File::create(&path).wrap_err_with(|| format!("creating {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;

    Xfade::new().tone_a(220.0).tone_b(329.63).run()
}
