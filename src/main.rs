mod config;
mod errors;
mod files;
mod gate;
mod logging;
mod server;

use crate::config::Config;
use crate::gate::Gate;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("filegate.toml");
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() { eprintln!("--config requires a path"); std::process::exit(2); }
                config_path = PathBuf::from(&args[i]);
            }
            _ => {}
        }
        i += 1;
    }

    let cfg = Config::load(&config_path).context("loading config")?;
    cfg.validate().context("validating config")?;

    let gate = Gate::new(&cfg).context("resolving fallback boundary")?;

    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    info!(addr = %addr, fallback = %gate.fallback_boundary().display(), "filegate ready");
    println!(
        "filegate ready addr={} fallback={}",
        addr,
        gate.fallback_boundary().display()
    );

    server::serve(cfg, gate).await
}
