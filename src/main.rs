// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::fs;
use std::time::Instant;

use anyhow::Context;
use hades::config::{load_and_validate_config, RuntimeBuilder};
use hades::state::State;
use hades::traits::Run;
use tracing_subscriber::EnvFilter;

/// Read the starting state from a JSON file, or start empty
fn read_initial_state(path: Option<&String>) -> anyhow::Result<State> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading initial state from {}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing initial state in {}", path))
        }
        None => Ok(State::new()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <config.yaml> [initial-state.json]", args[0]);
        eprintln!("Example: {} demos/race-pipeline.yaml", args[0]);
        std::process::exit(1);
    }

    let config = load_and_validate_config(&args[1])
        .with_context(|| format!("loading {}", args[1]))?;
    let initial = read_initial_state(args.get(2))?;

    let (pool, pipeline) = RuntimeBuilder::from_config(&config)?;
    eprintln!(
        "🚀 Running {} stage(s) on {} worker(s)",
        pipeline.len(),
        pool.max_workers()
    );

    let started = Instant::now();
    let outcome = pipeline.into_ref().run(&pool, initial).result();
    let elapsed = started.elapsed();
    pool.shutdown();

    let output = outcome.context("pipeline failed")?;
    eprintln!("⏱️  Finished in {:.2?}", elapsed);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
