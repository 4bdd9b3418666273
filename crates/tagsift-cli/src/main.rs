//! tagsift command-line entrypoint.

mod request;

use std::sync::Arc;

use clap::Parser;
use mimalloc::MiMalloc;
use serde::Serialize;

use tagsift::config::Config;
use tagsift::pipeline::QualityGate;
use tagsift::rules::RulesEngine;
use tagsift::store::ConfigStore;

use crate::request::{Args, read_request};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let store = Arc::new(ConfigStore::from_config(&config));

    tracing::info!(
        config_path = ?config.config_path,
        mode = %store.invocation_mode(),
        judge_timeout_ms = config.judge_timeout.as_millis() as u64,
        "tagsift starting"
    );

    if args.export_config {
        print_json(&store.export(), args.pretty)?;
    } else {
        let request = read_request(args.input_path())?;

        let engine = Arc::new(RulesEngine::from_config(store.clone(), &config));
        let gate = with_judge(QualityGate::from_config(engine, &config), args.mock_judge);

        let outcome = gate.evaluate(&request.content, &request.tags).await;
        print_json(&outcome, args.pretty)?;
    }

    store.close();
    Ok(())
}

#[cfg(feature = "mock-judge")]
fn with_judge(gate: QualityGate, mock_judge: bool) -> QualityGate {
    if mock_judge {
        gate.with_judge(Arc::new(tagsift::judge::MockSemanticJudge::new()))
    } else {
        gate
    }
}

#[cfg(not(feature = "mock-judge"))]
fn with_judge(gate: QualityGate, mock_judge: bool) -> QualityGate {
    if mock_judge {
        tracing::warn!("--mock-judge needs the `mock-judge` feature; running without a judge");
    }
    gate
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
