//! Command-line arguments and the JSON request they point at.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

/// One submission to evaluate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluateRequest {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Evaluates {"content": ..., "tags": [...]} read from FILE (or stdin) and
/// prints the gate outcome as JSON.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "tagsift",
    about = "Rules-first quality gate for content tags",
    after_help = "environment:\n  TAGSIFT_CONFIG_PATH, TAGSIFT_HISTORY_PATH, TAGSIFT_JUDGE_TIMEOUT_MS,\n  TAGSIFT_INVOCATION_MODE, TAGSIFT_DUPLICATE_CAPACITY, RUST_LOG"
)]
pub struct Args {
    /// Request file; stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the configuration snapshot instead of evaluating.
    #[arg(long)]
    pub export_config: bool,

    /// Answer judge calls with the token-overlap mock.
    #[arg(long)]
    pub mock_judge: bool,

    /// Pretty-print JSON.
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Input file, with `-` meaning stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }
}

/// Reads and parses a request from `path`, or from stdin when `None`.
pub fn read_request(path: Option<&Path>) -> anyhow::Result<EvaluateRequest> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    parse_request(&raw)
}

pub fn parse_request(raw: &str) -> anyhow::Result<EvaluateRequest> {
    serde_json::from_str(raw).context("request must be {\"content\": string, \"tags\": [string]}")
}
