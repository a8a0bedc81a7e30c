use std::env;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use tracing::info;

use assessment_core::error::Error;
use assessment_core::services::normalization_service;

/// Import tool for AI-generated test payloads: reads a payload from a file
/// (or stdin with `-`), normalizes and validates it, and prints the
/// canonical document. Every validation failure goes to stderr so authors
/// can fix a payload in one pass.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = env::args().collect();
    let raw = match args.get(1).map(String::as_str) {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => fs::read_to_string(path)?,
    };

    match normalization_service::import_ai_test(&raw) {
        Ok(test) => {
            info!(
                questions = test.questions.len(),
                total_points = test.total_points(),
                "AI payload accepted"
            );
            println!("{}", serde_json::to_string_pretty(&test)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Validation(failure)) => {
            eprintln!("payload rejected with {} problem(s):", failure.errors.len());
            for err in &failure.errors {
                eprintln!("  {}: {}", err.field, err.message);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
