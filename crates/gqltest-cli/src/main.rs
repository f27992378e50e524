use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use sha2::{Digest, Sha256};

use gqltest_core::client::parse_headers;
use gqltest_core::runner::{Runner, SuiteSummary};
use gqltest_core::{discovery, Config, GraphQLClient};

#[derive(Parser)]
#[command(name = "gqltest")]
#[command(about = "Runs file-based GraphQL test suites against an endpoint", long_about = None)]
struct Cli {
    /// Path to a test suite directory (can be specified multiple times)
    #[arg(long = "suite", required = true)]
    suites: Vec<PathBuf>,

    /// GraphQL endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Custom header in 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header")]
    headers: Vec<String>,

    /// Print detailed output including response diffs
    #[arg(long)]
    verbose: bool,

    /// Stop execution on first test failure
    #[arg(long)]
    fail_fast: bool,

    /// Path to a config file (defaults to gqltest.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| config.client.endpoint.clone())
        .ok_or_else(|| eyre!("no endpoint configured; pass --endpoint or set client.endpoint"))?;
    let headers = parse_headers(&cli.headers)?;
    let verbose = cli.verbose || config.runner.verbose;
    let fail_fast = cli.fail_fast || config.runner.fail_fast;

    let mut total = SuiteSummary::default();
    let mut aborted = false;

    for suite in &cli.suites {
        let suite_name = suite.display().to_string();
        println!("\n========================================");
        println!("Running suite: {suite_name}");
        println!("========================================");
        println!("Endpoint: {endpoint}");

        let forest = discovery::build(suite)
            .wrap_err_with(|| format!("failed to discover tests in {suite_name}"))?;
        let cases = forest.ordered_cases("", None);
        println!("Discovered {} tests\n", cases.len());

        // Every suite gets its own account so runs stay isolated.
        let client = GraphQLClient::new(&endpoint, hash_suite_path(&suite_name))
            .with_account_header(&config.client.account_header)
            .with_timeout(Duration::from_secs(config.client.timeout_secs))
            .with_headers(headers.clone());
        let runner = Runner::new(client);

        let mut summary = SuiteSummary::default();
        let start = Instant::now();

        for case in forest.invalid_cases() {
            summary.skipped += 1;
            if verbose {
                println!(
                    "SKIP: {} (missing request.gql or response.json)",
                    display_dir(&case.dir)
                );
            }
        }

        for case in &cases {
            let result = runner.run_case(case).await;
            let millis = result.duration.as_millis();

            if result.passed {
                summary.passed += 1;
                println!("PASS: {} ({millis}ms)", display_dir(&case.dir));
            } else {
                summary.failed += 1;
                println!("FAIL: {} ({millis}ms)", display_dir(&case.dir));
                if let Some(error) = &result.error {
                    println!("      Error: {error}");
                }
                if verbose {
                    if let (Some(expected), Some(actual)) = (&result.expected, &result.actual) {
                        println!("      Expected: {expected}");
                        println!("      Actual:   {actual}");
                    }
                }
                if fail_fast {
                    aborted = true;
                    break;
                }
            }
        }

        summary.duration = start.elapsed();
        println!(
            "\n=== Suite complete: {} passed, {} failed, {} skipped ({}ms) ===",
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.duration.as_millis()
        );
        total.merge(&summary);

        if aborted {
            break;
        }
    }

    println!("\n========================================");
    println!(
        "TOTAL: {} passed, {} failed, {} skipped",
        total.passed, total.failed, total.skipped
    );
    println!("========================================");

    if total.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// SHA-256 of the suite path, used as the per-suite account id.
fn hash_suite_path(path: &str) -> String {
    hex::encode(Sha256::digest(path.as_bytes()))
}

fn display_dir(dir: &str) -> &str {
    if dir.is_empty() {
        "."
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::{display_dir, hash_suite_path};

    #[test]
    fn test_hash_suite_path_is_stable() {
        assert_eq!(hash_suite_path("a"), hash_suite_path("a"));
        assert_ne!(hash_suite_path("a"), hash_suite_path("b"));
        assert_eq!(hash_suite_path("a").len(), 64);
    }

    #[test]
    fn test_display_dir_names_the_root() {
        assert_eq!(display_dir(""), ".");
        assert_eq!(display_dir("001_First"), "001_First");
    }
}
