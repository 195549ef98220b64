//! `mantr` — command-line interface for the Mantr graph walk API.
//!
//! Sends a single walk request and prints the paths the service found.
//!
//! ```sh
//! MANTR_API_KEY=vak_... mantr walk ka ru na --depth 4 --limit 20
//! mantr --api-key vak_... walk ka ru --json
//! ```
//!
//! Set `RUST_LOG=mantr=debug` to see the request and response summary.

mod render;

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mantr::{Client, Error, WalkRequest};

/// mantr — Mantr API CLI
#[derive(Parser)]
#[command(name = "mantr", version, about, long_about = None)]
struct Cli {
    /// API key (must start with `vak_`).
    #[arg(long, env = "MANTR_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the API base URL.
    #[arg(long, env = "MANTR_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds (default 30).
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the graph from one or more phonemes.
    ///
    /// Examples:
    ///   mantr walk ka ru na
    ///   mantr walk ka --pod research --depth 5 --limit 10 --json
    Walk {
        /// Seed phonemes, in order.
        #[arg(required = true, value_name = "PHONEME")]
        phonemes: Vec<String>,

        /// Scope the traversal to this pod.
        #[arg(long)]
        pod: Option<String>,

        /// Maximum traversal depth (server default 3).
        #[arg(long)]
        depth: Option<u32>,

        /// Maximum number of paths (server default 100).
        #[arg(long)]
        limit: Option<u32>,

        /// Print the raw response as JSON instead of the text listing.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mantr=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = Client::builder(cli.api_key);
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build().unwrap_or_else(|e| fail(e));

    match cli.command {
        Command::Walk {
            phonemes,
            pod,
            depth,
            limit,
            json,
        } => {
            let request = WalkRequest {
                phonemes,
                pod,
                depth,
                limit,
            };
            let response = client.walk(&request).unwrap_or_else(|e| fail(e));

            if json {
                match serde_json::to_string_pretty(&response) {
                    Ok(out) => println!("{out}"),
                    Err(e) => fail(Error::Decode(e)),
                }
            } else {
                print!("{}", render::render_walk(&response));
            }
        }
    }
}

/// Print the error to stderr and exit: 2 for problems caught locally,
/// 1 for anything that involved the server.
fn fail(err: Error) -> ! {
    eprintln!("mantr: {err}");
    let code = match err {
        Error::Format(_) | Error::Validation(_) => 2,
        _ => 1,
    };
    process::exit(code);
}
