/// cnn-geometry Studio
///
/// Browser page for building a layer stack and watching output shape,
/// receptive field and jump update after every edit.
/// Served by a synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tiny_http::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use state::StudioState;

#[derive(Parser)]
#[command(name = "studio", version, about = "Browser UI for the CNN geometry calculator")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let server = match Server::http(&args.addr) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to bind HTTP server on {}: {}", args.addr, e);
            return ExitCode::FAILURE;
        }
    };

    let shared_state = Arc::new(Mutex::new(StudioState::new()));

    info!("cnn-geometry studio listening on http://{}", args.addr);

    // One thread per request; handlers only hold the state lock long enough
    // to copy or swap the architecture snapshot.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }

    ExitCode::SUCCESS
}
