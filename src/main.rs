/// Entry point: argument parsing, logging and config bootstrap, and the
/// top-level datagram loop driving the coordinator.

use log::{error, info};
use nuggets_server::config::ServerConfig;
use nuggets_server::domain::grid::Grid;
use nuggets_server::error::{ServerError, SeedParseError};
use nuggets_server::net::transport::{Transport, UdpTransport};
use nuggets_server::sim::coordinator::Coordinator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(exit_code_for(&err) as u8)
        }
    }
}

fn init_logging() {
    flexi_logger::Logger::try_with_env_or_str("info")
        .expect("\"info\" is always a valid default log spec")
        .log_to_stderr()
        .start()
        .expect("logger is only ever started once, at process start");
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        return Err(ServerError::ArgError.into());
    }

    let map_path = std::path::PathBuf::from(&args[1]);
    let grid = Grid::load(&map_path)?;

    let seed = match args.get(2) {
        Some(raw) => raw.parse::<u64>().map_err(|_| SeedParseError)?,
        // A present "0" is a deliberate explicit seed; only an *absent*
        // argument falls back to the process id.
        None => std::process::id() as u64,
    };
    let rng = StdRng::seed_from_u64(seed);

    let config = ServerConfig::load();
    let mut coordinator = Coordinator::new(grid, config, rng);

    let mut transport = UdpTransport::bind("0.0.0.0:0")?;
    info!("listening on {}", transport.local_addr());

    while !coordinator.is_game_over() {
        if let Some((from, raw)) = transport.recv() {
            coordinator.handle_datagram(&mut transport, from, &raw);
        }
    }

    info!("game over, shutting down");
    Ok(())
}

/// Translate the top-level error into the documented process exit code.
/// Anything that isn't one of our own error types (a transport bind
/// failure surfaced through `anyhow`, say) is "other fatal init failure".
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<ServerError>() {
        return e.exit_code();
    }
    if err.downcast_ref::<SeedParseError>().is_some() {
        return 4;
    }
    1
}
