//! HTTP API server command.

use clap::Args;
use std::net::SocketAddr;

use jetlag_core::{Config, ZoneCatalog};

use crate::server::{self, AppState};

#[derive(Args)]
pub struct ServeArgs {
    /// Bind host; defaults to config `server.host`
    #[arg(long)]
    host: Option<String>,
    /// Bind port; defaults to config `server.port`
    #[arg(long)]
    port: Option<u16>,
}

pub fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, AppState::new(ZoneCatalog::builtin())))?;
    Ok(())
}
