//! HTTP API over the recommendation engine.
//!
//! Each request is one stateless engine call. The only shared state is the
//! read-only zone catalog and the clock used to evaluate zone offsets.

mod error;
mod handlers;
mod router;

pub use router::create_router;

use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;

use jetlag_core::ZoneCatalog;

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ZoneCatalog>,
    pub clock: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: ZoneCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            clock: Utc::now,
        }
    }

    /// Replace the clock used to evaluate zone offsets.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
