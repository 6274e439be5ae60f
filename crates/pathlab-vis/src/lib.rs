//! Pathlab Visualization
//!
//! Step-by-step replay of graph searches with playback controls.
//!
//! # Architecture
//!
//! - **Playback**: Cursor over a trace, auto-advanced by cancellable timers
//! - **Scheduler**: Timer source; a virtual clock for tests, Tokio for serving
//! - **Session**: Fixture graphs, selected algorithm, and its playback
//! - **REST API / WebSocket**: Transport controls and frames for a renderer
//!
//! # Usage
//!
//! ```no_run
//! use pathlab_vis::{SessionConfig, VisServer};
//! use pathlab_trace::Algorithm;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::default().with_algorithm(Algorithm::AStar);
//! VisServer::new(config)?.serve(3000).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod frame;
mod playback;
mod scheduler;
mod server;
mod session;

pub use error::{ErrorDetail, Result, VisError};
pub use frame::{catalog, AlgorithmInfo, Frame};
pub use playback::{
    Playback, PlaybackState, PlaybackStatus, BEFORE_START, DEFAULT_INTERVAL_MS, MIN_INTERVAL_MS,
};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use server::{AppState, VisServer};
pub use session::{Session, SessionConfig};
