//! Axum server exposing a session over JSON and WebSocket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use pathlab_graph::Graph;
use pathlab_trace::Algorithm;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::error::{ErrorDetail, Result, VisError};
use crate::frame::{catalog, AlgorithmInfo, Frame};
use crate::playback::PlaybackStatus;
use crate::scheduler::{TimerHandle, TokioScheduler};
use crate::session::{Session, SessionConfig};

/// Frames buffered per WebSocket subscriber before it starts skipping.
const FRAME_BUFFER: usize = 64;

/// Shared application state.
pub struct AppState {
    session: RwLock<Session<TokioScheduler>>,
    frames: broadcast::Sender<Frame>,
}

impl AppState {
    /// Apply `op` under the write lock, then publish the resulting frame.
    async fn mutate<F>(&self, op: F) -> Result<PlaybackStatus>
    where
        F: FnOnce(&mut Session<TokioScheduler>) -> Result<()>,
    {
        let mut session = self.session.write().await;
        op(&mut *session)?;
        // No subscribers is fine.
        let _ = self.frames.send(session.frame());
        Ok(PlaybackStatus::from(session.playback()))
    }
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
    timers: Option<mpsc::UnboundedReceiver<TimerHandle>>,
}

impl VisServer {
    /// Create a server around a fresh session.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let (scheduler, timers) = TokioScheduler::new();
        let session = Session::new(config, scheduler)?;
        let (frames, _) = broadcast::channel(FRAME_BUFFER);
        Ok(Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
                frames,
            }),
            timers: Some(timers),
        })
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/graph", get(graph_handler))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/algorithm", post(select_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/playback", get(playback_status_handler))
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Start delivering fired timers to the session. Returns `None` if the
    /// pump is already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_timers(&mut self) -> Option<JoinHandle<()>> {
        let timers = self.timers.take()?;
        Some(tokio::spawn(pump_timers(self.state.clone(), timers)))
    }

    /// Run the server on the given port.
    pub async fn serve(mut self, port: u16) -> std::result::Result<(), std::io::Error> {
        self.start_timers();
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Visualization server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

async fn pump_timers(state: Arc<AppState>, mut timers: mpsc::UnboundedReceiver<TimerHandle>) {
    while let Some(handle) = timers.recv().await {
        let mut session = state.session.write().await;
        if session.playback_mut().tick(handle) {
            let _ = state.frames.send(session.frame());
        }
    }
    debug!("timer channel closed");
}

/// Server status response.
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    algorithm: Algorithm,
    node_count: usize,
    edge_count: usize,
    total_steps: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(StatusResponse {
        status: "ok",
        algorithm: session.algorithm(),
        node_count: session.graph().node_count(),
        edge_count: session.graph().edge_count(),
        total_steps: session.playback().total_steps(),
    })
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> Json<Graph> {
    let session = state.session.read().await;
    Json(session.graph().clone())
}

async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(catalog())
}

async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<Frame> {
    let session = state.session.read().await;
    Json(session.frame())
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let session = state.session.read().await;
    Json(PlaybackStatus::from(session.playback()))
}

async fn run(state: &AppState, command: Command) -> Result<Json<PlaybackStatus>> {
    state.mutate(|session| command.apply(session)).await.map(Json)
}

async fn play_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    run(&state, Command::Play).await
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    run(&state, Command::Pause).await
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    run(&state, Command::Reset).await
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Deserialize)]
struct StepRequest {
    direction: Direction,
}

async fn step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Result<Json<PlaybackStatus>> {
    let command = match req.direction {
        Direction::Forward => Command::StepForward,
        Direction::Backward => Command::StepBack,
    };
    run(&state, command).await
}

#[derive(Debug, Deserialize)]
struct SeekRequest {
    cursor: isize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Result<Json<PlaybackStatus>> {
    run(&state, Command::Seek { cursor: req.cursor }).await
}

#[derive(Debug, Deserialize)]
struct SpeedRequest {
    interval_ms: u64,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Result<Json<PlaybackStatus>> {
    run(
        &state,
        Command::SetSpeed {
            interval_ms: req.interval_ms,
        },
    )
    .await
}

#[derive(Debug, Deserialize)]
struct SelectRequest {
    algorithm: String,
}

async fn select_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<PlaybackStatus>> {
    run(
        &state,
        Command::SelectAlgorithm {
            algorithm: req.algorithm,
        },
    )
    .await
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut frames = state.frames.subscribe();
    let initial = state.session.read().await.frame();
    if send(&mut socket, &WsResponse::Frame(initial)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match serde_json::from_str::<Command>(&text) {
                            Ok(command) => handle_ws_command(&state, command).await,
                            Err(e) => WsResponse::Error(VisError::BadRequest(e.to_string()).detail()),
                        };
                        if send(&mut socket, &reply).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            frame = frames.recv() => {
                match frame {
                    Ok(frame) => {
                        if send(&mut socket, &WsResponse::Frame(frame)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "WebSocket client lagging, frames dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> std::result::Result<(), axum::Error> {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!("Failed to encode reply: {}", e);
            Ok(())
        }
    }
}

/// Transport and selection commands, shared by the HTTP routes and the
/// WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Command {
    GetFrame,
    GetStatus,
    Play,
    Pause,
    Reset,
    StepForward,
    StepBack,
    Seek { cursor: isize },
    SetSpeed { interval_ms: u64 },
    SelectAlgorithm { algorithm: String },
}

impl Command {
    fn apply(self, session: &mut Session<TokioScheduler>) -> Result<()> {
        match self {
            Command::GetFrame | Command::GetStatus => {}
            Command::Play => session.playback_mut().play(),
            Command::Pause => session.playback_mut().pause(),
            Command::Reset => session.playback_mut().reset(),
            Command::StepForward => {
                session.playback_mut().step_forward();
            }
            Command::StepBack => {
                session.playback_mut().step_back();
            }
            Command::Seek { cursor } => session.playback_mut().seek(cursor),
            Command::SetSpeed { interval_ms } => session.set_speed(interval_ms),
            Command::SelectAlgorithm { algorithm } => {
                session.select_algorithm(algorithm.parse()?)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Frame(Frame),
    Status(PlaybackStatus),
    Error(ErrorDetail),
}

async fn handle_ws_command(state: &AppState, command: Command) -> WsResponse {
    match command {
        Command::GetFrame => WsResponse::Frame(state.session.read().await.frame()),
        Command::GetStatus => {
            let session = state.session.read().await;
            WsResponse::Status(PlaybackStatus::from(session.playback()))
        }
        command => match state.mutate(|session| command.apply(session)).await {
            Ok(status) => WsResponse::Status(status),
            Err(e) => WsResponse::Error(e.detail()),
        },
    }
}
