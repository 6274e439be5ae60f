//! A visualizer session: the fixture graphs, the selected algorithm, and the
//! playback of its trace.

use pathlab_graph::{fixtures, Graph, NodeId};
use pathlab_trace::{generate_with, Algorithm, GraphKind, Trace, TraceConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::frame::Frame;
use crate::playback::{Playback, DEFAULT_INTERVAL_MS, MIN_INTERVAL_MS};
use crate::scheduler::Scheduler;

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Algorithm selected on startup. Default: BFS.
    pub algorithm: Algorithm,
    /// Delay between auto-advanced steps in milliseconds. Default: 1200.
    pub interval_ms: u64,
    /// Node every search starts from. Default: node 0.
    pub start: NodeId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bfs,
            interval_ms: DEFAULT_INTERVAL_MS,
            start: NodeId::ROOT,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms.max(MIN_INTERVAL_MS);
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: impl Into<NodeId>) -> Self {
        self.start = start.into();
        self
    }
}

/// Owns the fixture graphs and one playback controller.
pub struct Session<S: Scheduler> {
    config: SessionConfig,
    tree: Graph,
    network: Graph,
    playback: Playback<S>,
}

impl<S: Scheduler> Session<S> {
    /// Build the fixtures and generate the trace for the configured algorithm.
    pub fn new(config: SessionConfig, scheduler: S) -> Result<Self> {
        let tree = fixtures::tree()?;
        let network = fixtures::network()?;
        let graph = match config.algorithm.graph_kind() {
            GraphKind::Tree => &tree,
            GraphKind::Network => &network,
        };
        let trace = trace_for(graph, config.algorithm, config.start)?;

        let mut playback = Playback::new(trace, scheduler);
        playback.set_speed(config.interval_ms);

        info!(algorithm = %config.algorithm, interval_ms = config.interval_ms, "session ready");
        Ok(Self {
            config,
            tree,
            network,
            playback,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// The graph the selected algorithm runs on.
    pub fn graph(&self) -> &Graph {
        self.graph_for(self.config.algorithm.graph_kind())
    }

    pub fn graph_for(&self, kind: GraphKind) -> &Graph {
        match kind {
            GraphKind::Tree => &self.tree,
            GraphKind::Network => &self.network,
        }
    }

    /// Switch algorithms. Regenerates and reloads the trace only when the
    /// selection changes; returns whether it did.
    ///
    /// On error the previous selection and its playback are left untouched.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> Result<bool> {
        if algorithm == self.config.algorithm {
            return Ok(false);
        }
        let trace = trace_for(
            self.graph_for(algorithm.graph_kind()),
            algorithm,
            self.config.start,
        )?;
        debug!(from = %self.config.algorithm, to = %algorithm, "algorithm changed");
        self.config.algorithm = algorithm;
        self.playback.load_trace(trace);
        Ok(true)
    }

    /// Change playback speed; the new interval applies from the next tick.
    pub fn set_speed(&mut self, interval_ms: u64) {
        self.config.interval_ms = interval_ms.max(MIN_INTERVAL_MS);
        self.playback.set_speed(self.config.interval_ms);
    }

    pub fn playback(&self) -> &Playback<S> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback<S> {
        &mut self.playback
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.playback)
    }
}

fn trace_for(graph: &Graph, algorithm: Algorithm, start: NodeId) -> Result<Trace> {
    let config = TraceConfig::default().with_start(start);
    Ok(generate_with(graph, algorithm, &config)?)
}
