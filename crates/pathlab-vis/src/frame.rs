//! Renderer-facing views of the current playback position.

use pathlab_trace::{Algorithm, GraphKind, Step};
use serde::{Deserialize, Serialize};

use crate::playback::Playback;
use crate::scheduler::Scheduler;

/// Everything the renderer needs to draw one moment of a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub algorithm: Algorithm,
    /// `-1` before the first step
    pub cursor: isize,
    pub total_steps: usize,
    /// `None` while idle
    pub step: Option<Step>,
    /// Pseudocode line to highlight
    pub line: Option<usize>,
    pub progress: f64,
}

impl Frame {
    /// Capture the frame under the cursor.
    pub fn capture<S: Scheduler>(playback: &Playback<S>) -> Self {
        Self {
            algorithm: playback.trace().algorithm(),
            cursor: playback.cursor(),
            total_steps: playback.total_steps(),
            step: playback.current_step().cloned(),
            line: playback.highlighted_line(),
            progress: playback.progress(),
        }
    }
}

/// Catalog entry describing one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    pub title: String,
    pub graph: GraphKind,
    pub frontier: String,
    pub pseudocode: Vec<String>,
    pub concept: String,
    pub complexity: String,
    pub applications: Vec<String>,
}

impl From<Algorithm> for AlgorithmInfo {
    fn from(algorithm: Algorithm) -> Self {
        let owned = |lines: &[&str]| lines.iter().map(|s| s.to_string()).collect();
        Self {
            algorithm,
            title: algorithm.title().to_string(),
            graph: algorithm.graph_kind(),
            frontier: algorithm.frontier_kind().to_string(),
            pseudocode: owned(algorithm.pseudocode()),
            concept: algorithm.concept().to_string(),
            complexity: algorithm.complexity().to_string(),
            applications: owned(algorithm.applications()),
        }
    }
}

/// The full catalog in selector order.
pub fn catalog() -> Vec<AlgorithmInfo> {
    Algorithm::ALL.into_iter().map(AlgorithmInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use pathlab_graph::fixtures;
    use pathlab_trace::{generate, ProgramPoint};

    #[test]
    fn idle_frame_has_no_step() {
        let tree = fixtures::tree().unwrap();
        let playback = Playback::new(generate(&tree, Algorithm::Dfs).unwrap(), ManualScheduler::new());

        let frame = Frame::capture(&playback);
        assert_eq!(frame.cursor, -1);
        assert!(frame.step.is_none());
        assert!(frame.line.is_none());
    }

    #[test]
    fn frame_tracks_cursor() {
        let tree = fixtures::tree().unwrap();
        let mut playback =
            Playback::new(generate(&tree, Algorithm::Dfs).unwrap(), ManualScheduler::new());
        playback.step_forward();
        playback.step_forward();

        let frame = Frame::capture(&playback);
        let step = frame.step.unwrap();
        assert_eq!(step.program_point, ProgramPoint::Visit);
        assert_eq!(step.message, "Visiting a");
        assert_eq!(frame.line, Some(1));
    }

    #[test]
    fn catalog_lists_every_algorithm() {
        let infos = catalog();
        assert_eq!(infos.len(), 4);
        assert_eq!(infos[3].algorithm, Algorithm::AStar);
        assert_eq!(infos[3].graph, GraphKind::Network);
        assert!(infos.iter().all(|i| !i.pseudocode.is_empty()));
    }
}
