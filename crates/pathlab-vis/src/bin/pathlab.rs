//! Pathlab Search Visualizer
//!
//! Serve step-by-step replays of BFS, DFS, Dijkstra, and A*.

use std::env;

use pathlab_trace::Algorithm;
use pathlab_vis::{SessionConfig, VisServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let algorithm: Algorithm = match args.get(1) {
        Some(name) => name.parse()?,
        None => Algorithm::Bfs,
    };

    let port: u16 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3000);

    println!("Pathlab Search Visualizer");
    println!("=========================");
    println!();
    println!("Algorithm: {} ({})", algorithm.title(), algorithm);
    println!("Frontier:  {}", algorithm.frontier_kind());
    println!();

    let config = SessionConfig::default().with_algorithm(algorithm);
    let server = VisServer::new(config)?;

    println!("Starting visualization server on http://localhost:{}", port);
    println!("Open the renderer to step through the search.");
    println!();

    server.serve(port).await?;

    Ok(())
}
