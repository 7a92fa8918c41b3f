mod scenario;
mod settings;

use std::sync::Arc;

use anyhow::Context;
use gridnav_planner::PlanResult;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{self, EnvFilter};

use settings::{DEFAULT_CONFIG_PATH, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = load_settings(&path)?;

    let (ox, oy) = settings
        .obstacles
        .generate()
        .context("failed to generate obstacles")?;
    info!(obstacles = ox.len(), "Generated obstacle points");

    let planner = Arc::new(
        settings
            .planner
            .build(&ox, &oy)
            .context("failed to build planner")?,
    );
    info!(
        x_width = planner.x_width(),
        y_width = planner.y_width(),
        occupied = planner.obstacle_map().occupied_count(),
        "Planner ready"
    );

    // Queries share the read-only planner; each search owns its own frontier
    let handles: Vec<(String, JoinHandle<_>)> = settings
        .queries
        .into_iter()
        .map(|query| {
            let planner = Arc::clone(&planner);
            let name = query.name.clone();
            let handle = tokio::task::spawn_blocking(move || {
                planner.plan(query.start.x, query.start.y, query.goal.x, query.goal.y)
            });
            (name, handle)
        })
        .collect();

    let mut failures = 0;
    for (name, handle) in handles {
        let result = handle
            .await
            .with_context(|| format!("query {name} panicked"))?;
        match result {
            Ok(result) => report(&name, &result),
            Err(e) => {
                error!(query = %name, kind = ?e.kind(), "Query rejected: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} queries were rejected");
    }
    Ok(())
}

fn report(name: &str, result: &PlanResult) {
    match &result.path {
        Some(path) => info!(
            query = %name,
            waypoints = path.len(),
            cost = path.cost(),
            world_length = path.world_length(),
            nodes_explored = result.nodes_explored,
            "Path found"
        ),
        None => warn!(
            query = %name,
            nodes_explored = result.nodes_explored,
            "No path"
        ),
    }
}
