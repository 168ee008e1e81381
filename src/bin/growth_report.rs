//! Headless growth report: grows one tree in fixed steps and logs how much
//! geometry is visible at each step.
//!
//! Usage: `growth-report [params.yaml]` (set `RUST_LOG=debug` for per-generation detail)

use std::process::ExitCode;

use growing_tree::{GrowingTree, GrowthParams, LogObserver};

const STEP: f32 = 6.0;
const DURATION: f32 = 120.0;

fn load_params() -> Result<GrowthParams, String> {
    match std::env::args().nth(1) {
        None => Ok(GrowthParams::default()),
        Some(path) => {
            let yaml = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
            GrowthParams::from_yaml(&yaml)
        }
    }
}

/// Advance in `STEP` increments until fully grown or `DURATION` is reached
fn grow(tree: &mut GrowingTree) {
    let steps = (DURATION / STEP) as usize;
    for _ in 1..=steps {
        tree.advance(STEP);
        log::info!(
            "t={:.1}s ({:.1}% complete): {} branch vertices, {} leaf vertices",
            tree.elapsed(),
            tree.growth_progress().min(1.0) * 100.0,
            tree.branch_vertex_count(),
            tree.leaf_vertex_count()
        );

        if tree.is_fully_grown() {
            log::info!("fully grown after {:.1}s", tree.elapsed());
            break;
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tree = load_params().and_then(GrowingTree::new);
    let mut tree = match tree {
        Ok(tree) => tree.with_observer(LogObserver::new(STEP)),
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tree.generate();
    log::info!("total branches: {}, total leaves: {}", tree.branch_count(), tree.leaf_count());

    grow(&mut tree);
    ExitCode::SUCCESS
}
