use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod growth;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod skeleton;
pub mod tree;

pub use animation::{GrowthObserver, LogObserver, NullObserver};
pub use growth::{GrowthParams, MidpointRandom, RandomSource, RngSource};
pub use math::Vec3;
pub use mesh::FLOATS_PER_VERTEX;
pub use skeleton::{Branch, BranchId, Leaf, Skeleton};
pub use tree::{GrowingTree, TreeStats};

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // The host page may have installed its own logger already
    if let Err(e) = logging::init_console_logger(log::LevelFilter::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e));
    }
}

/// Growing tree exposed to JavaScript.
///
/// The render loop calls `advance(dt)` once per frame, then uploads
/// `branch_vertices()` / `leaf_vertices()` (9 floats per vertex).
#[wasm_bindgen]
pub struct TreeGrowthEngine {
    tree: GrowingTree,
}

impl TreeGrowthEngine {
    fn with_tree(tree: GrowingTree) -> Self {
        Self {
            tree: tree.with_observer(LogObserver::default()),
        }
    }
}

impl Default for TreeGrowthEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TreeGrowthEngine {
    /// Create an engine with default parameters
    #[wasm_bindgen(constructor)]
    pub fn new() -> TreeGrowthEngine {
        Self::with_tree(GrowingTree::default())
    }

    /// Create an engine from a YAML parameter document
    #[wasm_bindgen]
    pub fn from_yaml(yaml: &str) -> Result<TreeGrowthEngine, JsValue> {
        let params = GrowthParams::from_yaml(yaml).map_err(|e| JsValue::from_str(&e))?;
        let tree = GrowingTree::new(params).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self::with_tree(tree))
    }

    /// Grow a new tree, discarding the current one
    #[wasm_bindgen]
    pub fn generate(&mut self) {
        self.tree.generate();
    }

    /// Advance growth by `dt` seconds and rebuild the vertex buffers
    #[wasm_bindgen]
    pub fn advance(&mut self, dt: f32) {
        self.tree.advance(dt);
    }

    /// Copy of the branch vertex buffer
    #[wasm_bindgen]
    pub fn branch_vertices(&self) -> Float32Array {
        Float32Array::from(self.tree.branch_vertices())
    }

    /// Copy of the leaf vertex buffer
    #[wasm_bindgen]
    pub fn leaf_vertices(&self) -> Float32Array {
        Float32Array::from(self.tree.leaf_vertices())
    }

    #[wasm_bindgen]
    pub fn branch_vertex_count(&self) -> u32 {
        self.tree.branch_vertex_count() as u32
    }

    #[wasm_bindgen]
    pub fn leaf_vertex_count(&self) -> u32 {
        self.tree.leaf_vertex_count() as u32
    }

    #[wasm_bindgen]
    pub fn branch_count(&self) -> u32 {
        self.tree.branch_count() as u32
    }

    #[wasm_bindgen]
    pub fn leaf_count(&self) -> u32 {
        self.tree.leaf_count() as u32
    }

    /// Elapsed over total growth time; exceeds 1 once fully grown
    #[wasm_bindgen]
    pub fn growth_progress(&self) -> f32 {
        self.tree.growth_progress()
    }

    #[wasm_bindgen]
    pub fn is_fully_grown(&self) -> bool {
        self.tree.is_fully_grown()
    }

    /// Counts and progress as a JSON object string. Non-finite values
    /// serialize as `null`.
    #[wasm_bindgen]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tree.stats())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize stats: {}", e)))
    }
}
