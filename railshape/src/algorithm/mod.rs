mod assembly;
pub mod nearest;
mod search;

pub use assembly::{assemble_path, AssembledPath, MeasuredPoint};
pub use search::{bfs_shortest_path, PathStep, DEFAULT_MAX_HOPS};
