pub mod app;
pub mod counters;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod reader;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
