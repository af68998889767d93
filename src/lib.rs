pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
pub mod word;

pub use app::router;
pub use config::Config;
pub use heatmap::{build_heatmap, build_heatmap_at};
pub use models::{CalendarCell, Entry, Heatmap, MonthLabel};
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::EntryStore;
