use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<Mutex<FileStore>>,
    pub recent_limit: usize,
}

impl AppState {
    pub fn new(kv: FileStore, recent_limit: usize) -> Self {
        Self {
            kv: Arc::new(Mutex::new(kv)),
            recent_limit,
        }
    }
}
