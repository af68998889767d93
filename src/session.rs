use crate::errors::StorageError;
use crate::storage::KeyValueStore;
use tracing::info;
use uuid::Uuid;

pub const USER_ID_KEY: &str = "daybit_user_id";
const ENTRIES_KEY_PREFIX: &str = "daybit_entries_";

/// Returns the persisted user id, generating and storing one on first use.
pub fn user_id<K: KeyValueStore>(kv: &mut K) -> Result<String, StorageError> {
    if let Some(id) = kv.get(USER_ID_KEY).filter(|id| !id.is_empty()) {
        return Ok(id);
    }
    let id = format!("user_{}", Uuid::new_v4().simple());
    kv.set(USER_ID_KEY, id.clone())?;
    info!(user_id = %id, "generated new session id");
    Ok(id)
}

/// Storage key under which the current session's entries live.
pub fn session_key<K: KeyValueStore>(kv: &mut K) -> Result<String, StorageError> {
    Ok(entries_key(&user_id(kv)?))
}

pub fn entries_key(user_id: &str) -> String {
    format!("{ENTRIES_KEY_PREFIX}{user_id}")
}

/// Drops the session's entries and its id. The next `session_key` call starts a fresh session.
pub fn reset_session<K: KeyValueStore>(kv: &mut K) -> Result<(), StorageError> {
    if let Some(id) = kv.get(USER_ID_KEY) {
        kv.remove(&entries_key(&id))?;
        kv.remove(USER_ID_KEY)?;
        info!(user_id = %id, "session reset");
    }
    Ok(())
}
