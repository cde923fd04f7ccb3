use tomatick_core::{Database, KvStore, MemoryStore};
use tracing::warn;

/// The on-disk store, or an in-memory one if it cannot be opened. Timer
/// sessions keep working either way; nothing is saved in the latter case.
pub fn open_store() -> Box<dyn KvStore> {
    match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            warn!(error = %e, "database unavailable, preferences will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}
