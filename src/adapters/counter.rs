use crate::domain::ports::RequestCounter;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Durable request counter backed by a plain-integer file.
///
/// An absent or unparseable file reads as 0. The read-modify-write in
/// `increment` is serialized through a mutex so concurrent lookups never lose
/// an update; the process owns the counter file exclusively.
pub struct FileCounter {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_stored(&self) -> u64 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| contents.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RequestCounter for FileCounter {
    async fn increment(&self) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let next = self.read_stored() + 1;
        fs::write(&self.path, next.to_string()).map_err(|e| LookupError::CounterError {
            message: format!("failed to persist counter at {}: {}", self.path.display(), e),
        })?;

        Ok(next)
    }

    async fn read(&self) -> u64 {
        self.read_stored()
    }
}
