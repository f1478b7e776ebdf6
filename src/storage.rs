//! Durable range storage.
//!
//! The range store is kept as one JSON record under the [`RANGES_KEY`] key of a
//! small key-value store. Loading never fails from the caller's point of view,
//! and writes go through a [`Persister`] that coalesces bursts of updates on a
//! background thread.

use crate::range::RangeStore;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Key of the range record.
pub const RANGES_KEY: &str = "ranges";

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value storage the range store is loaded from and saved to.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store. Clones share contents, so a test can hand one clone to a
/// [`Persister`] and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Load the range store. A missing or unreadable record yields an empty store.
pub fn load_ranges(kv: &dyn KeyValueStore) -> RangeStore {
    match kv.get(RANGES_KEY) {
        Ok(Some(text)) => match RangeStore::from_json(&text) {
            Ok(store) => {
                log::info!("loaded {} stored range charts", store.contexts().count());
                store
            }
            Err(err) => {
                log::warn!("stored ranges are corrupt, starting empty: {err}");
                RangeStore::default()
            }
        },
        Ok(None) => {
            log::info!("no stored ranges, starting empty");
            RangeStore::default()
        }
        Err(err) => {
            log::warn!("could not read stored ranges, starting empty: {err}");
            RangeStore::default()
        }
    }
}

/// Serialize and write the range store immediately.
pub fn save_ranges(kv: &mut dyn KeyValueStore, ranges: &RangeStore) -> Result<(), StorageError> {
    let json = ranges.to_json()?;
    kv.set(RANGES_KEY, &json)
}

enum Message {
    Save(RangeStore),
    Flush(Sender<()>),
}

/// Debounced background writer.
///
/// Every [`Persister::schedule`] replaces the pending snapshot and restarts the
/// quiet window; the snapshot is written once no update arrived for a full
/// window. The last scheduled store is always the one that ends up persisted.
pub struct Persister {
    tx: Option<Sender<Message>>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Persister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Persister(running: {})", self.handle.is_some())
    }
}

impl Persister {
    pub fn spawn<S>(store: S, window: Duration) -> io::Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = mpsc::channel::<Message>();
        let handle = thread::Builder::new()
            .name("range-persister".into())
            .spawn(move || run_writer(store, rx, window))?;
        Ok(Self { tx: Some(tx), handle: Some(handle) })
    }

    /// Queue a snapshot for writing. Never blocks on I/O.
    pub fn schedule(&self, ranges: &RangeStore) {
        if let Some(tx) = &self.tx {
            if tx.send(Message::Save(ranges.clone())).is_err() {
                log::error!("range persister is gone, update not saved");
            }
        }
    }

    /// Write any pending snapshot now and wait for it.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Message::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Flush pending work and stop the writer thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        // dropping the sender lets the writer drain and exit
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("range persister thread panicked");
            }
        }
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_writer<S: KeyValueStore>(mut store: S, rx: mpsc::Receiver<Message>, window: Duration) {
    let mut pending: Option<RangeStore> = None;
    loop {
        let msg = if pending.is_some() {
            match rx.recv_timeout(window) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    write_pending(&mut store, &mut pending);
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(msg) => msg,
                Err(_) => break,
            }
        };
        match msg {
            Message::Save(ranges) => pending = Some(ranges),
            Message::Flush(ack) => {
                write_pending(&mut store, &mut pending);
                let _ = ack.send(());
            }
        }
    }
    write_pending(&mut store, &mut pending);
}

fn write_pending<S: KeyValueStore>(store: &mut S, pending: &mut Option<RangeStore>) {
    let Some(ranges) = pending.take() else {
        return;
    };
    match save_ranges(store, &ranges) {
        Ok(()) => log::debug!("persisted range store"),
        Err(err) => log::error!("failed to persist ranges: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{ActionKind, Position, TrainingContext};

    fn sample(hands: &str) -> RangeStore {
        RangeStore::default().apply_notation(
            TrainingContext::rfi(Position::Btn),
            ActionKind::Rfi,
            hands,
        )
    }

    #[test]
    fn missing_record_loads_empty() {
        let kv = MemoryStore::new();
        assert_eq!(load_ranges(&kv), RangeStore::default());
    }

    #[test]
    fn corrupt_record_loads_empty() {
        let kv = MemoryStore::with_entry(RANGES_KEY, "{not json");
        assert_eq!(load_ranges(&kv), RangeStore::default());
    }

    #[test]
    fn save_then_load() {
        let mut kv = MemoryStore::new();
        let ranges = sample("AA, KK");
        save_ranges(&mut kv, &ranges).unwrap();
        assert_eq!(load_ranges(&kv), ranges);
    }

    #[test]
    fn burst_is_coalesced_into_one_write_of_the_last_value() {
        let kv = MemoryStore::new();
        let persister = Persister::spawn(kv.clone(), Duration::from_secs(60)).unwrap();
        persister.schedule(&sample("AA"));
        persister.schedule(&sample("AA, KK"));
        persister.schedule(&sample("QQ"));
        persister.flush();
        assert_eq!(kv.writes(), 1);
        assert_eq!(load_ranges(&kv), sample("QQ"));
        persister.shutdown();
        assert_eq!(kv.writes(), 1);
    }

    #[test]
    fn quiet_window_triggers_write() {
        let kv = MemoryStore::new();
        let persister = Persister::spawn(kv.clone(), Duration::from_millis(10)).unwrap();
        persister.schedule(&sample("AKs"));
        thread::sleep(Duration::from_millis(200));
        assert_eq!(kv.writes(), 1);
        drop(persister);
        assert_eq!(kv.writes(), 1);
    }

    #[test]
    fn drop_flushes_pending_snapshot() {
        let kv = MemoryStore::new();
        {
            let persister = Persister::spawn(kv.clone(), Duration::from_secs(60)).unwrap();
            persister.schedule(&sample("JJ"));
        }
        assert_eq!(load_ranges(&kv), sample("JJ"));
    }

    /// Fails the first `failures` writes, then behaves like the inner store.
    #[derive(Clone)]
    struct FlakyStore {
        inner: MemoryStore,
        failures: Arc<AtomicUsize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                return Err(io::Error::other("disk full").into());
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn writer_survives_a_failed_write() {
        let kv = MemoryStore::new();
        let flaky = FlakyStore { inner: kv.clone(), failures: Arc::new(AtomicUsize::new(1)) };
        let persister = Persister::spawn(flaky, Duration::from_secs(60)).unwrap();
        persister.schedule(&sample("AA"));
        persister.flush();
        assert_eq!(kv.writes(), 0);
        assert_eq!(load_ranges(&kv), RangeStore::default());

        persister.schedule(&sample("KK"));
        persister.flush();
        assert_eq!(kv.writes(), 1);
        assert_eq!(load_ranges(&kv), sample("KK"));
        persister.shutdown();
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("range-trainer-test-{}", std::process::id()));
        let mut kv = FileStore::new(&dir);
        assert_eq!(kv.get("missing").unwrap(), None);
        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
        let _ = fs::remove_dir_all(&dir);
    }
}
