use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rerun::sink::MemorySinkStorage;
use rerun::{RecordingStream, RecordingStreamBuilder, RecordingStreamResult};

/// Decides where the recording of each scene goes once it is attached to a window.
///
/// Whatever the connector, setting `RERUN=off` in the environment disables all recordings.
#[derive(Clone, Debug, Default)]
pub enum Connector {
    /// Start a Rerun Viewer process (or reuse the one already listening) and stream to it.
    #[default]
    Spawn,

    /// Stream to a remote viewer, e.g. `rerun+http://127.0.0.1:9876/proxy`.
    Connect(String),

    /// Write one `<window>-<scene>.rrd` file per scene into this directory.
    Save(PathBuf),

    /// Keep everything in memory.
    Memory(MemoryRecordings),

    /// Drop everything.
    Disabled,
}

impl Connector {
    /// An in-memory connector, and a handle to inspect what it recorded.
    pub fn memory() -> (Self, MemoryRecordings) {
        let recordings = MemoryRecordings::default();
        (Self::Memory(recordings.clone()), recordings)
    }

    /// Creates the recording of `scene`, shown in `window`.
    pub fn connect(&self, window: &str, scene: &str) -> RecordingStreamResult<RecordingStream> {
        let builder = RecordingStreamBuilder::new(window).recording_id(scene);

        match self {
            Self::Spawn => builder.spawn(),

            Self::Connect(url) => {
                builder.connect_grpc_opts(url.clone(), rerun::default_flush_timeout())
            }

            Self::Save(dir) => builder.save(dir.join(format!("{window}-{scene}.rrd"))),

            Self::Memory(recordings) => {
                let (rec, storage) = builder.memory()?;
                recordings.insert(scene, rec.clone(), storage);
                Ok(rec)
            }

            Self::Disabled => Ok(RecordingStream::disabled()),
        }
    }
}

/// The in-memory storage of every scene recorded through [`Connector::Memory`].
#[derive(Clone, Default)]
pub struct MemoryRecordings {
    storages: Arc<Mutex<HashMap<String, (RecordingStream, MemorySinkStorage)>>>,
}

impl MemoryRecordings {
    fn insert(&self, scene: &str, rec: RecordingStream, storage: MemorySinkStorage) {
        self.storages.lock().insert(scene.to_owned(), (rec, storage));
    }

    pub fn contains(&self, scene: &str) -> bool {
        self.storages.lock().contains_key(scene)
    }

    pub fn storage(&self, scene: &str) -> Option<MemorySinkStorage> {
        self.storages
            .lock()
            .get(scene)
            .map(|(_, storage)| storage.clone())
    }

    /// Flushes the recording of `scene` and drops everything it logged so far.
    ///
    /// Returns the number of messages dropped, `0` for unknown scenes.
    pub fn drain(&self, scene: &str) -> usize {
        let Some((rec, storage)) = self.storages.lock().get(scene).cloned() else {
            return 0;
        };
        rec.flush_blocking();
        storage.take().len()
    }
}

impl std::fmt::Debug for MemoryRecordings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storages = self.storages.lock();
        let mut scenes: Vec<_> = storages.keys().collect();
        scenes.sort();
        f.debug_struct("MemoryRecordings")
            .field("scenes", &scenes)
            .finish()
    }
}
