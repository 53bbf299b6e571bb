//! `AssetStore` backed by a capability-scoped upload directory.
//!
//! All paths are resolved relative to a `cap_std::fs::Dir`, so a reference
//! can never name a file outside the upload directory. Blocking filesystem
//! calls run on `spawn_blocking` with the request trace id propagated.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::fs::{Dir, OpenOptions};
use cap_std::ambient_authority;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{AssetStore, AssetStoreError};
use crate::domain::{AssetRef, TraceId};

/// Collision suffixes tried before a save gives up.
const MAX_NAME_ATTEMPTS: u32 = 64;

/// Disk-backed asset store rooted at one directory.
pub struct CapStdAssetStore {
    dir: Arc<Dir>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl CapStdAssetStore {
    /// Open (creating if needed) the upload directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(
        path: &Path,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, AssetStoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|err| {
            AssetStoreError::io(format!("create {}: {err}", path.display()))
        })?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| AssetStoreError::io(format!("open {}: {err}", path.display())))?;
        Ok(Self {
            dir: Arc::new(dir),
            clock,
        })
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, AssetStoreError>
where
    F: FnOnce() -> Result<T, AssetStoreError> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::sync_scope(trace_id, task))
        .await
        .map_err(|err| AssetStoreError::io(format!("asset task failed: {err}")))?
}

/// Remove a partially written asset, logging when it stays behind.
fn discard_partial(dir: &Dir, asset: &AssetRef) -> bool {
    match dir.remove_file(asset.as_str()) {
        Ok(()) => true,
        Err(err) => {
            warn!(asset = %asset, error = %err, "partial asset left on disk");
            false
        }
    }
}

fn write_new(
    dir: &Dir,
    timestamp_millis: i64,
    original_name: &str,
    bytes: &[u8],
) -> Result<AssetRef, AssetStoreError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let asset = AssetRef::generate(timestamp_millis, attempt, original_name);
        let mut file = match dir.open_with(asset.as_str(), &options) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!(asset = %asset, "asset name taken; retrying");
                continue;
            }
            Err(err) => return Err(AssetStoreError::io(format!("create {asset}: {err}"))),
        };
        if let Err(err) = file.write_all(bytes).and_then(|()| file.sync_all()) {
            drop(file);
            discard_partial(dir, &asset);
            return Err(AssetStoreError::io(format!("write {asset}: {err}")));
        }
        return Ok(asset);
    }

    Err(AssetStoreError::io(format!(
        "no free asset name for '{original_name}' after {MAX_NAME_ATTEMPTS} attempts"
    )))
}

#[async_trait]
impl AssetStore for CapStdAssetStore {
    async fn save(&self, original_name: &str, bytes: Vec<u8>) -> Result<AssetRef, AssetStoreError> {
        let timestamp_millis = self.clock.utc().timestamp_millis();
        let original_name = original_name.to_owned();
        let dir = Arc::clone(&self.dir);
        run_blocking(move || write_new(&dir, timestamp_millis, &original_name, &bytes)).await
    }

    async fn fetch(&self, asset: &AssetRef) -> Result<Vec<u8>, AssetStoreError> {
        let asset = asset.clone();
        let dir = Arc::clone(&self.dir);
        run_blocking(move || match dir.read(asset.as_str()) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AssetStoreError::not_found(asset.as_str()))
            }
            Err(err) => Err(AssetStoreError::io(format!("read {asset}: {err}"))),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const NOW_MILLIS: i64 = 1_700_000_000_000;

    fn frozen_clock() -> Arc<dyn Clock + Send + Sync> {
        let now = Utc
            .timestamp_millis_opt(NOW_MILLIS)
            .single()
            .expect("valid timestamp");
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);
        Arc::new(clock)
    }

    #[fixture]
    fn upload_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn store(dir: &TempDir) -> CapStdAssetStore {
        CapStdAssetStore::open(&dir.path().join("uploads"), frozen_clock()).expect("open store")
    }

    #[rstest]
    fn partial_files_are_removed_and_failures_reported(upload_dir: TempDir) {
        let dir = Dir::open_ambient_dir(upload_dir.path(), ambient_authority()).expect("open dir");
        let asset = AssetRef::generate(NOW_MILLIS, 0, "cat.png");
        dir.write(asset.as_str(), b"partial").expect("write partial");

        assert!(discard_partial(&dir, &asset));
        assert!(!upload_dir.path().join(asset.as_str()).exists());
        assert!(!discard_partial(&dir, &asset));
    }

    #[rstest]
    #[tokio::test]
    async fn saved_bytes_are_fetched_verbatim(upload_dir: TempDir) {
        let store = store(&upload_dir);
        let bytes = vec![0x89, b'P', b'N', b'G', 0, 255];

        let asset = store.save("cat.png", bytes.clone()).await.expect("save");

        assert_eq!(asset.as_str(), "1700000000000-cat.png");
        assert_eq!(store.fetch(&asset).await.expect("fetch"), bytes);
        assert!(upload_dir.path().join("uploads").join(asset.as_str()).is_file());
    }

    #[rstest]
    #[tokio::test]
    async fn same_millisecond_saves_get_distinct_refs(upload_dir: TempDir) {
        let store = store(&upload_dir);

        let first = store.save("a.png", b"one".to_vec()).await.expect("first");
        let second = store.save("a.png", b"two".to_vec()).await.expect("second");

        assert_eq!(first.as_str(), "1700000000000-a.png");
        assert_eq!(second.as_str(), "1700000000000-1-a.png");
        assert_eq!(store.fetch(&first).await.expect("first bytes"), b"one");
        assert_eq!(store.fetch(&second).await.expect("second bytes"), b"two");
    }

    #[rstest]
    #[tokio::test]
    async fn client_paths_are_flattened(upload_dir: TempDir) {
        let store = store(&upload_dir);
        let asset = store
            .save("../../etc/passwd", b"x".to_vec())
            .await
            .expect("save");
        assert_eq!(asset.as_str(), "1700000000000-passwd");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_assets_are_not_found(upload_dir: TempDir) {
        let store = store(&upload_dir);
        let asset = AssetRef::parse("404-missing.png").expect("valid ref");
        let err = store.fetch(&asset).await.expect_err("missing");
        assert_eq!(err, AssetStoreError::not_found("404-missing.png"));
    }

    #[rstest]
    fn gives_up_after_exhausting_suffixes(upload_dir: TempDir) {
        let dir = Dir::open_ambient_dir(upload_dir.path(), ambient_authority()).expect("dir");
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = AssetRef::generate(1, attempt, "a.png");
            dir.write(name.as_str(), b"taken").expect("seed file");
        }
        let err = write_new(&dir, 1, "a.png", b"new").expect_err("no free name");
        assert!(matches!(err, AssetStoreError::Io { .. }));
    }
}
