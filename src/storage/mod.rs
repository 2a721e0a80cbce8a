//! Statement blob storage.
//!
//! Uploaded bank statements live in the `bank-statements` bucket under
//! `{user_id}/{upload_id}/{file_name}`. The store is an enum over
//! `object_store` backends so the rest of the crate never sees which
//! provider is underneath: S3 signs preview URLs natively, the in-memory
//! backend answers with a `data:` URL, and the local backend with a `file:`
//! URL. Durability is the provider's problem, not ours.

use crate::errors::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use futures::StreamExt;
use object_store::{
    ObjectMeta, ObjectStore, PutPayload,
    aws::{AmazonS3, AmazonS3Builder},
    local::LocalFileSystem,
    memory::InMemory,
    path::Path,
    signer::Signer,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{debug, instrument};
use url::Url;

/// Bucket (or prefix) all statements are stored under.
pub const STATEMENT_BUCKET: &str = "bank-statements";

/// Default signed-URL lifetime.
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Blob store for uploaded bank statements.
#[derive(Clone)]
pub enum StatementStore {
    /// Ephemeral in-memory store, used by tests and local hacking
    Memory(Arc<InMemory>),
    /// Local filesystem store rooted at a directory
    Local {
        /// The wrapped filesystem store
        store: Arc<LocalFileSystem>,
        /// Root directory the store was created over
        root: PathBuf,
    },
    /// Amazon S3 (or compatible) bucket
    Amazon(Arc<AmazonS3>),
}

impl StatementStore {
    /// Creates an in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::new(InMemory::new()))
    }

    /// Creates a local filesystem store rooted at `root`, creating the
    /// directory if needed.
    pub fn local(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        // Absolute root so file: preview URLs can be built later
        let root = root.canonicalize()?;
        let store = LocalFileSystem::new_with_prefix(&root)?;
        Ok(Self::Local {
            store: Arc::new(store),
            root,
        })
    }

    /// Creates an S3-backed store for [`STATEMENT_BUCKET`], with credentials
    /// and region taken from the environment.
    pub fn amazon() -> Result<Self> {
        let store = AmazonS3Builder::from_env()
            .with_bucket_name(STATEMENT_BUCKET)
            .build()?;
        Ok(Self::Amazon(Arc::new(store)))
    }

    /// The wrapped store as a generic `ObjectStore` handle.
    fn as_generic(&self) -> Arc<dyn ObjectStore> {
        match self {
            Self::Memory(store) => Arc::clone(store) as Arc<dyn ObjectStore>,
            Self::Local { store, .. } => Arc::clone(store) as Arc<dyn ObjectStore>,
            Self::Amazon(store) => Arc::clone(store) as Arc<dyn ObjectStore>,
        }
    }

    /// Stores raw statement bytes at `location`.
    #[instrument(skip(self, bytes))]
    pub async fn put(&self, location: &Path, bytes: Vec<u8>) -> Result<()> {
        debug!("Storing {} bytes at {location}", bytes.len());
        self.as_generic()
            .put(location, PutPayload::from(bytes))
            .await?;
        Ok(())
    }

    /// Downloads the statement bytes at `location`.
    #[instrument(skip(self))]
    pub async fn download(&self, location: &Path) -> Result<Vec<u8>> {
        let result = self.as_generic().get(location).await?;
        let bytes = result.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Lists every object stored under a user's prefix.
    #[instrument(skip(self))]
    pub async fn list_user(&self, user_id: &str) -> Result<Vec<ObjectMeta>> {
        let prefix = Path::from(user_id);
        let store = self.as_generic();
        let mut stream = store.list(Some(&prefix));

        let mut objects = Vec::new();
        while let Some(item) = stream.next().await {
            objects.push(item?);
        }
        Ok(objects)
    }

    /// Removes the object at `location`.
    #[instrument(skip(self))]
    pub async fn remove(&self, location: &Path) -> Result<()> {
        self.as_generic().delete(location).await?;
        Ok(())
    }

    /// Issues a time-limited read URL for `location`.
    ///
    /// S3 produces a real presigned URL whose expiry the provider enforces.
    /// The memory backend inlines the bytes as a `data:` URL and the local
    /// backend answers with a `file:` URL; neither expires, which matches
    /// their role as development stand-ins.
    #[instrument(skip(self))]
    pub async fn signed_url(&self, location: &Path, expires_in: Duration) -> Result<Url> {
        match self {
            Self::Amazon(store) => {
                let url = store
                    .signed_url(reqwest::Method::GET, location, expires_in)
                    .await?;
                Ok(url)
            }
            Self::Memory(_) => {
                let bytes = self.download(location).await?;
                let mime = content_type_for(location.as_ref());
                let data_url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
                Url::parse(&data_url).map_err(|e| Error::Config {
                    message: format!("Failed to build data URL: {e}"),
                })
            }
            Self::Local { root, .. } => {
                let full = root.join(location.as_ref());
                Url::from_file_path(&full).map_err(|()| Error::Config {
                    message: format!("Failed to build file URL for {}", full.display()),
                })
            }
        }
    }
}

/// Builds the canonical object path for an upload.
#[must_use]
pub fn statement_path(user_id: &str, upload_id: &str, file_name: &str) -> Path {
    Path::from(format!("{user_id}/{upload_id}/{file_name}"))
}

/// Best-effort content type from the file extension.
fn content_type_for(location: &str) -> &'static str {
    if location.to_ascii_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}
