//! Durable boolean flag storage.
//!
//! The engine needs exactly one durable fact: whether this installation
//! has seen the tour before. [`FlagStore`] is the two-operation contract
//! for it; a key that was never written reads as `true` ("first run").
//!
//! # Design Invariants
//!
//! 1. **Default-true reads**: a missing key, missing file or corrupt file
//!    all read as the default. Corruption is logged, never propagated
//!    from `get`.
//! 2. **Atomic writes**: the file backend writes `{path}.tmp` and renames
//!    over the target, so a crash mid-write leaves the previous file
//!    intact.
//! 3. **Idempotence**: reading and writing the same value repeatedly is
//!    observably identical to doing it once.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error writing to a flag store.
#[derive(Debug)]
pub enum FlagStoreError {
    /// I/O failure creating, writing or renaming the backing file.
    Io(std::io::Error),
    /// The flag map could not be encoded.
    Serialization(String),
}

impl fmt::Display for FlagStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FlagStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(_) => None,
        }
    }
}

impl From<std::io::Error> for FlagStoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Durable key/value boolean store.
///
/// Access is single-threaded and both operations are idempotent, so
/// implementations need no locking beyond what their backing medium
/// requires.
pub trait FlagStore {
    /// Current value for `key`; `true` when the key was never written.
    fn get(&self, key: &str) -> bool;

    /// Durably set `key` to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium rejects the write. The
    /// in-memory value semantics are unaffected by a failed write.
    fn set(&mut self, key: &str, value: bool) -> Result<(), FlagStoreError>;
}

/// In-memory flag store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    flags: HashMap<String, bool>,
}

impl MemoryFlagStore {
    /// Empty store: every key reads as `true`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(true)
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), FlagStoreError> {
        self.flags.insert(key.to_string(), value);
        Ok(())
    }
}

/// On-disk JSON format for [`FileFlagStore`].
#[derive(Serialize, Deserialize)]
struct FlagFile {
    /// Format version for future migrations.
    format_version: u32,
    /// Flag values by key.
    flags: HashMap<String, bool>,
}

impl FlagFile {
    const FORMAT_VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            flags: HashMap::new(),
        }
    }
}

/// File-backed flag store using a small JSON document.
///
/// # File Format
///
/// ```json
/// {
///   "format_version": 1,
///   "flags": { "tour.first-run": false }
/// }
/// ```
///
/// # Atomic Writes
///
/// 1. Write the full document to `{path}.tmp`
/// 2. Flush
/// 3. Rename `{path}.tmp` over `{path}`
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    /// Store backed by `path`. The file need not exist; it is created on
    /// first write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the default location for an application:
    /// `$XDG_STATE_HOME/{app_name}/flags.json`, falling back to
    /// `~/.local/state`, then the current directory.
    #[must_use]
    pub fn default_for_app(app_name: &str) -> Self {
        let base = state_dir_or_fallback();
        Self {
            path: base.join(app_name).join("flags.json"),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn load(&self) -> FlagFile {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            // First run: no file yet.
            Err(_) => return FlagFile::new(),
        };
        match serde_json::from_slice::<FlagFile>(&bytes) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e,
                    "corrupt flag file, treating all flags as unset");
                FlagFile::new()
            }
        }
    }
}

fn state_dir_or_fallback() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(state_home);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("state");
    }
    PathBuf::from(".")
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> bool {
        self.load().flags.get(key).copied().unwrap_or(true)
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), FlagStoreError> {
        let mut file = self.load();
        file.flags.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| FlagStoreError::Serialization(e.to_string()))?;
        let tmp = self.temp_path();
        let mut out = fs::File::create(&tmp)?;
        out.write_all(&json)?;
        out.flush()?;
        drop(out);
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), key, value, "flag written");
        Ok(())
    }
}
