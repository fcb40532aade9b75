//! Lock-scoped atomic mutation for the JSONL state file.
//!
//! Every mutating operation runs as one closure between lock acquire and
//! release: load, mutate, persist on success. Concurrent writers serialize
//! on the lock file; a busy lock is a retryable failure, never a partial
//! write.

use std::error::Error as StdError;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::memory::{StateStore, StateStoreError};

pub fn state_lock_path(state_path: &Path) -> PathBuf {
    let mut path: OsString = state_path.as_os_str().to_os_string();
    path.push(".lock");
    PathBuf::from(path)
}

#[derive(Debug)]
pub enum AtomicStateMutationError<E> {
    LockBusy { lock_path: String },
    LockIo { lock_path: String, message: String },
    Store(StateStoreError),
    Mutation(E),
}

impl<E> AtomicStateMutationError<E> {
    fn lock_busy(lock_path: &Path) -> Self {
        Self::LockBusy {
            lock_path: lock_path.display().to_string(),
        }
    }

    fn lock_io(lock_path: &Path, message: impl Into<String>) -> Self {
        Self::LockIo {
            lock_path: lock_path.display().to_string(),
            message: message.into(),
        }
    }
}

impl<E: Display> Display for AtomicStateMutationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockBusy { lock_path } => write!(f, "state lock busy: {lock_path}"),
            Self::LockIo { lock_path, message } => {
                write!(f, "failed to acquire state lock {lock_path}: {message}")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Mutation(err) => write!(f, "{err}"),
        }
    }
}

impl<E> StdError for AtomicStateMutationError<E> where
    E: Display + std::fmt::Debug + StdError + 'static
{
}

/// Execute one lock-scoped mutation against a state JSONL path.
///
/// The mutator returns `(value, changed)` where:
/// - `value` is returned to the caller
/// - `changed=true` persists the store to JSONL before lock release.
///
/// A mutator error persists nothing. A missing state file loads as an
/// empty store, so the first mutation bootstraps it.
pub fn mutate_state_jsonl<T, E, F>(
    path: impl AsRef<Path>,
    mutator: F,
) -> Result<T, AtomicStateMutationError<E>>
where
    F: FnOnce(&mut StateStore) -> Result<(T, bool), E>,
{
    let path = path.as_ref();
    let _guard = StateFileLockGuard::acquire(path).map_err(|err| match err {
        AtomicStateMutationError::LockBusy { lock_path } => {
            AtomicStateMutationError::LockBusy { lock_path }
        }
        AtomicStateMutationError::LockIo { lock_path, message } => {
            AtomicStateMutationError::LockIo { lock_path, message }
        }
        AtomicStateMutationError::Store(source) => AtomicStateMutationError::Store(source),
        AtomicStateMutationError::Mutation(unreachable) => match unreachable {},
    })?;

    let mut store =
        StateStore::load_jsonl_or_default(path).map_err(AtomicStateMutationError::Store)?;
    let (value, changed) = mutator(&mut store).map_err(AtomicStateMutationError::Mutation)?;
    if changed {
        store
            .save_jsonl(path)
            .map_err(AtomicStateMutationError::Store)?;
    }
    Ok(value)
}

struct StateFileLockGuard {
    lock_path: PathBuf,
    _file: File,
}

impl StateFileLockGuard {
    fn acquire(path: &Path) -> Result<Self, AtomicStateMutationError<std::convert::Infallible>> {
        let lock_path = state_lock_path(path);
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| AtomicStateMutationError::lock_io(&lock_path, e.to_string()))?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                let _ = writeln!(
                    file,
                    "pid={}\nutc={}",
                    std::process::id(),
                    Utc::now().to_rfc3339()
                );
                Ok(Self {
                    lock_path,
                    _file: file,
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(AtomicStateMutationError::lock_busy(&lock_path))
            }
            Err(err) => Err(AtomicStateMutationError::lock_io(
                &lock_path,
                err.to_string(),
            )),
        }
    }
}

impl Drop for StateFileLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}
