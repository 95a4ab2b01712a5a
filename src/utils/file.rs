//! File helpers: locked writes, path building and lock files

use crate::error::{ErrorChain, ErrorContext, Result};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// Write data to a file under an exclusive lock
///
/// Appends unless `overwrite` is set. Returns `false` on any failure; the
/// cause is logged. Use [`try_file_write`] to get the error itself.
///
/// # Example
/// ```rust,ignore
/// if !file_write("/var/log/app/audit.log", b"login\n", false) {
///     // fall back to stderr
/// }
/// ```
pub fn file_write<P: AsRef<Path>>(path: P, data: &[u8], overwrite: bool) -> bool {
    match try_file_write(path.as_ref(), data, overwrite) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("File write failed: {}", ErrorChain::new(&e));
            false
        }
    }
}

/// Write data to a file under an exclusive lock, reporting errors
///
/// The file is created if missing. The lock is held until the data is
/// written, so concurrent writers never interleave.
pub fn try_file_write<P: AsRef<Path>>(path: P, data: &[u8], overwrite: bool) -> Result<()> {
    let path = path.as_ref();

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", path.display()))?;

    // Truncate only once the lock is ours
    let written = write_locked(&mut file, data, overwrite);
    let unlocked = FileExt::unlock(&file);

    written.with_context(|| format!("Failed to write {}", path.display()))?;
    unlocked.with_context(|| format!("Failed to unlock {}", path.display()))?;

    log::trace!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn write_locked(file: &mut File, data: &[u8], overwrite: bool) -> std::io::Result<()> {
    if overwrite {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
    } else {
        file.seek(SeekFrom::End(0))?;
    }
    file.write_all(data)?;
    file.flush()
}

/// Join path parts with the platform separator
///
/// # Example
/// ```rust,ignore
/// assert_eq!(build_path(&["var", "log", "app.log"]), "var/log/app.log");
/// ```
pub fn build_path<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| part.as_ref())
        .collect::<Vec<_>>()
        .join(MAIN_SEPARATOR_STR)
}

/// Exclusive lock on `<name>.lock`, released when dropped
///
/// The lock file itself is left in place.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    file: File,
}

impl FileLock {
    /// Try to take the lock without blocking
    ///
    /// Returns `Ok(None)` when the lock is already held, whether by another
    /// process or by another handle in this one.
    pub fn try_acquire<P: AsRef<Path>>(name: P) -> Result<Option<Self>> {
        let path = lock_path(name.as_ref());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open lock file {}", path.display()))?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                log::debug!("Acquired lock {}", path.display());
                Ok(Some(Self { path, file }))
            }
            Err(e) => {
                log::debug!("Lock {} is held elsewhere: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Path of the `.lock` file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

fn lock_path(name: &Path) -> PathBuf {
    let mut path = OsString::from(name.as_os_str());
    path.push(".lock");
    PathBuf::from(path)
}
