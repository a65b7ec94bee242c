use crate::error::{Result, StorageError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(err) => {
            static REPORTED: OnceLock<()> = OnceLock::new();
            if REPORTED.set(()).is_ok() {
                tracing::debug!(
                    target: "tether.storage",
                    error = %err,
                    "system time is before unix epoch; using 0 for now_millis"
                );
            }
            0
        }
    }
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `path` with `bytes` through a temp file + rename in the same directory.
///
/// Readers never observe a partially written file, whichever guard they hold.
/// Missing parent directories are created.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Err(StorageError::io(path, io::Error::other("path has no parent")));
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;

    let (tmp_path, mut file) =
        open_unique_tmp_file(path, parent).map_err(|err| StorageError::io(parent, err))?;
    let write_result = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);
    if let Err(err) = write_result {
        remove_tmp_best_effort(&tmp_path);
        return Err(StorageError::io(&tmp_path, err));
    }

    match rename_replacing(&tmp_path, path) {
        Ok(()) => {
            sync_dir_best_effort(parent);
            Ok(())
        }
        Err(err) => {
            remove_tmp_best_effort(&tmp_path);
            Err(StorageError::io(path, err))
        }
    }
}

fn rename_replacing(from: &Path, to: &Path) -> io::Result<()> {
    const MAX_RENAME_ATTEMPTS: usize = 1024;
    let mut attempts = 0usize;
    loop {
        match fs::rename(from, to) {
            Ok(()) => return Ok(()),
            Err(err) if cfg!(windows) && (err.kind() == io::ErrorKind::AlreadyExists || to.exists()) => {
                // `rename` does not overwrite on Windows; concurrent writers can race here.
                match fs::remove_file(to) {
                    Ok(()) => {}
                    Err(remove_err) if remove_err.kind() == io::ErrorKind::NotFound => {}
                    Err(remove_err) => return Err(remove_err),
                }
                attempts += 1;
                if attempts >= MAX_RENAME_ATTEMPTS {
                    return Err(err);
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// Persist a rename by syncing its directory. Only meaningful on unix.
fn sync_dir_best_effort(dir: &Path) {
    #[cfg(unix)]
    {
        static SYNC_DIR_ERROR_LOGGED: OnceLock<()> = OnceLock::new();
        match fs::File::open(dir).and_then(|dir| dir.sync_all()) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                if SYNC_DIR_ERROR_LOGGED.set(()).is_ok() {
                    tracing::debug!(
                        target: "tether.storage",
                        dir = %dir.display(),
                        error = %err,
                        "failed to sync directory"
                    );
                }
            }
        }
    }
    #[cfg(not(unix))]
    let _ = dir;
}

fn remove_tmp_best_effort(tmp_path: &Path) {
    if let Err(err) = fs::remove_file(tmp_path) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::debug!(
                target: "tether.storage",
                path = %tmp_path.display(),
                error = %err,
                "failed to remove temporary file"
            );
        }
    }
}

fn open_unique_tmp_file(dest: &Path, parent: &Path) -> io::Result<(PathBuf, fs::File)> {
    let file_name = dest
        .file_name()
        .ok_or_else(|| io::Error::other("destination path has no file name"))?;
    let pid = std::process::id();

    loop {
        let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(format!(".tmp.{pid}.{counter}"));
        let tmp_path = parent.join(tmp_name);

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => return Ok((tmp_path, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }
}
