//! Per-request working directories under the temp root, named by an
//! unguessable id so concurrent requests never collide. The guard removes the
//! directory on every exit path unless the request explicitly keeps it (the
//! favicon-only flow, which serves the file out of the directory later).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use uuid::Uuid;

use crate::error::Error;

pub struct WorkDir {
    id: String,
    path: PathBuf,
    keep: bool,
}

impl WorkDir {
    pub fn create(temp_root: &Path) -> Result<Self, Error> {
        fs::create_dir_all(temp_root)?;
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(16);
        let path = temp_root.join(&id);
        fs::create_dir(&path)?;
        Ok(Self {
            id,
            path,
            keep: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the guard, leaving the directory on disk for a later explicit
    /// cleanup call.
    pub fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(err) = fs::remove_dir_all(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), %err, "failed to remove working directory");
            }
        }
    }
}

/// Remove temp-root entries older than `older_than`: kept favicon-only
/// directories whose cleanup call never arrived, archives never downloaded,
/// and directories orphaned by a crash mid-request.
pub fn sweep_stale(temp_root: &Path, older_than: Duration) -> io::Result<usize> {
    let entries = match fs::read_dir(temp_root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err),
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries {
        let entry = entry?;
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let Ok(age) = now.duration_since(modified) else {
            continue;
        };
        if age < older_than {
            continue;
        }

        let result = if metadata.is_dir() {
            fs::remove_dir_all(entry.path())
        } else {
            fs::remove_file(entry.path())
        };
        match result {
            Ok(()) => removed += 1,
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), %err, "failed to sweep stale artifact");
            }
        }
    }

    Ok(removed)
}
