use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const STAGING_SUFFIX: &str = "tmp";

/// `Konto_Adam.json` stages as `Konto_Adam.json.tmp`.
pub fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".");
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Replaces `target` with `contents` through a synced staging file and a
/// rename. On failure the staging file is removed and `target` is untouched.
pub fn replace_file(target: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = staging_path(target);
    let outcome = write_synced(&staging, contents)
        .and_then(|()| fs::rename(&staging, target).map_err(Into::into));
    if outcome.is_err() && staging.exists() {
        if let Err(err) = fs::remove_file(&staging) {
            tracing::warn!(path = %staging.display(), error = %err, "could not remove staging file");
        }
    }
    outcome
}

fn write_synced(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("/data/Konto_Adam.json")),
            PathBuf::from("/data/Konto_Adam.json.tmp")
        );
        assert_eq!(staging_path(Path::new("config")), PathBuf::from("config.tmp"));
    }

    #[test]
    fn replace_file_overwrites_and_cleans_up() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("Konto_Adam.json");
        replace_file(&target, "[]").unwrap();
        replace_file(&target, "null").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "null");
        assert!(!staging_path(&target).exists());
    }

    #[test]
    fn failed_rename_removes_staging_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let target = dir.path().join("Konto_Adam.json");
        fs::create_dir_all(target.join("blocker")).unwrap();

        assert!(replace_file(&target, "[]").is_err());
        assert!(!staging_path(&target).exists());
        assert!(target.join("blocker").is_dir());
    }
}
