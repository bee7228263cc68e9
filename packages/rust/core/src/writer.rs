//! Writing the finished bundle to disk.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use docbundle_shared::{DocBundleError, Result};

/// Metadata for the written bundle file.
#[derive(Debug, Clone)]
pub struct OutputMeta {
    pub path: PathBuf,
    pub size_bytes: usize,
    pub sha256: String,
}

/// Write `contents` to `path` as UTF-8, replacing any existing file.
///
/// Missing parent directories are created. The bytes go to a sibling temp
/// file first and are renamed into place. On any failure the temp file is
/// removed, so a failed write never leaves a truncated file behind.
pub fn write_output(path: &Path, contents: &str) -> Result<OutputMeta> {
    let fail = |source: std::io::Error| DocBundleError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        fail(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;

    let parent = path.parent().unwrap_or(Path::new(""));
    std::fs::create_dir_all(parent).map_err(fail)?;

    let temp = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    write_temp(&temp, |file| file.write_all(contents.as_bytes())).map_err(fail)?;

    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(fail(e));
    }

    let mut hasher = Sha256::new();
    hasher.update(contents.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(path = %path.display(), size = contents.len(), "wrote output");

    Ok(OutputMeta {
        path: path.to_path_buf(),
        size_bytes: contents.len(),
        sha256,
    })
}

/// Create `temp`, fill it, and sync it. The file is removed if any step fails.
fn write_temp<F>(temp: &Path, fill: F) -> std::io::Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let result = File::create(temp).and_then(|mut file| {
        fill(&mut file)?;
        file.sync_all()
    });

    if result.is_err() {
        let _ = std::fs::remove_file(temp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_fill_removes_partial_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let temp = tmp.path().join(".bundle.txt.tmp");

        let err = write_temp(&temp, |file| {
            file.write_all(b"half a bund")?;
            Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"))
        })
        .unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::StorageFull);
        assert!(!temp.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn successful_fill_keeps_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let temp = tmp.path().join(".bundle.txt.tmp");

        write_temp(&temp, |file| file.write_all(b"done")).unwrap();
        assert_eq!(std::fs::read_to_string(&temp).unwrap(), "done");
    }

    #[test]
    fn writes_and_hashes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bundle.txt");

        let meta = write_output(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(meta.size_bytes, 5);
        assert_eq!(
            meta.sha256,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bundle.txt");
        std::fs::write(&path, "a much longer previous bundle").unwrap();

        write_output(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/nested/bundle.txt");

        write_output(&path, "ok").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_output(&tmp.path().join("bundle.txt"), "x").unwrap();

        for entry in std::fs::read_dir(tmp.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }
    }

    #[test]
    fn preserves_unicode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bundle.txt");
        let text = "Grüße — 日本語 🚀";

        let meta = write_output(&path, text).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
        assert_eq!(meta.size_bytes, text.len());
    }

    #[test]
    fn directory_target_is_output_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("taken");
        std::fs::create_dir(&target).unwrap();

        let err = write_output(&target, "x").unwrap_err();
        assert!(matches!(err, DocBundleError::OutputWrite { .. }));
        assert!(!tmp.path().join(".taken.tmp").exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn file_in_place_of_parent_is_output_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = write_output(&blocker.join("bundle.txt"), "x").unwrap_err();
        assert!(matches!(err, DocBundleError::OutputWrite { .. }));
    }
}
