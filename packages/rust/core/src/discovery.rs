//! Locating and reading markdown documents under a root directory.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use docbundle_markdown::extract_title;
use docbundle_shared::{DocBundleError, Result, SourceDocument};

/// A markdown file found under the documentation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedDocument {
    /// Full path on disk.
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated.
    pub relative_path: String,
}

/// Recursively list files under `root` whose name ends in one of `extensions`.
///
/// The result is sorted by `/`-separated relative path, so `b.md` precedes
/// `b/c.md` and the order is stable across runs. Entries that cannot be read
/// are logged and skipped.
#[instrument(skip(extensions), fields(root = %root.display()))]
pub fn locate_documents(root: &Path, extensions: &[String]) -> Result<Vec<LocatedDocument>> {
    if !root.is_dir() {
        return Err(DocBundleError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let suffixes: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .collect();

    let mut documents = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // Symlinked files count; symlinked directories are not descended.
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !suffixes.iter().any(|s| name.ends_with(s.as_str())) {
            continue;
        }

        let relative_path = relative_display(root, entry.path());
        debug!(path = %relative_path, "located document");

        documents.push(LocatedDocument {
            path: entry.into_path(),
            relative_path,
        });
    }

    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(documents)
}

/// Read a located document and derive its title.
pub fn read_document(located: &LocatedDocument) -> Result<SourceDocument> {
    let content =
        std::fs::read_to_string(&located.path).map_err(|e| DocBundleError::UnreadableFile {
            path: located.path.clone(),
            source: e,
        })?;

    let title = extract_title(&content);

    Ok(SourceDocument {
        relative_path: located.relative_path.clone(),
        content,
        title,
    })
}

/// Render `path` relative to `root` with `/` separators on every platform.
fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md() -> Vec<String> {
        vec!["md".into()]
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn relative_paths(docs: &[LocatedDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.relative_path.as_str()).collect()
    }

    #[test]
    fn locates_markdown_recursively_in_sorted_order() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "d.md", "");
        write(tmp.path(), "b/c.md", "");
        write(tmp.path(), "a.md", "");
        write(tmp.path(), "b/a/z.md", "");
        write(tmp.path(), "notes.txt", "");
        write(tmp.path(), "b/image.png", "");

        let docs = locate_documents(tmp.path(), &md()).unwrap();
        assert_eq!(relative_paths(&docs), vec!["a.md", "b/a/z.md", "b/c.md", "d.md"]);
    }

    #[test]
    fn ordering_is_stable_across_runs() {
        let tmp = tempfile::tempdir().unwrap();
        for rel in ["zeta.md", "alpha/one.md", "Beta.md", "alpha/two.md", "mid.md"] {
            write(tmp.path(), rel, "x");
        }

        let first = locate_documents(tmp.path(), &md()).unwrap();
        let second = locate_documents(tmp.path(), &md()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            relative_paths(&first),
            vec!["Beta.md", "alpha/one.md", "alpha/two.md", "mid.md", "zeta.md"]
        );
    }

    #[test]
    fn sibling_files_sort_before_same_named_directories() {
        let tmp = tempfile::tempdir().unwrap();
        for rel in ["b/c.md", "b.md", "a/x.md", "a-b.md"] {
            write(tmp.path(), rel, "x");
        }

        let docs = locate_documents(tmp.path(), &md()).unwrap();
        let paths = relative_paths(&docs);
        assert_eq!(paths, vec!["a-b.md", "a/x.md", "b.md", "b/c.md"]);

        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn extension_match_is_on_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "guide.md", "");
        write(tmp.path(), "guide.mdx", "");
        write(tmp.path(), "readme.markdown", "");

        let docs = locate_documents(tmp.path(), &md()).unwrap();
        assert_eq!(relative_paths(&docs), vec!["guide.md"]);

        let exts = vec![".md".to_string(), "markdown".to_string()];
        let docs = locate_documents(tmp.path(), &exts).unwrap();
        assert_eq!(relative_paths(&docs), vec!["guide.md", "readme.markdown"]);
    }

    #[test]
    fn directories_named_like_markdown_are_traversed_not_listed() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "odd.md/inner.md", "");

        let docs = locate_documents(tmp.path(), &md()).unwrap();
        assert_eq!(relative_paths(&docs), vec!["odd.md/inner.md"]);
    }

    #[test]
    fn missing_root_is_source_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = locate_documents(&tmp.path().join("nope"), &md()).unwrap_err();
        assert!(matches!(err, DocBundleError::SourceNotFound { .. }));
    }

    #[test]
    fn file_root_is_source_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "a.md", "# A");
        let err = locate_documents(&tmp.path().join("a.md"), &md()).unwrap_err();
        assert!(matches!(err, DocBundleError::SourceNotFound { .. }));
    }

    #[test]
    fn empty_root_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(locate_documents(tmp.path(), &md()).unwrap().is_empty());
    }

    #[test]
    fn read_document_extracts_title() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "guide/setup.md", "# Setup Guide\n\nSteps.");

        let docs = locate_documents(tmp.path(), &md()).unwrap();
        let doc = read_document(&docs[0]).unwrap();
        assert_eq!(doc.relative_path, "guide/setup.md");
        assert_eq!(doc.title, "Setup Guide");
        assert_eq!(doc.char_count(), 21);
    }

    #[test]
    fn read_document_rejects_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let located = LocatedDocument {
            path,
            relative_path: "bad.md".into(),
        };
        let err = read_document(&located).unwrap_err();
        assert!(matches!(err, DocBundleError::UnreadableFile { .. }));
        assert!(!err.is_fatal());
    }
}
