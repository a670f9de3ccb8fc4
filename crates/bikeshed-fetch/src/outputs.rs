use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ConvertError;

const HTML_EXTENSION: &str = "html";
const ERR_EXTENSION: &str = "txt";

/// Files derived from a single Bikeshed source.
///
/// For `D/X.bs` the rendered page is `D/X.html` and the error sidecar is
/// `D/X.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub source: PathBuf,
    pub html: PathBuf,
    pub err: PathBuf,
}

impl OutputPaths {
    /// Resolve `raw_path` to an absolute path and derive the sibling outputs.
    ///
    /// Symlinks are not followed and the file does not need to exist yet.
    pub fn derive<P: AsRef<Path>>(raw_path: P) -> Result<Self, ConvertError> {
        let raw_path = raw_path.as_ref();
        let source = std::path::absolute(raw_path).map_err(|e| ConvertError::InvalidPath {
            message: format!("cannot resolve {:?}: {}", raw_path, e),
        })?;

        let base_name = source.file_stem().ok_or_else(|| ConvertError::InvalidPath {
            message: format!("{:?} has no file name", raw_path),
        })?;
        let dir = source.parent().unwrap_or(Path::new(""));

        let html = dir.join(sibling_name(base_name, HTML_EXTENSION));
        let err = dir.join(sibling_name(base_name, ERR_EXTENSION));

        Ok(Self { source, html, err })
    }

    /// Overwrite the rendered HTML.
    pub fn write_html(&self, body: &[u8]) -> Result<(), ConvertError> {
        fs::write(&self.html, body)?;
        info!(path = %self.html.display(), bytes = body.len(), "wrote HTML output");
        Ok(())
    }

    /// Overwrite the error sidecar with the raw report.
    pub fn write_err(&self, body: &[u8]) -> Result<(), ConvertError> {
        fs::write(&self.err, body)?;
        info!(path = %self.err.display(), bytes = body.len(), "wrote error report");
        Ok(())
    }

    /// Delete an error sidecar left over from an earlier failing build.
    ///
    /// Returns `true` if a file was removed.
    pub fn remove_stale_err(&self) -> Result<bool, ConvertError> {
        match fs::remove_file(&self.err) {
            Ok(()) => {
                info!(path = %self.err.display(), "removed stale error report");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// `<base_name>.<extension>`, appended rather than substituted so dots
/// inside `base_name` survive.
fn sibling_name(base_name: &OsStr, extension: &str) -> OsString {
    let mut name = base_name.to_os_string();
    name.push(".");
    name.push(extension);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_sibling_paths() {
        let paths = OutputPaths::derive("/specs/css-grid/Overview.bs").unwrap();
        assert_eq!(paths.source, PathBuf::from("/specs/css-grid/Overview.bs"));
        assert_eq!(paths.html, PathBuf::from("/specs/css-grid/Overview.html"));
        assert_eq!(paths.err, PathBuf::from("/specs/css-grid/Overview.txt"));
    }

    #[test]
    fn test_derive_strips_only_last_extension() {
        let paths = OutputPaths::derive("/specs/index.src.bs").unwrap();
        assert_eq!(paths.html, PathBuf::from("/specs/index.src.html"));
        assert_eq!(paths.err, PathBuf::from("/specs/index.src.txt"));
    }

    #[test]
    fn test_derive_keeps_dotted_base_name() {
        let paths = OutputPaths::derive("/specs/css-fonts-4.draft.v2.bs").unwrap();
        assert_eq!(paths.html, PathBuf::from("/specs/css-fonts-4.draft.v2.html"));
        assert_eq!(paths.err, PathBuf::from("/specs/css-fonts-4.draft.v2.txt"));
    }

    #[test]
    fn test_derive_hidden_file() {
        let paths = OutputPaths::derive("/specs/.bs").unwrap();
        assert_eq!(paths.html, PathBuf::from("/specs/.bs.html"));
    }

    #[test]
    fn test_derive_without_extension() {
        let paths = OutputPaths::derive("/specs/Overview").unwrap();
        assert_eq!(paths.html, PathBuf::from("/specs/Overview.html"));
    }

    #[test]
    fn test_derive_relative_path_becomes_absolute() {
        let paths = OutputPaths::derive("Overview.bs").unwrap();
        assert!(paths.source.is_absolute());
        assert_eq!(
            paths.source,
            std::env::current_dir().unwrap().join("Overview.bs")
        );
        assert_eq!(paths.html.parent(), paths.source.parent());
    }

    #[test]
    fn test_derive_rejects_empty_path() {
        assert!(matches!(
            OutputPaths::derive(""),
            Err(ConvertError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_derive_rejects_root() {
        assert!(matches!(
            OutputPaths::derive("/"),
            Err(ConvertError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_write_and_remove_err() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::derive(dir.path().join("spec.bs")).unwrap();

        assert!(!paths.remove_stale_err().unwrap());

        paths.write_err(b"LINE 3: unknown biblio ref").unwrap();
        assert_eq!(fs::read(&paths.err).unwrap(), b"LINE 3: unknown biblio ref");

        assert!(paths.remove_stale_err().unwrap());
        assert!(!paths.err.exists());
        assert!(!paths.remove_stale_err().unwrap());
    }

    #[test]
    fn test_remove_stale_err_propagates_other_errors() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::derive(dir.path().join("spec.bs")).unwrap();

        // A directory in the sidecar's place cannot be removed with remove_file.
        fs::create_dir(&paths.err).unwrap();
        assert!(matches!(
            paths.remove_stale_err(),
            Err(ConvertError::Io(_))
        ));
    }

    #[test]
    fn test_write_html_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::derive(dir.path().join("spec.bs")).unwrap();

        fs::write(&paths.html, b"<p>old, much longer content</p>").unwrap();
        paths.write_html(b"<p>new</p>").unwrap();
        assert_eq!(fs::read(&paths.html).unwrap(), b"<p>new</p>");
    }
}
