//! File content resolution for prompt and tool definition files

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::{RegistryError, Result};

/// How a prompt file's content should be interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// MCP-standard prompt result JSON
    Json,
    /// Base64-encoded image with the given MIME type
    Image(&'static str),
}

/// Read a UTF-8 file to a string
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        RegistryError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Locate a file in `dir` whose name without extension is `stem` and resolve
/// its content.
///
/// `.json` files return their text; image files return base64 data plus a
/// MIME type derived from the extension. Any other extension, or a missing
/// file, is an error.
pub fn read_by_stem(dir: impl AsRef<Path>, stem: &str) -> Result<(FileKind, String)> {
    let dir = dir.as_ref();
    let mut unsupported: Option<PathBuf> = None;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s == stem)
            .unwrap_or(false);
        if !matches {
            continue;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => return Ok((FileKind::Json, read_file(&path)?)),
            _ => {
                if let Some(mime) = image_mime(&path) {
                    return Ok((FileKind::Image(mime), read_image_base64(&path)?));
                }
                unsupported = Some(path);
            }
        }
    }

    match unsupported {
        Some(path) => Err(RegistryError::UnsupportedPromptFile(
            path.display().to_string(),
        )),
        None => Err(RegistryError::PromptFileNotFound(format!(
            "{}/{}",
            dir.display(),
            stem
        ))),
    }
}

/// MIME type for supported image extensions
pub fn image_mime(path: impl AsRef<Path>) -> Option<&'static str> {
    match path.as_ref().extension().and_then(|e| e.to_str()) {
        Some("png") => Some("image/png"),
        Some("jpg") | Some("jpeg") => Some("image/jpeg"),
        _ => None,
    }
}

/// Read a file and base64-encode its raw bytes
pub fn read_image_base64(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("greeting.json"), r#"{"messages":[]}"#).unwrap();
        // 1x1 transparent PNG
        let png = base64::engine::general_purpose::STANDARD
            .decode("iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==")
            .unwrap();
        fs::write(dir.path().join("logo.png"), png).unwrap();
        fs::write(dir.path().join("notes.txt"), "plain").unwrap();
        dir
    }

    #[test]
    fn resolves_json_by_stem() {
        let dir = fixture_dir();
        let (kind, content) = read_by_stem(dir.path(), "greeting").unwrap();
        assert_eq!(kind, FileKind::Json);
        assert_eq!(content, r#"{"messages":[]}"#);
    }

    #[test]
    fn resolves_image_with_mime_type() {
        let dir = fixture_dir();
        let (kind, data) = read_by_stem(dir.path(), "logo").unwrap();
        assert_eq!(kind, FileKind::Image("image/png"));
        assert!(data.starts_with("iVBOR"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = fixture_dir();
        let err = read_by_stem(dir.path(), "notes").unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedPromptFile(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = fixture_dir();
        let err = read_by_stem(dir.path(), "absent").unwrap_err();
        assert!(matches!(err, RegistryError::PromptFileNotFound(_)));
    }

    #[test]
    fn write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tool").join("tool-list.json");
        write_file(&path, "[]").unwrap();
        assert_eq!(read_file(&path).unwrap(), "[]");
    }
}
