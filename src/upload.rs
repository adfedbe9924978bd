//! Uploaded image files and the image-type filter applied to every batch.

use std::path::Path;
use std::sync::Arc;

/// Extensions offered by the pickers and advertised by the drop zone.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dropped file '{0}' carried neither bytes nor a path")]
    MissingContent(String),
}

/// A file handed to the app by a drop or a picker.
#[derive(Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Content type; empty when unknown.
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadedFile {
    /// Builds a file, inferring the MIME type from the name when `mime` is empty.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mut mime = mime.into();
        if mime.is_empty() {
            mime = mime_from_name(&name).unwrap_or_default().to_owned();
        }
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk (native pickers and drops).
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = std::fs::read(path).map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, String::new(), bytes))
    }

    /// Converts an egui drop. Web drops carry bytes and a MIME type, native drops a path.
    pub fn from_dropped(file: &egui::DroppedFile) -> Result<Self, UploadError> {
        if let Some(bytes) = &file.bytes {
            return Ok(Self::new(file.name.clone(), file.mime.clone(), Arc::clone(bytes)));
        }
        match &file.path {
            Some(path) => {
                let mut uploaded = Self::from_path(path)?;
                if !file.mime.is_empty() {
                    uploaded.mime.clone_from(&file.mime);
                }
                Ok(uploaded)
            }
            None => Err(UploadError::MissingContent(file.name.clone())),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// MIME type for the supported image extensions.
pub fn mime_from_name(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Keeps the image-typed files of a batch, preserving order.
pub fn filter_images(batch: impl IntoIterator<Item = UploadedFile>) -> Vec<UploadedFile> {
    batch
        .into_iter()
        .filter(|file| {
            let keep = file.is_image();
            if !keep {
                log::debug!("Skipping non-image file '{}' ({:?})", file.name, file.mime);
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> UploadedFile {
        UploadedFile::new(name, mime, vec![0u8; 4])
    }

    #[test]
    fn mime_is_inferred_from_extension_when_missing() {
        assert_eq!(file("a.PNG", "").mime, "image/png");
        assert_eq!(file("b.jpeg", "").mime, "image/jpeg");
        assert_eq!(file("c.jpg", "").mime, "image/jpeg");
        assert_eq!(file("d.gif", "").mime, "image/gif");
        assert_eq!(file("notes.txt", "").mime, "");
        assert_eq!(file("no_extension", "").mime, "");
    }

    #[test]
    fn explicit_mime_wins_over_extension() {
        let f = file("photo.png", "text/plain");
        assert_eq!(f.mime, "text/plain");
        assert!(!f.is_image());

        let f = file("blob", "image/webp");
        assert!(f.is_image());
    }

    #[test]
    fn filter_keeps_exactly_the_image_subset_in_order() {
        let batch = vec![
            file("a.png", ""),
            file("readme.md", "text/markdown"),
            file("b.gif", ""),
            file("archive.zip", ""),
            file("c", "image/jpeg"),
        ];
        let kept = filter_images(batch);
        let names: Vec<_> = kept.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.gif", "c"]);
    }

    #[test]
    fn filter_of_non_images_is_empty() {
        let batch = vec![file("a.txt", ""), file("b.pdf", "application/pdf")];
        assert!(filter_images(batch).is_empty());
    }

    #[test]
    fn dropped_bytes_are_used_directly() {
        let dropped = egui::DroppedFile {
            name: "pic.gif".to_owned(),
            mime: "image/gif".to_owned(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            ..Default::default()
        };
        let f = UploadedFile::from_dropped(&dropped).unwrap();
        assert_eq!(f.mime, "image/gif");
        assert_eq!(&*f.bytes, &[1, 2, 3]);
    }

    #[test]
    fn dropped_without_content_is_an_error() {
        let dropped = egui::DroppedFile {
            name: "ghost.png".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            UploadedFile::from_dropped(&dropped),
            Err(UploadError::MissingContent(name)) if name == "ghost.png"
        ));
    }

    #[test]
    fn missing_path_reports_read_error() {
        let err = UploadedFile::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, UploadError::Read { .. }));
    }
}
