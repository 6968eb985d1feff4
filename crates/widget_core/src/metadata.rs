//! Descriptive metadata derived from an encoded file

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which preview collaborator a file is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// Shown by the image collaborator
    Image,
    /// Paginated document (PDF)
    Document,
    /// No preview
    Unsupported,
}

impl PreviewKind {
    /// Route by the type's essence, ignoring parameters
    pub fn from_mime(mime_type: &str) -> Self {
        let essence = mime_type.split(';').next().unwrap_or_default();
        match essence.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/png" | "image/gif" | "image/bmp" => PreviewKind::Image,
            "application/pdf" => PreviewKind::Document,
            _ => PreviewKind::Unsupported,
        }
    }
}

/// Name, size and type of one encoded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub kind: PreviewKind,
}

impl FileMetadata {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        Self {
            name: name.into(),
            size,
            kind: PreviewKind::from_mime(&mime_type),
            mime_type,
        }
    }
}

impl fmt::Display for FileMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} bytes)", self.name, self.mime_type, self.size)
    }
}

/// One line per file, or `None` when nothing is selected
pub fn files_info_listing(files_info: &[FileMetadata]) -> Option<String> {
    if files_info.is_empty() {
        return None;
    }
    let lines: Vec<String> = files_info.iter().map(ToString::to_string).collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_kind_from_mime() {
        assert_eq!(PreviewKind::from_mime("image/png"), PreviewKind::Image);
        assert_eq!(PreviewKind::from_mime("IMAGE/JPEG"), PreviewKind::Image);
        assert_eq!(PreviewKind::from_mime("image/bmp"), PreviewKind::Image);
        assert_eq!(PreviewKind::from_mime("application/pdf"), PreviewKind::Document);
        assert_eq!(PreviewKind::from_mime("application/pdf;version=1.7"), PreviewKind::Document);
        // Only the four raster types have an image collaborator
        assert_eq!(PreviewKind::from_mime("image/webp"), PreviewKind::Unsupported);
        assert_eq!(PreviewKind::from_mime("text/plain"), PreviewKind::Unsupported);
        assert_eq!(PreviewKind::from_mime(""), PreviewKind::Unsupported);
    }

    #[test]
    fn test_files_info_listing() {
        assert_eq!(files_info_listing(&[]), None);

        let infos = vec![
            FileMetadata::new("a b.png", 200, "image/png"),
            FileMetadata::new("doc.pdf", 1024, "application/pdf"),
        ];
        assert_eq!(
            files_info_listing(&infos).unwrap(),
            "a b.png (image/png, 200 bytes)\ndoc.pdf (application/pdf, 1024 bytes)"
        );
    }
}
