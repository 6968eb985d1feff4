//! Observable widget state

use crate::{EncodedFile, FileMetadata};
use std::sync::Arc;

/// Overlay visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
}

/// State owned by the preview controller
///
/// `values` and `files_info` always have the same length and order. Both
/// sit behind `Arc`s that are only ever replaced wholesale, which lets
/// [`ControlState::shallow_eq`] compare them by pointer.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub(crate) values: Arc<[EncodedFile]>,
    pub(crate) files_info: Arc<[FileMetadata]>,
    pub(crate) overlay: OverlayState,
    pub(crate) current_page: u32,
    pub(crate) total_pages: Option<u32>,
}

impl ControlState {
    pub(crate) fn new(values: Vec<EncodedFile>, files_info: Vec<FileMetadata>) -> Self {
        debug_assert_eq!(values.len(), files_info.len());
        Self {
            values: values.into(),
            files_info: files_info.into(),
            overlay: OverlayState::Closed,
            current_page: 1,
            total_pages: None,
        }
    }

    /// Same overlay state, new selection, page tracking reset
    pub(crate) fn with_selection(&self, values: Vec<EncodedFile>, files_info: Vec<FileMetadata>) -> Self {
        Self {
            overlay: self.overlay,
            ..Self::new(values, files_info)
        }
    }

    pub fn values(&self) -> &[EncodedFile] {
        &self.values
    }

    pub fn files_info(&self) -> &[FileMetadata] {
        &self.files_info
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay == OverlayState::Open
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Shallow equality: selections by identity, scalars by value
    pub fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
            && Arc::ptr_eq(&self.files_info, &other.files_info)
            && self.overlay == other.overlay
            && self.current_page == other.current_page
            && self.total_pages == other.total_pages
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
