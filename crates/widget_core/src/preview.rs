//! Routing previewed files to external renderers

use crate::{EncodedFile, FileMetadata};
use tokio::sync::mpsc;

/// External collaborators that draw a preview inside the overlay
pub trait PreviewRenderer {
    /// Hand the blob to the image display
    fn show_image(&mut self, file: &EncodedFile, info: &FileMetadata);

    /// Hand the blob to the paginated-document renderer
    ///
    /// The renderer calls `page_count.report(n)` once it has parsed the
    /// document; it may do so later, from any task.
    fn show_document(
        &mut self,
        file: &EncodedFile,
        info: &FileMetadata,
        page: u32,
        page_count: PageCountReporter,
    );
}

/// Where one file was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTarget {
    Image,
    Document { page: u32 },
    /// No collaborator was called
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageCount {
    pub generation: u64,
    pub total: u32,
}

/// Callback handle given to the document renderer
///
/// Reports are tagged with the selection they belong to, so a count that
/// arrives after the user picked other files is discarded.
#[derive(Debug, Clone)]
pub struct PageCountReporter {
    generation: u64,
    tx: mpsc::UnboundedSender<PageCount>,
}

impl PageCountReporter {
    pub(crate) fn new(generation: u64, tx: mpsc::UnboundedSender<PageCount>) -> Self {
        Self { generation, tx }
    }

    pub fn report(&self, total_pages: u32) {
        let count = PageCount {
            generation: self.generation,
            total: total_pages,
        };
        if self.tx.send(count).is_err() {
            tracing::debug!("Widget dropped before page count {} arrived", total_pages);
        }
    }
}
