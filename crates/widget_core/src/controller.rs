//! Preview controller: selection, overlay and page navigation

use crate::data_url::{self, EncodedFile};
use crate::preview::{PageCount, PageCountReporter, PreviewRenderer, PreviewTarget};
use crate::render::{self, RenderSnapshot};
use crate::{
    encoder, ChangeValue, ControlState, DecodeError, DecodePolicy, FieldValue, FileMetadata,
    OverlayState, PreviewKind, WidgetConfig, WidgetError, WidgetProps,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use widget_fs::FileSource;

/// Receives the new value after every successful selection
pub type ChangeHandler = Box<dyn FnMut(&ChangeValue)>;

/// Attributes handed to the native file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerAttributes {
    pub id: String,
    pub disabled: bool,
    pub autofocus: bool,
    pub multiple: bool,
    pub accept: Option<String>,
}

/// Owns the widget state and applies user actions to it
///
/// Every transition replaces the state in one step, so a render never sees
/// a half-applied selection.
pub struct PreviewController {
    props: WidgetProps,
    state: ControlState,
    on_change: Option<ChangeHandler>,

    /// Bumped on every committed selection; tags page-count reports
    generation: u64,
    page_tx: mpsc::UnboundedSender<PageCount>,
    page_rx: mpsc::UnboundedReceiver<PageCount>,
}

impl PreviewController {
    /// Create a controller from the form's initial value
    ///
    /// Missing slots are dropped. Malformed blobs fail construction under
    /// [`DecodePolicy::Strict`] and are skipped under [`DecodePolicy::Lenient`].
    pub fn new(
        props: WidgetProps,
        value: Option<FieldValue>,
        policy: DecodePolicy,
    ) -> Result<Self, WidgetError> {
        let slots = value.map(FieldValue::into_slots).unwrap_or_default();
        let (values, files_info) = decode_initial(slots, policy)?;
        let (page_tx, page_rx) = mpsc::unbounded_channel();

        tracing::debug!(id = %props.id, files = values.len(), "Widget initialized");

        Ok(Self {
            props,
            state: ControlState::new(values, files_info),
            on_change: None,
            generation: 0,
            page_tx,
            page_rx,
        })
    }

    pub fn from_config(config: &WidgetConfig) -> Result<Self, WidgetError> {
        config.validate()?;
        Self::new(config.props.clone(), config.value.clone(), config.decode_policy)
    }

    /// Register the owner's change callback
    pub fn with_change_handler(mut self, handler: impl FnMut(&ChangeValue) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn props(&self) -> &WidgetProps {
        &self.props
    }

    /// Replace the externally supplied configuration
    pub fn set_props(&mut self, props: WidgetProps) {
        self.props = props;
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn values(&self) -> &[EncodedFile] {
        self.state.values()
    }

    pub fn files_info(&self) -> &[FileMetadata] {
        self.state.files_info()
    }

    pub fn picker(&self) -> PickerAttributes {
        PickerAttributes {
            id: self.props.id.clone(),
            disabled: !self.props.picker_enabled(),
            autofocus: self.props.autofocus,
            multiple: self.props.multiple,
            accept: self.props.options.accept.clone(),
        }
    }

    /// Does `file` pass the picker's `accept` filter?
    pub fn accepts(&self, file: &dyn FileSource) -> bool {
        self.props.accept_filter().accepts(file.name(), file.mime_type())
    }

    /// Whether the "View" affordance should be offered
    pub fn can_preview(&self) -> bool {
        !self.state.is_empty()
    }

    // ========================================
    // Selection
    // ========================================

    /// Encode a new selection and commit it
    ///
    /// On success the previous selection is replaced wholesale, page tracking
    /// is reset and the new value is passed to the change handler (and
    /// returned). Single-file mode keeps only the first file. On failure
    /// nothing changes and nothing is emitted.
    pub async fn on_files_selected(
        &mut self,
        files: &[Arc<dyn FileSource>],
    ) -> Result<ChangeValue, WidgetError> {
        if !self.props.picker_enabled() {
            tracing::warn!(id = %self.props.id, "Selection ignored, picker is disabled");
            return Err(WidgetError::PickerDisabled);
        }

        let mut values = match encoder::encode_all(files).await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(id = %self.props.id, "Selection aborted: {}", e);
                return Err(e.into());
            }
        };
        if !self.props.multiple && values.len() > 1 {
            tracing::debug!(id = %self.props.id, "Single-file mode, keeping the first of {}", values.len());
            values.truncate(1);
        }
        let files_info = data_url::decode_all(values.iter().map(Some))?;

        self.generation += 1;
        self.state = self.state.with_selection(values, files_info);
        tracing::info!(id = %self.props.id, files = self.state.values.len(), "Selection committed");

        let change = ChangeValue::from_selection(&self.state.values, self.props.multiple);
        if let Some(handler) = self.on_change.as_mut() {
            handler(&change);
        }
        Ok(change)
    }

    // ========================================
    // Overlay
    // ========================================

    pub fn open(&mut self) {
        self.state.overlay = OverlayState::Open;
        tracing::debug!(id = %self.props.id, "Preview opened");
    }

    pub fn close(&mut self) {
        self.state.overlay = OverlayState::Closed;
        tracing::debug!(id = %self.props.id, "Preview closed");
    }

    /// Navigate the document preview, returning the effective page
    ///
    /// Ignored while the overlay is closed. Clamped to `1..=total_pages`
    /// once the page count is known.
    pub fn set_page(&mut self, page: u32) -> u32 {
        if self.state.overlay == OverlayState::Closed {
            tracing::debug!("Page change to {} ignored, preview closed", page);
            return self.state.current_page;
        }
        self.state.current_page = clamp_page(page, self.state.total_pages);
        self.state.current_page
    }

    pub fn next_page(&mut self) -> u32 {
        self.set_page(self.state.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> u32 {
        self.set_page(self.state.current_page.saturating_sub(1))
    }

    /// Record the page count parsed by the document renderer
    pub fn on_document_page_count_known(&mut self, total_pages: u32) {
        self.state.total_pages = Some(total_pages);
        if self.state.current_page > total_pages {
            self.state.current_page = total_pages.max(1);
        }
        tracing::debug!(total_pages, current = self.state.current_page, "Page count known");
    }

    /// Apply page counts reported since the last call
    ///
    /// Returns true if the state changed.
    pub fn poll_page_counts(&mut self) -> bool {
        let mut applied = false;
        while let Ok(count) = self.page_rx.try_recv() {
            applied |= self.apply_page_count(count);
        }
        applied
    }

    /// Wait for the next page count that belongs to the current selection
    pub async fn next_page_count(&mut self) -> Option<u32> {
        loop {
            let count = self.page_rx.recv().await?;
            if self.apply_page_count(count) {
                return Some(count.total);
            }
        }
    }

    fn apply_page_count(&mut self, count: PageCount) -> bool {
        if count.generation != self.generation {
            tracing::debug!("Discarding page count from a previous selection");
            return false;
        }
        self.on_document_page_count_known(count.total);
        true
    }

    // ========================================
    // Rendering
    // ========================================

    /// Route every stored file to its preview collaborator
    ///
    /// Nothing is routed while the overlay is closed. Unsupported types get
    /// no collaborator call.
    pub fn render_preview(&self, renderer: &mut dyn PreviewRenderer) -> Vec<PreviewTarget> {
        if !self.state.is_overlay_visible() {
            return Vec::new();
        }

        self.state
            .values
            .iter()
            .zip(self.state.files_info.iter())
            .map(|(file, info)| match info.kind {
                PreviewKind::Image => {
                    renderer.show_image(file, info);
                    PreviewTarget::Image
                }
                PreviewKind::Document => {
                    let page = self.state.current_page;
                    let reporter = PageCountReporter::new(self.generation, self.page_tx.clone());
                    renderer.show_document(file, info, page, reporter);
                    PreviewTarget::Document { page }
                }
                PreviewKind::Unsupported => PreviewTarget::Unsupported,
            })
            .collect()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::new(self.props.clone(), self.state.clone())
    }

    /// Has anything changed since `prev` was rendered?
    pub fn should_render(&self, prev: &RenderSnapshot) -> bool {
        render::should_render(prev, &self.props, &self.state)
    }
}

fn decode_initial(
    slots: Vec<Option<String>>,
    policy: DecodePolicy,
) -> Result<(Vec<EncodedFile>, Vec<FileMetadata>), DecodeError> {
    let mut values = Vec::with_capacity(slots.len());
    let mut files_info = Vec::with_capacity(slots.len());

    for blob in slots.into_iter().flatten() {
        match data_url::decode(&blob) {
            Ok(info) => {
                values.push(EncodedFile::from(blob));
                files_info.push(info);
            }
            Err(e) if policy == DecodePolicy::Lenient => {
                tracing::warn!("Skipping malformed initial value: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok((values, files_info))
}

fn clamp_page(page: u32, total_pages: Option<u32>) -> u32 {
    let page = page.max(1);
    match total_pages {
        Some(total) => page.min(total.max(1)),
        None => page,
    }
}
