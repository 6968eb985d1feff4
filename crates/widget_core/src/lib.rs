//! File upload widget core
//!
//! This crate contains:
//! - Data-URL codec with embedded file names
//! - Concurrent file encoder
//! - Preview controller (selection, overlay, page navigation)
//! - Render gate
//! - Configuration
//! - Error types

pub mod accept;
pub mod config;
pub mod controller;
pub mod data_url;
pub mod encoder;
pub mod error;
pub mod metadata;
pub mod preview;
pub mod render;
pub mod state;
pub mod value;

pub use accept::AcceptFilter;
pub use config::{DecodePolicy, PreviewConfig, WidgetConfig, WidgetOptions, WidgetProps};
pub use controller::{ChangeHandler, PickerAttributes, PreviewController};
pub use data_url::{decode, decode_all, decode_payload, encode_bytes, DecodedFile, EncodedFile};
pub use encoder::{encode, encode_all};
pub use error::{DecodeError, ReadError, WidgetError};
pub use metadata::{files_info_listing, FileMetadata, PreviewKind};
pub use preview::{PageCountReporter, PreviewRenderer, PreviewTarget};
pub use render::{should_render, RenderSnapshot};
pub use state::{ControlState, OverlayState};
pub use value::{ChangeValue, FieldValue};

pub use widget_fs::{FileSource, LocalFile, MemoryFile};
