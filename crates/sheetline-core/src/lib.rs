pub mod assemble;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod load;
pub mod normalize;
pub mod pipeline;
pub mod sanitize;
pub mod session;
pub mod types;

pub use assemble::assemble_document;
pub use builder::{build_event, build_events, BuildOutcome, RejectReason, RowRejection};
pub use config::{ConfigError, SheetlineConfig, TitleConfig};
pub use error::{PipelineError, Result};
pub use export::{
    extract_embedded_json, render_standalone_html, write_standalone_html, ExportError,
    ExportOptions,
};
pub use pipeline::{convert_bytes, convert_path, convert_rows, convert_sheet, Conversion, ConversionSummary};
pub use sanitize::{sanitize_document, to_plain_value, SanitizeError};
pub use session::TimelineSession;
pub use types::{
    Background, DateParts, EventText, MediaRef, TimelineDocument, TimelineEvent, TitleSlide,
};
