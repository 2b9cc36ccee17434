//! Report synthesis: the validated record, its canonical export, and the
//! printable paginated document.

pub mod document;
pub mod export;
pub mod image;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod render;

pub use document::render_document;
pub use export::render_export;
pub use image::BrandingImage;
pub use layout::DocumentOptions;
pub use model::{AnalysisRecord, Scores};
