use tracing::{debug, warn};

use crate::report::image::BrandingImage;
use crate::report::layout::{DocumentOptions, lay_out};
use crate::report::model::AnalysisRecord;
use crate::report::pdf::{EmbeddedImage, write_pdf};

/// Render the paginated PDF report.
///
/// The branding image is best-effort: if it cannot be read as a JPEG the
/// report is produced without it.
pub fn render_document(
    record: &AnalysisRecord,
    branding: Option<&BrandingImage>,
    options: &DocumentOptions,
) -> Vec<u8> {
    let image = branding.and_then(|img| match img.probe() {
        Ok(info) => Some(EmbeddedImage {
            data: img.bytes(),
            info,
        }),
        Err(e) => {
            warn!(error = %e, "skipping branding image");
            None
        }
    });

    let pages = lay_out(record, options, image.is_some());
    debug!(pages = pages.len(), "laid out report");

    write_pdf(&pages, image)
}
