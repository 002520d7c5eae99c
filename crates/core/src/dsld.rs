//! Label page → PDF URL conversion for the Dietary Supplement Label Database.

/// Prefix of a label page URL as it appears in scorer output.
pub const LABEL_PREFIX: &str = "https://dsld.od.nih.gov/label/";

/// Prefix of the PDF retrieval endpoint.
pub const PDF_PREFIX: &str = "https://api.ods.od.nih.gov/dsld/s3/pdf/";

const PDF_SUFFIX: &str = ".pdf";

/// Map a label page URL to the URL serving its PDF.
///
/// `https://dsld.od.nih.gov/label/ABC123` and
/// `https://dsld.od.nih.gov/label/ABC123.pdf` both map to
/// `https://api.ods.od.nih.gov/dsld/s3/pdf/ABC123.pdf`. Returns `None` if
/// the URL is not a label page or carries no id.
pub fn label_pdf_url(label_url: &str) -> Option<String> {
    let id = label_url.trim().strip_prefix(LABEL_PREFIX)?;
    let id = id.strip_suffix(PDF_SUFFIX).unwrap_or(id);
    if id.is_empty() {
        return None;
    }
    Some(format!("{PDF_PREFIX}{id}{PDF_SUFFIX}"))
}
