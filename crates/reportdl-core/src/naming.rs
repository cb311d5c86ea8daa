//! Destination file naming: `{record_id}.pdf`, made safe for Linux.

/// Name used when a record id sanitizes to nothing.
const FALLBACK_STEM: &str = "record";

/// Returns the destination file name for a record id.
///
/// # Examples
///
/// - `pdf_file_name("BR50041")` → `"BR50041.pdf"`
/// - `pdf_file_name("a/b")` → `"a_b.pdf"`
pub fn pdf_file_name(id: &str) -> String {
    let stem = sanitize_id(id);
    if stem.is_empty() {
        format!("{}.pdf", FALLBACK_STEM)
    } else {
        format!("{}.pdf", stem)
    }
}

/// Sanitizes a record id for use as a file stem on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length so the `.pdf` name fits NAME_MAX
pub fn sanitize_id(id: &str) -> String {
    const STEM_MAX: usize = 255 - ".pdf".len();

    let mut out = String::with_capacity(id.len());
    let mut prev_underscore = false;
    for c in id.chars() {
        let c = if c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut take = trimmed.len().min(STEM_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
