//! Template path rules: marker suffix, optional subtree, hidden-name escapes

/// Suffix marking a file as a template; stripped from the output path
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Segment prefix standing in for a leading dot (`point.bazelrc` -> `.bazelrc`)
pub const DOT_MARKER: &str = "point.";

/// First segment of the optional subtree, only rendered on request
pub const OPTIONAL_DIR: &str = "point.devcontainer";

/// Check if a relative path names a template file
pub fn is_template(rel_path: &str) -> bool {
    rel_path.ends_with(TEMPLATE_SUFFIX)
}

/// Check if a relative path lies inside the optional subtree
pub fn is_optional(rel_path: &str) -> bool {
    rel_path.split('/').next() == Some(OPTIONAL_DIR)
}

/// Replace a leading dot marker with a literal dot.
/// A bare marker (nothing after it) is left as is.
fn undot_segment(segment: &str) -> String {
    match segment.strip_prefix(DOT_MARKER) {
        Some(rest) if !rest.is_empty() => format!(".{}", rest),
        _ => segment.to_string(),
    }
}

/// Output-relative path for a template, or `None` when nothing is left of the
/// file name once the marker suffix is stripped.
///
/// Every segment is rewritten, so hidden directories can be expressed too.
pub fn output_path(rel_path: &str) -> Option<String> {
    let stripped = rel_path.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(rel_path);
    let segments: Vec<String> = stripped.split('/').map(undot_segment).collect();
    match segments.last() {
        Some(name) if !name.is_empty() => Some(segments.join("/")),
        _ => None,
    }
}
