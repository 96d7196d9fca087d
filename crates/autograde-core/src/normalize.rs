//! Answer normalization.
//!
//! Both the key builder and the grading engine canonicalize answers through
//! this one function. The two paths must agree exactly; a divergence would
//! make every digest comparison fail without any visible error.

/// Canonicalize a raw answer: strip leading/trailing whitespace and collapse
/// every internal whitespace run to a single space. Case is preserved.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
