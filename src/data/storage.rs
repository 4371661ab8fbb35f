//! Storage descriptor normalization.
//!
//! A descriptor such as `"512GB SSD"` or `"1 TB"` is split on its first
//! whitespace into a size token and a type token. The size is converted to
//! GB; the type token is passed through untouched.

const GB_PER_TB: f64 = 1024.0;

/// Split and unit-normalized form of a storage descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStorage {
    /// Capacity in GB, `None` when no `GB`/`TB` unit could be parsed.
    pub size_gb: Option<f64>,
    /// Second token of the descriptor, e.g. `"SSD"`.
    pub kind: Option<String>,
}

/// Parse a size string like `"512GB"`, `"1 tb"` or `"0.5TB"` into GB.
///
/// Returns `None` for anything without a `GB` or `TB` unit, or whose
/// remaining magnitude is not a number.
pub fn parse_size_gb(size: &str) -> Option<f64> {
    let value: String = size
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if value.contains("TB") {
        value
            .replace("TB", "")
            .parse::<f64>()
            .ok()
            .map(|tb| tb * GB_PER_TB)
    } else if value.contains("GB") {
        value.replace("GB", "").parse::<f64>().ok()
    } else {
        None
    }
}

/// Unit label recognised in a size string, if any.
fn unit_label(size: &str) -> Option<&'static str> {
    let upper = size.to_uppercase();
    if upper.contains("TB") {
        Some("TB")
    } else if upper.contains("GB") {
        Some("GB")
    } else {
        None
    }
}

/// Normalize a combined storage descriptor.
///
/// * `"256GB SSD"` → `(256.0, "SSD")`
/// * `"512 GB"`    → `(512.0, "GB")` (magnitude and unit split by a space)
/// * `"1TB"`       → `(1024.0, "TB")` (no type token: the unit stands in)
/// * `"eMMC"`      → `(None, None)`
///
/// Tokens after the second are ignored.
pub fn normalize_storage(descriptor: &str) -> NormalizedStorage {
    let mut tokens = descriptor.split_whitespace();
    let size_token = tokens.next().unwrap_or("");
    let type_token = tokens.next();

    let size_gb = parse_size_gb(size_token).or_else(|| {
        type_token.and_then(|unit| parse_size_gb(&format!("{size_token}{unit}")))
    });

    let kind = match type_token {
        Some(t) => Some(t.to_string()),
        None => unit_label(size_token).map(str::to_string),
    };

    NormalizedStorage { size_gb, kind }
}
