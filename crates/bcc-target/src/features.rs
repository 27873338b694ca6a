//! Target feature strings.
//!
//! The backend takes CPU features as one comma-separated string of toggles,
//! each written `+name` to enable or `-name` to disable.

/// Separator between toggles in a feature string.
pub const FEATURE_SEPARATOR: char = ',';

/// A problem found in a feature list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Position of the offending entry in the list.
    pub index: usize,
    /// Human-readable description.
    pub message: String,
}

/// Join feature toggles into a backend feature string, preserving order.
pub fn join_features<I, S>(features: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, feature) in features.into_iter().enumerate() {
        if i > 0 {
            out.push(FEATURE_SEPARATOR);
        }
        out.push_str(feature.as_ref());
    }
    out
}

/// Split a feature string back into its toggles. Empty input gives no toggles.
pub fn split_features(feature_string: &str) -> Vec<&str> {
    if feature_string.is_empty() {
        return Vec::new();
    }
    feature_string.split(FEATURE_SEPARATOR).collect()
}

/// Whether a toggle carries an explicit `+`/`-` prefix.
pub fn has_toggle_prefix(feature: &str) -> bool {
    feature.starts_with('+') || feature.starts_with('-')
}

/// Check that every entry is a well-formed `+name` or `-name` toggle.
///
/// Returns `Ok(())` if valid, or `Err(issues)` listing every bad entry.
pub fn validate_features<S: AsRef<str>>(features: &[S]) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    for (index, feature) in features.iter().enumerate() {
        let feature = feature.as_ref();
        if !has_toggle_prefix(feature) {
            issues.push(ValidationIssue {
                index,
                message: format!("feature '{feature}' must start with '+' or '-'"),
            });
            continue;
        }
        let name = &feature[1..];
        if name.is_empty() {
            issues.push(ValidationIssue {
                index,
                message: format!("feature '{feature}' has no name"),
            });
        } else if name.contains(FEATURE_SEPARATOR) {
            issues.push(ValidationIssue {
                index,
                message: format!("feature '{feature}' contains '{FEATURE_SEPARATOR}'"),
            });
        } else if name.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue {
                index,
                message: format!("feature '{feature}' contains whitespace"),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
