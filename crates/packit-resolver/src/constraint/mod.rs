//! Constraint expressions: normalization, parsing and matching.
//!
//! An expression takes one of four shapes:
//!
//! | Shape | Example          |
//! |-------|------------------|
//! | exact | `1.2.3`          |
//! | dash  | `1.2.3 - 2.0.0`  |
//! | tilde | `~1.2.3`         |
//! | caret | `^1.2.3`         |
//!
//! Normalization runs before parsing and only rewrites a bare `1.2.3-2.0.0`
//! into the spaced dash form. A dash range whose bounds are the same version
//! parses as that exact version, which is how an exact `1.0.0-2.0.0` is
//! written without being widened.

use std::borrow::Cow;
use std::fmt;

use packit_core::error::PackitError;
use packit_core::types::{split_bare_dash, Version, VersionRange};

use crate::set::VersionSet;
use crate::ResolverResult;

/// Separator of the two bounds of a dash range
pub const DASH_SEPARATOR: &str = " - ";

/// A raw version-range expression as supplied by a client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintExpression {
    raw: String,
}

impl ConstraintExpression {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The expression after dash normalization
    pub fn normalized(&self) -> Cow<'_, str> {
        normalize_expression(&self.raw)
    }

    /// Parse into a [`VersionRange`]
    pub fn parse(&self) -> ResolverResult<VersionRange> {
        parse_constraint(&self.raw)
    }

    /// Select every candidate this expression accepts
    pub fn select(&self, candidates: &VersionSet) -> ResolverResult<VersionSet> {
        Ok(candidates.filter(&self.parse()?))
    }
}

impl fmt::Display for ConstraintExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for ConstraintExpression {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ConstraintExpression {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Widen a bare `-` between two versions into the spaced ` - ` separator
///
/// The input is trimmed. Expressions that already contain ` - ` are returned
/// as-is. A `-` only counts as a range separator when the text on both sides of
/// it, with no surrounding whitespace, parses as a version; this keeps
/// prerelease suffixes such as `1.0.0-beta` intact.
pub fn normalize_expression(expression: &str) -> Cow<'_, str> {
    let trimmed = expression.trim();
    if trimmed.contains(DASH_SEPARATOR) {
        return Cow::Borrowed(trimmed);
    }

    match split_bare_dash(trimmed) {
        Some((left, right)) => Cow::Owned(format!("{}{}{}", left, DASH_SEPARATOR, right)),
        None => Cow::Borrowed(trimmed),
    }
}

/// Parse a constraint expression into a [`VersionRange`]
pub fn parse_constraint(expression: &str) -> ResolverResult<VersionRange> {
    let normalized = normalize_expression(expression);
    let text = normalized.as_ref();

    if text.is_empty() {
        return Err(PackitError::invalid_constraint(expression, "expression is empty"));
    }

    if text.contains(DASH_SEPARATOR) {
        return parse_dash(expression, text);
    }

    if let Some(base) = text.strip_prefix('~') {
        return parse_base(expression, base).map(VersionRange::Tilde);
    }

    if let Some(base) = text.strip_prefix('^') {
        return parse_base(expression, base).map(VersionRange::Caret);
    }

    parse_base(expression, text).map(VersionRange::Exact)
}

fn parse_dash(expression: &str, text: &str) -> ResolverResult<VersionRange> {
    let bounds: Vec<&str> = text.split(DASH_SEPARATOR).collect();
    if bounds.len() != 2 {
        return Err(PackitError::invalid_constraint(
            expression,
            "a range needs exactly one ' - ' separator",
        ));
    }

    for bound in &bounds {
        if bound.trim() != *bound {
            return Err(PackitError::invalid_constraint(
                expression,
                "use a single space on each side of '-'",
            ));
        }
    }

    let low = parse_base(expression, bounds[0])?;
    let high = parse_base(expression, bounds[1])?;

    if low == high {
        return Ok(VersionRange::Exact(low));
    }

    // Inverted bounds are well formed and select nothing
    Ok(VersionRange::Dash { low, high })
}

fn parse_base(expression: &str, base: &str) -> ResolverResult<Version> {
    Version::parse(base)
        .map_err(|e| PackitError::invalid_constraint(expression, e.to_string()))
}

/// Select every candidate version accepted by `expression`
///
/// No match is an empty set, not an error.
pub fn match_versions(expression: &str, candidates: &VersionSet) -> ResolverResult<VersionSet> {
    let range = parse_constraint(expression)?;
    Ok(candidates.filter(&range))
}
