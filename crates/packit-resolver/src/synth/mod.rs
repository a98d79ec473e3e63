//! Range synthesis: describe a set of versions with one range.
//!
//! The form is chosen by the most significant component in which the lowest and
//! highest versions differ:
//!
//! | First differing component | Descriptor          |
//! |---------------------------|---------------------|
//! | none                      | `Exact(low)`        |
//! | major                     | `Dash(low, high)`   |
//! | minor                     | `Tilde(low)`        |
//! | patch                     | `Caret(low)`        |
//! | prerelease or build       | `Caret(low)`        |
//!
//! The descriptor is built from the two boundary versions only. Gaps between
//! them are not checked, and a `Tilde` descriptor never reaches past the
//! lowest version's minor line, so it does not cover the whole set. Use
//! [`selects_exactly`] when coverage matters.

use packit_core::error::PackitError;
use packit_core::types::VersionRange;

use crate::set::VersionSet;
use crate::ResolverResult;

/// Synthesized output, rendered to text with `Display`
pub type RangeDescriptor = VersionRange;

/// Compute the descriptor for a non-empty version set
pub fn synthesize(versions: &VersionSet) -> ResolverResult<RangeDescriptor> {
    let (low, high) = match (versions.lowest(), versions.highest()) {
        (Some(low), Some(high)) => (low, high),
        _ => return Err(PackitError::EmptyVersionSet { package: None }),
    };

    let descriptor = if low.major != high.major {
        VersionRange::Dash {
            low: low.clone(),
            high: high.clone(),
        }
    } else if low.minor != high.minor {
        VersionRange::Tilde(low.clone())
    } else if low == high {
        VersionRange::Exact(low.clone())
    } else {
        // Patch differs, or the triple is shared and only prerelease or build differs
        VersionRange::Caret(low.clone())
    };

    Ok(descriptor)
}

/// Check that matching `descriptor` against `versions` gives back all of `versions`
pub fn selects_exactly(descriptor: &RangeDescriptor, versions: &VersionSet) -> bool {
    versions.iter().all(|version| descriptor.matches(version))
}
