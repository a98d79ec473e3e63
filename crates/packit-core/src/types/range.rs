//! Version ranges in the four forms the registry understands.
//!
//! A `VersionRange` is both what a constraint expression parses into and what
//! range synthesis produces for a set of versions.

use super::Version;
use std::cmp::Ordering;
use std::fmt;

/// Version range (`1.2.3`, `1.2.3 - 2.0.0`, `~1.2.3`, `^1.2.3`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRange {
    /// Exactly one version
    Exact(Version),
    /// Inclusive on both ends
    Dash { low: Version, high: Version },
    /// Same major.minor, patch at least the base patch
    Tilde(Version),
    /// Same major, minor.patch at least the base minor.patch
    Caret(Version),
}

/// Discriminant of a [`VersionRange`], ordered from narrowest to widest granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeKind {
    Exact,
    Caret,
    Tilde,
    Dash,
}

impl VersionRange {
    /// Check if a version falls inside this range
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionRange::Exact(exact) => version == exact,
            VersionRange::Dash { low, high } => {
                low.precedence_cmp(version) != Ordering::Greater
                    && version.precedence_cmp(high) != Ordering::Greater
            },
            VersionRange::Tilde(base) => {
                version.major == base.major
                    && version.minor == base.minor
                    && version.patch >= base.patch
            },
            VersionRange::Caret(base) => {
                version.major == base.major
                    && (version.minor, version.patch) >= (base.minor, base.patch)
            },
        }
    }

    /// Which of the four forms this is
    pub fn kind(&self) -> RangeKind {
        match self {
            VersionRange::Exact(_) => RangeKind::Exact,
            VersionRange::Dash { .. } => RangeKind::Dash,
            VersionRange::Tilde(_) => RangeKind::Tilde,
            VersionRange::Caret(_) => RangeKind::Caret,
        }
    }

}

/// Split `text` at the first `-` with a whole version on each side
///
/// This is how a bare `1.0.0-2.0.0` is told apart from a prerelease suffix
/// such as `1.0.0-beta`. Neither side may carry surrounding whitespace.
pub fn split_bare_dash(text: &str) -> Option<(&str, &str)> {
    text.match_indices('-')
        .map(|(idx, _)| (&text[..idx], &text[idx + 1..]))
        .find(|(left, right)| is_bare_bound(left) && is_bare_bound(right))
}

fn is_bare_bound(side: &str) -> bool {
    !side.is_empty() && side.trim() == side && Version::parse(side).is_ok()
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Exact(v) => {
                // `1.0.0-2.0.0` alone would read back as a range
                let text = v.to_string();
                if split_bare_dash(&text).is_some() {
                    write!(f, "{} - {}", text, text)
                } else {
                    f.write_str(&text)
                }
            },
            VersionRange::Dash { low, high } => write!(f, "{} - {}", low, high),
            VersionRange::Tilde(v) => write!(f, "~{}", v),
            VersionRange::Caret(v) => write!(f, "^{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_exact() {
        let range = VersionRange::Exact(v("1.2.3"));
        assert!(range.matches(&v("1.2.3")));
        assert!(!range.matches(&v("1.2.4")));
        assert!(!range.matches(&v("1.2.3-beta")));
    }

    #[test]
    fn test_dash_inclusive() {
        let range = VersionRange::Dash {
            low: v("1.2.3"),
            high: v("2.0.0"),
        };
        assert!(range.matches(&v("1.2.3")));
        assert!(range.matches(&v("1.9.9")));
        assert!(range.matches(&v("2.0.0")));
        assert!(range.matches(&v("2.0.0+build.5")));
        assert!(range.matches(&v("2.0.0-rc.1")));
        assert!(!range.matches(&v("2.0.1")));
        assert!(!range.matches(&v("1.2.3-alpha")));
    }

    #[test]
    fn test_tilde() {
        let range = VersionRange::Tilde(v("1.4.0"));
        assert!(range.matches(&v("1.4.0")));
        assert!(range.matches(&v("1.4.9")));
        assert!(!range.matches(&v("1.5.0")));
        assert!(!range.matches(&v("2.4.0")));

        let range = VersionRange::Tilde(v("1.2.3"));
        assert!(!range.matches(&v("1.2.2")));
    }

    #[test]
    fn test_caret() {
        let range = VersionRange::Caret(v("1.2.3"));
        assert!(range.matches(&v("1.2.3")));
        assert!(range.matches(&v("1.2.4")));
        assert!(range.matches(&v("1.3.0")));
        assert!(!range.matches(&v("1.2.2")));
        assert!(!range.matches(&v("1.1.9")));
        assert!(!range.matches(&v("2.0.0")));
        assert!(!range.matches(&v("0.9.9")));
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionRange::Exact(v("1.2.3")).to_string(), "1.2.3");
        assert_eq!(
            VersionRange::Dash {
                low: v("1.9.0"),
                high: v("3.0.0")
            }
            .to_string(),
            "1.9.0 - 3.0.0"
        );
        assert_eq!(VersionRange::Tilde(v("1.0.0")).to_string(), "~1.0.0");
        assert_eq!(VersionRange::Caret(v("2.0.0-rc.1")).to_string(), "^2.0.0-rc.1");
    }

    #[test]
    fn test_display_exact_with_version_shaped_prerelease() {
        assert_eq!(
            VersionRange::Exact(v("1.0.0-2.0.0")).to_string(),
            "1.0.0-2.0.0 - 1.0.0-2.0.0"
        );
        assert_eq!(
            VersionRange::Exact(v("1.0.0+b-2.0.0")).to_string(),
            "1.0.0+b-2.0.0 - 1.0.0+b-2.0.0"
        );
        assert_eq!(VersionRange::Exact(v("1.0.0-rc-1")).to_string(), "1.0.0-rc-1");
        assert_eq!(VersionRange::Exact(v("1.0.0-2")).to_string(), "1.0.0-2");
    }

    #[test]
    fn test_split_bare_dash() {
        assert_eq!(split_bare_dash("1.2.3-2.0.0"), Some(("1.2.3", "2.0.0")));
        assert_eq!(split_bare_dash("1.0.0-beta-2.0.0"), Some(("1.0.0-beta", "2.0.0")));
        assert_eq!(split_bare_dash("1.0.0-beta"), None);
        assert_eq!(split_bare_dash("1.0.0 -2.0.0"), None);
        assert_eq!(split_bare_dash("~1.0.0-2.0.0"), None);
    }

    #[test]
    fn test_kind() {
        let range = VersionRange::Dash {
            low: v("1.0.0"),
            high: v("2.0.0"),
        };
        assert_eq!(range.kind(), RangeKind::Dash);
        assert!(RangeKind::Exact < RangeKind::Caret);
        assert!(RangeKind::Tilde < RangeKind::Dash);
    }
}
