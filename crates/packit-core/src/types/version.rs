//! Semantic version type and its total ordering.
//!
//! A version is `major.minor.patch[-prerelease][+build]`. Ordering compares the
//! numeric triple first and then prerelease precedence, so a release always
//! sorts after its own prereleases.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version (major.minor.patch-prerelease+build)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Version parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: '{input}'")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: '{component}'")]
    InvalidNumber { component: String },

    #[error("Invalid prerelease identifier: '{prerelease}'")]
    InvalidPrerelease { prerelease: String },

    #[error("Invalid build metadata: '{build}'")]
    InvalidBuild { build: String },
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Attach a prerelease suffix
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    /// Attach build metadata
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Parse a version string
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        input.parse()
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Numeric `(major, minor, patch)` triple
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Semver precedence: numeric triple, then prerelease. Build metadata is ignored.
    pub fn precedence_cmp(&self, other: &Self) -> Ordering {
        match self.triple().cmp(&other.triple()) {
            Ordering::Equal => match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => compare_prerelease(a, b),
            },
            other => other,
        }
    }
}

/// Compare dot-separated prerelease identifiers one position at a time.
///
/// Numeric identifiers compare numerically and always sort below alphanumeric
/// ones; a shorter list that is a prefix of a longer one sorts first.
fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_identifier(x, y) {
                Ordering::Equal => continue,
                ordering => return ordering,
            },
        }
    }
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            // Compare digit strings without parsing so arbitrarily long identifiers work
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        },
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_identifier_list(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|id| {
            !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn parse_component(component: &str) -> Result<u64, VersionError> {
    if !is_numeric(component) {
        return Err(VersionError::InvalidNumber {
            component: component.to_string(),
        });
    }
    component.parse().map_err(|_| VersionError::InvalidNumber {
        component: component.to_string(),
    })
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let unprefixed = input.strip_prefix('v').unwrap_or(input);

        // Split on '+' for build metadata
        let (version_part, build) = match unprefixed.split_once('+') {
            Some((v, b)) => {
                if !is_valid_identifier_list(b) {
                    return Err(VersionError::InvalidBuild {
                        build: b.to_string(),
                    });
                }
                (v, Some(b.to_string()))
            },
            None => (unprefixed, None),
        };

        // Split on the first '-' for prerelease
        let (core_part, prerelease) = match version_part.split_once('-') {
            Some((c, p)) => {
                if !is_valid_identifier_list(p) {
                    return Err(VersionError::InvalidPrerelease {
                        prerelease: p.to_string(),
                    });
                }
                (c, Some(p.to_string()))
            },
            None => (version_part, None),
        };

        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        Ok(Version {
            major: parse_component(parts[0])?,
            minor: parse_component(parts[1])?,
            patch: parse_component(parts[2])?,
            prerelease,
            build,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }

        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Textual tie-breaks keep `Ord` consistent with `Eq` for versions of equal
        // precedence, e.g. `1.0.0+a` and `1.0.0+b`.
        self.precedence_cmp(other)
            .then_with(|| self.prerelease.cmp(&other.prerelease))
            .then_with(|| self.build.cmp(&other.build))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::from_str(s).unwrap()
    }

    #[test]
    fn test_version_parsing() {
        let v = Version::from_str("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert_eq!(v.prerelease, None);
        assert_eq!(v.build, None);
    }

    #[test]
    fn test_version_with_prerelease() {
        let v = Version::from_str("1.2.3-alpha.1").unwrap();
        assert_eq!(v.triple(), (1, 2, 3));
        assert_eq!(v.prerelease, Some("alpha.1".to_string()));
        assert_eq!(v.build, None);
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_version_with_build() {
        let v = Version::from_str("1.2.3-rc.1+build-7").unwrap();
        assert_eq!(v.prerelease, Some("rc.1".to_string()));
        assert_eq!(v.build, Some("build-7".to_string()));
    }

    #[test]
    fn test_leading_v_and_whitespace() {
        assert_eq!(v(" v2.0.1 "), Version::new(2, 0, 1));
    }

    #[test]
    fn test_invalid_versions() {
        for input in [
            "", "v", "1", "1.2", "1.2.3.4", "a.b.c", "1..3", "1.2.x", "+1.2.3", "1.2.+3",
            "1.2.3-", "1.2.3+", "1.2.3-al$pha", "1.2.3-alpha..1", "-1.2.3",
        ] {
            assert!(Version::from_str(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn test_invalid_version_error_kinds() {
        assert!(matches!(
            Version::from_str("1.2"),
            Err(VersionError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Version::from_str("1.x.3"),
            Err(VersionError::InvalidNumber { component }) if component == "x"
        ));
        assert!(matches!(
            Version::from_str("1.2.3-"),
            Err(VersionError::InvalidPrerelease { .. })
        ));
        assert!(matches!(
            Version::from_str("1.2.3+"),
            Err(VersionError::InvalidBuild { .. })
        ));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");

        let v = Version::new(1, 2, 3).with_prerelease("alpha").with_build("build");
        assert_eq!(v.to_string(), "1.2.3-alpha+build");
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("10.0.0") > v("9.99.99"));
        assert!(v("1.0.10") > v("1.0.2"));
    }

    #[test]
    fn test_release_after_prerelease() {
        assert!(v("1.0.0-rc.1") < v("1.0.0"));
        assert!(v("1.0.0") < v("1.0.1-alpha"));
    }

    #[test]
    fn test_prerelease_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_build_metadata_ignored_by_precedence() {
        let a = v("1.0.0+a");
        let b = v("1.0.0+b");
        assert_eq!(a.precedence_cmp(&b), Ordering::Equal);
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("1.2.3-beta")).unwrap();
        assert_eq!(json, "\"1.2.3-beta\"");

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("1.2.3-beta"));

        assert!(serde_json::from_str::<Version>("\"1.2\"").is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn version_strategy() -> impl Strategy<Value = Version> {
        (
            0u64..20,
            0u64..20,
            0u64..20,
            prop::option::of("[a-z]{1,5}(\\.[0-9]{1,2})?"),
        )
            .prop_map(|(major, minor, patch, prerelease)| Version {
                major,
                minor,
                patch,
                prerelease,
                build: None,
            })
    }

    proptest! {
        #[test]
        fn version_round_trip(
            version in version_strategy(),
            build in prop::option::of("[a-zA-Z0-9]{1,8}"),
        ) {
            let original = Version { build, ..version };
            let parsed = Version::from_str(&original.to_string()).unwrap();
            prop_assert_eq!(parsed, original);
        }

        #[test]
        fn version_comparison_antisymmetry(a in version_strategy(), b in version_strategy()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            if a.cmp(&b) == Ordering::Equal {
                prop_assert_eq!(&a, &b);
            }
        }

        #[test]
        fn version_comparison_transitivity(
            a in version_strategy(),
            b in version_strategy(),
            c in version_strategy(),
        ) {
            if a <= b && b <= c {
                prop_assert!(a <= c, "Transitivity violated: {} <= {} <= {} but {} > {}", a, b, c, a, c);
            }
            if a >= b && b >= c {
                prop_assert!(a >= c, "Transitivity violated: {} >= {} >= {} but {} < {}", a, b, c, a, c);
            }
        }
    }
}
