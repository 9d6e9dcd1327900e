//! Version parsing and constraint evaluation.
//!
//! Versions are plain numeric triples (`major.minor.patch`) compared
//! lexicographically. Pre-release and build metadata are deliberately not
//! handled — package managers report plenty of creative version strings,
//! but the constraint grammar accepted in config files is restricted to
//! what this module can evaluate exactly.

use std::fmt;
use std::str::FromStr;

use crate::error::PackmuleError;

/// A numeric `major.minor.patch` version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = PackmuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |message: &str| PackmuleError::ConstraintParseError {
            input: s.to_string(),
            message: message.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(parse_err("expected three dotted components"));
        }

        let mut nums = [0u64; 3];
        for (i, part) in parts.iter().enumerate() {
            nums[i] = part
                .parse()
                .map_err(|_| parse_err("version component is not numeric"))?;
        }

        Ok(Version::new(nums[0], nums[1], nums[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A minimum- or exact-version requirement for one package.
///
/// Parsed from config entries: an empty string means any installed version
/// satisfies the constraint, otherwise `>=x.y.z` or `==x.y.z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionConstraint {
    /// Any installed version satisfies the constraint.
    #[default]
    Any,
    /// Installed version must be at least this version.
    AtLeast(Version),
    /// Installed version must be exactly this version.
    Exactly(Version),
}

impl VersionConstraint {
    /// Whether an already-installed version satisfies this constraint.
    pub fn satisfied_by(&self, installed: Version) -> bool {
        match self {
            VersionConstraint::Any => true,
            VersionConstraint::AtLeast(required) => installed >= *required,
            VersionConstraint::Exactly(required) => installed == *required,
        }
    }

    /// Evaluate against a raw version string as reported by the package
    /// manager.
    ///
    /// Fails with a `ConstraintParseError` when the reported version is not
    /// a parseable triple; callers that treat unknown versions as "needs
    /// install" map that error to `false` at the call site.
    pub fn satisfied_by_str(&self, installed: &str) -> crate::Result<bool> {
        // `Any` still requires the package to be present, which the caller
        // has already established by obtaining a version string.
        if matches!(self, VersionConstraint::Any) {
            return Ok(true);
        }
        let version: Version = installed.parse()?;
        Ok(self.satisfied_by(version))
    }

    /// Format as a pip-style requirement suffix (`>=1.2.0`), empty for `Any`.
    pub fn requirement_suffix(&self) -> String {
        match self {
            VersionConstraint::Any => String::new(),
            _ => self.to_string(),
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = PackmuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Ok(VersionConstraint::Any);
        }

        if let Some(rest) = text.strip_prefix(">=") {
            return Ok(VersionConstraint::AtLeast(rest.parse()?));
        }
        if let Some(rest) = text.strip_prefix("==") {
            return Ok(VersionConstraint::Exactly(rest.parse()?));
        }

        Err(PackmuleError::ConstraintParseError {
            input: s.to_string(),
            message: "expected empty string, '>=x.y.z', or '==x.y.z'".to_string(),
        })
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Any => Ok(()),
            VersionConstraint::AtLeast(v) => write!(f, ">={}", v),
            VersionConstraint::Exactly(v) => write!(f, "=={}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parses_triple() {
        let v: Version = "2.30.0".parse().unwrap();
        assert_eq!(v, Version::new(2, 30, 0));
    }

    #[test]
    fn version_rejects_two_components() {
        assert!("1.2".parse::<Version>().is_err());
    }

    #[test]
    fn version_rejects_four_components() {
        assert!("1.2.3.4".parse::<Version>().is_err());
    }

    #[test]
    fn version_rejects_non_numeric() {
        assert!("1.x.0".parse::<Version>().is_err());
        assert!("1.2.3-rc1".parse::<Version>().is_err());
    }

    #[test]
    fn version_ordering_is_lexicographic() {
        let parse = |s: &str| s.parse::<Version>().unwrap();
        assert!(parse("2.0.0") > parse("1.9.9"));
        assert!(parse("1.10.0") > parse("1.9.0"));
        assert!(parse("1.0.5") > parse("1.0.4"));
        assert_eq!(parse("1.0.0"), parse("1.0.0"));
    }

    #[test]
    fn empty_constraint_is_any() {
        let c: VersionConstraint = "".parse().unwrap();
        assert_eq!(c, VersionConstraint::Any);
        let c: VersionConstraint = "   ".parse().unwrap();
        assert_eq!(c, VersionConstraint::Any);
    }

    #[test]
    fn at_least_constraint_parses() {
        let c: VersionConstraint = ">=2.30.0".parse().unwrap();
        assert_eq!(c, VersionConstraint::AtLeast(Version::new(2, 30, 0)));
    }

    #[test]
    fn exact_constraint_parses() {
        let c: VersionConstraint = "==1.5.2".parse().unwrap();
        assert_eq!(c, VersionConstraint::Exactly(Version::new(1, 5, 2)));
    }

    #[test]
    fn bogus_operator_rejected() {
        assert!("~=1.0.0".parse::<VersionConstraint>().is_err());
        assert!(">1.0.0".parse::<VersionConstraint>().is_err());
        assert!("latest".parse::<VersionConstraint>().is_err());
    }

    #[test]
    fn at_least_satisfaction() {
        let c: VersionConstraint = ">=2.30.0".parse().unwrap();
        assert!(!c.satisfied_by(Version::new(2, 28, 0)));
        assert!(c.satisfied_by(Version::new(2, 30, 0)));
        assert!(c.satisfied_by(Version::new(3, 0, 0)));
    }

    #[test]
    fn exact_satisfaction() {
        let c: VersionConstraint = "==1.5.2".parse().unwrap();
        assert!(c.satisfied_by(Version::new(1, 5, 2)));
        assert!(!c.satisfied_by(Version::new(1, 5, 3)));
    }

    #[test]
    fn any_satisfied_by_anything() {
        assert!(VersionConstraint::Any.satisfied_by(Version::new(0, 0, 1)));
    }

    #[test]
    fn satisfied_by_str_fails_on_unparseable() {
        let c: VersionConstraint = ">=1.0.0".parse().unwrap();
        assert!(c.satisfied_by_str("1.0.0rc1").is_err());
    }

    #[test]
    fn satisfied_by_str_any_ignores_version_syntax() {
        // A present package satisfies `Any` even if its reported version
        // isn't a clean triple.
        assert!(VersionConstraint::Any.satisfied_by_str("2024.1").unwrap());
    }

    #[test]
    fn display_round_trips() {
        for text in ["", ">=2.30.0", "==1.0.0"] {
            let c: VersionConstraint = text.parse().unwrap();
            let reparsed: VersionConstraint = c.to_string().parse().unwrap();
            assert_eq!(c, reparsed);
        }
    }

    #[test]
    fn requirement_suffix_empty_for_any() {
        assert_eq!(VersionConstraint::Any.requirement_suffix(), "");
        let c: VersionConstraint = ">=2.2.0".parse().unwrap();
        assert_eq!(c.requirement_suffix(), ">=2.2.0");
    }
}
