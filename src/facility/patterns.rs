//! Install failure classification.
//!
//! Matches stderr from a failed install against known patterns to decide
//! whether retrying is worthwhile. Package-not-found and invalid-name
//! failures are permanent; network and mirror trouble is transient.
//! Unrecognized output defaults to transient, since repository flakiness
//! produces far more novel error text than genuinely unretryable failures.

use std::sync::LazyLock;

use regex::Regex;

/// Whether retrying a failed install could plausibly succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Retry may succeed (network/timeout trouble).
    Transient,
    /// Retrying is futile (not found, invalid name).
    Permanent,
}

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

// Permanent: the package index has answered definitively.
lazy_regex!(
    RE_NO_DISTRIBUTION,
    r"(?i)no matching distribution found"
);
lazy_regex!(
    RE_NO_VERSION,
    r"(?i)could not find a version that satisfies"
);
lazy_regex!(RE_INVALID_REQUIREMENT, r"(?i)invalid requirement");
lazy_regex!(RE_NOT_INSTALLED, r"(?i)not installed|no files were found to uninstall");

// Transient: the network or mirror misbehaved.
lazy_regex!(
    RE_CONNECTION,
    r"(?i)connection (reset|refused|aborted|timed out)|connection error"
);
lazy_regex!(
    RE_TIMEOUT,
    r"(?i)read timed out|timed out|timeout"
);
lazy_regex!(
    RE_RESOLUTION,
    r"(?i)temporary failure in name resolution|name or service not known"
);
lazy_regex!(
    RE_UNREACHABLE,
    r"(?i)network is unreachable|proxy error|502 bad gateway|503 service unavailable"
);

const PERMANENT: &[&LazyLock<Regex>] = &[
    &RE_NO_DISTRIBUTION,
    &RE_NO_VERSION,
    &RE_INVALID_REQUIREMENT,
    &RE_NOT_INSTALLED,
];

const TRANSIENT: &[&LazyLock<Regex>] = &[
    &RE_CONNECTION,
    &RE_TIMEOUT,
    &RE_RESOLUTION,
    &RE_UNREACHABLE,
];

/// Classify a failed install's stderr.
pub fn classify_install_failure(stderr: &str) -> FailureKind {
    for pattern in PERMANENT {
        if pattern.is_match(stderr) {
            return FailureKind::Permanent;
        }
    }
    for pattern in TRANSIENT {
        if pattern.is_match(stderr) {
            return FailureKind::Transient;
        }
    }
    tracing::debug!("unrecognized install failure, treating as transient");
    FailureKind::Transient
}
