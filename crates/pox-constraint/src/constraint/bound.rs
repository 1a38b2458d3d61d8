//! Bound type for range boundaries

use std::cmp::Ordering;
use std::fmt;

use crate::Version;

/// Represents a bound (lower or upper) of a version range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound<V> {
    version: V,
    is_inclusive: bool,
}

impl<V: Version> Bound<V> {
    /// Create a new bound
    pub fn new(version: V, is_inclusive: bool) -> Self {
        Bound {
            version,
            is_inclusive,
        }
    }

    /// Create a bound that admits its own version
    pub fn inclusive(version: V) -> Self {
        Self::new(version, true)
    }

    /// Create a bound that stops just short of its own version
    pub fn exclusive(version: V) -> Self {
        Self::new(version, false)
    }

    /// Get the boundary version
    pub fn version(&self) -> &V {
        &self.version
    }

    /// Check if the bound is inclusive
    pub fn is_inclusive(&self) -> bool {
        self.is_inclusive
    }

    /// Check whether `version` is on the admitted side of this bound used as a minimum
    pub(crate) fn admits_from_below(&self, version: &V) -> bool {
        match version.cmp(&self.version) {
            Ordering::Greater => true,
            Ordering::Equal => self.is_inclusive,
            Ordering::Less => false,
        }
    }

    /// Check whether `version` is on the admitted side of this bound used as a maximum
    pub(crate) fn admits_from_above(&self, version: &V) -> bool {
        match version.cmp(&self.version) {
            Ordering::Less => true,
            Ordering::Equal => self.is_inclusive,
            Ordering::Greater => false,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Bound<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.is_inclusive {
                "inclusive"
            } else {
                "exclusive"
            }
        )
    }
}

/// Order two lower bounds by where they start; a missing bound starts first.
///
/// At the same version an inclusive bound starts before an exclusive one.
pub(crate) fn cmp_lower<V: Version>(a: Option<&Bound<V>>, b: Option<&Bound<V>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .version
            .cmp(&b.version)
            .then_with(|| b.is_inclusive.cmp(&a.is_inclusive)),
    }
}

/// Order two upper bounds by where they end; a missing bound ends last.
///
/// At the same version an exclusive bound ends before an inclusive one.
pub(crate) fn cmp_upper<V: Version>(a: Option<&Bound<V>>, b: Option<&Bound<V>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a
            .version
            .cmp(&b.version)
            .then_with(|| a.is_inclusive.cmp(&b.is_inclusive)),
    }
}

/// The lower bound admitting fewer versions
pub(crate) fn tighter_lower<'a, V: Version>(
    a: Option<&'a Bound<V>>,
    b: Option<&'a Bound<V>>,
) -> Option<&'a Bound<V>> {
    if cmp_lower(a, b) == Ordering::Less {
        b
    } else {
        a
    }
}

/// The upper bound admitting fewer versions
pub(crate) fn tighter_upper<'a, V: Version>(
    a: Option<&'a Bound<V>>,
    b: Option<&'a Bound<V>>,
) -> Option<&'a Bound<V>> {
    if cmp_upper(a, b) == Ordering::Greater {
        b
    } else {
        a
    }
}

/// The upper bound admitting more versions
pub(crate) fn looser_upper<'a, V: Version>(
    a: Option<&'a Bound<V>>,
    b: Option<&'a Bound<V>>,
) -> Option<&'a Bound<V>> {
    if cmp_upper(a, b) == Ordering::Less {
        b
    } else {
        a
    }
}
