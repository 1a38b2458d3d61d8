//! Constraint types for version matching

mod bound;
mod combine;
mod error;
mod multi_constraint;
mod range;
#[cfg(feature = "serde")]
mod repr;

use std::fmt;
use std::slice;

pub use bound::Bound;
pub use combine::{intersection, is_empty_set, is_universal, union};
pub use error::AdmitError;
pub use range::Range;

use crate::Version;

/// A set of versions.
///
/// The variant set is closed: every operator matches on all five cases, and
/// every operator returns a new constraint rather than changing its receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "repr::ConstraintRepr<V>",
        bound(deserialize = "V: Version + serde::Deserialize<'de>")
    )
)]
pub enum Constraint<V> {
    /// Every version
    Universal,
    /// No version at all
    Empty,
    /// Exactly one version
    Exact(V),
    /// Versions between two optional bounds, minus specific exclusions
    Range(Range<V>),
    /// Versions admitted by any of the members
    Union(Vec<Constraint<V>>),
}

impl<V: Version> Constraint<V> {
    /// Create a constraint matching any version
    pub fn universal() -> Self {
        Constraint::Universal
    }

    /// Create a constraint matching no version
    pub fn empty() -> Self {
        Constraint::Empty
    }

    /// Create a constraint matching exactly `version`
    pub fn exact(version: V) -> Self {
        Constraint::Exact(version)
    }

    /// Create a range constraint.
    ///
    /// The result is normalized: contradictory bounds give [`Constraint::Empty`],
    /// bounds meeting at a single inclusive version give [`Constraint::Exact`]
    /// and a boundless range with no exclusions gives [`Constraint::Universal`].
    pub fn range(
        min: Option<Bound<V>>,
        max: Option<Bound<V>>,
        excluded: impl IntoIterator<Item = V>,
    ) -> Self {
        Range::normalize(min, max, excluded.into_iter().collect())
    }

    /// Check that a version satisfies the constraint.
    ///
    /// Returns an error describing why the version was rejected otherwise.
    pub fn admits(&self, version: &V) -> Result<(), AdmitError> {
        match self {
            Constraint::Universal => Ok(()),
            Constraint::Empty => Err(AdmitError::Empty),
            Constraint::Exact(expected) => {
                if expected == version {
                    Ok(())
                } else {
                    Err(AdmitError::NotExact {
                        version: version.to_string(),
                        expected: expected.to_string(),
                    })
                }
            }
            Constraint::Range(range) => range.admits(version),
            Constraint::Union(members) => multi_constraint::admits(members, version),
        }
    }

    /// Check that a version satisfies the constraint, without building a failure reason
    pub fn contains(&self, version: &V) -> bool {
        match self {
            Constraint::Universal => true,
            Constraint::Empty => false,
            Constraint::Exact(expected) => expected == version,
            Constraint::Range(range) => range.contains(version),
            Constraint::Union(members) => members.iter().any(|m| m.contains(version)),
        }
    }

    /// Compute the set of versions satisfying both constraints
    pub fn intersect(&self, other: &Constraint<V>) -> Constraint<V> {
        match (self, other) {
            (Constraint::Universal, _) => other.clone(),
            (Constraint::Empty, _) => Constraint::Empty,
            (Constraint::Exact(version), _) => exact_within(version, other),

            (Constraint::Range(_), Constraint::Universal) => self.clone(),
            (Constraint::Range(_), Constraint::Empty) => Constraint::Empty,
            (Constraint::Range(_), Constraint::Exact(version)) => exact_within(version, self),
            (Constraint::Range(a), Constraint::Range(b)) => a.intersect(b),
            (Constraint::Range(_), Constraint::Union(members)) => {
                multi_constraint::cross_product(members, slice::from_ref(self))
            }

            (Constraint::Union(_), Constraint::Universal) => self.clone(),
            (Constraint::Union(_), Constraint::Empty) => Constraint::Empty,
            (Constraint::Union(members), Constraint::Union(others)) => {
                multi_constraint::cross_product(members, others)
            }
            (Constraint::Union(members), _) => {
                multi_constraint::cross_product(members, slice::from_ref(other))
            }
        }
    }

    /// Check whether any version can satisfy the constraint.
    ///
    /// Ranges always answer true: construction and intersection already turn
    /// provably empty ranges into [`Constraint::Empty`], but a range whose
    /// remaining versions are all excluded is not detected.
    pub fn admits_any(&self) -> bool {
        match self {
            Constraint::Empty => false,
            Constraint::Union(members) => !members.is_empty(),
            Constraint::Universal | Constraint::Exact(_) | Constraint::Range(_) => true,
        }
    }

    /// Check if this is the empty set
    pub fn is_empty_set(&self) -> bool {
        matches!(self, Constraint::Empty)
    }

    /// Check if this is the set of all versions
    pub fn is_universal(&self) -> bool {
        matches!(self, Constraint::Universal)
    }
}

fn exact_within<V: Version>(version: &V, other: &Constraint<V>) -> Constraint<V> {
    if other.contains(version) {
        Constraint::Exact(version.clone())
    } else {
        Constraint::Empty
    }
}

impl<V: Version> fmt::Display for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Universal => write!(f, "*"),
            Constraint::Empty => write!(f, "[]"),
            Constraint::Exact(version) => write!(f, "={}", version),
            Constraint::Range(range) => write!(f, "{}", range),
            Constraint::Union(members) => {
                let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "{}", members.join(" || "))
            }
        }
    }
}
