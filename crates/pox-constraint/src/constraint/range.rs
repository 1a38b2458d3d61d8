//! Range - versions between two optional bounds, minus an exclusion set

use std::cmp::Ordering;
use std::fmt;

use super::bound::{cmp_lower, looser_upper, tighter_lower, tighter_upper};
use super::{AdmitError, Bound, Constraint};
use crate::Version;

/// A contiguous span of versions with specific versions carved out.
///
/// Ranges are only built through [`Constraint::range`] and the constraint
/// operators, which collapse contradictory or single-point spans into
/// [`Constraint::Empty`] and [`Constraint::Exact`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Range<V> {
    min: Option<Bound<V>>,
    max: Option<Bound<V>>,
    excluded: Vec<V>,
}

impl<V: Version> Range<V> {
    /// Get the lower bound, if any
    pub fn min(&self) -> Option<&Bound<V>> {
        self.min.as_ref()
    }

    /// Get the upper bound, if any
    pub fn max(&self) -> Option<&Bound<V>> {
        self.max.as_ref()
    }

    /// Get the versions explicitly carved out of the range, in ascending order
    pub fn excluded(&self) -> &[V] {
        &self.excluded
    }

    /// Build the normalized constraint for the given bounds and exclusions.
    pub(crate) fn normalize(
        min: Option<Bound<V>>,
        max: Option<Bound<V>>,
        excluded: Vec<V>,
    ) -> Constraint<V> {
        if let (Some(lo), Some(hi)) = (&min, &max) {
            match lo.version().cmp(hi.version()) {
                Ordering::Greater => return Constraint::Empty,
                Ordering::Equal => {
                    let point = lo.version();
                    if lo.is_inclusive() && hi.is_inclusive() && !excluded.contains(point) {
                        return Constraint::Exact(point.clone());
                    }
                    return Constraint::Empty;
                }
                Ordering::Less => {}
            }
        }

        let mut range = Range {
            min,
            max,
            excluded: Vec::new(),
        };

        // exclusions outside the bounds carve out nothing
        let mut excluded: Vec<V> = excluded
            .into_iter()
            .filter(|v| range.within_bounds(v))
            .collect();
        excluded.sort();
        excluded.dedup();
        range.excluded = excluded;

        if range.min.is_none() && range.max.is_none() && range.excluded.is_empty() {
            return Constraint::Universal;
        }

        Constraint::Range(range)
    }

    /// A range holding exactly one version, used while merging union members
    pub(crate) fn point(version: V) -> Self {
        Range {
            min: Some(Bound::inclusive(version.clone())),
            max: Some(Bound::inclusive(version)),
            excluded: Vec::new(),
        }
    }

    /// Collapse back into the canonical constraint for this span
    pub(crate) fn into_constraint(self) -> Constraint<V> {
        Self::normalize(self.min, self.max, self.excluded)
    }

    /// Check that a version satisfies the range
    pub fn admits(&self, version: &V) -> Result<(), AdmitError> {
        if let Some(min) = &self.min {
            if !min.admits_from_below(version) {
                let (version, min_version) = (version.to_string(), min.version().to_string());
                return Err(if min.is_inclusive() {
                    AdmitError::BelowMin {
                        version,
                        min: min_version,
                    }
                } else {
                    AdmitError::AtOrBelowMin {
                        version,
                        min: min_version,
                    }
                });
            }
        }

        if let Some(max) = &self.max {
            if !max.admits_from_above(version) {
                let (version, max_version) = (version.to_string(), max.version().to_string());
                return Err(if max.is_inclusive() {
                    AdmitError::AboveMax {
                        version,
                        max: max_version,
                    }
                } else {
                    AdmitError::AtOrAboveMax {
                        version,
                        max: max_version,
                    }
                });
            }
        }

        if self.excluded.contains(version) {
            return Err(AdmitError::Excluded {
                version: version.to_string(),
            });
        }

        Ok(())
    }

    /// Check that a version satisfies the range without building a failure reason
    pub(crate) fn contains(&self, version: &V) -> bool {
        self.within_bounds(version) && !self.excluded.contains(version)
    }

    fn within_bounds(&self, version: &V) -> bool {
        self.min.as_ref().map_or(true, |b| b.admits_from_below(version))
            && self.max.as_ref().map_or(true, |b| b.admits_from_above(version))
    }

    /// Intersect with another range: tighter bounds, combined exclusions
    pub(crate) fn intersect(&self, other: &Range<V>) -> Constraint<V> {
        let min = tighter_lower(self.min(), other.min()).cloned();
        let max = tighter_upper(self.max(), other.max()).cloned();
        let excluded = self
            .excluded
            .iter()
            .chain(&other.excluded)
            .cloned()
            .collect();

        Self::normalize(min, max, excluded)
    }

    /// Check whether `next` overlaps this range or touches it at a shared boundary.
    ///
    /// `next` must not start before `self`.
    pub(crate) fn overlaps_or_touches(&self, next: &Range<V>) -> bool {
        debug_assert!(cmp_lower(self.min(), next.min()) != Ordering::Greater);

        let (Some(max), Some(min)) = (&self.max, &next.min) else {
            return true;
        };

        match min.version().cmp(max.version()) {
            Ordering::Less => true,
            Ordering::Equal => min.is_inclusive() || max.is_inclusive(),
            Ordering::Greater => false,
        }
    }

    /// Merge an overlapping or touching range that does not start before `self`.
    ///
    /// A version stays excluded only if neither side admits it.
    pub(crate) fn merge(&self, next: &Range<V>) -> Range<V> {
        let max = looser_upper(self.max(), next.max()).cloned();
        let mut excluded: Vec<V> = self
            .excluded
            .iter()
            .filter(|v| !next.contains(v))
            .chain(next.excluded.iter().filter(|v| !self.contains(v)))
            .cloned()
            .collect();
        excluded.sort();
        excluded.dedup();

        Range {
            min: self.min.clone(),
            max,
            excluded,
        }
    }
}

impl<V: Version> fmt::Display for Range<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(min) = &self.min {
            let op = if min.is_inclusive() { ">=" } else { ">" };
            parts.push(format!("{}{}", op, min.version()));
        }
        if let Some(max) = &self.max {
            let op = if max.is_inclusive() { "<=" } else { "<" };
            parts.push(format!("{}{}", op, max.version()));
        }
        for version in &self.excluded {
            parts.push(format!("!={}", version));
        }

        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version as SemVersion;

    fn v(s: &str) -> SemVersion {
        SemVersion::parse(s).unwrap()
    }

    fn range(
        min: Option<(&str, bool)>,
        max: Option<(&str, bool)>,
        excluded: &[&str],
    ) -> Constraint<SemVersion> {
        Constraint::range(
            min.map(|(s, inc)| Bound::new(v(s), inc)),
            max.map(|(s, inc)| Bound::new(v(s), inc)),
            excluded.iter().map(|s| v(s)),
        )
    }

    fn as_range(c: &Constraint<SemVersion>) -> &Range<SemVersion> {
        match c {
            Constraint::Range(r) => r,
            other => panic!("expected a range, got {:?}", other),
        }
    }

    #[test]
    fn test_admits_within_bounds() {
        let c = range(Some(("1.0.0", true)), Some(("2.0.0", false)), &[]);
        let r = as_range(&c);

        assert_eq!(r.admits(&v("1.0.0")), Ok(()));
        assert_eq!(r.admits(&v("1.2.3")), Ok(()));
        assert_eq!(
            r.admits(&v("2.0.0")),
            Err(AdmitError::AtOrAboveMax {
                version: "2.0.0".to_string(),
                max: "2.0.0".to_string(),
            })
        );
        assert_eq!(
            r.admits(&v("0.9.0")),
            Err(AdmitError::BelowMin {
                version: "0.9.0".to_string(),
                min: "1.0.0".to_string(),
            })
        );
    }

    #[test]
    fn test_admits_exclusive_min_and_inclusive_max() {
        let c = range(Some(("1.0.0", false)), Some(("2.0.0", true)), &[]);
        let r = as_range(&c);

        assert!(matches!(r.admits(&v("1.0.0")), Err(AdmitError::AtOrBelowMin { .. })));
        assert_eq!(r.admits(&v("2.0.0")), Ok(()));
        assert!(matches!(r.admits(&v("2.0.1")), Err(AdmitError::AboveMax { .. })));
    }

    #[test]
    fn test_admits_rejects_excluded() {
        let c = range(Some(("1.0.0", true)), None, &["1.5.0"]);
        let r = as_range(&c);

        assert_eq!(
            r.admits(&v("1.5.0")),
            Err(AdmitError::Excluded {
                version: "1.5.0".to_string()
            })
        );
        assert_eq!(
            r.admits(&v("1.5.0")).unwrap_err().to_string(),
            "Version 1.5.0 is specifically disallowed."
        );
        assert_eq!(r.admits(&v("1.5.1")), Ok(()));
    }

    #[test]
    fn test_normalize_contradictory_is_empty() {
        assert_eq!(range(Some(("3.0.0", true)), Some(("1.0.0", true)), &[]), Constraint::Empty);
    }

    #[test]
    fn test_normalize_point() {
        assert_eq!(
            range(Some(("2.0.0", true)), Some(("2.0.0", true)), &[]),
            Constraint::Exact(v("2.0.0"))
        );
        assert_eq!(range(Some(("2.0.0", true)), Some(("2.0.0", false)), &[]), Constraint::Empty);
        assert_eq!(
            range(Some(("2.0.0", true)), Some(("2.0.0", true)), &["2.0.0"]),
            Constraint::Empty
        );
    }

    #[test]
    fn test_normalize_boundless() {
        assert_eq!(range(None, None, &[]), Constraint::Universal);

        let c = range(None, None, &["1.0.0"]);
        assert_eq!(as_range(&c).excluded(), &[v("1.0.0")]);
        assert_eq!(c.to_string(), "!=1.0.0");
    }

    #[test]
    fn test_normalize_drops_and_sorts_exclusions() {
        let c = range(
            Some(("1.0.0", true)),
            Some(("2.0.0", false)),
            &["1.7.0", "3.0.0", "1.2.0", "1.7.0", "2.0.0"],
        );

        assert_eq!(as_range(&c).excluded(), &[v("1.2.0"), v("1.7.0")]);
    }

    #[test]
    fn test_intersect_prefers_exclusive_on_ties() {
        let a = range(Some(("1.0.0", true)), Some(("2.0.0", true)), &[]);
        let b = range(Some(("1.0.0", false)), Some(("2.0.0", false)), &[]);

        let c = as_range(&a).intersect(as_range(&b));
        let r = as_range(&c);
        assert!(!r.min().unwrap().is_inclusive());
        assert!(!r.max().unwrap().is_inclusive());
    }

    #[test]
    fn test_intersect_takes_tighter_bounds() {
        let a = range(Some(("1.0.0", true)), None, &[]);
        let b = range(Some(("1.5.0", true)), Some(("3.0.0", false)), &[]);

        let c = as_range(&a).intersect(as_range(&b));
        assert_eq!(c.to_string(), ">=1.5.0, <3.0.0");
    }

    #[test]
    fn test_intersect_drops_exclusions_outside_bounds() {
        let a = range(None, None, &["1.0.0"]);
        let b = range(Some(("2.0.0", true)), None, &[]);

        // the exclusion falls outside the merged bounds and is dropped
        let c = as_range(&a).intersect(as_range(&b));
        assert_eq!(c.to_string(), ">=2.0.0");
    }

    #[test]
    fn test_overlaps_or_touches() {
        let a = range(Some(("1.0.0", true)), Some(("2.0.0", false)), &[]);
        let touching = range(Some(("2.0.0", true)), Some(("3.0.0", true)), &[]);
        let gap = range(Some(("2.0.0", false)), Some(("3.0.0", true)), &[]);
        let later = range(Some(("2.5.0", true)), None, &[]);

        assert!(as_range(&a).overlaps_or_touches(as_range(&touching)));
        assert!(!as_range(&a).overlaps_or_touches(as_range(&gap)));
        assert!(!as_range(&a).overlaps_or_touches(as_range(&later)));
    }

    #[test]
    fn test_merge_readmits_versions_allowed_by_one_side() {
        let a = range(Some(("1.0.0", true)), Some(("3.0.0", true)), &["1.5.0", "2.5.0"]);
        let b = range(Some(("2.0.0", true)), Some(("4.0.0", true)), &["3.5.0"]);

        let merged = as_range(&a).merge(as_range(&b));
        assert_eq!(merged.excluded(), &[v("1.5.0"), v("3.5.0")]);
        assert_eq!(merged.max(), Some(&Bound::inclusive(v("4.0.0"))));
    }

    #[test]
    fn test_display() {
        let c = range(Some(("1.0.0", true)), Some(("2.0.0", false)), &["1.5.0"]);
        assert_eq!(c.to_string(), ">=1.0.0, <2.0.0, !=1.5.0");
    }
}
