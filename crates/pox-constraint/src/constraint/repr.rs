//! Deserialization shape of constraints
//!
//! Incoming ranges are rebuilt through [`Constraint::range`] so that decoded
//! data obeys the same equivalences as constructed data.

use serde::Deserialize;

use super::{Bound, Constraint};
use crate::Version;

#[derive(Deserialize)]
pub(crate) struct RawRange<V> {
    min: Option<Bound<V>>,
    max: Option<Bound<V>>,
    #[serde(default)]
    excluded: Vec<V>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "V: Version + Deserialize<'de>"))]
pub(crate) enum ConstraintRepr<V> {
    Universal,
    Empty,
    Exact(V),
    Range(RawRange<V>),
    Union(Vec<Constraint<V>>),
}

impl<V: Version> From<ConstraintRepr<V>> for Constraint<V> {
    fn from(repr: ConstraintRepr<V>) -> Self {
        match repr {
            ConstraintRepr::Universal => Constraint::Universal,
            ConstraintRepr::Empty => Constraint::Empty,
            ConstraintRepr::Exact(version) => Constraint::Exact(version),
            ConstraintRepr::Range(raw) => Constraint::range(raw.min, raw.max, raw.excluded),
            // members are normalized individually; the list itself is kept as written
            ConstraintRepr::Union(members) => Constraint::Union(members),
        }
    }
}
