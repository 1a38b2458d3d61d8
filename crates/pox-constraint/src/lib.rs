//! Constraint algebra over semantic versions
//!
//! This crate represents "the set of versions satisfying a requirement" as a
//! [`Constraint`] and combines such sets with intersection and union, so that a
//! dependency resolver can decide whether several requirements on the same
//! package are jointly satisfiable.
//!
//! ```
//! use pox_constraint::{intersection, Constraint};
//! use semver::Version;
//!
//! let a: Constraint<Version> = "^1.2".parse().unwrap();
//! let b: Constraint<Version> = ">=1.4.0, !=1.5.0".parse().unwrap();
//!
//! let both = intersection([a, b]);
//! assert!(both.admits(&Version::new(1, 6, 0)).is_ok());
//! assert!(both.admits(&Version::new(1, 5, 0)).is_err());
//! ```

pub mod constraint;
mod constraint_parser;
mod version;

pub use constraint::{intersection, is_empty_set, is_universal, union, AdmitError, Bound, Constraint, Range};
pub use constraint_parser::{ConstraintParseError, ConstraintParser};
pub use version::Version;
