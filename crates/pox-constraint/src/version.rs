//! The version collaborator contract

use std::fmt;

/// A version that constraints can be built over.
///
/// Ordering decides every bound check, equality decides exact matches and
/// exclusions, and the display form is only used when building admission
/// errors. Any totally ordered, printable value qualifies; the crate itself
/// parses constraint strings into [`semver::Version`].
pub trait Version: Ord + Clone + fmt::Display + fmt::Debug {}

impl<T> Version for T where T: Ord + Clone + fmt::Display + fmt::Debug {}
