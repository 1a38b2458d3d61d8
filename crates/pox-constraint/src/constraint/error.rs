//! Admission failures

use thiserror::Error;

/// The reason a constraint rejected a version.
///
/// Versions are captured in their display form so that failures from
/// different constraints can be collected and reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmitError {
    #[error("The empty constraint admits no versions.")]
    Empty,
    #[error("{version} is not equal to {expected}")]
    NotExact { version: String, expected: String },
    #[error("{version} is less than {min}")]
    BelowMin { version: String, min: String },
    #[error("{version} is less than or equal to {min}")]
    AtOrBelowMin { version: String, min: String },
    #[error("{version} is greater than {max}")]
    AboveMax { version: String, max: String },
    #[error("{version} is greater than or equal to {max}")]
    AtOrAboveMax { version: String, max: String },
    #[error("Version {version} is specifically disallowed.")]
    Excluded { version: String },
    #[error("{version} is not admitted by any member of the union ({})", join_failures(.failures))]
    NoMember {
        version: String,
        failures: Vec<AdmitError>,
    },
}

impl AdmitError {
    /// Failures of the individual union members, in member order
    pub fn failures(&self) -> &[AdmitError] {
        match self {
            AdmitError::NoMember { failures, .. } => failures,
            _ => &[],
        }
    }

    /// Check if the failure comes from a lower or upper bound
    pub fn is_bound_violation(&self) -> bool {
        matches!(
            self,
            AdmitError::BelowMin { .. }
                | AdmitError::AtOrBelowMin { .. }
                | AdmitError::AboveMax { .. }
                | AdmitError::AtOrAboveMax { .. }
        )
    }
}

fn join_failures(failures: &[AdmitError]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_is_fixed() {
        assert_eq!(
            AdmitError::Empty.to_string(),
            "The empty constraint admits no versions."
        );
    }

    #[test]
    fn test_no_member_lists_every_failure() {
        let err = AdmitError::NoMember {
            version: "3.0.0".to_string(),
            failures: vec![
                AdmitError::AtOrAboveMax {
                    version: "3.0.0".to_string(),
                    max: "2.0.0".to_string(),
                },
                AdmitError::Excluded {
                    version: "3.0.0".to_string(),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "3.0.0 is not admitted by any member of the union \
             (3.0.0 is greater than or equal to 2.0.0; Version 3.0.0 is specifically disallowed.)"
        );
        assert_eq!(err.failures().len(), 2);
        assert!(err.failures()[0].is_bound_violation());
        assert!(!err.failures()[1].is_bound_violation());
    }
}
