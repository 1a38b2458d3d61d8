//! Constraint string parsing into the constraint algebra

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use semver::Version;
use thiserror::Error;

use crate::constraint::{intersection, union, Bound, Constraint};

/// Error type for constraint parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintParseError {
    #[error("Empty constraint string")]
    Empty,
    #[error("Could not parse version constraint {constraint}: {reason}")]
    Invalid { constraint: String, reason: String },
    #[error("Invalid version string \"{version}\": {reason}")]
    InvalidVersion { version: String, reason: String },
}

lazy_static! {
    // OR constraint splitter
    static ref OR_CONSTRAINT_RE: Regex = Regex::new(r"\s*\|\|\s*").unwrap();

    // AND constraint splitter
    static ref AND_CONSTRAINT_RE: Regex = Regex::new(r"[\s,]+").unwrap();

    // Operators may be followed by whitespace, e.g. ">= 1.2"
    static ref OPERATOR_SPACE_RE: Regex = Regex::new(r"(~|\^|>=|<=|!=|==|=|>|<)\s+").unwrap();

    static ref HYPHEN_RE: Regex = Regex::new(r"^(\S+)\s+-\s+(\S+)$").unwrap();

    static ref WILDCARD_RE: Regex = Regex::new(r"^v?[xX*](?:\.[xX*])*$").unwrap();

    static ref TERM_RE: Regex = Regex::new(
        r"^(~|\^|>=|<=|!=|==|=|>|<)?v?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?([-+][0-9A-Za-z.+-]*)?$"
    ).unwrap();
}

/// A version as written in a constraint, possibly missing trailing components.
#[derive(Debug, Clone)]
struct PartialVersion {
    /// Numeric components given before the first wildcard
    parts: Vec<u64>,
    /// Pre-release and build suffix, only allowed on complete versions
    suffix: String,
}

impl PartialVersion {
    fn is_complete(&self) -> bool {
        self.parts.len() == 3
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }

    /// The lowest version matching this partial version
    fn floor(&self, raw: &str) -> Result<Version, ConstraintParseError> {
        let text = format!(
            "{}.{}.{}{}",
            self.component(0),
            self.component(1),
            self.component(2),
            self.suffix
        );
        Version::parse(&text).map_err(|e| ConstraintParseError::InvalidVersion {
            version: raw.to_string(),
            reason: e.to_string(),
        })
    }

    /// The first version above everything matching this partial version
    fn ceiling(&self, raw: &str) -> Result<Version, ConstraintParseError> {
        let (major, minor, patch) = (self.component(0), self.component(1), self.component(2));
        Ok(match self.parts.len() {
            1 => Version::new(bump(major, raw)?, 0, 0),
            2 => Version::new(major, bump(minor, raw)?, 0),
            _ => Version::new(major, minor, bump(patch, raw)?),
        })
    }

    /// The first version above everything a tilde constraint admits
    fn tilde_ceiling(&self, raw: &str) -> Result<Version, ConstraintParseError> {
        let (major, minor) = (self.component(0), self.component(1));
        Ok(match self.parts.len() {
            1 => Version::new(bump(major, raw)?, 0, 0),
            _ => Version::new(major, bump(minor, raw)?, 0),
        })
    }

    /// The first version above everything a caret constraint admits
    fn caret_ceiling(&self, raw: &str) -> Result<Version, ConstraintParseError> {
        let (major, minor, patch) = (self.component(0), self.component(1), self.component(2));
        Ok(if major > 0 || self.parts.len() == 1 {
            Version::new(bump(major, raw)?, 0, 0)
        } else if minor > 0 || self.parts.len() == 2 {
            Version::new(0, bump(minor, raw)?, 0)
        } else {
            Version::new(0, 0, bump(patch, raw)?)
        })
    }
}

/// Increment a version component, failing when it has no successor
fn bump(component: u64, raw: &str) -> Result<u64, ConstraintParseError> {
    component
        .checked_add(1)
        .ok_or_else(|| ConstraintParseError::InvalidVersion {
            version: raw.to_string(),
            reason: "version component has no successor".to_string(),
        })
}

/// Parses constraint strings such as `^1.2 || >=2.0.0, !=2.1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintParser;

impl ConstraintParser {
    pub fn new() -> Self {
        ConstraintParser
    }

    /// Parse a constraint string into a normalized constraint
    pub fn parse(&self, constraints: &str) -> Result<Constraint<Version>, ConstraintParseError> {
        let constraints = constraints.trim();

        if constraints.is_empty() {
            return Err(ConstraintParseError::Empty);
        }

        // Split by OR (||)
        let or_constraints: Vec<&str> = OR_CONSTRAINT_RE.split(constraints).collect();

        // Check for leading/trailing operators
        if or_constraints.first().map_or(false, |s| s.is_empty()) {
            return Err(ConstraintParseError::Invalid {
                constraint: constraints.to_string(),
                reason: "leading operator".to_string(),
            });
        }
        if or_constraints.last().map_or(false, |s| s.is_empty()) {
            return Err(ConstraintParseError::Invalid {
                constraint: constraints.to_string(),
                reason: "trailing operator".to_string(),
            });
        }

        let mut or_groups = Vec::with_capacity(or_constraints.len());
        for or_constraint in or_constraints {
            or_groups.push(self.parse_conjunction(or_constraint)?);
        }

        let parsed = union(or_groups);
        log::debug!("parsed constraint \"{}\" as {}", constraints, parsed);

        Ok(parsed)
    }

    fn parse_conjunction(&self, input: &str) -> Result<Constraint<Version>, ConstraintParseError> {
        if input.is_empty() {
            return Err(ConstraintParseError::Invalid {
                constraint: input.to_string(),
                reason: "empty alternative".to_string(),
            });
        }

        if let Some(caps) = HYPHEN_RE.captures(input) {
            return self.parse_hyphen_constraint(&caps);
        }

        let collapsed = OPERATOR_SPACE_RE.replace_all(input, "$1");
        let mut terms = Vec::new();
        for term in AND_CONSTRAINT_RE.split(&collapsed).filter(|t| !t.is_empty()) {
            terms.push(self.parse_constraint(term)?);
        }

        Ok(intersection(terms))
    }

    /// Parse a single term such as `>=1.2.3`, `~1.2` or `1.x`
    fn parse_constraint(&self, constraint: &str) -> Result<Constraint<Version>, ConstraintParseError> {
        if WILDCARD_RE.is_match(constraint) {
            return Ok(Constraint::Universal);
        }

        let caps = TERM_RE
            .captures(constraint)
            .ok_or_else(|| ConstraintParseError::Invalid {
                constraint: constraint.to_string(),
                reason: "unrecognized constraint".to_string(),
            })?;

        let operator = caps.get(1).map_or("", |m| m.as_str());
        let partial = self.partial_version(&caps, constraint)?;

        if partial.parts.is_empty() {
            return Ok(Constraint::Universal);
        }

        let floor = partial.floor(constraint)?;
        let complete = partial.is_complete();

        let parsed = match operator {
            "" | "=" | "==" if complete => Constraint::Exact(floor),
            "" | "=" | "==" => half_open(floor, partial.ceiling(constraint)?),
            "!=" if complete => Constraint::range(None, None, [floor]),
            "!=" => union([
                Constraint::range(None, Some(Bound::exclusive(floor)), []),
                Constraint::range(Some(Bound::inclusive(partial.ceiling(constraint)?)), None, []),
            ]),
            ">" if complete => Constraint::range(Some(Bound::exclusive(floor)), None, []),
            ">" => Constraint::range(Some(Bound::inclusive(partial.ceiling(constraint)?)), None, []),
            ">=" => Constraint::range(Some(Bound::inclusive(floor)), None, []),
            "<" => Constraint::range(None, Some(Bound::exclusive(floor)), []),
            "<=" if complete => Constraint::range(None, Some(Bound::inclusive(floor)), []),
            "<=" => Constraint::range(None, Some(Bound::exclusive(partial.ceiling(constraint)?)), []),
            "~" => half_open(floor, partial.tilde_ceiling(constraint)?),
            "^" => half_open(floor, partial.caret_ceiling(constraint)?),
            other => {
                return Err(ConstraintParseError::Invalid {
                    constraint: constraint.to_string(),
                    reason: format!("unsupported operator \"{}\"", other),
                })
            }
        };

        Ok(parsed)
    }

    fn parse_hyphen_constraint(&self, caps: &Captures) -> Result<Constraint<Version>, ConstraintParseError> {
        let from = self.parse_bare_version(&caps[1])?;
        let to = self.parse_bare_version(&caps[2])?;

        let lower = Bound::inclusive(from.floor(&caps[1])?);
        let upper = if to.is_complete() {
            Bound::inclusive(to.floor(&caps[2])?)
        } else {
            Bound::exclusive(to.ceiling(&caps[2])?)
        };

        Ok(Constraint::range(Some(lower), Some(upper), []))
    }

    fn parse_bare_version(&self, version: &str) -> Result<PartialVersion, ConstraintParseError> {
        let invalid = || ConstraintParseError::InvalidVersion {
            version: version.to_string(),
            reason: "expected a version without operator".to_string(),
        };

        let caps = TERM_RE.captures(version).ok_or_else(invalid)?;
        if caps.get(1).is_some() {
            return Err(invalid());
        }

        let partial = self.partial_version(&caps, version)?;
        if partial.parts.is_empty() {
            return Err(invalid());
        }
        Ok(partial)
    }

    fn partial_version(&self, caps: &Captures, raw: &str) -> Result<PartialVersion, ConstraintParseError> {
        let mut parts = Vec::with_capacity(3);
        for index in 2..=4 {
            let Some(component) = caps.get(index) else {
                break;
            };
            // components after a wildcard are ignored
            if component.as_str().eq_ignore_ascii_case("x") || component.as_str() == "*" {
                break;
            }
            let value = component
                .as_str()
                .parse::<u64>()
                .map_err(|e| ConstraintParseError::InvalidVersion {
                    version: raw.to_string(),
                    reason: e.to_string(),
                })?;
            parts.push(value);
        }

        let suffix = caps.get(5).map_or("", |m| m.as_str()).to_string();
        if !suffix.is_empty() && parts.len() != 3 {
            return Err(ConstraintParseError::InvalidVersion {
                version: raw.to_string(),
                reason: "pre-release or build metadata requires a complete version".to_string(),
            });
        }

        Ok(PartialVersion { parts, suffix })
    }
}

fn half_open(floor: Version, ceiling: Version) -> Constraint<Version> {
    Constraint::range(Some(Bound::inclusive(floor)), Some(Bound::exclusive(ceiling)), [])
}

impl FromStr for Constraint<Version> {
    type Err = ConstraintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintParser::new().parse(s)
    }
}
