//! Version constraint resolution
//!
//! This module provides:
//! - Satisfaction checks of composer-style constraints against a concrete version
//! - Computation of the narrowest widened constraint that admits a target version

use crate::domain::{ConstraintExpression, ConstraintStyle};
use crate::error::ConstraintError;
use semver::{Version, VersionReq};

const OPERATORS: [&str; 8] = [">=", "<=", "==", "!=", ">", "<", "=", "^"];

/// Parse a version as reported by the package manager (`v1.2`, `1.2.3-RC1`, ...)
pub fn parse_version(raw: &str) -> Result<Version, ConstraintError> {
    let trimmed = raw.trim();
    let unprefixed = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);

    let split_at = unprefixed.find(['-', '+']).unwrap_or(unprefixed.len());
    let (core, rest) = unprefixed.split_at(split_at);

    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0"),
        2 => format!("{core}.0"),
        3 => core.to_string(),
        _ => {
            return Err(ConstraintError::invalid_version(
                raw,
                "expected at most three numeric components",
            ))
        }
    };

    Version::parse(&format!("{padded}{rest}"))
        .map_err(|e| ConstraintError::invalid_version(raw, e.to_string()))
}

/// Check whether `version` satisfies `constraint`
///
/// Alternatives are separated by `||` (or `|`); within an alternative, comparators
/// separated by spaces or commas must all hold. A bare version is an exact match on
/// the components it names.
pub fn satisfies(
    constraint: &ConstraintExpression,
    version: &Version,
) -> Result<bool, ConstraintError> {
    for alternative in constraint.as_str().replace("||", "|").split('|') {
        let requirement = to_version_req(constraint, alternative)?;
        if requirement.matches(version) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Compute the constraint to declare so that `target` is admitted
///
/// Returns `current` unchanged when it already admits `target`. Otherwise the
/// style of `current` is kept as closely as possible:
/// - `~x.y.z` becomes `~<target>`
/// - `~x.y` becomes `~<target major>.<target minor>`
/// - anything else becomes `^<target>`
pub fn resolve_constraint(
    current: &ConstraintExpression,
    target: &str,
) -> Result<ConstraintExpression, ConstraintError> {
    let version = parse_version(target)?;

    if satisfies(current, &version)? {
        return Ok(current.clone());
    }

    let target = target.trim();
    let widened = match current.style() {
        ConstraintStyle::TildePatch => format!("~{target}"),
        ConstraintStyle::TildeMinor => format!("~{}.{}", version.major, version.minor),
        ConstraintStyle::Caret | ConstraintStyle::Other => format!("^{target}"),
    };

    ConstraintExpression::new(widened)
}

fn to_version_req(
    constraint: &ConstraintExpression,
    alternative: &str,
) -> Result<VersionReq, ConstraintError> {
    let invalid = |message: &str| ConstraintError::invalid_constraint(constraint.as_str(), message);

    if alternative.contains('@') || alternative.contains("dev-") {
        return Err(invalid("stability flags and branch aliases are not supported"));
    }

    let mut tokens = Vec::new();
    let mut pending_operator: Option<&str> = None;
    for token in alternative
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        if token == "-" {
            return Err(invalid("hyphen ranges are not supported"));
        }
        if OPERATORS.contains(&token) || token == "~" {
            pending_operator = Some(token);
            continue;
        }
        let joined = match pending_operator.take() {
            Some(op) => format!("{op}{token}"),
            None => token.to_string(),
        };
        tokens.push(normalize_comparator(&joined).ok_or_else(|| {
            invalid("unsupported comparator")
        })?);
    }

    if pending_operator.is_some() {
        return Err(invalid("operator without a version"));
    }
    if tokens.is_empty() {
        return Err(invalid("empty alternative"));
    }

    VersionReq::parse(&tokens.join(", ")).map_err(|e| invalid(&e.to_string()))
}

fn normalize_comparator(token: &str) -> Option<String> {
    if token == "*" {
        return Some("*".to_string());
    }

    let (operator, version) = OPERATORS
        .iter()
        .chain(std::iter::once(&"~"))
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token));

    let version = version.strip_prefix(['v', 'V']).unwrap_or(version);
    if version.is_empty() {
        return None;
    }

    let operator = match operator {
        "!=" => return None,
        "==" => "=",
        "" if version.contains(['*', 'x', 'X']) => "",
        "" => "=",
        other => other,
    };

    Some(format!("{operator}{}", version.replace(['x', 'X'], "*")))
}
