//! Blocking probe output parsing
//!
//! A blocking probe explains why a package cannot be upgraded to a version.
//! Each relevant output line has the shape
//! `vendor/requirer 1.2.3 requires vendor/blocked (^2.0)`.

use regex::Regex;
use std::sync::LazyLock;

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-zA-Z0-9_-]+/[a-zA-Z0-9_.-]+)\s+(\S+)\s+requires\s+([a-zA-Z0-9_-]+/[a-zA-Z0-9_.-]+)\s+\(([^()]+)\)",
    )
    .unwrap()
});

/// A single `requires` line from a blocking probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingRequirement {
    /// Package that carries the requirement
    pub requirer: String,
    /// Version of the requirer the line refers to
    pub requirer_version: String,
    /// Package that is required
    pub required: String,
    /// Constraint placed on the required package
    pub constraint: String,
}

/// Extract every requirement line from blocking probe output, in order
pub fn parse_blocking_probe(output: &str) -> Vec<BlockingRequirement> {
    output
        .lines()
        .filter_map(|line| REQUIREMENT_RE.captures(line.trim_start()))
        .map(|caps| BlockingRequirement {
            requirer: caps[1].to_string(),
            requirer_version: caps[2].to_string(),
            required: caps[3].to_string(),
            constraint: caps[4].trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHY_NOT_OUTPUT: &str = "\
laravel/framework v11.0.0 requires symfony/console (^7.0)
laravel/framework v11.0.0 requires php (^8.2)
app/site         dev-main requires laravel/framework (^10.0)
Not all requirements could be resolved.
";

    #[test]
    fn test_parse_extracts_requirement_lines() {
        let reqs = parse_blocking_probe(WHY_NOT_OUTPUT);
        assert_eq!(reqs.len(), 2);
        assert_eq!(
            reqs[0],
            BlockingRequirement {
                requirer: "laravel/framework".to_string(),
                requirer_version: "v11.0.0".to_string(),
                required: "symfony/console".to_string(),
                constraint: "^7.0".to_string(),
            }
        );
        assert_eq!(reqs[1].requirer, "app/site");
        assert_eq!(reqs[1].required, "laravel/framework");
    }

    #[test]
    fn test_parse_ignores_platform_requirements() {
        // `php` has no vendor prefix and never matches
        let reqs = parse_blocking_probe("vendor/a 2.0.0 requires php (>=8.3)\n");
        assert!(reqs.is_empty());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_blocking_probe("").is_empty());
        assert!(parse_blocking_probe("There is no installed package depending on it").is_empty());
    }

    #[test]
    fn test_parse_constraint_with_spaces() {
        let reqs = parse_blocking_probe("a/a 1.0.0 requires b/b (>=1.0 <2.0)");
        assert_eq!(reqs[0].constraint, ">=1.0 <2.0");
    }
}
