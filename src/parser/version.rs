use crate::config::ParsingConfig;
use tracing::warn;

/// A named release version and the substrings that identify it in a filename.
///
/// Terms are matched as case-sensitive substrings, not patterns. A rule with
/// no terms can never match and is effectively skipped during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRule {
    pub name: String,
    pub terms: Vec<String>,
}

impl VersionRule {
    #[must_use]
    pub fn new(name: impl Into<String>, terms: Vec<String>) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    /// True when any term occurs in the filename.
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        self.terms.iter().any(|term| filename.contains(term.as_str()))
    }
}

/// Maps a stored filename to a release version using an ordered rule list.
///
/// Rules are walked in order and the first rule with a matching term wins;
/// when two rules could both match, the earlier-ordered one is reported.
/// That ordering is configuration (`version_order`), deliberately not
/// specificity. Resolution is a pure function of the filename, the rule
/// list, and the default: no filename, no match, or an empty rule list all
/// yield the default version.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    rules: Vec<VersionRule>,
    default_version: String,
}

impl VersionResolver {
    #[must_use]
    pub fn new(rules: Vec<VersionRule>, default_version: impl Into<String>) -> Self {
        Self {
            rules,
            default_version: default_version.into(),
        }
    }

    /// Builds a resolver from config, applying `version_order`.
    ///
    /// Names listed in the order come first; configured versions the order
    /// does not mention are appended in file order, so a partial or missing
    /// order list degrades gracefully. Order entries that name no configured
    /// version are skipped with a warning.
    #[must_use]
    pub fn from_config(parsing: &ParsingConfig) -> Self {
        let mut rules = Vec::with_capacity(parsing.versions.len());

        for name in &parsing.version_order {
            match parsing.versions.iter().find(|v| &v.name == name) {
                Some(v) => rules.push(VersionRule::new(v.name.clone(), v.terms.clone())),
                None => warn!("version_order names unknown version '{}', skipping", name),
            }
        }

        for v in &parsing.versions {
            if !rules.iter().any(|r| r.name == v.name) {
                rules.push(VersionRule::new(v.name.clone(), v.terms.clone()));
            }
        }

        Self::new(rules, parsing.default_version.clone())
    }

    #[must_use]
    pub fn rules(&self) -> &[VersionRule] {
        &self.rules
    }

    #[must_use]
    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Resolves a filename to a version name. First matching rule wins.
    #[must_use]
    pub fn resolve(&self, filename: Option<&str>) -> &str {
        let Some(filename) = filename else {
            return &self.default_version;
        };
        if filename.is_empty() {
            return &self.default_version;
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(filename))
            .map_or(self.default_version.as_str(), |rule| rule.name.as_str())
    }

    /// True when the filename matches any rule's terms.
    ///
    /// Existential across all rules rather than first-match; used to pick
    /// out records no rule classifies.
    #[must_use]
    pub fn matches_any(&self, filename: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(filename))
    }
}
