/// Normalized skill tokens used to query stores and score matches
///
/// Tokens are split on commas, trimmed and lowercased. Empty tokens are
/// dropped, so an empty or absent skill string yields no tokens at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillQuery {
    tokens: Vec<String>,
}

impl SkillQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        Self {
            tokens: normalize_skills(raw),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if any token of `raw` contains one of this query's tokens
    pub fn matches_text(&self, raw: Option<&str>) -> bool {
        let targets = normalize_skills(raw);
        shares_skill(&self.tokens, &targets)
    }

    /// Number of query tokens contained in some token of `raw`
    pub fn relevance(&self, raw: Option<&str>) -> usize {
        let targets = normalize_skills(raw);
        matching_skills(&self.tokens, &targets).len()
    }
}

/// Split a comma-separated skill list into lowercase, trimmed tokens
pub fn normalize_skills(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// A target token matches a reference token when it contains it
#[inline]
pub fn token_matches(target: &str, reference: &str) -> bool {
    target.contains(reference)
}

/// Reference tokens (in their original order) contained in at least one target token
pub fn matching_skills(reference: &[String], targets: &[String]) -> Vec<String> {
    reference
        .iter()
        .filter(|skill| targets.iter().any(|target| token_matches(target, skill)))
        .cloned()
        .collect()
}

/// True if at least one reference token is contained in a target token
pub fn shares_skill(reference: &[String], targets: &[String]) -> bool {
    reference
        .iter()
        .any(|skill| targets.iter().any(|target| token_matches(target, skill)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(
            normalize_skills(Some(" Python ,SQL,  Machine Learning")),
            tokens(&["python", "sql", "machine learning"])
        );
    }

    #[test]
    fn test_normalize_empty_yields_nothing() {
        assert!(normalize_skills(Some("")).is_empty());
        assert!(normalize_skills(Some(" , ,")).is_empty());
        assert!(normalize_skills(None).is_empty());
    }

    #[test]
    fn test_match_direction() {
        // "javascript" contains "java", not the other way round
        assert!(token_matches("javascript", "java"));
        assert!(!token_matches("java", "javascript"));
    }

    #[test]
    fn test_matching_skills_keeps_reference_order() {
        let reference = tokens(&["sql", "python", "go"]);
        let targets = tokens(&["python3", "postgresql"]);
        assert_eq!(matching_skills(&reference, &targets), tokens(&["sql", "python"]));
    }

    #[test]
    fn test_query_relevance() {
        let query = SkillQuery::parse(Some("Rust, Tokio, Kafka"));
        assert_eq!(query.len(), 3);
        assert_eq!(query.relevance(Some("rust, tokio-console")), 2);
        assert!(query.matches_text(Some("Apache Kafka")));
        assert!(!query.matches_text(Some("java")));
        assert!(!SkillQuery::parse(None).matches_text(Some("rust")));
    }
}
