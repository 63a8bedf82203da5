//! Search expression parsing for the repository listing.
//!
//! A search expression is split on whitespace. Tokens of the form
//! `org:<value>` are structured clauses restricting the internal-organization
//! slug; everything else is rejoined, in order, into a single fuzzy clause
//! matched against the repository name. All matching is case-insensitive
//! substring containment.

/// Prefix marking a structured organization-slug clause.
const ORG_CLAUSE_PREFIX: &str = "org:";

/// A parsed search expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchExpression {
    slug_clauses: Vec<String>,
    name_clause: Option<String>,
}

impl SearchExpression {
    /// Parse a free-text search input.
    ///
    /// An `org:` token with an empty value is kept as-is: it degenerates to a
    /// filter every slug satisfies, which mirrors how the listing has always
    /// behaved.
    pub fn parse(input: &str) -> Self {
        let mut slug_clauses = Vec::new();
        let mut fuzzy_tokens = Vec::new();

        for token in input.split_whitespace() {
            match token.strip_prefix(ORG_CLAUSE_PREFIX) {
                Some(value) => slug_clauses.push(value.to_string()),
                None => fuzzy_tokens.push(token),
            }
        }

        let name_clause = if fuzzy_tokens.is_empty() {
            None
        } else {
            Some(fuzzy_tokens.join(" "))
        };

        Self {
            slug_clauses,
            name_clause,
        }
    }

    /// Organization-slug clauses; every clause must match (AND semantics).
    pub fn slug_clauses(&self) -> &[String] {
        &self.slug_clauses
    }

    /// The fuzzy repository-name clause, if any plain tokens were given.
    pub fn name_clause(&self) -> Option<&str> {
        self.name_clause.as_deref()
    }

    /// Whether the expression applies no filtering at all.
    pub fn is_empty(&self) -> bool {
        self.slug_clauses.is_empty() && self.name_clause.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        let expr = SearchExpression::parse("");
        assert!(expr.is_empty());
        assert!(expr.slug_clauses().is_empty());
        assert!(expr.name_clause().is_none());
    }

    #[test]
    fn test_parse_whitespace_only() {
        let expr = SearchExpression::parse("   \t  ");
        assert!(expr.is_empty());
    }

    #[test]
    fn test_parse_plain_tokens_rejoin_in_order() {
        let expr = SearchExpression::parse("hello   brave  world");
        assert!(expr.slug_clauses().is_empty());
        assert_eq!(expr.name_clause(), Some("hello brave world"));
    }

    #[test]
    fn test_parse_org_clauses() {
        let expr = SearchExpression::parse("org:acme org:widgets");
        assert_eq!(expr.slug_clauses(), ["acme", "widgets"]);
        assert!(expr.name_clause().is_none());
    }

    #[test]
    fn test_parse_mixed_preserves_fuzzy_order() {
        let expr = SearchExpression::parse("wid org:acm gets");
        assert_eq!(expr.slug_clauses(), ["acm"]);
        assert_eq!(expr.name_clause(), Some("wid gets"));
    }

    #[test]
    fn test_parse_empty_org_value_is_kept() {
        // A bare `org:` is a degenerate always-true clause, not an error
        let expr = SearchExpression::parse("org:");
        assert_eq!(expr.slug_clauses(), [""]);
        assert!(!expr.is_empty());
    }

    #[test]
    fn test_parse_org_prefix_only_matches_at_token_start() {
        let expr = SearchExpression::parse("borg:cube");
        assert!(expr.slug_clauses().is_empty());
        assert_eq!(expr.name_clause(), Some("borg:cube"));
    }
}
