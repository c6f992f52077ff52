//! Category validation policy
//!
//! The category field can run in two modes: a closed list of known
//! categories, or free-form text. Which one applies is a deployment
//! decision (`CATEGORY_POLICY` env var), not a code change.

use std::str::FromStr;

use super::error::DomainError;

/// Maximum category length in free-form mode
pub const MAX_CATEGORY_LEN: usize = 100;

/// Default closed category list
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Alimentation", "Transport", "Loisirs"];

/// How category values are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Only values from a fixed list are accepted.
    Closed(Vec<String>),
    /// Any non-empty string up to `MAX_CATEGORY_LEN` characters.
    Free,
}

impl CategoryPolicy {
    /// The closed policy with the default category list.
    pub fn closed_default() -> Self {
        Self::Closed(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }

    /// Validate a raw category value, returning the canonical string.
    ///
    /// # Errors
    /// - `DomainError::EmptyCategory` if the value is empty or whitespace
    /// - `DomainError::CategoryTooLong` in free mode past the length cap
    /// - `DomainError::UnknownCategory` in closed mode for values outside
    ///   the list
    pub fn validate(&self, raw: &str) -> Result<String, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::EmptyCategory);
        }

        match self {
            CategoryPolicy::Closed(allowed) => allowed
                .iter()
                .find(|c| c.as_str() == value)
                .cloned()
                .ok_or_else(|| DomainError::UnknownCategory(value.to_string())),
            CategoryPolicy::Free => {
                if value.chars().count() > MAX_CATEGORY_LEN {
                    return Err(DomainError::CategoryTooLong(value.chars().count()));
                }
                Ok(value.to_string())
            }
        }
    }
}

impl FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(Self::closed_default()),
            "free" => Ok(Self::Free),
            other => Err(format!("unknown category policy '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_accepts_listed_category() {
        let policy = CategoryPolicy::closed_default();
        assert_eq!(policy.validate("Transport").unwrap(), "Transport");
    }

    #[test]
    fn test_closed_rejects_unlisted_category() {
        let policy = CategoryPolicy::closed_default();
        let result = policy.validate("Voyages");
        assert!(matches!(result, Err(DomainError::UnknownCategory(_))));
    }

    #[test]
    fn test_free_accepts_arbitrary_category() {
        let policy = CategoryPolicy::Free;
        assert_eq!(policy.validate("Abonnements").unwrap(), "Abonnements");
    }

    #[test]
    fn test_free_rejects_overlong_category() {
        let policy = CategoryPolicy::Free;
        let long = "x".repeat(MAX_CATEGORY_LEN + 1);
        assert!(matches!(
            policy.validate(&long),
            Err(DomainError::CategoryTooLong(_))
        ));
    }

    #[test]
    fn test_empty_category_rejected_in_both_modes() {
        assert!(matches!(
            CategoryPolicy::closed_default().validate("  "),
            Err(DomainError::EmptyCategory)
        ));
        assert!(matches!(
            CategoryPolicy::Free.validate(""),
            Err(DomainError::EmptyCategory)
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "closed".parse::<CategoryPolicy>().unwrap(),
            CategoryPolicy::closed_default()
        );
        assert_eq!("free".parse::<CategoryPolicy>().unwrap(), CategoryPolicy::Free);
        assert!("open".parse::<CategoryPolicy>().is_err());
    }
}
