use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters accepted by both recommendation endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendationQuery {
    #[validate(range(min = 1, max = 10))]
    #[serde(default)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_bounds() {
        assert!(RecommendationQuery { limit: None }.validate().is_ok());
        assert!(RecommendationQuery { limit: Some(10) }.validate().is_ok());
        assert!(RecommendationQuery { limit: Some(0) }.validate().is_err());
        assert!(RecommendationQuery { limit: Some(11) }.validate().is_err());
    }
}
