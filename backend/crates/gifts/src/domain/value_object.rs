//! Search Filter

/// Optional filters assembled into one search query
///
/// Every field is independent; absent fields do not constrain the
/// result. A blank or whitespace-only name is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftFilter {
    /// Case-insensitive substring match on the name
    pub name_contains: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Exact condition
    pub condition: Option<String>,
    /// Upper bound on age in years
    pub max_age_years: Option<i32>,
}

impl GiftFilter {
    /// Build a filter, normalizing blank strings to absent
    pub fn new(
        name: Option<String>,
        category: Option<String>,
        condition: Option<String>,
        max_age_years: Option<i32>,
    ) -> Self {
        Self {
            name_contains: normalize(name),
            category: normalize(category),
            condition: normalize(condition),
            max_age_years,
        }
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_none()
            && self.category.is_none()
            && self.condition.is_none()
            && self.max_age_years.is_none()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_treated_as_absent() {
        let filter = GiftFilter::new(Some("   ".to_string()), None, None, None);
        assert!(filter.name_contains.is_none());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_trimmed_values_kept() {
        let filter = GiftFilter::new(
            Some("  chair ".to_string()),
            Some("Furniture".to_string()),
            None,
            Some(5),
        );
        assert_eq!(filter.name_contains.as_deref(), Some("chair"));
        assert_eq!(filter.category.as_deref(), Some("Furniture"));
        assert!(filter.condition.is_none());
        assert_eq!(filter.max_age_years, Some(5));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(GiftFilter::default().is_empty());
    }
}
