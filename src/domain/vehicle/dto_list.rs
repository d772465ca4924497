use crate::shared::PageRequest;

/// Vehicle listing query.
///
/// Filters are substring matches that ignore ASCII case (non-ASCII letters
/// compare exactly, as SQLite's `lower()` does) and are applied before
/// pagination. Blank filters are ignored.
#[derive(Debug, Clone, Default)]
pub struct VehicleQuery {
    pub page: PageRequest,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl VehicleQuery {
    pub fn brand_filter(&self) -> Option<&str> {
        non_blank(self.brand.as_deref())
    }

    pub fn model_filter(&self) -> Option<&str> {
        non_blank(self.model.as_deref())
    }

    /// In-process form of the filters, used by non-SQL repositories.
    pub fn matches(&self, brand: &str, model: &str) -> bool {
        contains_ignore_case(brand, self.brand_filter())
            && contains_ignore_case(model, self.model_filter())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_filter_is_case_insensitive_substring() {
        let query = VehicleQuery {
            brand: Some("toy".into()),
            ..Default::default()
        };
        assert!(query.matches("Toyota", "Corolla"));
        assert!(!query.matches("Honda", "Civic"));
    }

    #[test]
    fn blank_filters_match_everything() {
        let query = VehicleQuery {
            brand: Some("   ".into()),
            model: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.brand_filter(), None);
        assert!(query.matches("Honda", "Civic"));
    }

    #[test]
    fn brand_and_model_filters_combine() {
        let query = VehicleQuery {
            brand: Some("TOY".into()),
            model: Some("cor".into()),
            ..Default::default()
        };
        assert!(query.matches("Toyota", "Corolla"));
        assert!(!query.matches("Toyota", "Hilux"));
    }

    #[test]
    fn non_ascii_letters_compare_exactly() {
        let query = VehicleQuery {
            brand: Some("Škoda".into()),
            ..Default::default()
        };
        assert!(query.matches("ŠKODA", "Octavia"));

        let lowercase = VehicleQuery {
            brand: Some("škoda".into()),
            ..Default::default()
        };
        assert!(!lowercase.matches("ŠKODA", "Octavia"));
    }
}
