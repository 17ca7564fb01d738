use crate::allocator::WeightAllocator;
use crate::models::criterion::Criterion;

/// Prefix that turns the selection box into a "create new criterion" request.
pub const CREATE_PREFIX: char = '/';

/// What the user typed into the criteria selection box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionQuery {
    /// Case-insensitive substring filter over catalog names (already lowercased).
    Filter(String),
    /// `/name` creates a new criterion called `name`.
    Create(String),
}

impl SelectionQuery {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.strip_prefix(CREATE_PREFIX) {
            Some(rest) => SelectionQuery::Create(rest.trim().to_string()),
            None => SelectionQuery::Filter(input.to_lowercase()),
        }
    }
}

/// Catalog criteria that are not active yet and match `filter`, in catalog order.
pub fn available_criteria<'a>(
    catalog: &'a [Criterion],
    allocator: &WeightAllocator,
    filter: &str,
) -> Vec<&'a Criterion> {
    let filter = filter.to_lowercase();
    catalog
        .iter()
        .filter(|c| !allocator.contains(&c.name))
        .filter(|c| filter.is_empty() || c.name.to_lowercase().contains(&filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Criterion> {
        ["Grammar", "Experience", "Education", "Skills", "Relevance"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| Criterion {
                id: Some(i as i64 + 1),
                name: name.to_string(),
                description: format!("{name} description"),
            })
            .collect()
    }

    #[test]
    fn test_parse_slash_is_create() {
        assert_eq!(
            SelectionQuery::parse("/ Leadership "),
            SelectionQuery::Create("Leadership".to_string())
        );
        assert_eq!(
            SelectionQuery::parse("  /Teamwork"),
            SelectionQuery::Create("Teamwork".to_string())
        );
    }

    #[test]
    fn test_parse_plain_text_is_lowercased_filter() {
        assert_eq!(
            SelectionQuery::parse(" EXP "),
            SelectionQuery::Filter("exp".to_string())
        );
        assert_eq!(SelectionQuery::parse(""), SelectionQuery::Filter(String::new()));
    }

    #[test]
    fn test_available_excludes_active_criteria() {
        let catalog = catalog();
        let allocator = WeightAllocator::with_criteria(["Grammar", "Skills"]).unwrap();
        let names: Vec<&str> = available_criteria(&catalog, &allocator, "")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Experience", "Education", "Relevance"]);
    }

    #[test]
    fn test_available_filters_case_insensitively() {
        let catalog = catalog();
        let allocator = WeightAllocator::new();
        let names: Vec<&str> = available_criteria(&catalog, &allocator, "E")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Experience", "Education", "Relevance"]);
        assert!(available_criteria(&catalog, &allocator, "xyz").is_empty());
    }
}
