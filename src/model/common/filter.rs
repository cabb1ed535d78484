use serde_json::Value;

/// The category selector value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A record that can be narrowed down by the admin log/ticket filter.
pub trait Filterable {
    /// The field selected by the category drop-down, e.g. an audit action.
    fn discriminant(&self) -> &str;
    /// Structured payload searched as its JSON serialisation.
    fn details(&self) -> Option<&Value>;
    /// Email of the associated user, if any.
    fn user_email(&self) -> Option<&str>;
}

/// Filter criteria from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    /// Exact discriminant to keep, or [`ALL_CATEGORIES`].
    pub category: String,
    /// Case-insensitive free text.
    pub search_text: String,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search_text: String::new(),
        }
    }
}

impl FilterQuery {
    pub fn new(category: impl Into<String>, search_text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search_text: search_text.into(),
        }
    }

    /// Does `item` satisfy both the category and the text criteria?
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.matches_category(item) && self.matches_text(item)
    }

    fn matches_category<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.category == ALL_CATEGORIES || item.discriminant() == self.category
    }

    fn matches_text<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if self.search_text.trim().is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();

        item.discriminant().to_lowercase().contains(&needle)
            || item
                .details()
                .map(|details| details.to_string().to_lowercase().contains(&needle))
                .unwrap_or(false)
            || item
                .user_email()
                .map(|email| email.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

/// Keep the items matching `query`, in their original order.
pub fn filter<'a, T: Filterable>(items: &'a [T], query: &FilterQuery) -> Vec<&'a T> {
    let matching = items
        .iter()
        .filter(|item| query.matches(*item))
        .collect::<Vec<_>>();
    debug!(
        "Filter {:?}/{:?} kept {} of {} items",
        query.category,
        query.search_text,
        matching.len(),
        items.len()
    );
    matching
}

/// The distinct discriminants of `items`, in first-seen order, for populating
/// the category selector.
pub fn categories<T: Filterable>(items: &[T]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for item in items {
        if !seen.iter().any(|c| c == item.discriminant()) {
            seen.push(item.discriminant().to_string());
        }
    }
    seen
}
