use super::aggregate::Category;
use serde::{Deserialize, Serialize};

/// Минимальная длина запроса; более короткие запросы не отправляются
pub const SEARCH_MIN_CHARS: usize = 2;

/// Сколько категорий просить у сервера за один поиск
pub const SEARCH_LIMIT: usize = 10;

/// Что делать с введённой строкой поиска
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Поле очищено: вернуть подсказку
    Clear,
    /// Один символ: ничего не делать
    Ignore,
    /// Отправить запрос с этим текстом
    Lookup(String),
}

impl SearchQuery {
    pub fn classify(raw: &str) -> Self {
        let term = raw.trim();
        match term.chars().count() {
            0 => SearchQuery::Clear,
            n if n < SEARCH_MIN_CHARS => SearchQuery::Ignore,
            _ => SearchQuery::Lookup(term.to_string()),
        }
    }
}

/// Состояние списка результатов поиска
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchResults {
    #[default]
    Prompt,
    Loading,
    Found(Vec<Category>),
    NotFound,
    Failed(String),
}

impl SearchResults {
    pub fn from_items(items: Vec<Category>) -> Self {
        if items.is_empty() {
            SearchResults::NotFound
        } else {
            SearchResults::Found(items)
        }
    }

    pub fn items(&self) -> &[Category] {
        match self {
            SearchResults::Found(items) => items,
            _ => &[],
        }
    }
}

/// Ответ `search_*_categories`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCategoriesResponse {
    #[serde(default, alias = "categories", alias = "results")]
    pub items: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify() {
        assert_eq!(SearchQuery::classify(""), SearchQuery::Clear);
        assert_eq!(SearchQuery::classify("   "), SearchQuery::Clear);
        assert_eq!(SearchQuery::classify("т"), SearchQuery::Ignore);
        assert_eq!(SearchQuery::classify(" т "), SearchQuery::Ignore);
        assert_eq!(
            SearchQuery::classify(" те "),
            SearchQuery::Lookup("те".to_string())
        );
    }

    #[test]
    fn test_results_from_items() {
        assert_eq!(SearchResults::from_items(vec![]), SearchResults::NotFound);
        assert!(SearchResults::Prompt.items().is_empty());
    }

    #[test]
    fn test_response_aliases() {
        let resp: SearchCategoriesResponse = serde_json::from_value(json!({
            "status": "success",
            "categories": [{"id": 1, "name": "A"}, {"id": "2", "name": "B"}]
        }))
        .unwrap();
        let results = SearchResults::from_items(resp.items);
        assert_eq!(results.items().len(), 2);
        assert_eq!(results.items()[1].id, "2");
    }
}
