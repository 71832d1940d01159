use crate::shared::serde_helpers::{lenient_i64, opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

// ============================================================================
// Namespace
// ============================================================================

/// Пространство категорий: категории магазина или дерево Rozetka
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryNamespace {
    Shop,
    Rozetka,
}

impl CategoryNamespace {
    /// Действие сервера для поиска в пространстве
    pub fn search_action(&self) -> &'static str {
        match self {
            CategoryNamespace::Shop => "search_shop_categories",
            CategoryNamespace::Rozetka => "search_rozetka_categories",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryNamespace::Shop => "Категории магазина",
            CategoryNamespace::Rozetka => "Категории Rozetka",
        }
    }
}

// ============================================================================
// Category
// ============================================================================

/// Категория из результатов поиска. Клиент её не изменяет.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "category_id", alias = "categoryId", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Полный путь вида "Электроника > Телефоны"
    #[serde(default, alias = "fullName", alias = "path")]
    pub full_name: String,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub level: i64,

    #[serde(
        default,
        alias = "parentId",
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
}

impl Category {
    /// Подпись для списка: полный путь, если сервер его прислал
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_server_row() {
        let cat: Category = serde_json::from_value(json!({
            "category_id": 80003,
            "name": "Смартфоны",
            "full_name": "Телефоны > Смартфоны",
            "level": "2",
            "parent_id": "80001"
        }))
        .unwrap();
        assert_eq!(cat.id, "80003");
        assert_eq!(cat.level, 2);
        assert_eq!(cat.parent_id.as_deref(), Some("80001"));
        assert_eq!(cat.display_name(), "Телефоны > Смартфоны");
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let cat: Category = serde_json::from_value(json!({"id": "5", "name": "Ноутбуки"})).unwrap();
        assert_eq!(cat.display_name(), "Ноутбуки");
        assert_eq!(cat.parent_id, None);
    }
}
