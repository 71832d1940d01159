use crate::domain::a001_rozetka_category::Category;
use crate::shared::serde_helpers::{lenient_i64, string_or_number};
use serde::{Deserialize, Serialize};

/// Связь категории магазина с категорией Rozetka.
///
/// Ключ записи: `shop_category_id`, на одну категорию магазина приходится
/// не более одной связи.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMapping {
    #[serde(deserialize_with = "string_or_number")]
    pub shop_category_id: String,

    #[serde(default)]
    pub shop_category_name: String,

    #[serde(deserialize_with = "string_or_number")]
    pub rozetka_category_id: String,

    #[serde(default)]
    pub rozetka_category_name: String,

    #[serde(default)]
    pub rozetka_category_full_name: String,
}

impl CategoryMapping {
    pub fn new(shop: &Category, rozetka: &Category) -> Self {
        Self {
            shop_category_id: shop.id.clone(),
            shop_category_name: shop.display_name().to_string(),
            rozetka_category_id: rozetka.id.clone(),
            rozetka_category_name: rozetka.name.clone(),
            rozetka_category_full_name: rozetka.display_name().to_string(),
        }
    }

    /// Совпадение с текстом фильтра таблицы (без учёта регистра)
    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() {
            return true;
        }
        [
            &self.shop_category_id,
            &self.shop_category_name,
            &self.rozetka_category_id,
            &self.rozetka_category_name,
            &self.rozetka_category_full_name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&filter))
    }
}

/// Ответ `get_category_mappings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetMappingsResponse {
    #[serde(default)]
    pub mappings: Vec<CategoryMapping>,
}

/// Тело `save_category_mappings`: всегда весь набор целиком
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMappingsRequest {
    pub mappings: Vec<CategoryMapping>,
}

/// Ответ `save_category_mappings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveMappingsResponse {
    #[serde(default, alias = "saved_count", deserialize_with = "lenient_i64")]
    pub saved: i64,

    #[serde(default)]
    pub message: String,
}

/// Ответ `auto_map_categories`: предложения сервера
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoMapResponse {
    #[serde(default, alias = "suggestions")]
    pub mappings: Vec<CategoryMapping>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_from_categories() {
        let shop: Category =
            serde_json::from_value(json!({"id": 12, "name": "Телефоны", "full_name": "Электроника > Телефоны"}))
                .unwrap();
        let rozetka: Category = serde_json::from_value(
            json!({"id": "80003", "name": "Мобильные телефоны", "full_name": "Телефоны, MP3 > Мобильные телефоны"}),
        )
        .unwrap();

        let mapping = CategoryMapping::new(&shop, &rozetka);
        assert_eq!(mapping.shop_category_id, "12");
        assert_eq!(mapping.shop_category_name, "Электроника > Телефоны");
        assert_eq!(mapping.rozetka_category_name, "Мобильные телефоны");
        assert_eq!(mapping.rozetka_category_full_name, "Телефоны, MP3 > Мобильные телефоны");
    }

    #[test]
    fn test_matches_filter() {
        let mapping: CategoryMapping = serde_json::from_value(json!({
            "shop_category_id": 12,
            "shop_category_name": "Телефоны",
            "rozetka_category_id": 80003,
            "rozetka_category_name": "Мобильные телефоны",
            "rozetka_category_full_name": "Телефоны, MP3 > Мобильные телефоны"
        }))
        .unwrap();
        assert!(mapping.matches_filter(""));
        assert!(mapping.matches_filter("мобильн"));
        assert!(mapping.matches_filter("8000"));
        assert!(!mapping.matches_filter("ноутбук"));
    }
}
