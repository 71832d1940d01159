use crate::shared::serde_helpers::{lenient_i64, lenient_opt_f64};
use serde::{Deserialize, Serialize};

/// Ответ `generate`: итог генерации фида
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateFeedResult {
    /// Количество товаров в фиде
    #[serde(default, alias = "products_count", deserialize_with = "lenient_i64")]
    pub products: i64,

    /// Размер файла, байт
    #[serde(default, deserialize_with = "lenient_i64")]
    pub file_size: i64,

    /// Время генерации, секунд
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub generation_time: Option<f64>,

    #[serde(default)]
    pub feed_url: Option<String>,

    /// Предупреждения генератора (товары без цены, без категории и т.п.)
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Ответ `test_generation`: пробный прогон без записи файла
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedPreview {
    #[serde(default, alias = "products_count", deserialize_with = "lenient_i64")]
    pub products: i64,

    /// Начало XML, которое получится
    #[serde(default, alias = "xml")]
    pub preview: String,

    #[serde(default)]
    pub errors: Vec<String>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Ответ `clear_cache`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearCacheResult {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_result_tolerates_strings() {
        let result: GenerateFeedResult = serde_json::from_value(json!({
            "status": "success",
            "products_count": "1520",
            "file_size": 204800,
            "generation_time": "3.41",
            "feed_url": "https://shop.example/rozetka.xml"
        }))
        .unwrap();
        assert_eq!(result.products, 1520);
        assert_eq!(result.file_size, 204800);
        assert_eq!(result.generation_time, Some(3.41));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_preview_defaults() {
        let preview: FeedPreview = serde_json::from_value(json!({"success": true, "xml": "<yml_catalog/>"})).unwrap();
        assert_eq!(preview.preview, "<yml_catalog/>");
        assert_eq!(preview.products, 0);
    }
}
