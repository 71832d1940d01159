use crate::shared::serde_helpers::lenient_i64;
use serde::{Deserialize, Serialize};

/// Ответ `import_rozetka_categories`
///
/// Сам файл (массив `{categoryId, name, fullName, url, level, parentId}`)
/// разбирает сервер; клиент только проверяет тип и размер.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryImportResult {
    #[serde(default, alias = "imported_count", deserialize_with = "lenient_i64")]
    pub imported: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub skipped: i64,

    #[serde(default)]
    pub message: String,
}

impl CategoryImportResult {
    pub fn summary(&self) -> String {
        if !self.message.trim().is_empty() {
            return self.message.clone();
        }
        if self.skipped > 0 {
            format!(
                "Импортировано категорий: {}, пропущено: {}",
                self.imported, self.skipped
            )
        } else {
            format!("Импортировано категорий: {}", self.imported)
        }
    }
}

/// Ответ `clear_rozetka_categories`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearCategoriesResult {
    #[serde(default, alias = "deleted_count", deserialize_with = "lenient_i64")]
    pub deleted: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_summary() {
        let result: CategoryImportResult =
            serde_json::from_value(json!({"status": "success", "imported_count": "120", "skipped": 3}))
                .unwrap();
        assert_eq!(result.summary(), "Импортировано категорий: 120, пропущено: 3");

        let result: CategoryImportResult =
            serde_json::from_value(json!({"success": true, "message": "Готово"})).unwrap();
        assert_eq!(result.summary(), "Готово");
    }
}
