use crate::shared::serde_helpers::{lenient_i64, lenient_opt_f64, string_or_number};
use serde::{Deserialize, Serialize};

/// Итог одного запуска генерации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    #[default]
    Success,
    #[serde(alias = "failed")]
    Error,
    Running,
}

impl GenerationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationStatus::Success => "Успешно",
            GenerationStatus::Error => "Ошибка",
            GenerationStatus::Running => "Выполняется",
        }
    }
}

/// Строка истории генераций
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationHistoryEntry {
    #[serde(default, alias = "history_id", deserialize_with = "string_or_number")]
    pub id: String,

    /// Время запуска как его отдаёт сервер ("2024-03-15 14:02:26")
    #[serde(default, alias = "date_generated", alias = "created_at")]
    pub date: String,

    #[serde(default)]
    pub status: GenerationStatus,

    #[serde(default, alias = "products_count", deserialize_with = "lenient_i64")]
    pub products: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub file_size: i64,

    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub generation_time: Option<f64>,

    #[serde(default, alias = "error")]
    pub error_message: Option<String>,
}

/// Ответ `get_history`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHistoryResponse {
    #[serde(default, alias = "items")]
    pub history: Vec<GenerationHistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_rows() {
        let resp: GetHistoryResponse = serde_json::from_value(json!({
            "status": "success",
            "history": [
                {"history_id": 7, "date_generated": "2024-03-15 14:02:26", "status": "success",
                 "products_count": "1520", "file_size": "204800", "generation_time": 3.4},
                {"id": "8", "date": "2024-03-16 10:00:00", "status": "failed", "error": "Нет товаров"}
            ]
        }))
        .unwrap();
        assert_eq!(resp.history.len(), 2);
        assert_eq!(resp.history[0].id, "7");
        assert_eq!(resp.history[0].products, 1520);
        assert_eq!(resp.history[1].status, GenerationStatus::Error);
        assert_eq!(resp.history[1].error_message.as_deref(), Some("Нет товаров"));
    }
}
