//! Контракт ответов сервера модуля.
//!
//! Большинство действий отвечают `{"status": "success", ...payload}` либо
//! объектом с полем `error` / `error_message`. Старые действия используют
//! пару `{"success": bool, "message": "..."}`. Оба варианта сводятся к
//! `Result<Value, ApiError>`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Сообщение для пользователя при любой транспортной ошибке
pub const CONNECTION_ERROR_MESSAGE: &str = "Ошибка соединения с сервером";

/// Ошибка обращения к серверу
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("HTTP {0}")]
    Http(u16),

    /// Логическая ошибка, о которой сообщил сервер
    #[error("{0}")]
    Server(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("unexpected response shape")]
    UnexpectedResponse,
}

impl ApiError {
    /// Транспортные ошибки показываются одним общим сообщением,
    /// серверные передаются как есть.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server(message) => message.clone(),
            ApiError::Decode(_) | ApiError::UnexpectedResponse => {
                "Некорректный ответ сервера".to_string()
            }
            _ => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Проверить конверт ответа и вернуть его целиком, если это успех
pub fn parse_envelope(value: Value) -> Result<Value, ApiError> {
    let Some(obj) = value.as_object() else {
        return Err(ApiError::UnexpectedResponse);
    };

    if let Some(status) = obj.get("status") {
        if status.as_str() == Some("success") {
            return Ok(value);
        }
        return Err(ApiError::Server(
            error_text(&value).unwrap_or_else(|| "Неизвестная ошибка сервера".to_string()),
        ));
    }

    if let Some(success) = obj.get("success").and_then(Value::as_bool) {
        if success {
            return Ok(value);
        }
        return Err(ApiError::Server(
            error_text(&value).unwrap_or_else(|| "Операция не выполнена".to_string()),
        ));
    }

    if let Some(message) = error_text(&value) {
        return Err(ApiError::Server(message));
    }

    Err(ApiError::UnexpectedResponse)
}

/// Проверить конверт и разобрать его в типизированный ответ
pub fn decode_response<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let value = parse_envelope(value)?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Текст ошибки из полей `error`, `error_message` или `message`
fn error_text(value: &Value) -> Option<String> {
    ["error", "error_message", "message"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Object(map) => map
                .values()
                .find_map(|inner| inner.as_str().map(str::to_string)),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Saved {
        saved: u32,
    }

    #[test]
    fn test_status_success_passes_payload() {
        let value = json!({"status": "success", "saved": 3});
        let saved: Saved = decode_response(value).unwrap();
        assert_eq!(saved.saved, 3);
    }

    #[test]
    fn test_status_error_surfaces_message() {
        let value = json!({"status": "error", "error_message": "Нет доступа"});
        assert_eq!(
            parse_envelope(value),
            Err(ApiError::Server("Нет доступа".to_string()))
        );

        let value = json!({"status": "error", "error": "Файл повреждён"});
        assert_eq!(
            parse_envelope(value).unwrap_err().user_message(),
            "Файл повреждён"
        );
    }

    #[test]
    fn test_legacy_success_flag() {
        assert!(parse_envelope(json!({"success": true, "message": "OK"})).is_ok());
        assert_eq!(
            parse_envelope(json!({"success": false, "message": "Кэш занят"})),
            Err(ApiError::Server("Кэш занят".to_string()))
        );
    }

    #[test]
    fn test_bare_error_and_field_errors() {
        assert_eq!(
            parse_envelope(json!({"error": "Ошибка"})),
            Err(ApiError::Server("Ошибка".to_string()))
        );
        assert_eq!(
            parse_envelope(json!({"error": {"image_width": "Слишком мало"}})),
            Err(ApiError::Server("Слишком мало".to_string()))
        );
    }

    #[test]
    fn test_unknown_shapes_are_rejected() {
        assert_eq!(parse_envelope(json!([1, 2])), Err(ApiError::UnexpectedResponse));
        assert_eq!(parse_envelope(json!({"data": 1})), Err(ApiError::UnexpectedResponse));
    }

    #[test]
    fn test_transport_errors_share_one_message() {
        assert_eq!(ApiError::Timeout(30_000).user_message(), CONNECTION_ERROR_MESSAGE);
        assert_eq!(ApiError::Http(502).user_message(), CONNECTION_ERROR_MESSAGE);
        assert_eq!(ApiError::Network("reset".into()).user_message(), CONNECTION_ERROR_MESSAGE);
        assert_eq!(ApiError::Server("Нет доступа".into()).user_message(), "Нет доступа");
    }
}
