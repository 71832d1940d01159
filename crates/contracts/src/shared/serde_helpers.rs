//! Десериализаторы для нестрогих JSON-ответов сервера.
//!
//! Сервер отдаёт идентификаторы и счётчики то числами, то строками
//! (`"15"` и `15`), а пустые значения как `null`, `""` или `false`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Строка из строки или числа; `null` даёт пустую строку
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value).unwrap_or_default())
}

/// То же, но пустое значение превращается в `None`
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value).filter(|s| !s.is_empty() && s != "0"))
}

/// Целое из числа или числовой строки; всё остальное даёт 0
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        Value::Bool(b) => i64::from(b),
        _ => 0,
    })
}

/// Дробное из числа или числовой строки
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "opt_string_or_number")]
        parent_id: Option<String>,
        #[serde(default, deserialize_with = "lenient_i64")]
        count: i64,
        #[serde(default, deserialize_with = "lenient_opt_f64")]
        took: Option<f64>,
    }

    #[test]
    fn test_numbers_and_strings_are_interchangeable() {
        let row: Row =
            serde_json::from_value(json!({"id": 42, "parent_id": "7", "count": "15", "took": "1.5"}))
                .unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.parent_id.as_deref(), Some("7"));
        assert_eq!(row.count, 15);
        assert_eq!(row.took, Some(1.5));
    }

    #[test]
    fn test_empty_values() {
        let row: Row =
            serde_json::from_value(json!({"id": null, "parent_id": 0, "count": null})).unwrap();
        assert_eq!(row.id, "");
        assert_eq!(row.parent_id, None);
        assert_eq!(row.count, 0);
        assert_eq!(row.took, None);
    }
}
