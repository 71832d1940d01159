//! Языковые строки модуля в localStorage.
//!
//! Хранится один JSON-объект под ключом `rozetka_feed_language`. Если его
//! нет, строки запрашиваются у сервера один раз и кэшируются.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use web_sys::window;

const LANGUAGE_KEY: &str = "rozetka_feed_language";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguagePack {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl LanguagePack {
    /// Строка по ключу или встроенный текст, если ключа нет
    pub fn text(&self, key: &str, fallback: &str) -> String {
        self.messages
            .get(key)
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Ответ `get_language`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetLanguageResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default, alias = "text", alias = "language")]
    pub messages: BTreeMap<String, String>,
}

impl From<GetLanguageResponse> for LanguagePack {
    fn from(response: GetLanguageResponse) -> Self {
        Self {
            code: response.code,
            messages: response.messages,
        }
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Сохранить языковые строки
pub fn save_language(pack: &LanguagePack) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(pack) {
        Ok(json) => {
            let _ = storage.set_item(LANGUAGE_KEY, &json);
        }
        Err(e) => log::warn!("Не удалось сохранить языковые строки: {}", e),
    }
}

/// Прочитать языковые строки; повреждённая запись удаляется
pub fn load_language() -> Option<LanguagePack> {
    let storage = get_local_storage()?;
    let raw = storage.get_item(LANGUAGE_KEY).ok()??;
    match serde_json::from_str::<LanguagePack>(&raw) {
        Ok(pack) if !pack.is_empty() => Some(pack),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Повреждённые языковые строки в localStorage: {}", e);
            let _ = storage.remove_item(LANGUAGE_KEY);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_fallback() {
        let pack = LanguagePack {
            code: "uk".to_string(),
            messages: BTreeMap::from([
                ("text_enabled".to_string(), "Увімкнено".to_string()),
                ("text_empty".to_string(), String::new()),
            ]),
        };
        assert_eq!(pack.text("text_enabled", "Включено"), "Увімкнено");
        assert_eq!(pack.text("text_empty", "Пусто"), "Пусто");
        assert_eq!(pack.text("text_missing", "Выключено"), "Выключено");
    }

    #[test]
    fn test_language_response_aliases() {
        let response: GetLanguageResponse = serde_json::from_str(
            r#"{"status":"success","code":"ru","text":{"tab_general":"Основные"}}"#,
        )
        .unwrap();
        let pack = LanguagePack::from(response);
        assert_eq!(pack.code, "ru");
        assert_eq!(pack.text("tab_general", "-"), "Основные");
    }
}
