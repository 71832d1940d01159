//! Форма настроек фида: реестр полей, значения, экспорт/импорт JSON.
//!
//! Все поля формы носят общий префикс `feed_rozetka_`. Сервер хранит флаги
//! строками `"1"`/`"0"`, файл экспорта хранит их как JSON `true`/`false`.

use crate::shared::validation::{self, FieldErrors};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Префикс имён полей модуля
pub const SETTINGS_PREFIX: &str = "feed_rozetka_";

// ============================================================================
// Field registry
// ============================================================================

/// Вкладка формы, к которой относится поле
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTab {
    General,
    Filters,
}

impl SettingsTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsTab::General => "general",
            SettingsTab::Filters => "filters",
        }
    }
}

/// Тип поля
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Flag,
    /// Выпадающий список: (значение, подпись)
    Select(&'static [(&'static str, &'static str)]),
}

/// Описание одного поля формы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Имя без префикса
    pub name: &'static str,
    pub tab: SettingsTab,
    pub kind: FieldKind,
    pub default: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

impl FieldDef {
    pub fn key(&self) -> String {
        format!("{}{}", SETTINGS_PREFIX, self.name)
    }

    fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Flag => FieldValue::Flag(self.default == "1"),
            _ => FieldValue::Text(self.default.to_string()),
        }
    }
}

const CURRENCIES: &[(&str, &str)] = &[("UAH", "Гривна (UAH)"), ("USD", "Доллар (USD)"), ("EUR", "Евро (EUR)")];
const LANGUAGES: &[(&str, &str)] = &[("uk", "Українська"), ("ru", "Русский")];

const fn field(
    name: &'static str,
    tab: SettingsTab,
    kind: FieldKind,
    default: &'static str,
    label: &'static str,
    hint: &'static str,
) -> FieldDef {
    FieldDef { name, tab, kind, default, label, hint }
}

use FieldKind::{Flag, Number, Select, Text, TextArea};
use SettingsTab::{Filters, General};

/// Все поля формы в порядке вывода
pub static FIELDS: &[FieldDef] = &[
    field("status", General, Flag, "0", "Статус фида", ""),
    field("shop_name", General, Text, "", "Название магазина", "Тег <name> фида"),
    field("company_name", General, Text, "", "Название компании", "Тег <company> фида"),
    field("shop_url", General, Text, "", "URL магазина", ""),
    field("currency", General, Select(CURRENCIES), "UAH", "Валюта", ""),
    field("language", General, Select(LANGUAGES), "uk", "Язык описаний", ""),
    field("include_description", General, Flag, "1", "Выгружать описание", ""),
    field("strip_html", General, Flag, "1", "Удалять HTML из описания", ""),
    field("description_length", General, Number, "", "Максимальная длина описания", "0 или пусто: без ограничения"),
    field("image_width", General, Number, "", "Ширина изображения, px", "От 100 до 2000; 0: исходный размер"),
    field("image_height", General, Number, "", "Высота изображения, px", "От 100 до 2000; 0: исходный размер"),
    field("max_images", General, Number, "10", "Изображений на товар", ""),
    field("feed_filename", General, Text, "rozetka.xml", "Имя файла фида", ""),
    field("cache_enabled", General, Flag, "1", "Кэшировать фид", ""),
    field("cache_lifetime", General, Number, "3600", "Время жизни кэша, сек", ""),
    field("min_price", Filters, Number, "", "Минимальная цена", "0 или пусто: без ограничения"),
    field("max_price", Filters, Number, "", "Максимальная цена", "0 или пусто: без ограничения"),
    field("in_stock_only", Filters, Flag, "1", "Только товары в наличии", ""),
    field("min_quantity", Filters, Number, "0", "Минимальный остаток", ""),
    field("include_disabled", Filters, Flag, "0", "Выгружать отключённые товары", ""),
    field("exclude_categories", Filters, TextArea, "", "Исключить категории", "ID через запятую"),
    field("exclude_manufacturers", Filters, TextArea, "", "Исключить производителей", "ID через запятую"),
];

/// Найти описание поля по полному имени
pub fn field_def(key: &str) -> Option<&'static FieldDef> {
    let name = key.strip_prefix(SETTINGS_PREFIX)?;
    FIELDS.iter().find(|f| f.name == name)
}

/// Поля одной вкладки
pub fn tab_fields(tab: SettingsTab) -> impl Iterator<Item = &'static FieldDef> {
    FIELDS.iter().filter(move |f| f.tab == tab)
}

// ============================================================================
// Form values
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Представление для сервера: флаги как "1"/"0"
    pub fn to_server_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(true) => "1".to_string(),
            FieldValue::Flag(false) => "0".to_string(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Flag(b) => Value::Bool(*b),
        }
    }
}

/// Результат импорта настроек из файла
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub applied: usize,
    /// Ключи, которые не совпали ни с одним полем или имели неподходящий тип
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsImportError {
    #[error("Некорректный JSON: {0}")]
    Malformed(String),

    #[error("Файл настроек должен содержать JSON-объект")]
    NotAnObject,
}

/// Значения всех полей формы
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    values: BTreeMap<String, FieldValue>,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsForm {
    /// Форма со значениями по умолчанию
    pub fn new() -> Self {
        let values = FIELDS
            .iter()
            .map(|f| (f.key(), f.default_value()))
            .collect();
        Self { values }
    }

    /// Форма по сохранённым на сервере значениям; отсутствующие остаются по умолчанию
    pub fn from_server(settings: &Map<String, Value>) -> Self {
        let mut form = Self::new();
        for (key, value) in settings {
            form.apply_value(key, value);
        }
        form
    }

    pub fn text(&self, key: &str) -> String {
        self.values
            .get(key)
            .map(FieldValue::to_server_string)
            .unwrap_or_default()
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FieldValue::Flag(true)))
    }

    /// Изменить текстовое поле; неизвестные ключи игнорируются
    pub fn set_text(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(key) {
            Some(FieldValue::Text(current)) => {
                *current = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn set_flag(&mut self, key: &str, value: bool) -> bool {
        match self.values.get_mut(key) {
            Some(FieldValue::Flag(current)) => {
                *current = value;
                true
            }
            _ => false,
        }
    }

    /// Сбросить поля вкладки к значениям по умолчанию
    pub fn reset_tab(&mut self, tab: SettingsTab) {
        for def in tab_fields(tab) {
            self.values.insert(def.key(), def.default_value());
        }
    }

    /// Снимок всех полей с префиксом модуля
    pub fn export_snapshot(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(key, _)| key.starts_with(SETTINGS_PREFIX))
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }

    /// Снимок в виде JSON с отступами для сохранения в файл
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Value::Object(self.export_snapshot()))
    }

    /// Применить файл настроек. При ошибке разбора форма не меняется.
    pub fn import_json(&mut self, raw: &str) -> Result<ImportReport, SettingsImportError> {
        let parsed: Value =
            serde_json::from_str(raw).map_err(|e| SettingsImportError::Malformed(e.to_string()))?;
        let Value::Object(map) = parsed else {
            return Err(SettingsImportError::NotAnObject);
        };

        let mut report = ImportReport::default();
        for (key, value) in &map {
            if self.apply_value(key, value) {
                report.applied += 1;
            } else {
                report.skipped.push(key.clone());
            }
        }
        Ok(report)
    }

    /// Значения для сервера; `None` означает все вкладки
    pub fn payload(&self, tab: Option<SettingsTab>) -> BTreeMap<String, String> {
        FIELDS
            .iter()
            .filter(|def| tab.map_or(true, |t| def.tab == t))
            .map(|def| {
                let key = def.key();
                let value = self.text(&key);
                (key, value)
            })
            .collect()
    }

    /// Проверить поля вкладки (или всех вкладок)
    pub fn validate(&self, tab: Option<SettingsTab>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let wants = |t: SettingsTab| tab.map_or(true, |selected| selected == t);

        if wants(SettingsTab::General) {
            for name in ["image_width", "image_height"] {
                let key = format!("{SETTINGS_PREFIX}{name}");
                if let Err(e) = validation::validate_image_dimension(&key, &self.text(&key)) {
                    errors.insert(key, e.to_string());
                }
            }
            for name in ["description_length", "max_images", "cache_lifetime"] {
                let key = format!("{SETTINGS_PREFIX}{name}");
                if let Err(e) = validation::parse_optional_number(&key, &self.text(&key)) {
                    errors.insert(key, e.to_string());
                }
            }
        }

        if wants(SettingsTab::Filters) {
            let min_key = format!("{SETTINGS_PREFIX}min_price");
            let max_key = format!("{SETTINGS_PREFIX}max_price");
            let mut numbers_ok = true;
            for key in [&min_key, &max_key] {
                if let Err(e) = validation::parse_optional_number(key, &self.text(key)) {
                    errors.insert(key.clone(), e.to_string());
                    numbers_ok = false;
                }
            }
            if numbers_ok {
                if let Err(e) =
                    validation::validate_price_range(&self.text(&min_key), &self.text(&max_key))
                {
                    errors.insert(min_key, e.to_string());
                }
            }
            let key = format!("{SETTINGS_PREFIX}min_quantity");
            if let Err(e) = validation::parse_optional_number(&key, &self.text(&key)) {
                errors.insert(key, e.to_string());
            }
        }

        errors
    }

    /// Записать одно значение; false если поле неизвестно или тип не подходит
    fn apply_value(&mut self, key: &str, value: &Value) -> bool {
        match self.values.get_mut(key) {
            Some(FieldValue::Flag(current)) => match flag_from_json(value) {
                Some(flag) => {
                    *current = flag;
                    true
                }
                None => false,
            },
            Some(FieldValue::Text(current)) => match text_from_json(value) {
                Some(text) => {
                    *current = text;
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}

fn flag_from_json(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" | "" => Some(false),
            _ => None,
        },
        Value::Null => Some(false),
        _ => None,
    }
}

fn text_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

// ============================================================================
// Wire DTOs
// ============================================================================

/// Ответ `get_settings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetSettingsResponse {
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Тело `save_settings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSettingsRequest {
    pub settings: BTreeMap<String, String>,
}

/// Тело `save_tab`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTabRequest {
    pub tab: SettingsTab,
    pub settings: BTreeMap<String, String>,
}

/// Ответ на сохранение
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveSettingsResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(name: &str) -> String {
        format!("{SETTINGS_PREFIX}{name}")
    }

    #[test]
    fn test_defaults_follow_registry() {
        let form = SettingsForm::new();
        assert!(!form.flag(&key("status")));
        assert!(form.flag(&key("in_stock_only")));
        assert_eq!(form.text(&key("currency")), "UAH");
        assert_eq!(form.text(&key("feed_filename")), "rozetka.xml");
        assert_eq!(form.text(&key("status")), "0");
    }

    #[test]
    fn test_from_server_reads_flag_strings() {
        let settings = json!({
            "feed_rozetka_status": "1",
            "feed_rozetka_in_stock_only": "0",
            "feed_rozetka_shop_name": "Магазин",
            "feed_rozetka_max_images": 5,
            "config_name": "ignored"
        });
        let form = SettingsForm::from_server(settings.as_object().unwrap());
        assert!(form.flag(&key("status")));
        assert!(!form.flag(&key("in_stock_only")));
        assert_eq!(form.text(&key("shop_name")), "Магазин");
        assert_eq!(form.text(&key("max_images")), "5");
        assert_eq!(form.text("config_name"), "");
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut original = SettingsForm::new();
        original.set_flag(&key("status"), true);
        original.set_flag(&key("in_stock_only"), false);
        original.set_text(&key("shop_name"), "Тест \"кавычки\"");
        original.set_text(&key("image_width"), "800");
        original.set_text(&key("exclude_categories"), "12, 15");

        let json = original.export_json().unwrap();
        assert!(json.contains('\n'));

        let mut restored = SettingsForm::new();
        let report = restored.import_json(&json).unwrap();
        assert_eq!(restored, original);
        assert_eq!(report.applied, FIELDS.len());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_import_accepts_string_flags_and_skips_unknown() {
        let mut form = SettingsForm::new();
        let report = form
            .import_json(r#"{"feed_rozetka_status": "1", "feed_rozetka_cache_enabled": 0, "other": 1, "feed_rozetka_shop_name": [1]}"#)
            .unwrap();
        assert!(form.flag(&key("status")));
        assert!(!form.flag(&key("cache_enabled")));
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_malformed_import_leaves_form_untouched() {
        let mut form = SettingsForm::new();
        form.set_text(&key("shop_name"), "Было");
        let before = form.clone();

        assert!(matches!(
            form.import_json("{\"feed_rozetka_shop_name\": \"Стало\""),
            Err(SettingsImportError::Malformed(_))
        ));
        assert_eq!(form.import_json("[1, 2]"), Err(SettingsImportError::NotAnObject));
        assert_eq!(form, before);
    }

    #[test]
    fn test_tab_payload_uses_server_flags() {
        let mut form = SettingsForm::new();
        form.set_text(&key("min_price"), "100");
        let payload = form.payload(Some(SettingsTab::Filters));
        assert_eq!(payload.get(&key("min_price")).map(String::as_str), Some("100"));
        assert_eq!(payload.get(&key("in_stock_only")).map(String::as_str), Some("1"));
        assert!(!payload.contains_key(&key("shop_name")));
        assert_eq!(form.payload(None).len(), FIELDS.len());
    }

    #[test]
    fn test_validate_filters_and_images() {
        let mut form = SettingsForm::new();
        form.set_text(&key("min_price"), "500");
        form.set_text(&key("max_price"), "100");
        form.set_text(&key("image_width"), "50");
        form.set_text(&key("image_height"), "0");

        let filters = form.validate(Some(SettingsTab::Filters));
        assert!(filters.contains_key(&key("min_price")));
        assert!(!filters.contains_key(&key("image_width")));

        let general = form.validate(Some(SettingsTab::General));
        assert!(general.contains_key(&key("image_width")));
        assert!(!general.contains_key(&key("image_height")));

        form.set_text(&key("min_price"), "0");
        assert!(form.validate(Some(SettingsTab::Filters)).is_empty());
    }

    #[test]
    fn test_validate_reports_bad_max_price_on_its_field() {
        let mut form = SettingsForm::new();
        form.set_text(&key("max_price"), "дорого");
        let errors = form.validate(Some(SettingsTab::Filters));
        assert!(errors.contains_key(&key("max_price")));
        assert!(!errors.contains_key(&key("min_price")));
    }

    #[test]
    fn test_reset_tab() {
        let mut form = SettingsForm::new();
        form.set_text(&key("min_price"), "10");
        form.set_text(&key("shop_name"), "Shop");
        form.reset_tab(SettingsTab::Filters);
        assert_eq!(form.text(&key("min_price")), "");
        assert_eq!(form.text(&key("shop_name")), "Shop");
    }
}
