//! Конфигурация панели: константы и параметры, прочитанные из URL страницы
//! админки (`.../admin/index.php?route=extension/feed/rozetka&user_token=...`).

use serde::Deserialize;

/// Маршрут модуля; действие добавляется через точку
pub const MODULE_ROUTE: &str = "extension/feed/rozetka";

pub const REQUEST_TIMEOUT_MS: u32 = 30_000;
pub const UPLOAD_TIMEOUT_MS: u32 = 60_000;

/// Окно debounce для поиска категорий
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

// ============================================================================
// Действия сервера
// ============================================================================

pub mod actions {
    pub const GET_CATEGORY_MAPPINGS: &str = "get_category_mappings";
    pub const SAVE_CATEGORY_MAPPINGS: &str = "save_category_mappings";
    pub const AUTO_MAP_CATEGORIES: &str = "auto_map_categories";
    pub const IMPORT_ROZETKA_CATEGORIES: &str = "import_rozetka_categories";
    pub const CLEAR_ROZETKA_CATEGORIES: &str = "clear_rozetka_categories";
    pub const GET_SETTINGS: &str = "get_settings";
    pub const SAVE_SETTINGS: &str = "save_settings";
    pub const SAVE_TAB: &str = "save_tab";
    pub const GET_STATISTICS: &str = "get_statistics";
    pub const GET_HISTORY: &str = "get_history";
    pub const CLEAR_HISTORY: &str = "clear_history";
    pub const GENERATE: &str = "generate";
    pub const TEST_GENERATION: &str = "test_generation";
    pub const CLEAR_CACHE: &str = "clear_cache";
    pub const GET_LANGUAGE: &str = "get_language";

    /// Поле multipart-формы с файлом категорий
    pub const CATEGORIES_FILE_FIELD: &str = "categories_file";
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    #[serde(default)]
    route: Option<String>,
    #[serde(default)]
    user_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Каталог админки со слешем на конце, например `https://shop.ua/admin/`
    pub base_url: String,
    pub route: String,
    pub user_token: String,
    pub request_timeout_ms: u32,
    pub upload_timeout_ms: u32,
}

impl AppConfig {
    /// Собрать конфигурацию из частей `window.location`
    pub fn from_parts(origin: &str, pathname: &str, search: &str) -> Self {
        let query: PageQuery =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

        // Отрезаем имя скрипта: "/admin/index.php" -> "/admin/"
        let dir = match pathname.rfind('/') {
            Some(pos) => &pathname[..=pos],
            None => "/",
        };

        Self {
            base_url: format!("{}{}", origin.trim_end_matches('/'), dir),
            route: query
                .route
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| MODULE_ROUTE.to_string()),
            user_token: query.user_token.unwrap_or_default(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            upload_timeout_ms: UPLOAD_TIMEOUT_MS,
        }
    }

    /// Конфигурация текущей страницы
    pub fn from_window() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            log::warn!("window недоступен, используется конфигурация по умолчанию");
            return Self::from_parts("", "/", "");
        };
        let origin = location.origin().unwrap_or_default();
        let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        Self::from_parts(&origin, &pathname, &search)
    }

    /// URL действия модуля с токеном и дополнительными параметрами
    pub fn action_url(&self, action: &str, params: &[(&str, &str)]) -> String {
        // Маршрут страницы может уже содержать действие ("rozetka.generate")
        let module = self
            .route
            .split_once('.')
            .map(|(m, _)| m)
            .unwrap_or(&self.route);
        let route = format!("{}.{}", module, action);

        let mut all: Vec<(&str, &str)> = vec![
            ("route", route.as_str()),
            ("user_token", self.user_token.as_str()),
        ];
        all.extend_from_slice(params);
        crate::shared::utils::build_url(&format!("{}index.php", self.base_url), &all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_rozetka_category::CategoryNamespace;

    #[test]
    fn test_from_parts_reads_token_and_base() {
        let config = AppConfig::from_parts(
            "https://shop.ua",
            "/admin/index.php",
            "?route=extension/feed/rozetka&user_token=abc123",
        );
        assert_eq!(config.base_url, "https://shop.ua/admin/");
        assert_eq!(config.route, "extension/feed/rozetka");
        assert_eq!(config.user_token, "abc123");
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.upload_timeout_ms, 60_000);
    }

    #[test]
    fn test_from_parts_defaults() {
        let config = AppConfig::from_parts("http://localhost", "/", "");
        assert_eq!(config.base_url, "http://localhost/");
        assert_eq!(config.route, MODULE_ROUTE);
        assert_eq!(config.user_token, "");
    }

    #[test]
    fn test_action_url() {
        let config = AppConfig::from_parts(
            "https://shop.ua",
            "/admin/index.php",
            "?route=extension/feed/rozetka&user_token=t1",
        );
        assert_eq!(
            config.action_url(actions::GET_STATISTICS, &[]),
            "https://shop.ua/admin/index.php?route=extension%2Ffeed%2Frozetka.get_statistics&user_token=t1"
        );
        assert_eq!(
            config.action_url(CategoryNamespace::Shop.search_action(), &[("q", "тел"), ("limit", "10")]),
            "https://shop.ua/admin/index.php?route=extension%2Ffeed%2Frozetka.search_shop_categories&user_token=t1&q=%D1%82%D0%B5%D0%BB&limit=10"
        );
    }

    #[test]
    fn test_action_url_replaces_action_in_route() {
        let config = AppConfig::from_parts(
            "https://shop.ua",
            "/admin/index.php",
            "?route=extension/feed/rozetka.settings&user_token=t1",
        );
        assert!(config
            .action_url(actions::GENERATE, &[])
            .contains("route=extension%2Ffeed%2Frozetka.generate&"));
    }
}
