use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::shared::storage::LanguagePack;

/// Вкладки панели модуля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKey {
    #[default]
    Settings,
    Filters,
    Categories,
    Statistics,
    History,
    ImportExport,
}

impl TabKey {
    pub const ALL: [TabKey; 6] = [
        TabKey::Settings,
        TabKey::Filters,
        TabKey::Categories,
        TabKey::Statistics,
        TabKey::History,
        TabKey::ImportExport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TabKey::Settings => "settings",
            TabKey::Filters => "filters",
            TabKey::Categories => "categories",
            TabKey::Statistics => "statistics",
            TabKey::History => "history",
            TabKey::ImportExport => "import_export",
        }
    }

    pub fn parse(key: &str) -> Option<TabKey> {
        Self::ALL.iter().copied().find(|t| t.as_str() == key)
    }

    /// Ключ языковой строки и встроенный заголовок
    pub fn label(&self) -> (&'static str, &'static str) {
        match self {
            TabKey::Settings => ("tab_general", "Основные"),
            TabKey::Filters => ("tab_filters", "Фильтры"),
            TabKey::Categories => ("tab_categories", "Категории"),
            TabKey::Statistics => ("tab_statistics", "Статистика"),
            TabKey::History => ("tab_history", "История"),
            TabKey::ImportExport => ("tab_import_export", "Импорт/экспорт"),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TabKey::Settings => "settings",
            TabKey::Filters => "filter",
            TabKey::Categories => "link",
            TabKey::Statistics => "chart",
            TabKey::History => "history",
            TabKey::ImportExport => "transfer",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HashState {
    #[serde(default)]
    tab: Option<String>,
}

/// Активная вкладка из фрагмента URL (`#tab=filters`)
fn tab_from_hash(hash: &str) -> Option<TabKey> {
    let state: HashState = serde_qs::from_str(hash.trim_start_matches('#')).unwrap_or_default();
    state.tab.as_deref().and_then(TabKey::parse)
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<TabKey>,
    pub language: RwSignal<LanguagePack>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(TabKey::default()),
            language: RwSignal::new(LanguagePack::default()),
        }
    }

    /// Восстановить вкладку из URL и дальше держать URL в синхроне.
    /// Меняется только фрагмент: `route` и `user_token` в query остаются.
    pub fn init_router_integration(&self) {
        let hash = window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        if let Some(tab) = tab_from_hash(&hash) {
            self.active.set(tab);
        }

        let this = *self;
        Effect::new(move |_| {
            let active = this.active.get();
            let state = HashState {
                tab: Some(active.as_str().to_string()),
            };
            let new_hash = format!("#{}", serde_qs::to_string(&state).unwrap_or_default());

            let current_hash = window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();
            if current_hash != new_hash {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_hash),
                        );
                    }
                }
            }
        });
    }

    pub fn activate_tab(&self, tab: TabKey) {
        log::debug!("activate_tab: {}", tab.as_str());
        self.active.set(tab);
    }

    /// Языковая строка с встроенным текстом по умолчанию
    pub fn text(&self, key: &str, fallback: &str) -> String {
        self.language.with(|pack| pack.text(key, fallback))
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_keys_round_trip_through_hash() {
        for tab in TabKey::ALL {
            assert_eq!(TabKey::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(tab_from_hash("#tab=history"), Some(TabKey::History));
        assert_eq!(tab_from_hash("#tab=import_export"), Some(TabKey::ImportExport));
        assert_eq!(tab_from_hash("#tab=unknown"), None);
        assert_eq!(tab_from_hash(""), None);
    }
}
