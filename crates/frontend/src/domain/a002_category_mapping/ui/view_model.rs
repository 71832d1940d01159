//! ViewModel вкладки «Категории»: два поиска (магазин и Rozetka),
//! выбор пары категорий и таблица связей.
//!
//! Набор связей живёт в `MappingState` внутри сигнала; все правила
//! (upsert по категории магазина, слияние автосопоставления, признак
//! несохранённых изменений) реализованы там.

use contracts::domain::a001_rozetka_category::{Category, CategoryNamespace, SearchResults};
use contracts::domain::a002_category_mapping::{MappingState, SelectOutcome, UpsertOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_rozetka_category::api as category_api;
use crate::domain::a002_category_mapping::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::config::SEARCH_DEBOUNCE_MS;
use crate::shared::dialogs::confirm;
use crate::shared::notifications::NotificationService;

use super::search_session::SearchSession;

/// Панель поиска: сигнал с `SearchSession` и пространство категорий
#[derive(Clone, Copy)]
pub struct SearchPanel {
    pub namespace: CategoryNamespace,
    pub session: RwSignal<SearchSession>,
}

impl SearchPanel {
    fn new(namespace: CategoryNamespace) -> Self {
        Self {
            namespace,
            session: RwSignal::new(SearchSession::new()),
        }
    }

    pub fn term(&self) -> String {
        self.session.with(|s| s.term().to_string())
    }

    pub fn results(&self) -> SearchResults {
        self.session.with(|s| s.results().clone())
    }

    /// Очистить поле; ответы на уже отправленные запросы не покажутся
    pub fn reset(&self) {
        self.session.update(|s| s.reset());
    }
}

#[derive(Clone, Copy)]
pub struct CategoryMappingVm {
    api: StoredValue<ApiClient>,
    notifications: NotificationService,
    pub state: RwSignal<MappingState>,
    pub shop: SearchPanel,
    pub rozetka: SearchPanel,
    /// Фильтр таблицы связей
    pub filter: RwSignal<String>,
    pub is_loading: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    pub is_auto_mapping: RwSignal<bool>,
    loaded: RwSignal<bool>,
}

impl CategoryMappingVm {
    pub fn new(api_client: ApiClient, notifications: NotificationService) -> Self {
        Self {
            api: StoredValue::new(api_client),
            notifications,
            state: RwSignal::new(MappingState::new()),
            shop: SearchPanel::new(CategoryNamespace::Shop),
            rozetka: SearchPanel::new(CategoryNamespace::Rozetka),
            filter: RwSignal::new(String::new()),
            is_loading: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            is_auto_mapping: RwSignal::new(false),
            loaded: RwSignal::new(false),
        }
    }

    pub fn panel(&self, namespace: CategoryNamespace) -> SearchPanel {
        match namespace {
            CategoryNamespace::Shop => self.shop,
            CategoryNamespace::Rozetka => self.rozetka,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state.with(|s| s.is_dirty())
    }

    // ========================================================================
    // Поиск
    // ========================================================================

    /// Ввод в поле поиска. Запрос уходит через `SEARCH_DEBOUNCE_MS` после
    /// последнего нажатия; один символ игнорируется.
    pub fn search(&self, namespace: CategoryNamespace, raw: String) {
        let panel = self.panel(namespace);
        let Some(ticket) = panel.session.try_update(|s| s.on_input(&raw)).flatten() else {
            return;
        };

        let api_client = self.api.get_value();
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            let Some((seq, term)) = panel.session.try_update(|s| s.on_fire(ticket)).flatten() else {
                return;
            };

            let response = category_api::search(&api_client, panel.namespace, &term)
                .await
                .map_err(|e| e.user_message());

            let accepted = panel
                .session
                .try_update(|s| s.on_response(seq, response))
                .unwrap_or(false);
            if !accepted {
                log::debug!("{:?}: устаревший ответ на «{}» отброшен", panel.namespace, term);
            }
        });
    }

    // ========================================================================
    // Выбор и связи
    // ========================================================================

    pub fn select(&self, namespace: CategoryNamespace, item: Category) {
        let Some(result) = self.state.try_update(|s| s.select(namespace, item)) else {
            return;
        };
        match result {
            Ok(SelectOutcome::ShopSelected) => {}
            Ok(SelectOutcome::Committed(mapping, outcome)) => {
                let verb = match outcome {
                    UpsertOutcome::Inserted => "Связь создана",
                    UpsertOutcome::Replaced => "Связь обновлена",
                };
                self.notifications.success(format!(
                    "{}: {} → {}",
                    verb, mapping.shop_category_name, mapping.rozetka_category_full_name
                ));
            }
            Err(e) => {
                log::warn!("Выбор категории отклонён: {}", e);
                self.notifications.warning(e.to_string());
            }
        }
    }

    /// Сбросить выбранную категорию магазина
    pub fn clear_selection(&self) {
        self.state.update(|s| s.clear_selection());
    }

    /// Удалить связь по позиции в наборе
    pub fn remove(&self, index: usize) {
        if let Some(Some(removed)) = self.state.try_update(|s| s.remove(index)) {
            self.notifications
                .info(format!("Связь для «{}» удалена", removed.shop_category_name));
        }
    }

    // ========================================================================
    // Команды сервера
    // ========================================================================

    /// Загрузить связи с сервера.
    ///
    /// Несохранённые локальные изменения не перезаписываются, пока
    /// `force` не задан.
    pub fn load(&self, force: bool) {
        if !force && self.state.with_untracked(|s| s.is_dirty()) {
            log::debug!("Связи не перезагружены: есть несохранённые изменения");
            return;
        }
        if self.is_loading.get_untracked() {
            return;
        }
        self.is_loading.set(true);

        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::fetch_mappings(&api_client).await {
                Ok(mappings) => {
                    log::debug!("Загружено связей: {}", mappings.len());
                    this.state.update(|s| s.replace_all(mappings));
                    this.loaded.set(true);
                }
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_loading.set(false);
        });
    }

    /// Кнопка «Обновить»: при несохранённых изменениях сначала спросить
    pub fn reload(&self) {
        let proceed = should_reload(self.is_dirty(), || {
            confirm("Несохранённые изменения будут потеряны. Перезагрузить сопоставления?")
        });
        if proceed {
            self.load(true);
        }
    }

    /// Загрузка при первом открытии вкладки
    pub fn ensure_loaded(&self) {
        if !self.loaded.get_untracked() {
            self.load(false);
        }
    }

    pub fn auto_map(&self) {
        self.is_auto_mapping.set(true);
        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::auto_map(&api_client).await {
                Ok(proposed) => {
                    let added = this
                        .state
                        .try_update(|s| s.merge_auto(proposed))
                        .unwrap_or_default();
                    if added > 0 {
                        this.notifications
                            .success(format!("Автоматически сопоставлено категорий: {}", added));
                    } else {
                        this.notifications.info("Новых сопоставлений не найдено");
                    }
                }
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_auto_mapping.set(false);
        });
    }

    pub fn save(&self) {
        let snapshot = self.state.with_untracked(|s| s.mappings().to_vec());
        self.is_saving.set(true);

        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::save_mappings(&api_client, snapshot.clone()).await {
                Ok(response) => {
                    // Правки, сделанные во время запроса, остаются несохранёнными
                    this.state.update(|s| {
                        if s.mappings() == snapshot.as_slice() {
                            s.mark_saved();
                        }
                    });
                    let message = if response.message.trim().is_empty() {
                        format!("Сохранено связей: {}", snapshot.len())
                    } else {
                        response.message
                    };
                    this.notifications.success(message);
                }
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_saving.set(false);
        });
    }
}

/// Перезагрузка без вопроса допустима только без несохранённых изменений
fn should_reload(is_dirty: bool, confirm: impl FnOnce() -> bool) -> bool {
    !is_dirty || confirm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_state_reloads_without_asking() {
        assert!(should_reload(false, || panic!("no question for a clean table")));
    }

    #[test]
    fn test_dirty_state_reloads_only_when_confirmed() {
        assert!(!should_reload(true, || false));
        assert!(should_reload(true, || true));
    }
}
