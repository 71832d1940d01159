use contracts::shared::settings::{SettingsForm, SettingsTab};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::ApiClient;
use crate::shared::date_utils::today_stamp;
use crate::shared::export::{download_json, settings_export_filename};
use crate::shared::notifications::NotificationService;
use crate::system::feed_settings::api;

/// ViewModel формы настроек (вкладки «Основные» и «Фильтры»)
#[derive(Clone, Copy)]
pub struct SettingsVm {
    api: StoredValue<ApiClient>,
    notifications: NotificationService,
    pub form: RwSignal<SettingsForm>,
    pub errors: RwSignal<FieldErrors>,
    pub is_loading: RwSignal<bool>,
    /// Вкладка, сохранение которой сейчас идёт
    pub saving_tab: RwSignal<Option<SettingsTab>>,
    pub is_saving_all: RwSignal<bool>,
}

impl SettingsVm {
    pub fn new(api_client: ApiClient, notifications: NotificationService) -> Self {
        Self {
            api: StoredValue::new(api_client),
            notifications,
            form: RwSignal::new(SettingsForm::new()),
            errors: RwSignal::new(FieldErrors::new()),
            is_loading: RwSignal::new(false),
            saving_tab: RwSignal::new(None),
            is_saving_all: RwSignal::new(false),
        }
    }

    pub fn error_for(&self, key: &str) -> Option<String> {
        self.errors.with(|e| e.get(key).cloned())
    }

    pub fn set_text(&self, key: &str, value: String) {
        self.form.update(|f| {
            f.set_text(key, value);
        });
        self.clear_error(key);
    }

    pub fn set_flag(&self, key: &str, value: bool) {
        self.form.update(|f| {
            f.set_flag(key, value);
        });
    }

    fn clear_error(&self, key: &str) {
        if self.errors.with_untracked(|e| e.contains_key(key)) {
            self.errors.update(|e| {
                e.remove(key);
            });
        }
    }

    /// Загрузить сохранённые значения
    pub fn load(&self) {
        self.is_loading.set(true);
        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::fetch_settings(&api_client).await {
                Ok(settings) => {
                    this.form.set(SettingsForm::from_server(&settings));
                    this.errors.set(FieldErrors::new());
                }
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_loading.set(false);
        });
    }

    /// Проверить поля; при ошибках запрос не отправляется
    fn validate(&self, tab: Option<SettingsTab>) -> bool {
        let errors = self.form.with_untracked(|f| f.validate(tab));
        let ok = errors.is_empty();
        if !ok {
            log::warn!("Ошибки в форме настроек: {:?}", errors.keys().collect::<Vec<_>>());
            self.notifications.error("Исправьте ошибки в форме");
        }
        self.errors.set(errors);
        ok
    }

    /// Сохранить поля одной вкладки
    pub fn save_tab(&self, tab: SettingsTab) {
        if !self.validate(Some(tab)) {
            return;
        }
        let payload = self.form.with_untracked(|f| f.payload(Some(tab)));
        self.saving_tab.set(Some(tab));

        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::save_tab(&api_client, tab, payload).await {
                Ok(response) => this.notifications.success(saved_message(response.message)),
                Err(e) => this.notifications.api_error(&e),
            }
            this.saving_tab.set(None);
        });
    }

    /// Сохранить все вкладки
    pub fn save_all(&self) {
        if !self.validate(None) {
            return;
        }
        let payload = self.form.with_untracked(|f| f.payload(None));
        self.is_saving_all.set(true);

        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::save_settings(&api_client, payload).await {
                Ok(response) => this.notifications.success(saved_message(response.message)),
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_saving_all.set(false);
        });
    }

    /// Вернуть фильтры к значениям по умолчанию (без сохранения)
    pub fn reset_filters(&self) {
        self.form.update(|f| f.reset_tab(SettingsTab::Filters));
        self.errors.update(|errors| {
            errors.retain(|key, _| {
                contracts::shared::settings::field_def(key)
                    .map_or(true, |def| def.tab != SettingsTab::Filters)
            });
        });
        self.notifications
            .info("Фильтры сброшены. Сохраните вкладку, чтобы применить.");
    }

    // ========================================================================
    // Экспорт / импорт
    // ========================================================================

    /// Скачать все поля модуля файлом JSON
    pub fn export(&self) {
        let json = match self.form.with_untracked(|f| f.export_json()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Экспорт настроек: {}", e);
                self.notifications.error("Не удалось сформировать файл настроек");
                return;
            }
        };
        let filename = settings_export_filename(&today_stamp());
        match download_json(&json, &filename) {
            Ok(()) => self.notifications.success(format!("Настройки сохранены в {}", filename)),
            Err(e) => {
                log::error!("Экспорт настроек: {}", e);
                self.notifications.error(e);
            }
        }
    }

    /// Применить содержимое файла настроек. Ошибочный файл форму не меняет.
    pub fn import_json(&self, raw: &str) {
        let mut next = self.form.get_untracked();
        match next.import_json(raw) {
            Ok(report) => {
                self.form.set(next);
                self.errors.set(FieldErrors::new());
                if report.skipped.is_empty() {
                    self.notifications
                        .success(format!("Импортировано параметров: {}", report.applied));
                } else {
                    log::warn!("Пропущены ключи импорта: {:?}", report.skipped);
                    self.notifications.warning(format!(
                        "Импортировано параметров: {}, пропущено: {}",
                        report.applied,
                        report.skipped.len()
                    ));
                }
            }
            Err(e) => {
                log::warn!("Импорт настроек отклонён: {}", e);
                self.notifications.error(e.to_string());
            }
        }
    }
}

fn saved_message(message: String) -> String {
    if message.trim().is_empty() {
        "Настройки сохранены".to_string()
    } else {
        message
    }
}
