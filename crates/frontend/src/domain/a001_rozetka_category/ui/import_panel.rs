use contracts::shared::validation::{validate_json_upload, UploadFile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::File;

use crate::domain::a001_rozetka_category::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::utils::format_file_size;

fn describe(file: &File) -> UploadFile {
    UploadFile {
        name: file.name(),
        size: file.size() as u64,
        mime: file.type_(),
    }
}

/// Загрузка и очистка справочника категорий Rozetka.
///
/// `on_changed` вызывается после успешного импорта или очистки, чтобы
/// вкладка могла обновить зависимые данные.
#[component]
pub fn CategoryImportPanel(#[prop(into)] on_changed: Callback<()>) -> impl IntoView {
    let api_client = use_context::<ApiClient>().expect("ApiClient not provided");
    let api_sv = StoredValue::new(api_client);
    let notifications = use_notifications();

    let selected_file = StoredValue::new_local(None::<File>);
    let (file_info, set_file_info) = signal(Option::<(String, u64)>::None);
    let (file_error, set_file_error) = signal(Option::<String>::None);
    let (is_uploading, set_is_uploading) = signal(false);
    let (is_clearing, set_is_clearing) = signal(false);

    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let file = input.and_then(|i| i.files()).and_then(|files| files.get(0));

        set_file_error.set(None);
        match file {
            Some(file) => {
                let meta = describe(&file);
                if let Err(e) = validate_json_upload(&meta) {
                    set_file_error.set(Some(e.to_string()));
                }
                set_file_info.set(Some((meta.name, meta.size)));
                selected_file.set_value(Some(file));
            }
            None => {
                set_file_info.set(None);
                selected_file.set_value(None);
            }
        }
    };

    let upload = move |_| {
        let Some(file) = selected_file.get_value() else {
            notifications.warning("Выберите файл категорий");
            return;
        };
        // Проверка до любого запроса
        if let Err(e) = validate_json_upload(&describe(&file)) {
            log::warn!("Файл категорий отклонён: {}", e);
            set_file_error.set(Some(e.to_string()));
            notifications.error(e.to_string());
            return;
        }

        set_is_uploading.set(true);
        let api_client = api_sv.get_value();
        spawn_local(async move {
            match api::import_categories(&api_client, &file).await {
                Ok(result) => {
                    log::info!("Импорт категорий: {}", result.summary());
                    notifications.success(result.summary());
                    selected_file.set_value(None);
                    set_file_info.set(None);
                    on_changed.run(());
                }
                Err(e) => notifications.api_error(&e),
            }
            set_is_uploading.set(false);
        });
    };

    let clear = move |_| {
        if !confirm("Удалить все импортированные категории Rozetka?") {
            return;
        }
        set_is_clearing.set(true);
        let api_client = api_sv.get_value();
        spawn_local(async move {
            match api::clear_categories(&api_client).await {
                Ok(result) => {
                    notifications.success(format!("Удалено категорий: {}", result.deleted));
                    on_changed.run(());
                }
                Err(e) => notifications.api_error(&e),
            }
            set_is_clearing.set(false);
        });
    };

    view! {
        <div class="rozetka-import-panel">
            <h3>"Справочник категорий Rozetka"</h3>
            <p class="form__hint">
                "JSON-массив объектов categoryId, name, fullName, url, level, parentId. Не более 10 МБ."
            </p>

            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <input
                    id="rozetka-categories-file"
                    type="file"
                    accept=".json,application/json"
                    on:change=handle_file_select
                />
                {move || file_info.get().map(|(name, size)| view! {
                    <span class="rozetka-import-panel__fileinfo">
                        <strong>{name}</strong>
                        {format!(" ({})", format_file_size(size as i64))}
                    </span>
                })}
            </Flex>

            {move || file_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Flex gap=FlexGap::Small style="margin-top: var(--spacing-sm);">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=upload
                    disabled=Signal::derive(move || is_uploading.get() || file_info.get().is_none())
                >
                    {icon("download")}
                    {move || if is_uploading.get() { " Загрузка..." } else { " Загрузить категории" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=clear
                    disabled=Signal::derive(move || is_clearing.get())
                >
                    {icon("trash")}
                    " Очистить категории"
                </Button>
            </Flex>
        </div>
    }
}
