use contracts::shared::validation::{validate_json_upload, UploadFile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::shared::export::read_file_text;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::system::feed_settings::ui::SettingsVm;

/// Вкладка «Импорт/экспорт»: файл JSON со всеми полями `feed_rozetka_*`
#[component]
pub fn SettingsTransferView(vm: SettingsVm) -> impl IntoView {
    let notifications = use_notifications();
    let (is_reading, set_is_reading) = signal(false);

    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(input) = input else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Повторный выбор того же файла снова вызовет change
        input.set_value("");

        let meta = UploadFile {
            name: file.name(),
            size: file.size() as u64,
            mime: file.type_(),
        };
        if let Err(e) = validate_json_upload(&meta) {
            log::warn!("Файл настроек отклонён: {}", e);
            notifications.error(e.to_string());
            return;
        }

        set_is_reading.set(true);
        spawn_local(async move {
            match read_file_text(&file).await {
                Ok(raw) => vm.import_json(&raw),
                Err(e) => {
                    log::error!("{}", e);
                    notifications.error(e);
                }
            }
            set_is_reading.set(false);
        });
    };

    view! {
        <div id="u502_settings_transfer--usecase" class="detail-form">
            <div class="form__group">
                <h3>"Экспорт настроек"</h3>
                <p class="form__hint">"Все параметры модуля будут сохранены в JSON-файл."</p>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.export()>
                    {icon("download")}
                    " Экспортировать"
                </Button>
            </div>

            <div class="form__group">
                <h3>"Импорт настроек"</h3>
                <p class="form__hint">
                    "Значения из файла попадут в форму. Чтобы применить их, сохраните настройки."
                </p>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <input
                        id="rozetka-settings-file"
                        type="file"
                        accept=".json,application/json"
                        on:change=handle_file_select
                        disabled=move || is_reading.get()
                    />
                    <Show when=move || is_reading.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                </Flex>
            </div>
        </div>
    }
}
