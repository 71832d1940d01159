use contracts::shared::settings::{tab_fields, FieldDef, FieldKind, SettingsTab};
use leptos::prelude::*;
use thaw::*;

use super::view_model::SettingsVm;
use crate::layout::global_context::use_global_context;

/// Одно поле формы по описанию из реестра
#[component]
fn SettingsField(vm: SettingsVm, def: &'static FieldDef) -> impl IntoView {
    let ctx = use_global_context();
    let key = def.key();
    let key_sv = StoredValue::new(key.clone());

    let value = move || key_sv.with_value(|k| vm.form.with(|f| f.text(k)));
    let on_text = move |ev: web_sys::Event| key_sv.with_value(|k| vm.set_text(k, event_target_value(&ev)));

    let control = match def.kind {
        FieldKind::Flag => {
            let checked = move || key_sv.with_value(|k| vm.form.with(|f| f.flag(k)));
            view! {
                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        id=key.clone()
                        prop:checked=checked
                        on:change=move |ev| {
                            key_sv.with_value(|k| vm.set_flag(k, event_target_checked(&ev)))
                        }
                    />
                    <span>
                        {move || if checked() {
                            ctx.text("text_enabled", "Включено")
                        } else {
                            ctx.text("text_disabled", "Выключено")
                        }}
                    </span>
                </label>
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea class="form__textarea" id=key.clone() rows="3" prop:value=value on:input=on_text></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select class="form__select" id=key.clone() on:change=on_text>
                {options
                    .iter()
                    .map(|(code, label)| {
                        let code: &'static str = *code;
                        view! {
                            <option value=code selected=move || value() == code>{*label}</option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Number => view! {
            <input
                class="form__input"
                type="text"
                inputmode="decimal"
                id=key.clone()
                prop:value=value
                on:input=on_text
            />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input class="form__input" type="text" id=key.clone() prop:value=value on:input=on_text />
        }
        .into_any(),
    };

    let error = move || key_sv.with_value(|k| vm.error_for(k));

    view! {
        <div class="form__group">
            <label class="form__label" for=key>{ctx.text(def.name, def.label)}</label>
            {control}
            {(!def.hint.is_empty()).then(|| view! { <div class="form__hint">{def.hint}</div> })}
            {move || error().map(|e| view! { <div class="form__error text-error">{e}</div> })}
        </div>
    }
}

/// Поля вкладки и кнопки сохранения
#[component]
fn SettingsTabForm(
    vm: SettingsVm,
    tab: SettingsTab,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let is_saving_tab = move || vm.saving_tab.get() == Some(tab);

    view! {
        <div class="detail-form">
            <Show when=move || vm.is_loading.get()>
                <Spinner size=SpinnerSize::Small />
            </Show>

            {tab_fields(tab)
                .map(|def| view! { <SettingsField vm=vm def=def /> })
                .collect_view()}

            <Flex gap=FlexGap::Small style="margin-top: var(--spacing-md);">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_tab(tab)
                    disabled=Signal::derive(is_saving_tab)
                >
                    {move || if is_saving_tab() { "Сохранение..." } else { "Сохранить вкладку" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.save_all()
                    disabled=Signal::derive(move || vm.is_saving_all.get())
                >
                    "Сохранить все настройки"
                </Button>
                {children.map(|c| c())}
            </Flex>
        </div>
    }
}

/// Вкладка «Основные»
#[component]
pub fn GeneralTabView(vm: SettingsVm) -> impl IntoView {
    view! {
        <SettingsTabForm vm=vm tab=SettingsTab::General />
    }
}

/// Вкладка «Фильтры»
#[component]
pub fn FiltersTabView(vm: SettingsVm) -> impl IntoView {
    view! {
        <SettingsTabForm vm=vm tab=SettingsTab::Filters>
            <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.reset_filters()>
                "Сбросить фильтры"
            </Button>
        </SettingsTabForm>
    }
}
