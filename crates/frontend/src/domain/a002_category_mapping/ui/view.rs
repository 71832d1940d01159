use contracts::domain::a001_rozetka_category::{CategoryNamespace, SearchResults};
use leptos::prelude::*;
use thaw::*;

use super::view_model::CategoryMappingVm;
use crate::domain::a001_rozetka_category::ui::CategoryImportPanel;
use crate::shared::icons::icon;
use crate::shared::utils::{highlight_html, truncate};

/// Вкладка «Категории»
#[component]
pub fn CategoryMappingView(vm: CategoryMappingVm) -> impl IntoView {
    // После импорта или очистки справочника старые результаты недействительны
    let on_categories_changed = Callback::new(move |_: ()| vm.rozetka.reset());

    view! {
        <div id="a002_category_mapping--view" class="rozetka-mapping">
            <CategoryImportPanel on_changed=on_categories_changed />

            <SelectionBar vm=vm />

            <div class="rozetka-mapping__search">
                <SearchColumn vm=vm namespace=CategoryNamespace::Shop />
                <SearchColumn vm=vm namespace=CategoryNamespace::Rozetka />
            </div>

            <MappingTable vm=vm />
        </div>
    }
}

/// Текущая выбранная категория магазина
#[component]
fn SelectionBar(vm: CategoryMappingVm) -> impl IntoView {
    view! {
        <Show
            when=move || vm.state.with(|s| s.selected_shop().is_some())
            fallback=|| view! {
                <p class="form__hint">
                    "Выберите категорию магазина слева, затем категорию Rozetka справа."
                </p>
            }
        >
            <MessageBar intent=MessageBarIntent::Info>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <span>"Категория магазина: "</span>
                    <strong>
                        {move || vm.state.with(|s| {
                            s.selected_shop().map(|c| c.display_name().to_string()).unwrap_or_default()
                        })}
                    </strong>
                    <span>". Выберите категорию Rozetka."</span>
                    <Button
                        appearance=ButtonAppearance::Transparent
                        size=ButtonSize::Small
                        on_click=move |_| vm.clear_selection()
                    >
                        "Отменить"
                    </Button>
                </Flex>
            </MessageBar>
        </Show>
    }
}

/// Поле поиска и список результатов одного пространства категорий
#[component]
fn SearchColumn(vm: CategoryMappingVm, namespace: CategoryNamespace) -> impl IntoView {
    let panel = vm.panel(namespace);

    let results_view = move || {
        let term = panel.term();
        match panel.results() {
            SearchResults::Prompt => view! {
                <div class="rozetka-search__hint">"Введите не менее 2 символов"</div>
            }
            .into_any(),
            SearchResults::Loading => view! {
                <div class="rozetka-search__hint"><Spinner size=SpinnerSize::Tiny /></div>
            }
            .into_any(),
            SearchResults::NotFound => view! {
                <div class="rozetka-search__hint">"Ничего не найдено"</div>
            }
            .into_any(),
            SearchResults::Failed(message) => view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{message}</span>
                </div>
            }
            .into_any(),
            SearchResults::Found(items) => items
                .into_iter()
                .map(|item| {
                    let label = highlight_html(item.display_name(), &term);
                    let item_id = item.id.clone();
                    let item_id_for_selected = item.id.clone();
                    let is_mapped = move || {
                        namespace == CategoryNamespace::Shop
                            && vm.state.with(|s| s.is_mapped(&item_id))
                    };
                    let is_selected = move || {
                        vm.state.with(|s| {
                            let selected = match namespace {
                                CategoryNamespace::Shop => s.selected_shop(),
                                CategoryNamespace::Rozetka => s.selected_rozetka(),
                            };
                            selected.map(|c| c.id == item_id_for_selected).unwrap_or(false)
                        })
                    };
                    let is_mapped_for_class = is_mapped.clone();
                    let level = item.level;
                    let item_sv = StoredValue::new(item);

                    view! {
                        <div
                            class=move || {
                                let mut class = String::from("rozetka-search__item");
                                if is_mapped_for_class() {
                                    class.push_str(" rozetka-search__item--mapped");
                                }
                                if is_selected() {
                                    class.push_str(" rozetka-search__item--selected");
                                }
                                class
                            }
                            title=move || format!("Уровень {}", level)
                            on:click=move |_| vm.select(namespace, item_sv.get_value())
                        >
                            <span class="rozetka-search__label" inner_html=label></span>
                            <Show when=is_mapped>
                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                    "сопоставлено"
                                </Badge>
                            </Show>
                        </div>
                    }
                })
                .collect_view()
                .into_any(),
        }
    };

    view! {
        <div class="rozetka-search">
            <h3>{namespace.title()}</h3>
            <input
                class="form__input"
                type="search"
                placeholder="Поиск категории..."
                prop:value=move || panel.term()
                on:input=move |ev| vm.search(namespace, event_target_value(&ev))
            />
            <div class="rozetka-search__results">{results_view}</div>
        </div>
    }
}

/// Таблица связей с фильтром и командами
#[component]
fn MappingTable(vm: CategoryMappingVm) -> impl IntoView {
    let rows = move || {
        let filter = vm.filter.get();
        vm.state.with(|s| {
            s.rows(&filter)
                .map(|(index, m)| (index, m.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="rozetka-mapping__table">
            <Flex gap=FlexGap::Small align=FlexAlign::Center justify=FlexJustify::SpaceBetween>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <h3>"Сопоставленные категории"</h3>
                    <Badge appearance=BadgeAppearance::Tint>
                        {move || vm.state.with(|s| s.len()).to_string()}
                    </Badge>
                    <Show when=move || vm.is_dirty()>
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                            "есть несохранённые изменения"
                        </Badge>
                    </Show>
                </Flex>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.auto_map()
                        disabled=Signal::derive(move || vm.is_auto_mapping.get())
                    >
                        {move || if vm.is_auto_mapping.get() { "Подбор..." } else { "Автосопоставление" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| vm.reload()
                        disabled=Signal::derive(move || vm.is_loading.get())
                    >
                        {icon("refresh")}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save()
                        disabled=Signal::derive(move || vm.is_saving.get())
                    >
                        {move || if vm.is_saving.get() { "Сохранение..." } else { "Сохранить сопоставления" }}
                    </Button>
                </Flex>
            </Flex>

            <div class="form__group">
                <Input value=vm.filter placeholder="Фильтр по названию или ID" />
            </div>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=220.0>"Категория магазина"</TableHeaderCell>
                        <TableHeaderCell min_width=280.0>"Категория Rozetka"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"ID Rozetka"</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = rows();
                        if rows.is_empty() {
                            let text = if vm.is_loading.get() { "Загрузка..." } else { "Нет сопоставлений" };
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan="4">
                                        <TableCellLayout>{text}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|(index, m)| {
                                let shop_label = format!("{} (#{})", m.shop_category_name, m.shop_category_id);
                                let short_name = truncate(&m.rozetka_category_full_name, 80);
                                let full_name = m.rozetka_category_full_name;
                                let rozetka_id = m.rozetka_category_id;
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{shop_label}</TableCellLayout>
                                        </TableCell>
                                        <TableCell attr:title=full_name>
                                            <TableCellLayout truncate=true>{short_name}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{rozetka_id}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Transparent
                                                size=ButtonSize::Small
                                                on_click=move |_| vm.remove(index)
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
