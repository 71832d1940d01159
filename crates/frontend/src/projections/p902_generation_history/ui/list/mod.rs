use contracts::projections::p902_generation_history::{GenerationHistoryEntry, GenerationStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::projections::p902_generation_history::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::dialogs::confirm;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::notifications::NotificationService;
use crate::shared::utils::{format_count, format_file_size, format_seconds};

#[derive(Clone, Copy)]
pub struct HistoryVm {
    api: StoredValue<ApiClient>,
    notifications: NotificationService,
    pub items: RwSignal<Vec<GenerationHistoryEntry>>,
    pub is_loading: RwSignal<bool>,
    pub is_clearing: RwSignal<bool>,
}

impl HistoryVm {
    pub fn new(api_client: ApiClient, notifications: NotificationService) -> Self {
        Self {
            api: StoredValue::new(api_client),
            notifications,
            items: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            is_clearing: RwSignal::new(false),
        }
    }

    pub fn load(&self) {
        if self.is_loading.get_untracked() {
            return;
        }
        self.is_loading.set(true);
        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::fetch_history(&api_client).await {
                Ok(items) => this.items.set(items),
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_loading.set(false);
        });
    }

    pub fn clear(&self) {
        if !confirm("Очистить историю генераций?") {
            return;
        }
        self.is_clearing.set(true);
        let this = *self;
        let api_client = self.api.get_value();
        spawn_local(async move {
            match api::clear_history(&api_client).await {
                Ok(_) => {
                    this.items.set(Vec::new());
                    this.notifications.success("История очищена");
                }
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_clearing.set(false);
        });
    }
}

fn status_badge(status: GenerationStatus) -> impl IntoView {
    let color = match status {
        GenerationStatus::Success => BadgeColor::Success,
        GenerationStatus::Error => BadgeColor::Danger,
        GenerationStatus::Running => BadgeColor::Informative,
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {status.label()}
        </Badge>
    }
}

/// Вкладка «История»
#[component]
pub fn GenerationHistoryList(vm: HistoryVm) -> impl IntoView {
    view! {
        <div id="p902_generation_history--list">
            <Flex gap=FlexGap::Small align=FlexAlign::Center justify=FlexJustify::SpaceBetween>
                <h3>"История генераций"</h3>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| vm.load()
                        disabled=Signal::derive(move || vm.is_loading.get())
                    >
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.clear()
                        disabled=Signal::derive(move || vm.is_clearing.get() || vm.items.with(|i| i.is_empty()))
                    >
                        {icon("trash")}
                        " Очистить историю"
                    </Button>
                </Flex>
            </Flex>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=140.0>"Дата"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Статус"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Товаров"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Размер"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Время"</TableHeaderCell>
                        <TableHeaderCell min_width=200.0>"Ошибка"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let items = vm.items.get();
                        if items.is_empty() {
                            let text = if vm.is_loading.get() { "Загрузка..." } else { "История пуста" };
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan="6">
                                        <TableCellLayout>{text}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        items
                            .into_iter()
                            .map(|row| {
                                let date = format_datetime(&row.date);
                                let products = format_count(row.products);
                                let size = format_file_size(row.file_size);
                                let duration = row.generation_time.map(format_seconds).unwrap_or_default();
                                let error = row.error_message.unwrap_or_default();
                                let error_title = error.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{date}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{status_badge(row.status)}</TableCellLayout></TableCell>
                                        <TableCell class="table__cell--right"><TableCellLayout>{products}</TableCellLayout></TableCell>
                                        <TableCell class="table__cell--right"><TableCellLayout>{size}</TableCellLayout></TableCell>
                                        <TableCell class="table__cell--right"><TableCellLayout>{duration}</TableCellLayout></TableCell>
                                        <TableCell attr:title=error_title><TableCellLayout truncate=true>{error}</TableCellLayout></TableCell>
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
