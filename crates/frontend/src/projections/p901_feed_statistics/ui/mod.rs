use contracts::projections::p901_feed_statistics::FeedStatistics;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::projections::p901_feed_statistics::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::notifications::NotificationService;
use crate::shared::utils::{format_count, format_file_size, format_seconds};

#[derive(Clone, Copy)]
pub struct StatisticsVm {
    api: StoredValue<ApiClient>,
    notifications: NotificationService,
    pub statistics: RwSignal<Option<FeedStatistics>>,
    pub is_loading: RwSignal<bool>,
}

impl StatisticsVm {
    pub fn new(api_client: ApiClient, notifications: NotificationService) -> Self {
        Self {
            api: StoredValue::new(api_client),
            notifications,
            statistics: RwSignal::new(None),
            is_loading: RwSignal::new(false),
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
            match api::fetch_statistics(&api_client).await {
                Ok(stats) => this.statistics.set(Some(stats)),
                Err(e) => this.notifications.api_error(&e),
            }
            this.is_loading.set(false);
        });
    }
}

#[component]
fn StatCard(#[prop(into)] title: String, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__title">{title}</div>
            <div class="stat-card__value">{move || value.get()}</div>
        </div>
    }
}

/// Вкладка «Статистика»
#[component]
pub fn FeedStatisticsView(vm: StatisticsVm) -> impl IntoView {
    let field = move |f: fn(&FeedStatistics) -> String| {
        Signal::derive(move || {
            vm.statistics
                .with(|s| s.as_ref().map(f).unwrap_or_else(|| "—".to_string()))
        })
    };

    view! {
        <div id="p901_feed_statistics--view">
            <Flex gap=FlexGap::Small align=FlexAlign::Center justify=FlexJustify::SpaceBetween>
                <h3>"Статистика фида"</h3>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.load()
                    disabled=Signal::derive(move || vm.is_loading.get())
                >
                    {icon("refresh")}
                    " Обновить"
                </Button>
            </Flex>

            <Show when=move || vm.is_loading.get()>
                <Spinner size=SpinnerSize::Small />
            </Show>

            <div class="stat-grid">
                <StatCard title="Товаров в магазине" value=field(|s| format_count(s.total_products)) />
                <StatCard title="Попадёт в фид" value=field(|s| format_count(s.exported_products)) />
                <StatCard title="Отфильтровано" value=field(|s| format_count(s.skipped_products())) />
                <StatCard
                    title="Категорий сопоставлено"
                    value=field(|s| {
                        format!(
                            "{} из {} ({}%)",
                            format_count(s.mapped_categories),
                            format_count(s.total_categories),
                            s.mapped_percent()
                        )
                    })
                />
                <StatCard title="Категорий Rozetka" value=field(|s| format_count(s.rozetka_categories)) />
                <StatCard
                    title="Последняя генерация"
                    value=field(|s| {
                        s.last_generation
                            .as_deref()
                            .map(format_datetime)
                            .unwrap_or_else(|| "Не выполнялась".to_string())
                    })
                />
                <StatCard
                    title="Время генерации"
                    value=field(|s| s.last_generation_time.map(format_seconds).unwrap_or_else(|| "—".to_string()))
                />
                <StatCard title="Размер файла" value=field(|s| format_file_size(s.file_size)) />
                <StatCard
                    title="Кэш"
                    value=field(|s| if s.cache_valid { "Актуален".to_string() } else { "Устарел".to_string() })
                />
            </div>

            {move || {
                vm.statistics
                    .with(|s| s.as_ref().and_then(|s| s.feed_url.clone()))
                    .map(|url| {
                        let href = url.clone();
                        view! {
                            <p class="form__hint">
                                "Адрес фида: "
                                <a href=href target="_blank" rel="noopener">{url}</a>
                            </p>
                        }
                    })
            }}
        </div>
    }
}
