use crate::domain::a002_category_mapping::ui::view_model::CategoryMappingVm;
use crate::domain::a002_category_mapping::ui::CategoryMappingView;
use crate::layout::global_context::{AppGlobalContext, TabKey};
use crate::layout::Shell;
use crate::projections::p901_feed_statistics::ui::{FeedStatisticsView, StatisticsVm};
use crate::projections::p902_generation_history::ui::list::{GenerationHistoryList, HistoryVm};
use crate::shared::api_utils::ApiClient;
use crate::shared::config::{actions, AppConfig};
use crate::shared::notifications::NotificationService;
use crate::shared::storage::{load_language, save_language, GetLanguageResponse, LanguagePack};
use crate::system::feed_settings::ui::{FiltersTabView, GeneralTabView, SettingsVm};
use crate::usecases::u501_generate_feed::GenerateFeedView;
use crate::usecases::u502_settings_transfer::SettingsTransferView;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Языковые строки: из localStorage, иначе один запрос к серверу
fn init_language(ctx: AppGlobalContext, api_client: ApiClient) {
    if let Some(pack) = load_language() {
        log::debug!("Языковые строки из localStorage: {}", pack.code);
        ctx.language.set(pack);
        return;
    }
    spawn_local(async move {
        match api_client
            .get_as::<GetLanguageResponse>(actions::GET_LANGUAGE, &[])
            .await
        {
            Ok(response) => {
                let pack = LanguagePack::from(response);
                if !pack.is_empty() {
                    save_language(&pack);
                }
                ctx.language.set(pack);
            }
            // Без строк сервера работают встроенные тексты
            Err(e) => log::warn!("Языковые строки не получены: {}", e),
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_window();
    log::info!("Панель фида Rozetka: {}", config.base_url);
    let api_client = ApiClient::new(config.clone());
    let notifications = NotificationService::new();
    let ctx = AppGlobalContext::new();

    provide_context(config);
    provide_context(api_client.clone());
    provide_context(notifications);
    provide_context(ctx);

    let settings_vm = SettingsVm::new(api_client.clone(), notifications);
    let mapping_vm = CategoryMappingVm::new(api_client.clone(), notifications);
    let statistics_vm = StatisticsVm::new(api_client.clone(), notifications);
    let history_vm = HistoryVm::new(api_client.clone(), notifications);

    init_language(ctx, api_client);
    ctx.init_router_integration();
    settings_vm.load();
    statistics_vm.load();

    // Данные вкладки подгружаются при её открытии
    Effect::new(move |_| match ctx.active.get() {
        TabKey::Categories => mapping_vm.ensure_loaded(),
        TabKey::Statistics => statistics_vm.load(),
        TabKey::History => history_vm.load(),
        TabKey::Settings | TabKey::Filters | TabKey::ImportExport => {}
    });

    let feed_url = Signal::derive(move || {
        statistics_vm
            .statistics
            .with(|s| s.as_ref().and_then(|s| s.feed_url.clone()))
    });
    let on_generated = Callback::new(move |_: ()| {
        statistics_vm.load();
        if ctx.active.get_untracked() == TabKey::History {
            history_vm.load();
        }
    });

    view! {
        <Shell
            header=move || view! {
                <div class="rozetka-header">
                    <h1>{move || ctx.text("heading_title", "Фид Rozetka")}</h1>
                    <GenerateFeedView feed_url=feed_url on_generated=on_generated />
                </div>
            }.into_any()
            center=move || view! {
                {move || match ctx.active.get() {
                    TabKey::Settings => view! { <GeneralTabView vm=settings_vm /> }.into_any(),
                    TabKey::Filters => view! { <FiltersTabView vm=settings_vm /> }.into_any(),
                    TabKey::Categories => view! { <CategoryMappingView vm=mapping_vm /> }.into_any(),
                    TabKey::Statistics => view! { <FeedStatisticsView vm=statistics_vm /> }.into_any(),
                    TabKey::History => view! { <GenerationHistoryList vm=history_vm /> }.into_any(),
                    TabKey::ImportExport => view! { <SettingsTransferView vm=settings_vm /> }.into_any(),
                }}
            }.into_any()
        />
    }
}
