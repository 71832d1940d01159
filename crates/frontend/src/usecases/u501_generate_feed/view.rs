use super::api;
use contracts::usecases::u501_generate_feed::{FeedPreview, GenerateFeedResult};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api_utils::ApiClient;
use crate::shared::clipboard::copy_text;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::utils::{format_count, format_file_size, format_seconds};

fn warnings_list(warnings: Vec<String>) -> impl IntoView {
    (!warnings.is_empty()).then(|| {
        view! {
            <MessageBar intent=MessageBarIntent::Warning>
                <ul class="rozetka-controls__warnings">
                    {warnings.into_iter().map(|w| view! { <li>{w}</li> }).collect_view()}
                </ul>
            </MessageBar>
        }
    })
}

/// Панель управления фидом: генерация, пробный прогон, кэш и ссылка на файл.
///
/// `feed_url` приходит из статистики; после генерации берётся адрес из
/// ответа сервера. `on_generated` вызывается после успешной генерации.
#[component]
pub fn GenerateFeedView(
    #[prop(into)] feed_url: Signal<Option<String>>,
    #[prop(into)] on_generated: Callback<()>,
) -> impl IntoView {
    let api_client = use_context::<ApiClient>().expect("ApiClient not provided");
    let api_sv = StoredValue::new(api_client);
    let notifications = use_notifications();

    let (is_generating, set_is_generating) = signal(false);
    let (is_testing, set_is_testing) = signal(false);
    let (is_clearing, set_is_clearing) = signal(false);
    let (result, set_result) = signal(None::<GenerateFeedResult>);
    let (preview, set_preview) = signal(None::<FeedPreview>);

    let current_url = Signal::derive(move || {
        result
            .with(|r| r.as_ref().and_then(|r| r.feed_url.clone()))
            .or_else(|| feed_url.get())
            .filter(|u| !u.is_empty())
    });

    let generate = move |_| {
        set_is_generating.set(true);
        set_preview.set(None);
        let api_client = api_sv.get_value();
        spawn_local(async move {
            match api::generate(&api_client).await {
                Ok(res) => {
                    log::info!("Фид сгенерирован: {} товаров", res.products);
                    notifications.success(format!(
                        "Фид сгенерирован: {} товаров",
                        format_count(res.products)
                    ));
                    set_result.set(Some(res));
                    on_generated.run(());
                }
                Err(e) => notifications.api_error(&e),
            }
            set_is_generating.set(false);
        });
    };

    let test_generation = move |_| {
        set_is_testing.set(true);
        let api_client = api_sv.get_value();
        spawn_local(async move {
            match api::test_generation(&api_client).await {
                Ok(res) => {
                    if res.errors.is_empty() {
                        notifications.info(format!(
                            "Пробная генерация: {} товаров",
                            format_count(res.products)
                        ));
                    } else {
                        notifications.warning(format!("Найдено ошибок: {}", res.errors.len()));
                    }
                    set_preview.set(Some(res));
                }
                Err(e) => notifications.api_error(&e),
            }
            set_is_testing.set(false);
        });
    };

    let clear_cache = move |_| {
        set_is_clearing.set(true);
        let api_client = api_sv.get_value();
        spawn_local(async move {
            match api::clear_cache(&api_client).await {
                Ok(res) => {
                    let message = if res.message.trim().is_empty() {
                        "Кэш очищен".to_string()
                    } else {
                        res.message
                    };
                    notifications.success(message);
                }
                Err(e) => notifications.api_error(&e),
            }
            set_is_clearing.set(false);
        });
    };

    let copy_url = move |_| {
        let Some(url) = current_url.get_untracked() else {
            notifications.warning("Фид ещё не сгенерирован");
            return;
        };
        spawn_local(async move {
            match copy_text(&url).await {
                Ok(()) => notifications.success("Ссылка на фид скопирована"),
                Err(e) => {
                    log::error!("{}", e);
                    notifications.error(e);
                }
            }
        });
    };

    view! {
        <div id="u501_generate_feed--usecase" class="rozetka-controls">
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=generate
                    disabled=Signal::derive(move || is_generating.get())
                >
                    {move || if is_generating.get() { "Генерация..." } else { "Сгенерировать фид" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=test_generation
                    disabled=Signal::derive(move || is_testing.get() || is_generating.get())
                >
                    {move || if is_testing.get() { "Проверка..." } else { "Пробная генерация" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=clear_cache
                    disabled=Signal::derive(move || is_clearing.get())
                >
                    {icon("trash")}
                    " Очистить кэш"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=copy_url
                    disabled=Signal::derive(move || current_url.get().is_none())
                >
                    {icon("copy")}
                    " Копировать ссылку"
                </Button>
                {move || current_url.get().map(|url| view! {
                    <a class="button button--subtle" href=url target="_blank" rel="noopener" download="">
                        {icon("download")}
                        " Скачать фид"
                    </a>
                })}
            </Flex>

            {move || result.get().map(|r| view! {
                <div class="rozetka-controls__result">
                    <span>{format!("Товаров: {}", format_count(r.products))}</span>
                    <span>{format!("Размер: {}", format_file_size(r.file_size))}</span>
                    {r.generation_time.map(|t| view! { <span>{format!("Время: {}", format_seconds(t))}</span> })}
                    {warnings_list(r.warnings)}
                </div>
            })}

            {move || preview.get().map(|p| view! {
                <div class="rozetka-controls__preview">
                    <h4>{format!("Пробная генерация: {} товаров", format_count(p.products))}</h4>
                    {(!p.errors.is_empty()).then(|| view! {
                        <MessageBar intent=MessageBarIntent::Error>
                            <ul>
                                {p.errors.clone().into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                            </ul>
                        </MessageBar>
                    })}
                    {warnings_list(p.warnings.clone())}
                    <pre class="rozetka-controls__xml">{p.preview.clone()}</pre>
                </div>
            })}
        </div>
    }
}
