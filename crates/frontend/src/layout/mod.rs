pub mod global_context;

use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::notifications::NotificationHost;
use global_context::{use_global_context, TabKey};

/// Каркас страницы модуля: заголовок, панель вкладок, содержимое вкладки
/// и стек уведомлений поверх всего.
#[component]
pub fn Shell<H, C>(header: H, center: C) -> impl IntoView
where
    H: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="rozetka-layout">
            <div class="rozetka-layout__header">{header()}</div>
            <TabBar />
            <div class="rozetka-layout__main">{center()}</div>
            <NotificationHost />
        </div>
    }
}

/// Панель вкладок на кнопках THAW
#[component]
fn TabBar() -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <Flex
            gap=FlexGap::Small
            align=FlexAlign::Center
            style="margin-bottom: var(--spacing-md); padding: var(--spacing-sm); background: var(--color-bg-secondary); border-radius: var(--radius-lg); border: 1px solid var(--color-border);"
        >
            {TabKey::ALL
                .into_iter()
                .map(|tab| {
                    let (label_key, fallback) = tab.label();
                    view! {
                        <Button
                            appearance=Signal::derive(move || {
                                if ctx.active.get() == tab {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            })
                            size=ButtonSize::Small
                            on_click=move |_| ctx.activate_tab(tab)
                        >
                            <span class="tab-icon">{icon(tab.icon())}</span>
                            {move || ctx.text(label_key, fallback)}
                        </Button>
                    }
                })
                .collect_view()}
        </Flex>
    }
}
