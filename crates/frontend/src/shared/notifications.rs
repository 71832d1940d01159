//! Всплывающие уведомления.
//!
//! Уведомления складываются в порядке появления и сами исчезают через
//! время, зависящее от уровня. Истории нет.

use contracts::shared::api_response::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    /// Время показа до автоматического закрытия
    pub fn duration_ms(&self) -> u32 {
        match self {
            NotificationLevel::Success => 5_000,
            NotificationLevel::Error => 8_000,
            NotificationLevel::Warning => 6_000,
            NotificationLevel::Info => 5_000,
        }
    }

    fn intent(&self) -> MessageBarIntent {
        match self {
            NotificationLevel::Success => MessageBarIntent::Success,
            NotificationLevel::Error => MessageBarIntent::Error,
            NotificationLevel::Warning => MessageBarIntent::Warning,
            NotificationLevel::Info => MessageBarIntent::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    pub items: RwSignal<Vec<Notification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    pub fn show(&self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            level,
            message: message.into(),
        };
        let id = notification.id.clone();
        self.items.update(|items| items.push(notification));

        let this = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(level.duration_ms()).await;
            this.dismiss(&id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NotificationLevel::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(NotificationLevel::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(NotificationLevel::Info, message);
    }

    /// Ошибка запроса: транспортные ошибки одним общим текстом
    pub fn api_error(&self, error: &ApiError) {
        self.error(error.user_message());
    }

    pub fn dismiss(&self, id: &str) {
        // Сигнал мог быть уже удалён вместе с владельцем
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided")
}

/// Стек уведомлений в правом верхнем углу
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="rozetka-notifications">
            <For
                each=move || service.items.get()
                key=|n| n.id.clone()
                children=move |n: Notification| {
                    let id = n.id.clone();
                    let intent = n.level.intent();
                    let message = n.message;
                    view! {
                        <MessageBar intent=intent>
                            <div class="rozetka-notifications__text">{message}</div>
                            <Button
                                appearance=ButtonAppearance::Transparent
                                size=ButtonSize::Small
                                on_click=move |_| service.dismiss(&id)
                            >
                                "×"
                            </Button>
                        </MessageBar>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_by_level() {
        assert_eq!(NotificationLevel::Success.duration_ms(), 5_000);
        assert_eq!(NotificationLevel::Error.duration_ms(), 8_000);
        assert_eq!(NotificationLevel::Warning.duration_ms(), 6_000);
        assert_eq!(NotificationLevel::Info.duration_ms(), 5_000);
    }
}
