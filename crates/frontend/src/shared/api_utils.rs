//! Клиент API модуля.
//!
//! Все действия идут через один адрес `index.php?route=...rozetka.{action}`
//! с токеном админки. Каждый запрос ограничен по времени: таймер
//! `gloo_timers` вызывает `AbortController::abort`, и ошибка fetch
//! превращается в `ApiError::Timeout`.

use std::cell::Cell;
use std::rc::Rc;

use contracts::shared::api_response::{decode_response, parse_envelope, ApiError};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::{AbortController, File, FormData};

use crate::shared::config::AppConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Адрес действия, например для ссылки на скачивание
    pub fn url(&self, action: &str, params: &[(&str, &str)]) -> String {
        self.config.action_url(action, params)
    }

    // ========================================================================
    // Сырые запросы: конверт проверен, payload не разобран
    // ========================================================================

    pub async fn get(&self, action: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self.url(action, params);
        let guard = TimeoutGuard::arm(self.config.request_timeout_ms)?;
        let request = Request::get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .abort_signal(Some(&guard.controller.signal()))
            .build();
        self.execute(action, request, &guard).await
    }

    pub async fn post<B: Serialize>(&self, action: &str, body: &B) -> Result<Value, ApiError> {
        let url = self.url(action, &[]);
        let guard = TimeoutGuard::arm(self.config.request_timeout_ms)?;
        let request = Request::post(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .abort_signal(Some(&guard.controller.signal()))
            .json(body);
        self.execute(action, request, &guard).await
    }

    /// Загрузка файла multipart-формой; у загрузок свой, более длинный таймаут
    pub async fn upload(&self, action: &str, field: &str, file: &File) -> Result<Value, ApiError> {
        let url = self.url(action, &[]);
        let form = FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        form.append_with_blob_and_filename(field, file, &file.name())
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

        let guard = TimeoutGuard::arm(self.config.upload_timeout_ms)?;
        // Content-Type с границей multipart выставит сам браузер
        let request = Request::post(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .abort_signal(Some(&guard.controller.signal()))
            .body(form);
        self.execute(action, request, &guard).await
    }

    // ========================================================================
    // Типизированные запросы
    // ========================================================================

    pub async fn get_as<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let value = self.get(action, params).await?;
        decode(action, value)
    }

    pub async fn post_as<B: Serialize, T: DeserializeOwned>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = self.post(action, body).await?;
        decode(action, value)
    }

    pub async fn upload_as<T: DeserializeOwned>(
        &self,
        action: &str,
        field: &str,
        file: &File,
    ) -> Result<T, ApiError> {
        let value = self.upload(action, field, file).await?;
        decode(action, value)
    }

    async fn execute(
        &self,
        action: &str,
        request: Result<Request, gloo_net::Error>,
        guard: &TimeoutGuard,
    ) -> Result<Value, ApiError> {
        let result = async {
            let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
            let response = request.send().await.map_err(|e| guard.map_error(e))?;
            if !response.ok() {
                return Err(ApiError::Http(response.status()));
            }
            let value: Value = response.json().await.map_err(|e| {
                if guard.timed_out() {
                    ApiError::Timeout(guard.timeout_ms)
                } else {
                    ApiError::Decode(e.to_string())
                }
            })?;
            parse_envelope(value)
        }
        .await;

        match &result {
            Ok(_) => log::debug!("{}: ok", action),
            Err(ApiError::Server(message)) => log::warn!("{}: {}", action, message),
            Err(e) => log::error!("{}: {}", action, e),
        }
        result
    }
}

fn decode<T: DeserializeOwned>(action: &str, value: Value) -> Result<T, ApiError> {
    decode_response(value).inspect_err(|e| log::error!("{}: {}", action, e))
}

/// Таймер, отменяющий запрос по истечении времени.
/// При удалении таймер снимается.
struct TimeoutGuard {
    controller: AbortController,
    timed_out: Rc<Cell<bool>>,
    timeout_ms: u32,
    _timer: Timeout,
}

impl TimeoutGuard {
    fn arm(timeout_ms: u32) -> Result<Self, ApiError> {
        let controller = AbortController::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let timed_out = timed_out.clone();
            Timeout::new(timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };
        Ok(Self {
            controller,
            timed_out,
            timeout_ms,
            _timer: timer,
        })
    }

    fn timed_out(&self) -> bool {
        self.timed_out.get()
    }

    fn map_error(&self, error: gloo_net::Error) -> ApiError {
        if self.timed_out() {
            ApiError::Timeout(self.timeout_ms)
        } else {
            ApiError::Network(error.to_string())
        }
    }
}
