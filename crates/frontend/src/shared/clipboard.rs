//! Копирование в буфер обмена через Web Clipboard API

use wasm_bindgen_futures::JsFuture;

/// Скопировать текст; ошибка возвращается строкой для уведомления
pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| format!("Не удалось скопировать: {:?}", e))
}
