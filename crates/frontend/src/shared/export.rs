//! Скачивание JSON-файлов и чтение выбранных пользователем файлов

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

/// Имя файла экспорта настроек для даты `YYYY-MM-DD`
pub fn settings_export_filename(date_stamp: &str) -> String {
    format!("rozetka_settings_{}.json", date_stamp)
}

/// Сохраняет JSON в файл и инициирует скачивание
pub fn download_json(content: &str, filename: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("Нет данных для экспорта".to_string());
    }
    let blob = create_blob(content, "application/json;charset=utf-8;")?;
    download_blob(&blob, filename)
}

/// Прочитать содержимое файла как текст
pub async fn read_file_text(file: &File) -> Result<String, String> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Не удалось прочитать файл: {:?}", e))?;
    text.as_string()
        .ok_or_else(|| "Файл не содержит текста".to_string())
}

/// Создает Blob объект с текстом
fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    // Временная ссылка для скачивания
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_export_filename() {
        assert_eq!(
            settings_export_filename("2024-03-15"),
            "rozetka_settings_2024-03-15.json"
        );
    }
}
