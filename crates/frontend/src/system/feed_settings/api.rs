use std::collections::BTreeMap;

use contracts::shared::api_response::ApiError;
use contracts::shared::settings::{
    GetSettingsResponse, SaveSettingsRequest, SaveSettingsResponse, SaveTabRequest, SettingsTab,
};
use serde_json::{Map, Value};

use crate::shared::api_utils::ApiClient;
use crate::shared::config::actions;

/// Сохранённые значения полей `feed_rozetka_*`
pub async fn fetch_settings(api: &ApiClient) -> Result<Map<String, Value>, ApiError> {
    let response: GetSettingsResponse = api.get_as(actions::GET_SETTINGS, &[]).await?;
    Ok(response.settings)
}

/// Сохранить все поля
pub async fn save_settings(
    api: &ApiClient,
    settings: BTreeMap<String, String>,
) -> Result<SaveSettingsResponse, ApiError> {
    api.post_as(actions::SAVE_SETTINGS, &SaveSettingsRequest { settings })
        .await
}

/// Сохранить только поля одной вкладки
pub async fn save_tab(
    api: &ApiClient,
    tab: SettingsTab,
    settings: BTreeMap<String, String>,
) -> Result<SaveSettingsResponse, ApiError> {
    api.post_as(actions::SAVE_TAB, &SaveTabRequest { tab, settings })
        .await
}
