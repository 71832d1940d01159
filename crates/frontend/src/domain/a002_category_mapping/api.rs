use contracts::domain::a002_category_mapping::{
    AutoMapResponse, CategoryMapping, GetMappingsResponse, SaveMappingsRequest,
    SaveMappingsResponse,
};
use contracts::shared::api_response::ApiError;
use serde_json::json;

use crate::shared::api_utils::ApiClient;
use crate::shared::config::actions;

pub async fn fetch_mappings(api: &ApiClient) -> Result<Vec<CategoryMapping>, ApiError> {
    let response: GetMappingsResponse = api.get_as(actions::GET_CATEGORY_MAPPINGS, &[]).await?;
    Ok(response.mappings)
}

/// Сохранить весь набор связей; сервер заменяет его целиком
pub async fn save_mappings(
    api: &ApiClient,
    mappings: Vec<CategoryMapping>,
) -> Result<SaveMappingsResponse, ApiError> {
    api.post_as(actions::SAVE_CATEGORY_MAPPINGS, &SaveMappingsRequest { mappings })
        .await
}

/// Предложения автоматического сопоставления по названиям
pub async fn auto_map(api: &ApiClient) -> Result<Vec<CategoryMapping>, ApiError> {
    let response: AutoMapResponse = api.post_as(actions::AUTO_MAP_CATEGORIES, &json!({})).await?;
    Ok(response.mappings)
}
