use contracts::shared::api_response::ApiError;
use contracts::usecases::u501_generate_feed::{ClearCacheResult, FeedPreview, GenerateFeedResult};
use serde_json::json;

use crate::shared::api_utils::ApiClient;
use crate::shared::config::actions;

/// Сгенерировать фид и записать файл
pub async fn generate(api: &ApiClient) -> Result<GenerateFeedResult, ApiError> {
    api.post_as(actions::GENERATE, &json!({})).await
}

/// Пробная генерация без записи файла
pub async fn test_generation(api: &ApiClient) -> Result<FeedPreview, ApiError> {
    api.post_as(actions::TEST_GENERATION, &json!({})).await
}

pub async fn clear_cache(api: &ApiClient) -> Result<ClearCacheResult, ApiError> {
    api.post_as(actions::CLEAR_CACHE, &json!({})).await
}
