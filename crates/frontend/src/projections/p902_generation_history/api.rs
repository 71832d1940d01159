use contracts::projections::p902_generation_history::{GenerationHistoryEntry, GetHistoryResponse};
use contracts::shared::api_response::ApiError;
use serde_json::{json, Value};

use crate::shared::api_utils::ApiClient;
use crate::shared::config::actions;

/// История запусков генерации, новые сверху
pub async fn fetch_history(api: &ApiClient) -> Result<Vec<GenerationHistoryEntry>, ApiError> {
    let response: GetHistoryResponse = api.get_as(actions::GET_HISTORY, &[]).await?;
    Ok(response.history)
}

pub async fn clear_history(api: &ApiClient) -> Result<Value, ApiError> {
    api.post(actions::CLEAR_HISTORY, &json!({})).await
}
