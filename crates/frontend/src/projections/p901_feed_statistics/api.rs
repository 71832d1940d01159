use contracts::projections::p901_feed_statistics::{FeedStatistics, GetStatisticsResponse};
use contracts::shared::api_response::ApiError;

use crate::shared::api_utils::ApiClient;
use crate::shared::config::actions;

/// Сводка по фиду
pub async fn fetch_statistics(api: &ApiClient) -> Result<FeedStatistics, ApiError> {
    let response: GetStatisticsResponse = api.get_as(actions::GET_STATISTICS, &[]).await?;
    Ok(response.statistics)
}
