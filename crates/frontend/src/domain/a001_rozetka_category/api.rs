use contracts::domain::a001_rozetka_category::{
    Category, CategoryImportResult, CategoryNamespace, ClearCategoriesResult,
    SearchCategoriesResponse, SEARCH_LIMIT,
};
use contracts::shared::api_response::ApiError;
use serde_json::json;
use web_sys::File;

use crate::shared::api_utils::ApiClient;
use crate::shared::config::actions;

/// Поиск категорий в пространстве `namespace`
pub async fn search(
    api: &ApiClient,
    namespace: CategoryNamespace,
    term: &str,
) -> Result<Vec<Category>, ApiError> {
    let limit = SEARCH_LIMIT.to_string();
    let response: SearchCategoriesResponse = api
        .get_as(namespace.search_action(), &[("q", term), ("limit", limit.as_str())])
        .await?;
    Ok(response.items)
}

/// Загрузить JSON-файл с деревом категорий Rozetka
pub async fn import_categories(api: &ApiClient, file: &File) -> Result<CategoryImportResult, ApiError> {
    api.upload_as(
        actions::IMPORT_ROZETKA_CATEGORIES,
        actions::CATEGORIES_FILE_FIELD,
        file,
    )
    .await
}

/// Удалить все импортированные категории Rozetka
pub async fn clear_categories(api: &ApiClient) -> Result<ClearCategoriesResult, ApiError> {
    api.post_as(actions::CLEAR_ROZETKA_CATEGORIES, &json!({})).await
}
