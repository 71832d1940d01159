pub mod aggregate;
pub mod import;
pub mod search;

pub use aggregate::{Category, CategoryNamespace};
pub use import::{CategoryImportResult, ClearCategoriesResult};
pub use search::{SearchCategoriesResponse, SearchQuery, SearchResults, SEARCH_LIMIT, SEARCH_MIN_CHARS};
