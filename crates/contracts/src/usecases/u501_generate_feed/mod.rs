pub mod response;

pub use response::{ClearCacheResult, FeedPreview, GenerateFeedResult};
