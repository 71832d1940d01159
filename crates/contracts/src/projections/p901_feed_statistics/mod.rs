pub mod dto;

pub use dto::{FeedStatistics, GetStatisticsResponse};
