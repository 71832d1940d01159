pub mod dto;

pub use dto::{GenerationHistoryEntry, GenerationStatus, GetHistoryResponse};
