pub mod aggregate;
pub mod state;

pub use aggregate::{
    AutoMapResponse, CategoryMapping, GetMappingsResponse, SaveMappingsRequest, SaveMappingsResponse,
};
pub use state::{MappingState, SelectOutcome, SelectionError, UpsertOutcome};
