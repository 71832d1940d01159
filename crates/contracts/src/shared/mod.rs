pub mod api_response;
pub mod serde_helpers;
pub mod settings;
pub mod validation;
