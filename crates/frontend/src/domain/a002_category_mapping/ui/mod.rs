pub mod search_session;
pub mod view;
pub mod view_model;

pub use view::CategoryMappingView;
