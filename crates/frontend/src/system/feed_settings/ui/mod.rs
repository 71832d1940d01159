pub mod view;
pub mod view_model;

pub use view::{FiltersTabView, GeneralTabView};
pub use view_model::SettingsVm;
