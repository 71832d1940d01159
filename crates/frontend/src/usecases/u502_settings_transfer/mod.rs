pub mod view;

pub use view::SettingsTransferView;
