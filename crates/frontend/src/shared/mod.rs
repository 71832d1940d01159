pub mod api_utils;
pub mod clipboard;
pub mod config;
pub mod date_utils;
pub mod debounce;
pub mod dialogs;
pub mod export;
pub mod icons;
pub mod notifications;
pub mod storage;
pub mod utils;
