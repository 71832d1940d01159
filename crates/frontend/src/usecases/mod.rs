pub mod u501_generate_feed;
pub mod u502_settings_transfer;
