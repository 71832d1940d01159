pub mod feed_settings;
