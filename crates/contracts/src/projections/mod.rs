pub mod p901_feed_statistics;
pub mod p902_generation_history;
