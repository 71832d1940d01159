pub mod a001_rozetka_category;
pub mod a002_category_mapping;
