pub mod import_panel;

pub use import_panel::CategoryImportPanel;
