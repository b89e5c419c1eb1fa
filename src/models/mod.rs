pub mod metadata;
pub mod program;
pub mod spreadsheet;
pub mod template;
pub mod workspace;
