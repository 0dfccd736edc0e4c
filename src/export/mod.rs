mod clean;
mod rows;
mod xlsx;


pub use clean::clean_text_for_excel;
pub use rows::{bookmark_rows, marker_rows, SectionRow};
pub use xlsx::{XlsxWriter, MAX_CELL_CHARS, MAX_SHEET_NAME_CHARS};
