pub mod asset_reader;
pub mod workbook_reader;

pub use asset_reader::{encode_image, PageAssets};
pub use workbook_reader::{sheet_to_table, DataContext, WorkbookReader};
