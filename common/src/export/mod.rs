//! Export core modules shared across CLI and WASM wrappers.

pub mod pagination;
pub mod pdf_core;

pub use pagination::{export_file_name, paginate, PageSlice};
pub use pdf_core::{build_pdf_blocks, PdfBlock, PdfLayoutCore, PdfLine};
