pub mod analysis_report;
pub mod analyzing;
pub mod header;
pub mod upload_area;
