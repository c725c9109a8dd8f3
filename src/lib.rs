//! EcoWaste AI CLI
//!
//! 廃棄物写真をGeminiで解析し、レポート表示とPDF出力を行う。

pub mod analyzer;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod report;
