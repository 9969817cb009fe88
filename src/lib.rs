pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod ocr_provider;
pub mod report;
pub mod scanner;
