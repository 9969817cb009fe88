//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::{BuybackError, Result};
use crate::report::BuybackReport;
use card_buyback_common::export::excel_core::generate_excel_buffer;
use std::path::Path;

pub fn generate_excel(report: &BuybackReport, output_path: &Path, title: &str) -> Result<()> {
    let buffer = generate_excel_buffer(&report.cards, &report.unmatched, title)
        .map_err(BuybackError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;

    Ok(())
}
