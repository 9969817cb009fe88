pub mod excel;
pub mod json;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::report::BuybackReport;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let json_path = output.join(format!("{}.json", title));
        let excel_path = output.join(format!("{}.xlsx", title));
        (json_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        let json_path = parent.join(format!("{}.json", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (json_path, excel_path)
    }
}

/// レポートを指定形式で出力し、書き出したパスを返す
pub fn export_report(
    report: &BuybackReport,
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        ExportFormat::Json => {
            let output_path = output_path_for_format(output, title, "json");
            json::write_report(report, &output_path)?;
            vec![output_path]
        }
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, title, "xlsx");
            excel::generate_excel(report, &output_path, title)?;
            vec![output_path]
        }
        ExportFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output, title);
            json::write_report(report, &json_path)?;
            excel::generate_excel(report, &excel_path, title)?;
            vec![json_path, excel_path]
        }
    };

    for path in &written {
        println!("✔ 出力: {}", path.display());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path_for_format(dir.path(), "買取査定", "json");
        assert_eq!(path, dir.path().join("買取査定.json"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/report.xlsx"), "買取査定", "xlsx");
        assert_eq!(path, PathBuf::from("out/report.xlsx"));
    }

    #[test]
    fn test_output_paths_for_both_uses_stem() {
        let (json, excel) = output_paths_for_both(Path::new("out/quote.json"), "買取査定");
        assert_eq!(json, PathBuf::from("out/quote.json"));
        assert_eq!(excel, PathBuf::from("out/quote.xlsx"));
    }
}
