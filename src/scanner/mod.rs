//! OCRレスポンスファイルのスキャンと読み込み

use crate::error::{BuybackError, Result};
use crate::ocr_provider::OcrProvider;
use card_buyback_common::InputFragment;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct OcrFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// フォルダ直下のOCRレスポンスファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path, provider: OcrProvider) -> Result<Vec<OcrFile>> {
    if !folder.exists() {
        return Err(BuybackError::FolderNotFound(folder.display().to_string()));
    }

    let extensions = provider.extensions();
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let matches_ext = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                extensions.iter().any(|&e| e == ext)
            })
            .unwrap_or(false);

        if matches_ext {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            files.push(OcrFile {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// OCRレスポンスを非同期に読み込み、ファイル順にフラグメントを並べる
///
/// 壊れたファイルはバッチを止めず、空のフラグメント（→未照合）として扱う。
pub async fn load_fragments(files: &[OcrFile], provider: OcrProvider) -> Result<Vec<InputFragment>> {
    let handles: Vec<_> = files
        .iter()
        .map(|file| {
            let path = file.path.clone();
            tokio::spawn(async move { tokio::fs::read_to_string(path).await })
        })
        .collect();

    let mut fragments = Vec::new();

    for (file, handle) in files.iter().zip(handles) {
        let joined = handle
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let content = match joined {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %file.file_name, "OCRレスポンスを読み込めません: {}", e);
                fragments.push(InputFragment::ocr(""));
                continue;
            }
        };

        match provider.parse(&content) {
            Ok(parsed) => fragments.extend(parsed),
            Err(e) => {
                warn!(file = %file.file_name, "OCRレスポンスを読めません: {}", e);
                fragments.push(InputFragment::ocr(""));
            }
        }
    }

    Ok(fragments)
}
