//! Excel生成（共通ライブラリ）
//!
//! 買取査定シートと未照合シートの2枚構成でExcelを生成する

use crate::pricer::total_offer;
use crate::types::IdentifiedCard;
use rust_xlsxwriter::*;

/// 査定シートの列（ラベル, 列幅）
const OFFER_COLUMNS: &[(&str, f64)] = &[
    ("No.", 6.0),
    ("カード名", 24.0),
    ("セット", 20.0),
    ("番号", 10.0),
    ("状態", 16.0),
    ("相場", 12.0),
    ("買取価格", 12.0),
    ("信頼度", 8.0),
    ("入力テキスト", 40.0),
];

pub const OFFER_SHEET_NAME: &str = "買取査定";
pub const UNMATCHED_SHEET_NAME: &str = "未照合";

/// Excelをバッファに生成
///
/// # Arguments
/// * `matched` - 照合済みカード
/// * `unmatched` - 未照合の入力テキスト
/// * `title` - 査定シート1行目のタイトル
pub fn generate_excel_buffer(
    matched: &[IdentifiedCard],
    unmatched: &[String],
    title: &str,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let title_format = Format::new().set_bold().set_font_size(14.0);

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let price_format = Format::new()
        .set_num_format("#,##0.00")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let total_format = Format::new().set_bold().set_num_format("#,##0.00");

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(OFFER_SHEET_NAME)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        worksheet
            .write_string_with_format(0, 0, title, &title_format)
            .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;

        for (col, (label, width)) in OFFER_COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet
                .set_column_width(col, *width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
            worksheet
                .write_string_with_format(2, col, *label, &header_format)
                .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
        }

        let mut row: u32 = 3;
        for card in matched {
            let condition = card
                .condition
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            let confidence = card
                .confidence
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "-".to_string());

            let texts: [(u16, &str); 5] = [
                (1, card.entry.name.as_str()),
                (2, card.entry.set.as_str()),
                (3, card.entry.number.as_str()),
                (4, condition.as_str()),
                (8, card.source_text.as_str()),
            ];

            worksheet
                .write_number_with_format(row, 0, card.id as f64, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            for (col, value) in texts {
                worksheet
                    .write_string_with_format(row, col, value, &text_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
            worksheet
                .write_number_with_format(row, 5, card.market_price, &price_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet
                .write_number_with_format(row, 6, card.offer_price, &price_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet
                .write_string_with_format(row, 7, &confidence, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;

            row += 1;
        }

        // 合計行
        worksheet
            .write_string_with_format(row + 1, 5, "合計", &header_format)
            .map_err(|e| format!("合計書き込みエラー: {}", e))?;
        worksheet
            .write_number_with_format(row + 1, 6, total_offer(matched), &total_format)
            .map_err(|e| format!("合計書き込みエラー: {}", e))?;
    }

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(UNMATCHED_SHEET_NAME)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        worksheet
            .set_column_width(0, 60.0)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, 0, "入力テキスト", &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;

        for (i, text) in unmatched.iter().enumerate() {
            worksheet
                .write_string_with_format(i as u32 + 1, 0, text, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
