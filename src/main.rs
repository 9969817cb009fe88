use clap::Parser;
use card_buyback::{cli, config, error, export, logging, report, scanner};
use card_buyback_common::{FragmentProcessor, ProcessingResult};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use error::Result;
use report::{BuybackReport, InputKind};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init_logging(&config.log_level, cli.verbose);

    match cli.command {
        Commands::Lines { input, output, format, title } => {
            println!("🃏 card-buyback - テキスト査定\n");

            if !input.exists() {
                return Err(error::BuybackError::FileNotFound(input.display().to_string()));
            }

            // 1. カタログ読み込み
            println!("[1/3] カタログを読み込み中...");
            let processor = build_processor(&config, cli.min_score)?;
            println!(
                "✔ {}件のカタログ（最低スコア {}）\n",
                processor.catalog().len(),
                processor.options().match_options.min_score
            );

            // 2. 照合
            println!("[2/3] 照合中...");
            let text = tokio::fs::read_to_string(&input).await?;
            let fragments = card_buyback_common::fragments_from_text(&text);
            let result = processor.process(&fragments)?;
            println!("✔ 照合完了\n");

            // 3. 出力
            let report = BuybackReport::new(InputKind::Lines, fragments.len(), result);
            print_report(&report);
            write_output(&report, output.as_deref(), &format, &title)?;
        }

        Commands::Ocr { folder, provider, output, format, title } => {
            println!("📷 card-buyback - OCR査定\n");

            // 1. OCRレスポンス読み込み
            println!("[1/3] OCRレスポンスを読み込み中... ({})", provider);
            let files = scanner::scan_folder(&folder, provider)?;
            if files.is_empty() {
                return Err(error::BuybackError::NoInputFound(folder.display().to_string()));
            }
            let fragments = scanner::load_fragments(&files, provider).await?;
            println!("✔ {}ファイル / {}画像\n", files.len(), fragments.len());

            // 2. 照合
            let processor = build_processor(&config, cli.min_score)?;
            println!(
                "[2/3] 照合中... (最低スコア {})",
                processor.options().match_options.min_score
            );
            let result: ProcessingResult = processor.process(&fragments)?;
            println!("✔ 照合完了\n");

            // 3. 出力
            let report = BuybackReport::new(InputKind::Images, fragments.len(), result);
            print_report(&report);
            write_output(&report, output.as_deref(), &format, &title)?;
        }

        Commands::Catalog { file } => {
            let catalog = match file {
                Some(path) => card_buyback_common::Catalog::from_file(&path)?,
                None => config.load_catalog()?,
            };

            println!("カタログ: {}件", catalog.len());
            for entry in catalog.entries() {
                println!(
                    "  {:<12} {:<20} {:<18} {:<8} {:>10.2}",
                    entry.id, entry.name, entry.set, entry.number, entry.market_price
                );
            }
        }

        Commands::Config { set_catalog, set_min_score, show } => {
            let mut config = config;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログを設定しました");
            }

            if let Some(score) = set_min_score {
                config.set_min_match_score(score)?;
                println!("✔ 最低スコアを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  カタログ: {}",
                    config
                        .resolved_catalog_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  最低スコア: {}", config.min_match_score);
                println!("  並列処理: {}", if config.parallel { "有効" } else { "無効" });
                println!("  ログレベル: {}", config.log_level);
            }
        }
    }

    Ok(())
}

fn build_processor(config: &Config, min_score: Option<i32>) -> Result<FragmentProcessor> {
    let catalog = config.load_catalog()?;
    Ok(FragmentProcessor::with_options(
        Arc::new(catalog),
        config.process_options(min_score),
    ))
}

fn print_report(report: &BuybackReport) {
    println!("[3/3] 査定結果");
    for line in report.summary_lines() {
        println!("{}", line);
    }
    println!(
        "\n照合 {}件 / 未照合 {}件  買取合計 {:.2}",
        report.matched, report.unmatched_lines, report.total_offer
    );
}

fn write_output(
    report: &BuybackReport,
    output: Option<&Path>,
    format: &ExportFormat,
    title: &str,
) -> Result<()> {
    if let Some(output) = output {
        export::export_report(report, format, output, title)?;
    }
    println!("\n✅ 完了");
    Ok(())
}
