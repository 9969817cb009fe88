use crate::error::{BuybackError, Result};
use card_buyback_common::{Catalog, MatchOptions, ProcessOptions, DEFAULT_MIN_SCORE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// カタログファイルのパスを上書きする環境変数
pub const CATALOG_ENV: &str = "CARD_BUYBACK_CATALOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カタログファイル（JSON/CSV）。未設定なら組み込みカタログ
    pub catalog_path: Option<PathBuf>,
    /// 照合を受け入れる最低スコア
    pub min_match_score: i32,
    /// フラグメントを並列に照合する
    pub parallel: bool,
    /// ログレベル（RUST_LOG が優先）
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            min_match_score: DEFAULT_MIN_SCORE,
            parallel: true,
            log_level: "warn".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BuybackError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("card-buyback").join("config.json"))
    }

    /// 使用するカタログのパス（環境変数を優先）
    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        match std::env::var(CATALOG_ENV) {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => self.catalog_path.clone(),
        }
    }

    /// カタログを読み込む
    pub fn load_catalog(&self) -> Result<Catalog> {
        match self.resolved_catalog_path() {
            Some(path) => {
                if !path.exists() {
                    return Err(BuybackError::FileNotFound(path.display().to_string()));
                }
                Ok(Catalog::from_file(&path)?)
            }
            None => Ok(Catalog::builtin()),
        }
    }

    /// 照合処理のオプション（`min_score_override` はCLI指定）
    pub fn process_options(&self, min_score_override: Option<i32>) -> ProcessOptions {
        ProcessOptions {
            match_options: MatchOptions {
                min_score: min_score_override.unwrap_or(self.min_match_score),
            },
            parallel: self.parallel,
        }
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(BuybackError::FileNotFound(path.display().to_string()));
        }
        // 保存前に読み込めるか確認
        Catalog::from_file(&path)?;
        self.catalog_path = Some(path);
        self.save()
    }

    pub fn set_min_match_score(&mut self, score: i32) -> Result<()> {
        if score < 0 {
            return Err(BuybackError::Config(format!("最低スコアは0以上: {}", score)));
        }
        self.min_match_score = score;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.min_match_score, 2);
        assert!(config.parallel);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"min_match_score": 5}"#).unwrap();
        assert_eq!(config.min_match_score, 5);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_process_options_override() {
        let config = Config::default();
        assert_eq!(config.process_options(None).match_options.min_score, 2);
        assert_eq!(config.process_options(Some(4)).match_options.min_score, 4);
    }
}
