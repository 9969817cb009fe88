//! カタログモジュール
//!
//! 照合対象のカード一覧を管理する。起動時に一度だけ読み込み、以降は読み取り専用。
//! 照合結果の同点判定はカタログの並び順に依存するため、順序を保つVecで持つ。

use crate::error::{Error, Result};
use crate::types::{CatalogEntry, Condition};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// 不変のカタログ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// 組み込みカタログ
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogEntry::new("base1-4", "Charizard", "Base Set", "4/102", 450.00),
            CatalogEntry::new("base1-2", "Blastoise", "Base Set", "2/102", 180.00),
            CatalogEntry::new("base1-15", "Venusaur", "Base Set", "15/102", 150.00),
            CatalogEntry::new("base1-58", "Pikachu", "Base Set", "58/102", 12.50),
            CatalogEntry::new("neo1-9", "Lugia", "Neo Genesis", "9/111", 320.00),
            CatalogEntry::new("swsh35-74", "Charizard VMAX", "Champion's Path", "74/73", 280.00),
            CatalogEntry::new("swsh7-215", "Umbreon VMAX", "Evolving Skies", "215/203", 520.00),
            CatalogEntry::new("base2-60", "Pikachu", "Jungle", "60/64", 8.00),
        ])
    }

    /// ファイルから読み込み（拡張子 .csv はCSV、それ以外はJSON）
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_csv = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// JSON配列から読み込み
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        let catalog = Self::new(entries);
        catalog.validate()?;
        Ok(catalog)
    }

    /// CSV文字列から読み込み
    ///
    /// ヘッダー: `id,name,set,number,market_price[,conditions]`
    /// conditions は `NM|LP` のように `|` 区切り。省略時は全状態に対応。
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut entries = Vec::new();

        // ヘッダーをスキップ
        for (line_no, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }

            let fields = parse_csv_line(line);
            if fields.len() < 5 {
                return Err(Error::InvalidCatalog(format!(
                    "{}行目: 列が不足しています ({}列)",
                    line_no + 1,
                    fields.len()
                )));
            }

            let market_price: f64 = fields[4].parse().map_err(|_| {
                Error::InvalidCatalog(format!("{}行目: 価格が不正です: {}", line_no + 1, fields[4]))
            })?;

            let mut entry = CatalogEntry::new(
                fields[0].as_ref(),
                fields[1].as_ref(),
                fields[2].as_ref(),
                fields[3].as_ref(),
                market_price,
            );

            if let Some(conditions) = fields.get(5).filter(|c| !c.is_empty()) {
                entry.supported_conditions = parse_conditions(conditions)
                    .map_err(|e| Error::InvalidCatalog(format!("{}行目: {}", line_no + 1, e)))?;
            }

            entries.push(entry);
        }

        let catalog = Self::new(entries);
        catalog.validate()?;
        Ok(catalog)
    }

    /// ID重複・空の名前・負の価格をチェック
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();

        for entry in &self.entries {
            if entry.id.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!("IDが空のエントリ: {}", entry.name)));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(Error::InvalidCatalog(format!("IDが重複しています: {}", entry.id)));
            }
            if entry.name.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!("名前が空です: {}", entry.id)));
            }
            if !entry.market_price.is_finite() || entry.market_price < 0.0 {
                return Err(Error::InvalidCatalog(format!(
                    "価格が不正です: {} ({})",
                    entry.id, entry.market_price
                )));
            }
        }

        Ok(())
    }

    /// 全エントリ（カタログ順）
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 差し替え可能なカタログ参照
///
/// 更新はカタログ全体の `Arc` を入れ替える。処理中のバッチは取得済みのスナップショットを
/// 使い続けるので、途中で内容が変わることはない。
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// 現在のカタログを取得
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// カタログ全体を差し替え
    pub fn replace(&self, catalog: Catalog) {
        let next = Arc::new(catalog);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

fn parse_conditions(value: &str) -> std::result::Result<BTreeSet<Condition>, String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.parse::<Condition>())
        .collect()
}

/// CSV行をパース（ダブルクォート対応、`""` はクォート1つ）
fn parse_csv_line(line: &str) -> Vec<Cow<'_, str>> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(trim_quotes(&line[field_start..i]));
            field_start = i + 1;
        }
    }

    // 最後のフィールド
    fields.push(trim_quotes(&line[field_start..]));

    fields
}

fn trim_quotes(s: &str) -> Cow<'_, str> {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        let inner = &s[1..s.len() - 1];
        if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(s)
    }
}
