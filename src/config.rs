use crate::error::{DiagnosisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `--use-default` で使う辞書ファイル
    pub default_dictionary: PathBuf,
    /// 公告1件を囲む要素
    pub item_selector: String,
    /// 公告タイトル
    pub title_selector: String,
    /// 既存ハッシュタグ（公告要素からの相対）
    pub hashtag_selector: String,
    /// 出力形式の既定値 (csv/excel/both/json)
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_dictionary: PathBuf::from("tag_default.xlsx"),
            item_selector: "li.guide_list_item".into(),
            title_selector: "h3.guide_list_title".into(),
            hashtag_selector: "ul.hashtag_area > li.hashtag_list".into(),
            default_format: "csv".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DiagnosisError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("hashtag-diagnosis").join("config.json"))
    }

    pub fn set_default_dictionary(&mut self, path: PathBuf) -> Result<()> {
        self.default_dictionary = path;
        self.save()
    }
}

/// 診断に使う辞書の出どころ
///
/// 実行前に1回だけ決定し、実行中に差し替えない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// ユーザーが指定したファイル
    Uploaded(PathBuf),
    /// 設定の既定辞書
    Default(PathBuf),
}

impl DictionarySource {
    /// 明示指定を優先し、なければ `use_default` のときだけ既定辞書を使う
    pub fn resolve(explicit: Option<PathBuf>, use_default: bool, config: &Config) -> Option<Self> {
        match explicit {
            Some(path) => Some(Self::Uploaded(path)),
            None if use_default => Some(Self::Default(config.default_dictionary.clone())),
            None => None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Uploaded(path) | Self::Default(path) => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/hashtag-diagnosis.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.item_selector, "li.guide_list_item");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_dictionary": "dict/2025.xlsx"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_dictionary, PathBuf::from("dict/2025.xlsx"));
        assert_eq!(config.title_selector, "h3.guide_list_title");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            default_format: "both".into(),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_resolve_dictionary_source() {
        let config = Config::default();

        let explicit = DictionarySource::resolve(Some("my.xlsx".into()), true, &config);
        assert_eq!(explicit, Some(DictionarySource::Uploaded("my.xlsx".into())));

        let fallback = DictionarySource::resolve(None, true, &config).unwrap();
        assert_eq!(fallback.path(), Path::new("tag_default.xlsx"));
        assert!(matches!(fallback, DictionarySource::Default(_)));

        assert_eq!(DictionarySource::resolve(None, false, &config), None);
    }
}
