//! 公告HTMLからのタイトル抽出
//!
//! 公告リストの各要素からタイトルと既存ハッシュタグを取り出し、
//! ハッシュタグが1つも付いていないタイトルだけを診断対象にする。

use crate::config::Config;
use crate::error::{DiagnosisError, Result};
use encoding_rs::{Encoding, UTF_8};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static! {
    static ref META_CHARSET: Regex =
        Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
            .expect("valid regex");
}

/// `<meta charset>` を探す範囲（バイト数）
const CHARSET_SNIFF_LEN: usize = 4096;

const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// 抽出に使うCSSセレクタ
#[derive(Debug, Clone)]
pub struct Selectors {
    item: Selector,
    title: Selector,
    hashtag: Selector,
}

impl Selectors {
    pub fn parse(item: &str, title: &str, hashtag: &str) -> Result<Self> {
        Ok(Self {
            item: parse_selector(item)?,
            title: parse_selector(title)?,
            hashtag: parse_selector(hashtag)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::parse(
            &config.item_selector,
            &config.title_selector,
            &config.hashtag_selector,
        )
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| DiagnosisError::InvalidSelector(format!("{} ({:?})", selector, e)))
}

/// 公告1件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedItem {
    /// タイトル要素がない、または空なら None
    pub title: Option<String>,
    pub hashtags: Vec<String>,
}

impl ExtractedItem {
    /// タイトルがあり、ハッシュタグが付いていない
    pub fn is_candidate(&self) -> bool {
        self.title.is_some() && self.hashtags.is_empty()
    }
}

/// 抽出結果
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub items: Vec<ExtractedItem>,
}

/// 抽出の件数内訳
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub items: usize,
    pub tagged: usize,
    pub untitled: usize,
    pub candidates: usize,
}

impl Extraction {
    /// 診断対象のタイトル（文書順）
    pub fn candidate_titles(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_candidate())
            .filter_map(|item| item.title.clone())
            .collect()
    }

    pub fn stats(&self) -> ExtractionStats {
        let mut stats = ExtractionStats {
            items: self.items.len(),
            ..Default::default()
        };
        for item in &self.items {
            if item.title.is_none() {
                stats.untitled += 1;
            } else if !item.hashtags.is_empty() {
                stats.tagged += 1;
            } else {
                stats.candidates += 1;
            }
        }
        stats
    }

    fn extend(&mut self, other: Extraction) {
        self.items.extend(other.items);
    }
}

/// HTML文字列から公告を抽出する
///
/// セレクタに一致する要素がなければ空の結果を返す。
pub fn extract_items(html: &str, selectors: &Selectors) -> Extraction {
    let document = Html::parse_document(html);

    let items = document
        .select(&selectors.item)
        .map(|item| ExtractedItem {
            title: item
                .select(&selectors.title)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty()),
            hashtags: item.select(&selectors.hashtag).map(element_text).collect(),
        })
        .collect();

    Extraction { items }
}

fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.trim().to_string()
}

/// HTMLのバイト列を文字列にする
///
/// BOM、`<meta charset>` の順に文字コードを決め、どちらもなければ UTF-8。
pub fn decode_html(bytes: &[u8]) -> (String, &'static Encoding, bool) {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| declared_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    (text.into_owned(), used, had_errors)
}

fn declared_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(CHARSET_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head);
    let label = META_CHARSET.captures(&head)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// HTMLファイル、またはHTMLファイルを含むフォルダを列挙する
pub fn scan_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(DiagnosisError::FileNotFound(path.display().to_string()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_html(p))
        .collect();

    files.sort();
    Ok(files)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|e| HTML_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

/// ファイルまたはフォルダから抽出する
pub fn extract_from_path(path: &Path, selectors: &Selectors) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for file in scan_sources(path)? {
        let bytes = std::fs::read(&file)?;
        let (html, encoding, had_errors) = decode_html(&bytes);
        if had_errors {
            tracing::warn!(
                file = %file.display(),
                encoding = encoding.name(),
                "デコードできないバイトを置換しました"
            );
        }
        let found = extract_items(&html, selectors);
        tracing::debug!(file = %file.display(), items = found.items.len(), "HTMLを解析");
        extraction.extend(found);
    }

    let stats = extraction.stats();
    if stats.items == 0 {
        tracing::warn!(path = %path.display(), "公告要素が見つかりません");
    }
    tracing::info!(
        items = stats.items,
        tagged = stats.tagged,
        untitled = stats.untitled,
        candidates = stats.candidates,
        "タイトルを抽出しました"
    );

    Ok(extraction)
}
