use crate::error::{CountVisionError, Result};
use count_vision_common::api::DEFAULT_API_BASE;
use count_vision_common::normalizer::DEFAULT_STATIC_BASE;
use count_vision_common::{SampleBounds, StaticBase};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIのベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "COUNT_VISION_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// 相対パスの画像を配信するベースURL
    pub static_base_url: String,
    pub thumbnail_min: usize,
    pub thumbnail_max: usize,
    /// 未設定ならHTTPクライアントのデフォルト
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.into(),
            static_base_url: DEFAULT_STATIC_BASE.into(),
            thumbnail_min: 3,
            thumbnail_max: 6,
            timeout_seconds: None,
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

    /// 設定ディレクトリ（~/.config/count-vision）
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CountVisionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("count-vision"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 環境変数を優先
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api_base_url.clone())
    }

    pub fn static_base(&self) -> StaticBase {
        StaticBase::new(self.static_base_url.as_str())
    }

    pub fn sample_bounds(&self) -> SampleBounds {
        SampleBounds::new(self.thumbnail_min, self.thumbnail_max)
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        self.api_base_url = validated_url(url)?;
        Ok(())
    }

    pub fn set_static_base_url(&mut self, url: String) -> Result<()> {
        self.static_base_url = validated_url(url)?;
        Ok(())
    }
}

fn validated_url(url: String) -> Result<String> {
    let url = url.trim().trim_end_matches('/').to_string();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(CountVisionError::Config(format!("URLは http:// または https:// で始めてください: {}", url)))
    }
}
