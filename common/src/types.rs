//! 検出結果の型定義
//!
//! - DetectionResult: APIから受け取る生レコード（形は一定でない）
//! - ImageSource / SegmentRef / MatchSource: 二重表現フィールドのタグ付き共用体
//! - NormalizedResult / NormalizedMatch: 正規化後の表示用レコード

use serde::{Deserialize, Serialize};

/// 未設定時のラベル・クラス表示
pub const UNKNOWN_LABEL: &str = "N/A";

/// APIから受け取る検出結果（フィールドの有無・型は保証されない）
///
/// 想定外の型のフィールドは欠損として扱い、デシリアライズ自体は失敗させない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionResult {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    /// MongoDBのドキュメントID（履歴APIはこちらを返す）
    #[serde(rename = "_id", deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    #[serde(deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub model_count: Option<i64>,

    #[serde(deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub user_correction: Option<i64>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub segmentation_image_path: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub segmentation_url: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub matched_segments_merged_path: Option<String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub matched_segments_merged_url: Option<String>,

    #[serde(deserialize_with = "lenient::segments", skip_serializing_if = "Option::is_none")]
    pub matched_segments: Option<Vec<RawMatch>>,

    #[serde(deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub matched_segment_urls: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub matched_segment_image_paths: Option<Vec<String>>,
}

/// matched_segments の1要素
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMatch {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<String>,
}

/// 画像の参照方法（絶対URLかストレージ相対パス）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Url(&'a str),
    Path(&'a str),
}

impl<'a> ImageSource<'a> {
    /// URLフィールドを優先し、なければパスフィールド
    pub fn pick(url: Option<&'a String>, path: Option<&'a String>) -> Option<Self> {
        non_blank(url)
            .map(ImageSource::Url)
            .or_else(|| non_blank(path).map(ImageSource::Path))
    }
}

/// マッチ画像の参照方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRef<'a> {
    Url(&'a str),
    Path(&'a str),
    /// uploads/ 配下のファイル名
    File(&'a str),
}

/// マッチ一覧の取得元（優先順）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchSource<'a> {
    Structured(&'a [RawMatch]),
    Urls(&'a [String]),
    Paths(&'a [String]),
}

impl RawMatch {
    pub fn segment_ref(&self) -> Option<SegmentRef<'_>> {
        non_blank(self.url.as_ref())
            .map(SegmentRef::Url)
            .or_else(|| non_blank(self.path.as_ref()).map(SegmentRef::Path))
            .or_else(|| non_blank(self.filename.as_ref()).map(SegmentRef::File))
    }
}

impl DetectionResult {
    /// result_id、なければ _id
    pub fn id(&self) -> Option<&str> {
        non_blank(self.result_id.as_ref()).or_else(|| non_blank(self.doc_id.as_ref()))
    }

    /// モデルの予測数（count、なければ model_count）
    pub fn predicted_count(&self) -> Option<i64> {
        self.count.or(self.model_count)
    }

    pub fn image_source(&self) -> Option<ImageSource<'_>> {
        ImageSource::pick(self.image_url.as_ref(), self.image_path.as_ref())
    }

    pub fn segmentation_source(&self) -> Option<ImageSource<'_>> {
        ImageSource::pick(self.segmentation_url.as_ref(), self.segmentation_image_path.as_ref())
    }

    pub fn merged_source(&self) -> Option<ImageSource<'_>> {
        ImageSource::pick(
            self.matched_segments_merged_url.as_ref(),
            self.matched_segments_merged_path.as_ref(),
        )
    }

    /// 空でないマッチ一覧の候補を優先順に返す
    pub fn match_sources(&self) -> Vec<MatchSource<'_>> {
        let mut sources = Vec::new();
        if let Some(segments) = self.matched_segments.as_deref().filter(|s| !s.is_empty()) {
            sources.push(MatchSource::Structured(segments));
        }
        if let Some(urls) = self.matched_segment_urls.as_deref().filter(|s| !s.is_empty()) {
            sources.push(MatchSource::Urls(urls));
        }
        if let Some(paths) = self.matched_segment_image_paths.as_deref().filter(|s| !s.is_empty()) {
            sources.push(MatchSource::Paths(paths));
        }
        sources
    }
}

/// 正規化済みのマッチ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedMatch {
    pub url: String,
    pub label: String,
    pub predicted_class: String,
}

impl NormalizedMatch {
    pub fn new(url: impl Into<String>, label: Option<&String>, predicted_class: Option<&String>) -> Self {
        Self {
            url: url.into(),
            label: non_blank(label).unwrap_or(UNKNOWN_LABEL).to_string(),
            predicted_class: non_blank(predicted_class).unwrap_or(UNKNOWN_LABEL).to_string(),
        }
    }

    /// ラベル・クラス不明のマッチ
    pub fn unlabeled(url: impl Into<String>) -> Self {
        Self::new(url, None, None)
    }
}

/// 正規化済みの検出結果（表示層はこれだけを扱う）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub result_id: Option<String>,
    pub item_type: Option<String>,
    pub model_count: Option<i64>,
    pub user_correction: Option<i64>,
    pub timestamp: Option<String>,
    pub image_url: Option<String>,
    pub segmentation_url: Option<String>,
    pub merged_match_url: Option<String>,
    pub matches: Vec<NormalizedMatch>,
}

impl NormalizedResult {
    /// セグメンテーション表示用URL（なければ元画像）
    pub fn segmentation_or_image(&self) -> Option<&str> {
        self.segmentation_url.as_deref().or(self.image_url.as_deref())
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// 型の揺れを許容するデシリアライザ
mod lenient {
    use super::RawMatch;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_string(Value::deserialize(deserializer)?))
    }

    pub fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(as_string)
                    .filter(|s| !s.trim().is_empty())
                    .collect(),
            ),
            _ => None,
        })
    }

    pub fn segments<'de, D>(deserializer: D) -> Result<Option<Vec<RawMatch>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|v| serde_json::from_value(v).ok())
                    .collect(),
            ),
            _ => None,
        })
    }

    fn as_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            // {"$oid": "..."} / {"$date": "..."} 形式（Mongo拡張JSON）
            Value::Object(map) => map
                .get("$oid")
                .or_else(|| map.get("$date"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}
