//! 検出結果の正規化
//!
//! 形の揃わない DetectionResult から、表示に必要な正規フィールド
//! （画像URL、セグメンテーションURL、統合マッチURL、マッチ一覧）を導出する。
//! 欠損・不正なレコードはエラーにせず None / 空 で返す。

use crate::types::{
    DetectionResult, ImageSource, MatchSource, NormalizedMatch, NormalizedResult, SegmentRef,
};

/// 静的ファイルのデフォルト配信元
pub const DEFAULT_STATIC_BASE: &str = "http://localhost:5000";

/// ファイル名のみのマッチ画像が置かれるサブパス
pub const UPLOADS_DIR: &str = "uploads";

/// 相対パスを解決するベースアドレス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBase(String);

impl StaticBase {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<base>/<path>` を作る（絶対URLはそのまま）
    pub fn join(&self, path: &str) -> String {
        let path = path.trim();
        if is_absolute_url(path) {
            return path.to_string();
        }
        // Windows側で保存されたパスは区切りが '\' になる
        let path = path.replace('\\', "/");
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    pub fn resolve(&self, source: ImageSource<'_>) -> String {
        match source {
            ImageSource::Url(url) => url.to_string(),
            ImageSource::Path(path) => self.join(path),
        }
    }

    pub fn resolve_segment(&self, segment: SegmentRef<'_>) -> String {
        match segment {
            SegmentRef::Url(url) => url.to_string(),
            SegmentRef::Path(path) => self.join(path),
            SegmentRef::File(name) => self.join(&format!("{}/{}", UPLOADS_DIR, name)),
        }
    }
}

impl Default for StaticBase {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_BASE)
    }
}

fn is_absolute_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:")
        || lower.starts_with("blob:")
}

/// マッチの表示方法
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchDisplay<'a> {
    /// 統合画像1枚（一覧より優先）
    Merged(&'a str),
    /// サムネイル一覧
    Gallery(&'a [NormalizedMatch]),
    Nothing,
}

/// 検出結果を正規化
///
/// # Arguments
/// * `result` - APIから受け取った生レコード
/// * `base` - 相対パスを解決するベースアドレス
///
/// # Returns
/// 正規化済みレコード。解決できないフィールドは None / 空
///
/// # Examples
/// ```
/// use count_vision_common::{normalize, DetectionResult, StaticBase};
///
/// let raw: DetectionResult = serde_json::from_str(
///     r#"{"model_count": 7, "matched_segment_urls": ["a.jpg", "b.jpg"]}"#,
/// ).unwrap();
/// let result = normalize(&raw, &StaticBase::default());
/// assert_eq!(result.matches.len(), 2);
/// assert_eq!(result.matches[0].label, "N/A");
/// assert!(result.merged_match_url.is_none());
/// ```
pub fn normalize(result: &DetectionResult, base: &StaticBase) -> NormalizedResult {
    NormalizedResult {
        result_id: result.id().map(str::to_string),
        item_type: result
            .item_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        model_count: result.predicted_count(),
        user_correction: result.user_correction,
        timestamp: result.timestamp.clone(),
        image_url: result.image_source().map(|s| base.resolve(s)),
        segmentation_url: result.segmentation_source().map(|s| base.resolve(s)),
        merged_match_url: result.merged_source().map(|s| base.resolve(s)),
        matches: normalize_matches(result, base),
    }
}

/// 複数レコードをまとめて正規化
pub fn normalize_all(results: &[DetectionResult], base: &StaticBase) -> Vec<NormalizedResult> {
    results.iter().map(|r| normalize(r, base)).collect()
}

/// マッチ一覧を正規化
///
/// 優先順: 構造化マッチ → URL一覧 → パス一覧。
/// 解決後に空でない最初の取得元を採用する。
pub fn normalize_matches(result: &DetectionResult, base: &StaticBase) -> Vec<NormalizedMatch> {
    result
        .match_sources()
        .into_iter()
        .map(|source| resolve_matches(source, base))
        .find(|matches| !matches.is_empty())
        .unwrap_or_default()
}

fn resolve_matches(source: MatchSource<'_>, base: &StaticBase) -> Vec<NormalizedMatch> {
    match source {
        MatchSource::Structured(segments) => segments
            .iter()
            .filter_map(|m| {
                let url = base.resolve_segment(m.segment_ref()?);
                Some(NormalizedMatch::new(url, m.label.as_ref(), m.predicted_class.as_ref()))
            })
            .collect(),
        MatchSource::Urls(urls) => urls
            .iter()
            .map(|u| NormalizedMatch::unlabeled(u.trim()))
            .collect(),
        MatchSource::Paths(paths) => paths
            .iter()
            .map(|p| NormalizedMatch::unlabeled(base.join(p)))
            .collect(),
    }
}

/// 表示モードを決定（統合画像があればそれを優先）
pub fn display_mode(result: &NormalizedResult) -> MatchDisplay<'_> {
    if let Some(merged) = result.merged_match_url.as_deref() {
        MatchDisplay::Merged(merged)
    } else if !result.matches.is_empty() {
        MatchDisplay::Gallery(&result.matches)
    } else {
        MatchDisplay::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawMatch;

    fn base() -> StaticBase {
        StaticBase::new("http://localhost:5000/")
    }

    fn parse(json: &str) -> DetectionResult {
        serde_json::from_str(json).expect("デシリアライズ失敗")
    }

    #[test]
    fn test_join_collapses_slashes() {
        let base = base();
        assert_eq!(base.as_str(), "http://localhost:5000");
        assert_eq!(base.join("uploads/a.jpg"), "http://localhost:5000/uploads/a.jpg");
        assert_eq!(base.join("/uploads/a.jpg"), "http://localhost:5000/uploads/a.jpg");
        assert_eq!(base.join("uploads\\a.jpg"), "http://localhost:5000/uploads/a.jpg");
        assert_eq!(base.join("https://cdn/a.jpg"), "https://cdn/a.jpg");
    }

    #[test]
    fn test_empty_record_yields_nothing() {
        let result = normalize(&DetectionResult::default(), &base());
        assert!(result.image_url.is_none());
        assert!(result.segmentation_url.is_none());
        assert!(result.merged_match_url.is_none());
        assert!(result.matches.is_empty());
        assert_eq!(display_mode(&result), MatchDisplay::Nothing);
    }

    #[test]
    fn test_malformed_record_degrades() {
        let raw = parse(r#"{"image_url": false, "matched_segments": "oops", "count": "many"}"#);
        let result = normalize(&raw, &base());
        assert!(result.image_url.is_none());
        assert!(result.matches.is_empty());
        assert!(result.model_count.is_none());
    }

    #[test]
    fn test_image_url_prefers_absolute() {
        let raw = parse(r#"{"image_url": "https://cdn/a.jpg", "image_path": "uploads/a.jpg"}"#);
        assert_eq!(normalize(&raw, &base()).image_url.as_deref(), Some("https://cdn/a.jpg"));

        let raw = parse(r#"{"image_path": "uploads/a.jpg"}"#);
        assert_eq!(
            normalize(&raw, &base()).image_url.as_deref(),
            Some("http://localhost:5000/uploads/a.jpg")
        );
    }

    #[test]
    fn test_segmentation_falls_back_to_image() {
        let raw = parse(r#"{"image_path": "uploads/a.jpg"}"#);
        let result = normalize(&raw, &base());
        assert!(result.segmentation_url.is_none());
        assert_eq!(result.segmentation_or_image(), Some("http://localhost:5000/uploads/a.jpg"));

        let raw = parse(r#"{"image_path": "uploads/a.jpg", "segmentation_image_path": "uploads/seg.png"}"#);
        let result = normalize(&raw, &base());
        assert_eq!(result.segmentation_or_image(), Some("http://localhost:5000/uploads/seg.png"));
    }

    #[test]
    fn test_merged_takes_priority() {
        let raw = parse(r#"{
            "matched_segments_merged_path": "uploads/merged.png",
            "matched_segments": [{"url": "m1.png"}]
        }"#);
        let result = normalize(&raw, &base());
        assert_eq!(
            display_mode(&result),
            MatchDisplay::Merged("http://localhost:5000/uploads/merged.png")
        );

        let raw = parse(r#"{"matched_segments_merged_url": "https://cdn/merged.png"}"#);
        let result = normalize(&raw, &base());
        assert_eq!(display_mode(&result), MatchDisplay::Merged("https://cdn/merged.png"));
    }

    #[test]
    fn test_structured_matches_resolution() {
        let raw = parse(r#"{
            "matched_segments": [
                {"url": "https://cdn/m1.png", "label": "car", "predicted_class": "vehicle"},
                {"path": "uploads/m2.png", "label": ""},
                {"filename": "m3.png", "predicted_class": "cat"},
                {"label": "orphan"}
            ],
            "matched_segment_urls": ["ignored.jpg"]
        }"#);
        let matches = normalize(&raw, &base()).matches;

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0], NormalizedMatch {
            url: "https://cdn/m1.png".into(),
            label: "car".into(),
            predicted_class: "vehicle".into(),
        });
        assert_eq!(matches[1].url, "http://localhost:5000/uploads/m2.png");
        assert_eq!(matches[1].label, "N/A");
        assert_eq!(matches[2].url, "http://localhost:5000/uploads/m3.png");
        assert_eq!(matches[2].predicted_class, "cat");
    }

    #[test]
    fn test_flat_url_list() {
        let raw = parse(r#"{"model_count": 7, "matched_segment_urls": ["a.jpg", "b.jpg"]}"#);
        let result = normalize(&raw, &base());

        assert_eq!(result.model_count, Some(7));
        assert!(result.merged_match_url.is_none());
        assert_eq!(result.matches, vec![
            NormalizedMatch::unlabeled("a.jpg"),
            NormalizedMatch::unlabeled("b.jpg"),
        ]);
    }

    #[test]
    fn test_urls_before_paths() {
        let raw = parse(r#"{
            "matched_segment_urls": ["https://cdn/u.png"],
            "matched_segment_image_paths": ["uploads/p.png"]
        }"#);
        let matches = normalize(&raw, &base()).matches;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].url, "https://cdn/u.png");
    }

    #[test]
    fn test_flat_path_list() {
        let raw = parse(r#"{"matched_segment_image_paths": ["uploads/p1.png", "uploads/p2.png"]}"#);
        let matches = normalize(&raw, &base()).matches;
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].url, "http://localhost:5000/uploads/p2.png");
        assert_eq!(matches[1].label, "N/A");
    }

    #[test]
    fn test_unresolvable_structured_falls_through() {
        let result = DetectionResult {
            matched_segments: Some(vec![RawMatch { label: Some("x".into()), ..Default::default() }]),
            matched_segment_image_paths: Some(vec!["uploads/p.png".into()]),
            ..Default::default()
        };
        let matches = normalize_matches(&result, &base());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].url, "http://localhost:5000/uploads/p.png");
    }

    #[test]
    fn test_gallery_mode() {
        let raw = parse(r#"{"matched_segment_urls": ["a.jpg"]}"#);
        let result = normalize(&raw, &base());
        match display_mode(&result) {
            MatchDisplay::Gallery(items) => assert_eq!(items.len(), 1),
            other => panic!("unexpected display mode: {:?}", other),
        }
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let raws = vec![
            parse(r#"{"result_id": "a"}"#),
            parse(r#"{"_id": "b"}"#),
        ];
        let results = normalize_all(&raws, &base());
        let ids: Vec<_> = results.iter().map(|r| r.result_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
    }
}
