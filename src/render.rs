//! 端末向けの結果カード表示

use count_vision_common::correction::correction_label;
use count_vision_common::{
    display_mode, MatchDisplay, Notice, NoticeLevel, NormalizedResult, Paginator, SampleBounds,
};
/// 結果カード1枚
pub fn render_card(result: &NormalizedResult, bounds: SampleBounds) -> String {
    let dash = "-";
    let mut lines = vec![
        "── Detection Result ──".to_string(),
        format!("  Result ID:       {}", result.result_id.as_deref().unwrap_or(dash)),
        format!("  Item Type:       {}", result.item_type.as_deref().unwrap_or(dash)),
        format!(
            "  Model Count:     {}",
            result.model_count.map(|c| c.to_string()).unwrap_or_else(|| dash.into())
        ),
        format!("  User Correction: {}", correction_label(result.user_correction)),
    ];
    if let Some(ts) = &result.timestamp {
        lines.push(format!("  Timestamp:       {}", ts));
    }
    if let Some(image) = &result.image_url {
        lines.push(format!("  Image:           {}", image));
    }
    if let Some(seg) = result.segmentation_or_image() {
        lines.push(format!("  Segmentation:    {}", seg));
    }

    match display_mode(result) {
        MatchDisplay::Merged(url) => lines.push(format!("  Matched (merged): {}", url)),
        MatchDisplay::Gallery(matches) => {
            let key = result.result_id.as_deref().unwrap_or("");
            let selected = bounds.select(matches, key);
            lines.push(format!("  Matches ({} of {}):", selected.len(), matches.len()));
            lines.extend(selected.iter().enumerate().map(|(i, m)| {
                format!(
                    "    [{}] Predicted_Class: {} | Label: {}  {}",
                    i + 1,
                    m.predicted_class,
                    m.label,
                    m.url
                )
            }));
        }
        MatchDisplay::Nothing => {}
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// 現在ページのカードとページ表示
pub fn render_page(results: &[NormalizedResult], pager: &Paginator, bounds: SampleBounds) -> String {
    if results.is_empty() {
        return "結果はありません\n".to_string();
    }

    let mut out: String = pager
        .current_slice(results)
        .iter()
        .map(|result| render_card(result, bounds))
        .collect();
    if pager.shows_controls() {
        let prev = if pager.has_previous() { "< Previous" } else { "          " };
        let next = if pager.has_next() { "Next >" } else { "" };
        out.push_str(&format!("{}  {}  {}\n", prev, pager.label(), next));
    }
    out
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("✔ {}", notice.message),
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Warning => eprintln!("⚠ {}", notice.message),
        NoticeLevel::Error => eprintln!("✖ {}", notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use count_vision_common::NormalizedMatch;

    fn sample_result() -> NormalizedResult {
        NormalizedResult {
            result_id: Some("r1".into()),
            item_type: Some("car".into()),
            model_count: Some(7),
            image_url: Some("http://localhost:5000/uploads/a.jpg".into()),
            matches: (0..10)
                .map(|i| NormalizedMatch::unlabeled(format!("m{}.png", i)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_card_shows_counts() {
        let card = render_card(&sample_result(), SampleBounds::default());
        assert!(card.contains("Item Type:       car"));
        assert!(card.contains("Model Count:     7"));
        assert!(card.contains("User Correction: None"));
        // セグメンテーションは元画像にフォールバック
        assert!(card.contains("Segmentation:    http://localhost:5000/uploads/a.jpg"));
    }

    #[test]
    fn test_card_gallery_is_sampled_and_stable() {
        let result = sample_result();
        let a = render_card(&result, SampleBounds::default());
        let b = render_card(&result, SampleBounds::default());
        assert_eq!(a, b);
        assert!(a.contains("Matches (6 of 10)"));
        assert_eq!(a.matches("Predicted_Class").count(), 6);
    }

    #[test]
    fn test_card_prefers_merged() {
        let result = NormalizedResult {
            merged_match_url: Some("merged.png".into()),
            ..sample_result()
        };
        let card = render_card(&result, SampleBounds::default());
        assert!(card.contains("Matched (merged): merged.png"));
        assert!(!card.contains("Predicted_Class"));
    }

    #[test]
    fn test_empty_card_renders() {
        let card = render_card(&NormalizedResult::default(), SampleBounds::default());
        assert!(card.contains("Model Count:     -"));
        assert!(!card.contains("Image:"));
    }

    #[test]
    fn test_page_label() {
        let results = vec![sample_result(), sample_result()];
        let mut pager = Paginator::new(results.len());
        pager.next();
        let page = render_page(&results, &pager, SampleBounds::default());
        assert!(page.contains("Page 2 of 2"));
        assert!(page.contains("< Previous"));
        assert!(!page.contains("Next >"));
    }

    #[test]
    fn test_card_line_layout() {
        let result = NormalizedResult {
            timestamp: Some("2024-01-01".into()),
            ..sample_result()
        };
        let card = render_card(&result, SampleBounds::default());
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "── Detection Result ──");
        assert_eq!(lines[1], "  Result ID:       r1");
        assert_eq!(lines[5], "  Timestamp:       2024-01-01");
        assert_eq!(lines[8], "  Matches (6 of 10):");
        assert_eq!(lines.len(), 15);
        assert!(card.ends_with('\n'));
        assert!(!card.ends_with("\n\n"));
    }

    #[test]
    fn test_page_footer_follows_cards() {
        let results = vec![sample_result(); 4];
        let pager = Paginator::with_per_page(results.len(), 3);
        let page = render_page(&results, &pager, SampleBounds::default());
        assert_eq!(page.matches("── Detection Result ──").count(), 3);
        let last = page.lines().last().expect("フッター取得失敗");
        assert!(last.contains("Page 1 of 2"));
        assert!(last.ends_with("Next >"));
    }

    #[test]
    fn test_empty_page() {
        let page = render_page(&[], &Paginator::new(0), SampleBounds::default());
        assert_eq!(page, "結果はありません\n");
    }
}
