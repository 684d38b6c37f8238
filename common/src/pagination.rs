//! ページ送り状態
//!
//! 結果一覧を1ページずつ表示する。前後移動は端でクランプされる。

use std::ops::Range;

/// 1ページあたりの表示件数（詳細カード1枚）
pub const DEFAULT_PER_PAGE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
    total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Paginator {
    pub fn new(total: usize) -> Self {
        Self::with_per_page(total, DEFAULT_PER_PAGE)
    }

    pub fn with_per_page(total: usize, per_page: usize) -> Self {
        Self { page: 1, per_page: per_page.max(1), total }
    }

    /// 現在のページ（1始まり）
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 次のページへ（最終ページでは何もしない）
    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    /// 前のページへ（1ページ目では何もしない）
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
    }

    /// 指定ページへ移動（範囲外はクランプ）
    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    /// 一覧の入れ替え時に件数を更新し、ページをクランプ
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.go_to(self.page);
    }

    /// 現在ページの要素範囲
    pub fn page_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.per_page).min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    pub fn current_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.page_range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// ページ送りボタンを出すか
    pub fn shows_controls(&self) -> bool {
        self.page_count() > 1
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count())
    }
}
