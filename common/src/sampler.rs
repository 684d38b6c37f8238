//! 安定サンプリング
//!
//! マッチ一覧からギャラリーに出すサムネイルを選ぶ。
//! 同じキー（結果ID）と同じ一覧からは常に同じ部分集合・順序が得られる。
//! 時刻や外部乱数は使わない。

/// FNVオフセット基底
const HASH_OFFSET_BASIS: u32 = 2_166_136_261;

/// Lehmer (MINSTD) 乗数
const LCG_MULTIPLIER: u64 = 48_271;

/// 2^31 - 1
const LCG_MODULUS: u64 = 2_147_483_647;

/// 文字列の32bitハッシュ（FNV-1a系、シフト加算で乗算）
///
/// UTF-16コード単位ごとに処理し、最後に符号付き32bitの絶対値を取る。
pub fn stable_hash(key: &str) -> u32 {
    let mut h = HASH_OFFSET_BASIS;
    for unit in key.encode_utf16() {
        h ^= u32::from(unit);
        h = h
            .wrapping_add(h << 1)
            .wrapping_add(h << 4)
            .wrapping_add(h << 7)
            .wrapping_add(h << 8)
            .wrapping_add(h << 24);
    }
    (h as i32).unsigned_abs()
}

/// シード付き線形合同法
#[derive(Debug, Clone)]
pub struct Lehmer {
    state: u64,
}

impl Lehmer {
    pub fn new(seed: u32) -> Self {
        let state = u64::from(seed) % LCG_MODULUS;
        Self { state: if state == 0 { 1 } else { state } }
    }

    pub fn from_key(key: &str) -> Self {
        Self::new(stable_hash(key))
    }

    /// [0, 1) の一様乱数
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * LCG_MULTIPLIER % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// キーで固定されたシャッフル後、先頭 `count` 件を返す
///
/// # Arguments
/// * `items` - 候補一覧
/// * `count` - 取り出す最大件数
/// * `key` - 安定化キー（結果ID）
///
/// # Returns
/// 長さ `min(count, items.len())` の一覧
pub fn stable_sample<T: Clone>(items: &[T], count: usize, key: &str) -> Vec<T> {
    if items.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut shuffled = items.to_vec();
    let mut rng = Lehmer::from_key(key);
    for i in (1..shuffled.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j.min(i));
    }
    shuffled.truncate(count.min(items.len()));
    shuffled
}

/// サムネイル枚数の範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for SampleBounds {
    fn default() -> Self {
        Self { min: 3, max: 6 }
    }
}

impl SampleBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    /// 要求枚数（実際の件数はさらに一覧の長さで切られる）
    pub fn thumbnail_count(&self, available: usize) -> usize {
        self.min.max(self.max.min(available))
    }

    pub fn select<T: Clone>(&self, items: &[T], key: &str) -> Vec<T> {
        stable_sample(items, self.thumbnail_count(items.len()), key)
    }
}
