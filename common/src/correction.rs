//! 件数修正の入力状態
//!
//! 結果ごとの入力中の値（ドラフト）と、送信成功後に記録した修正値を保持する。
//! 空のドラフトはネットワーク呼び出し前に弾く。

use crate::api::CorrectionRequest;
use crate::error::{Error, Result};
use crate::types::NormalizedResult;
use std::collections::HashMap;

pub const MSG_EMPTY_CORRECTION: &str = "Please enter a correct count";
pub const MSG_INVALID_CORRECTION: &str = "Correct count must be a non-negative whole number";
pub const MSG_MISSING_RESULT_ID: &str = "This result has no id and cannot be corrected";

/// 送信前の修正値を検証してリクエストを作る
///
/// # Arguments
/// * `result_id` - 対象の結果ID
/// * `draft` - 入力された文字列
///
/// # Returns
/// * `Ok(CorrectionRequest)` - 送信可能
/// * `Err(Error::Validation)` - 空・数値でない・IDなし
pub fn prepare(result_id: Option<&str>, draft: &str) -> Result<CorrectionRequest> {
    let draft = draft.trim();
    if draft.is_empty() {
        return Err(Error::Validation(MSG_EMPTY_CORRECTION.into()));
    }
    let correct_count: i64 = draft
        .parse()
        .ok()
        .filter(|n: &i64| *n >= 0)
        .ok_or_else(|| Error::Validation(MSG_INVALID_CORRECTION.into()))?;
    let result_id = result_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::Validation(MSG_MISSING_RESULT_ID.into()))?;

    Ok(CorrectionRequest {
        result_id: result_id.to_string(),
        correct_count,
    })
}

/// 結果ID → 入力中の文字列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionDrafts {
    drafts: HashMap<String, String>,
}

impl CorrectionDrafts {
    pub fn set(&mut self, result_id: &str, value: impl Into<String>) {
        self.drafts.insert(result_id.to_string(), value.into());
    }

    pub fn get(&self, result_id: &str) -> &str {
        self.drafts.get(result_id).map(String::as_str).unwrap_or("")
    }

    /// ドラフトを検証してリクエストを作る（ドラフトは残す）
    pub fn prepare(&self, result_id: Option<&str>) -> Result<CorrectionRequest> {
        prepare(result_id, result_id.map(|id| self.get(id)).unwrap_or(""))
    }

    /// 送信後にドラフトを破棄
    pub fn discard(&mut self, result_id: &str) -> Option<String> {
        self.drafts.remove(result_id)
    }
}

/// 送信に成功した修正値（表示用）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCorrections {
    values: HashMap<String, i64>,
}

impl UserCorrections {
    pub fn record(&mut self, request: &CorrectionRequest) {
        self.values.insert(request.result_id.clone(), request.correct_count);
    }

    pub fn get(&self, result_id: &str) -> Option<i64> {
        self.values.get(result_id).copied()
    }

    /// ローカル記録を優先し、なければサーバーの値
    pub fn effective(&self, result: &NormalizedResult) -> Option<i64> {
        result
            .result_id
            .as_deref()
            .and_then(|id| self.get(id))
            .or(result.user_correction)
    }
}

/// 修正値の表示文字列
pub fn correction_label(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "None".to_string())
}
