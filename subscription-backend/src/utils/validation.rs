// src/utils/validation.rs

//! 共通バリデーション定数と検証関数
//!
//! DTO の validator 属性とサービス層の追加チェックで共有する。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// 購読者の制約
pub mod subscriber {
    pub const NAME_MIN_LENGTH: u64 = 1;
    pub const NAME_MAX_LENGTH: u64 = 255;
}

/// 購読の制約
pub mod subscription {
    pub const SERVICE_MIN_LENGTH: u64 = 1;
    pub const SERVICE_MAX_LENGTH: u64 = 255;
    pub const TOPIC_MIN_LENGTH: u64 = 1;
    pub const TOPIC_MAX_LENGTH: u64 = 255;
}

/// タイムゾーン付きで受け付ける日時フォーマット
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 日時文字列を UTC に変換する
///
/// RFC 3339 を優先し、タイムゾーンなしの形式は UTC とみなす。
/// 日付のみの場合はその日の 00:00:00 UTC。
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// payload はキー/値の構造化データ（JSON オブジェクト）のみ許可
pub fn is_structured_payload(value: &Value) -> bool {
    value.is_object()
}

/// 文字列入力の前後の空白を取り除く
pub fn trim_field(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        let trimmed = v.trim();
        if trimmed.len() != v.len() {
            *v = trimmed.to_string();
        }
    }
}
