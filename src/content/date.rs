use chrono::{DateTime, NaiveDateTime};

/// 展示用的日期格式，例如 `January 2, 2025`
const DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// 将上游时间的空格分隔符替换为 `T`
///
/// `2025-01-02 10:00:00` -> `2025-01-02T10:00:00`，不含空格时原样返回。
pub fn normalize_timestamp(raw: &str) -> String {
    raw.trim().replacen(' ', "T", 1)
}

/// 解析文章时间
///
/// 支持上游格式、替换分隔符后的格式以及 RFC 3339（加载失败时的文章时间）。
pub fn parse_post_date(raw: &str) -> Option<NaiveDateTime> {
    let normalized = normalize_timestamp(raw);

    for fmt in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// 格式化文章时间用于展示
///
/// 空字符串返回空字符串，无法解析时原样返回。
pub fn format_post_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    match parse_post_date(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::debug!(raw, "unparsable post date");
            raw.to_string()
        }
    }
}
