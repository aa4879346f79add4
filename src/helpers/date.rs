//! Date helper functions

use chrono::NaiveDateTime;

/// ISO calendar date, the format used in metadata exports and the sitemap
pub fn ymd(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long form used on rendered pages, like "January 15, 2024"
pub fn long_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// RFC 2822 form for RSS pubDate elements
pub fn rfc2822(date: &NaiveDateTime) -> String {
    date.and_utc().to_rfc2822()
}
