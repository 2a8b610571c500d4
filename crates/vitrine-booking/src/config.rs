#![forbid(unsafe_code)]

//! Booking handler configuration.

use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};

/// Default notification recipients.
pub const DEFAULT_RECIPIENTS: &str = "your-email@example.com";
/// Default notification subject.
pub const DEFAULT_SUBJECT: &str = "【漢皇蒔序】新的預約賞屋通知";
/// Default sheet receiving submissions.
pub const DEFAULT_SHEET_NAME: &str = "預約記錄";
/// Offset of Asia/Taipei, which observes no daylight saving.
pub const TAIPEI: UtcOffset = offset!(+8);

/// Header row written when the sheet is created.
pub const HEADER: [&str; 6] = [
    "提交時間",
    "姓名",
    "聯絡電話",
    "縣市",
    "鄉鎮市區",
    "同意隱私權政策",
];

/// Where submissions go and how they are stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// Comma-separated recipient addresses.
    pub recipients: String,
    /// Notification subject line.
    pub subject: String,
    /// Sheet name.
    pub sheet_name: String,
    /// Offset timestamps are rendered in.
    pub utc_offset: UtcOffset,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            recipients: DEFAULT_RECIPIENTS.to_owned(),
            subject: DEFAULT_SUBJECT.to_owned(),
            sheet_name: DEFAULT_SHEET_NAME.to_owned(),
            utc_offset: TAIPEI,
        }
    }
}

impl BookingConfig {
    /// Set the recipients.
    #[must_use]
    pub fn with_recipients(mut self, recipients: &str) -> Self {
        self.recipients = recipients.to_owned();
        self
    }

    /// Set the sheet name.
    #[must_use]
    pub fn with_sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = name.to_owned();
        self
    }

    /// Individual recipient addresses, trimmed, empties dropped.
    pub fn recipient_list(&self) -> impl Iterator<Item = &str> {
        self.recipients
            .split(',')
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
    }

    /// `yyyy-MM-dd HH:mm:ss` in the configured offset.
    ///
    /// # Errors
    ///
    /// Propagates formatting failures from `time`.
    pub fn timestamp(&self, now: OffsetDateTime) -> Result<String, time::error::Format> {
        now.to_offset(self.utc_offset).format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
    }
}
