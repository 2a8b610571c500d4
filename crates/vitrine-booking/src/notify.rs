#![forbid(unsafe_code)]

//! Notification mail for new submissions.

use std::fmt;
use std::fmt::Write as _;
use std::sync::Mutex;

use crate::record::BookingRequest;

/// Errors from a mail backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// No usable recipient.
    NoRecipients,
    /// The backend refused to send.
    Rejected(String),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::NoRecipients => f.write_str("no mail recipients configured"),
            MailError::Rejected(msg) => write!(f, "mail rejected: {msg}"),
        }
    }
}

impl std::error::Error for MailError {}

/// An outgoing message with plain-text and HTML bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// HTML body.
    pub html_body: String,
}

/// Sends [`Email`]s.
pub trait Mailer: Send + Sync {
    /// Send one message.
    fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// Mailer that records messages instead of sending them.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
    reject: Option<String>,
}

impl MemoryMailer {
    /// Mailer accepting everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mailer rejecting everything with `reason`.
    #[must_use]
    pub fn rejecting(reason: &str) -> Self {
        Self {
            sent: Mutex::default(),
            reject: Some(reason.to_owned()),
        }
    }

    /// Messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, email: &Email) -> Result<(), MailError> {
        if let Some(reason) = &self.reject {
            return Err(MailError::Rejected(reason.clone()));
        }
        if email.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        self.sent
            .lock()
            .map_err(|_| MailError::Rejected("lock poisoned".into()))?
            .push(email.clone());
        Ok(())
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for HTML text and attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━";

/// Plain-text body.
#[must_use]
pub fn render_text(request: &BookingRequest, timestamp: &str, row_number: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "親愛的業務同仁您好，\n");
    let _ = writeln!(out, "網站收到新的預約賞屋申請，詳細資訊如下：\n");
    let _ = writeln!(out, "{RULE}\n📋 預約資訊\n{RULE}\n");
    let _ = writeln!(out, "👤 姓名：{}", request.display_name());
    let _ = writeln!(out, "📞 聯絡電話：{}", request.display_phone());
    let _ = writeln!(out, "📍 地址：{}", request.address());
    let _ = writeln!(out, "✅ 同意隱私權政策：{}\n", request.consent());
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "⏰ 提交時間：{timestamp}");
    let _ = writeln!(out, "📊 記錄編號：第 {row_number} 筆\n");
    let _ = writeln!(out, "{RULE}\n");
    let _ = writeln!(out, "請儘速與客戶聯繫，提供專業的賞屋服務。\n");
    let _ = writeln!(out, "此郵件為系統自動發送，請勿直接回覆。\n");
    out.push_str("漢皇蒔序 預約系統");
    out
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    body { font-family: 'Microsoft JhengHei', 'PingFang TC', sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f9f9; }
    .header { background-color: #3D3127; color: white; padding: 20px; text-align: center; }
    .content { background-color: white; padding: 30px; margin-top: 20px; border-radius: 5px; }
    .info-row { padding: 10px 0; border-bottom: 1px solid #eee; }
    .label { font-weight: bold; color: #3D3127; display: inline-block; width: 120px; }
    .footer { text-align: center; margin-top: 20px; color: #666; font-size: 12px; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h2>🏡 漢皇蒔序 - 新預約通知</h2>
    </div>
    <div class="content">
      <p>親愛的業務同仁您好，</p>
      <p>網站收到新的預約賞屋申請：</p>
"#;

const HTML_TAIL: &str = r#"      <p style="margin-top: 20px; color: #D32F2F; font-weight: bold;">
        ⚠️ 請儘速與客戶聯繫，提供專業的賞屋服務。
      </p>
    </div>
    <div class="footer">
      <p>此郵件為系統自動發送，請勿直接回覆。</p>
      <p>漢皇蒔序 預約系統</p>
    </div>
  </div>
</body>
</html>"#;

/// HTML body. Every submitted value is escaped.
#[must_use]
pub fn render_html(request: &BookingRequest, timestamp: &str, row_number: usize) -> String {
    let consent = if request.agree { "已同意" } else { "未同意" };
    let rows = [
        ("👤 姓名：", escape_html(request.display_name())),
        ("📞 聯絡電話：", escape_html(request.display_phone())),
        ("📍 地址：", escape_html(&request.address())),
        ("✅ 隱私權政策：", consent.to_owned()),
        ("⏰ 提交時間：", escape_html(timestamp)),
        ("📊 記錄編號：", format!("第 {row_number} 筆")),
    ];

    let mut out = String::from(HTML_HEAD);
    for (label, value) in rows {
        let _ = write!(
            out,
            "\n      <div class=\"info-row\">\n        <span class=\"label\">{label}</span>\n        <span>{value}</span>\n      </div>\n"
        );
    }
    out.push('\n');
    out.push_str(HTML_TAIL);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            username: Some("王<小明>".into()),
            phone: None,
            county: Some("新北市".into()),
            district: Some("新店區".into()),
            agree: true,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn text_body_lists_fields() {
        let body = render_text(&request(), "2024-03-01 12:00:00", 5);
        assert!(body.starts_with("親愛的業務同仁您好，"));
        assert!(body.contains("👤 姓名：王<小明>\n"));
        assert!(body.contains("📞 聯絡電話：未提供\n"));
        assert!(body.contains("📍 地址：新北市 新店區\n"));
        assert!(body.contains("✅ 同意隱私權政策：是\n"));
        assert!(body.contains("📊 記錄編號：第 5 筆"));
        assert!(body.ends_with("漢皇蒔序 預約系統"));
    }

    #[test]
    fn html_body_escapes_values() {
        let html = render_html(&request(), "2024-03-01 12:00:00", 5);
        assert!(html.contains("<span>王&lt;小明&gt;</span>"));
        assert!(!html.contains("王<小明>"));
        assert!(html.contains("<span>未提供</span>"));
        assert!(html.contains("<span>已同意</span>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn memory_mailer_records_and_rejects() {
        let email = Email {
            to: vec!["a@x.tw".into()],
            subject: "s".into(),
            body: "b".into(),
            html_body: "h".into(),
        };
        let mailer = MemoryMailer::new();
        mailer.send(&email).unwrap();
        assert_eq!(mailer.sent(), [email.clone()]);

        let nobody = Email { to: vec![], ..email.clone() };
        assert_eq!(mailer.send(&nobody), Err(MailError::NoRecipients));
        assert_eq!(
            MemoryMailer::rejecting("quota").send(&email),
            Err(MailError::Rejected("quota".into()))
        );
    }
}
