#![forbid(unsafe_code)]

//! Build-time generator for the site's `config.js`.
//!
//! The page scripts read a global, frozen `CONFIG` object holding the form
//! endpoint and the analytics IDs. This crate renders that file from
//! environment variables so the values never live in version control.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod cli;

/// Form endpoint variable.
pub const SCRIPT_URL_VAR: &str = "GOOGLE_SCRIPT_URL";
/// Fallback for [`SCRIPT_URL_VAR`] used by Vite-style deployments.
pub const SCRIPT_URL_FALLBACK_VAR: &str = "VITE_GOOGLE_SCRIPT_URL";
/// Google Analytics ID variable.
pub const ANALYTICS_VAR: &str = "GOOGLE_ANALYTICS_ID";
/// Facebook Pixel ID variable.
pub const PIXEL_VAR: &str = "FACEBOOK_PIXEL_ID";

/// Script URL written by [`SiteConfig::example`].
pub const PLACEHOLDER_SCRIPT_URL: &str = "YOUR_GOOGLE_APPS_SCRIPT_URL_HERE";

/// Values rendered into `config.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Apps Script web-app URL receiving bookings. Required.
    pub google_script_url: String,
    /// Optional Google Analytics ID.
    pub google_analytics_id: String,
    /// Optional Facebook Pixel ID.
    pub facebook_pixel_id: String,
}

fn clean(value: Option<String>) -> String {
    value.unwrap_or_default().replace('\n', "").trim().to_owned()
}

fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

impl SiteConfig {
    /// Read the variables through `lookup`, dropping newlines and trimming.
    ///
    /// An empty [`SCRIPT_URL_VAR`] falls back to [`SCRIPT_URL_FALLBACK_VAR`].
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let script_url = lookup(SCRIPT_URL_VAR)
            .filter(|v| !v.is_empty())
            .or_else(|| lookup(SCRIPT_URL_FALLBACK_VAR));
        Self {
            google_script_url: clean(script_url),
            google_analytics_id: clean(lookup(ANALYTICS_VAR)),
            facebook_pixel_id: clean(lookup(PIXEL_VAR)),
        }
    }

    /// Read the process environment.
    #[must_use]
    pub fn from_process_env() -> Self {
        Self::from_env(|name| std::env::var(name).ok())
    }

    /// Placeholder values for a hand-edited config.
    #[must_use]
    pub fn example() -> Self {
        Self {
            google_script_url: PLACEHOLDER_SCRIPT_URL.to_owned(),
            ..Self::default()
        }
    }

    /// Generated `config.js`.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with_header(
            "/**\n * 網站配置檔案\n * 此檔案由建置流程自動產生\n * 請勿手動修改此檔案\n */",
        )
    }

    /// `config.example.js`: placeholders plus copy-and-edit instructions.
    #[must_use]
    pub fn render_example() -> String {
        Self::example().render_with_header(
            "/**\n * 網站配置檔案範例\n *\n * 使用方式：\n * 1. 複製此檔案並重新命名為 config.js\n * 2. 在 config.js 中填入你的實際配置資訊\n * 3. config.js 已被加入 .gitignore，不會被上傳到版本控制\n */",
        )
    }

    fn render_with_header(&self, header: &str) -> String {
        format!(
            "{header}

const CONFIG = {{
  // Google Apps Script Web App URL
  GOOGLE_SCRIPT_URL: '{url}',

  // Google Analytics ID (選用)
  GOOGLE_ANALYTICS_ID: '{ga}',

  // Facebook Pixel ID (選用)
  FACEBOOK_PIXEL_ID: '{pixel}',
}};

// 防止外部修改
if (typeof Object.freeze === 'function') {{
  Object.freeze(CONFIG);
}}
",
            url = js_string(&self.google_script_url),
            ga = js_string(&self.google_analytics_id),
            pixel = js_string(&self.facebook_pixel_id),
        )
    }

    /// Check the required values.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingScriptUrl`] when no script URL is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google_script_url.is_empty() {
            return Err(ConfigError::MissingScriptUrl);
        }
        Ok(())
    }
}

/// Why generation failed.
#[derive(Debug)]
pub enum ConfigError {
    /// Writing the output failed.
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// Neither script URL variable is set.
    MissingScriptUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            ConfigError::MissingScriptUrl => write!(
                f,
                "{SCRIPT_URL_VAR} 環境變數未設定

請在部署平台設定環境變數：
  1. 前往專案設定 → Environment Variables
  2. 新增變數：
     Name: {SCRIPT_URL_VAR}
     Value: https://script.google.com/macros/s/YOUR_SCRIPT_ID/exec
  3. 選擇所有環境（Production, Preview, Development）
  4. 重新部署"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::MissingScriptUrl => None,
        }
    }
}

/// Write `config` to `out`, then validate it.
///
/// The file is written even when validation fails, so a broken deployment
/// still ships a syntactically valid script.
///
/// # Errors
///
/// [`ConfigError::Io`] when the file cannot be written, otherwise any
/// [`SiteConfig::validate`] error.
pub fn generate(out: &Path, config: &SiteConfig) -> Result<(), ConfigError> {
    fs::write(out, config.render()).map_err(|source| ConfigError::Io {
        path: out.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %out.display(), "config.js written");
    config.validate()
}

/// Write the placeholder template to `out`.
///
/// # Errors
///
/// [`ConfigError::Io`] when the file cannot be written.
pub fn generate_example(out: &Path) -> Result<(), ConfigError> {
    fs::write(out, SiteConfig::render_example()).map_err(|source| ConfigError::Io {
        path: out.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %out.display(), "example config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn values_are_cleaned() {
        let config = SiteConfig::from_env(env(&[
            (SCRIPT_URL_VAR, " https://script.google.com/x/exec\n"),
            (ANALYTICS_VAR, "G-AB\nCD"),
        ]));
        assert_eq!(config.google_script_url, "https://script.google.com/x/exec");
        assert_eq!(config.google_analytics_id, "G-ABCD");
        assert_eq!(config.facebook_pixel_id, "");
    }

    #[test]
    fn vite_variable_is_a_fallback() {
        let config = SiteConfig::from_env(env(&[(SCRIPT_URL_FALLBACK_VAR, "https://v")]));
        assert_eq!(config.google_script_url, "https://v");

        let both = SiteConfig::from_env(env(&[
            (SCRIPT_URL_VAR, "https://primary"),
            (SCRIPT_URL_FALLBACK_VAR, "https://v"),
        ]));
        assert_eq!(both.google_script_url, "https://primary");
    }

    #[test]
    fn render_freezes_and_escapes() {
        let config = SiteConfig {
            google_script_url: "https://x/it's".into(),
            ..SiteConfig::default()
        };
        let js = config.render();
        assert!(js.contains("GOOGLE_SCRIPT_URL: 'https://x/it\\'s',"));
        assert!(js.contains("GOOGLE_ANALYTICS_ID: '',"));
        assert!(js.contains("Object.freeze(CONFIG);"));
    }

    #[test]
    fn example_uses_placeholder() {
        let js = SiteConfig::render_example();
        assert!(js.contains(PLACEHOLDER_SCRIPT_URL));
        assert!(js.contains("網站配置檔案範例"));
        assert!(SiteConfig::example().validate().is_ok());
    }

    #[test]
    fn missing_url_explains_the_fix() {
        let err = SiteConfig::default().validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("GOOGLE_SCRIPT_URL 環境變數未設定"));
        assert!(msg.contains("Environment Variables"));
    }
}
