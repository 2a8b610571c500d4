#![forbid(unsafe_code)]

//! Viewing-appointment submissions.
//!
//! A [`BookingHandler`] parses the form body, appends a row to a
//! [`SheetStore`] (creating the sheet with a header on first use), mails a
//! notification through a [`Mailer`] and answers with a JSON
//! [`BookingResponse`].
//!
//! # Example
//!
//! ```
//! use vitrine_booking::{BookingConfig, BookingHandler, MemoryMailer, MemorySheet};
//!
//! let handler = BookingHandler::new(BookingConfig::default(), MemorySheet::new(), MemoryMailer::new());
//! let response = handler.handle_post(r#"{"username":"林","phone":"0912","agree":true}"#);
//! assert_eq!(response.row_number, Some(2));
//! assert_eq!(handler.mailer().sent().len(), 1);
//! ```

use std::fmt;

pub mod config;
pub mod handler;
pub mod notify;
pub mod record;
pub mod sheet;

pub use config::BookingConfig;
pub use handler::BookingHandler;
pub use notify::{Email, MailError, Mailer, MemoryMailer};
pub use record::{BookingRequest, BookingResponse, Status};
pub use sheet::{MemorySheet, SheetData, SheetError, SheetStore};

/// Why a submission failed.
#[derive(Debug)]
pub enum BookingError {
    /// The body is not a valid request.
    InvalidRequest(serde_json::Error),
    /// Storing the row failed.
    Sheet(SheetError),
    /// Sending the notification failed.
    Mail(MailError),
    /// The timestamp could not be rendered.
    Timestamp(time::error::Format),
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingError::InvalidRequest(e) => write!(f, "invalid request body: {e}"),
            BookingError::Sheet(e) => write!(f, "{e}"),
            BookingError::Mail(e) => write!(f, "{e}"),
            BookingError::Timestamp(e) => write!(f, "timestamp: {e}"),
        }
    }
}

impl std::error::Error for BookingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookingError::InvalidRequest(e) => Some(e),
            BookingError::Sheet(e) => Some(e),
            BookingError::Mail(e) => Some(e),
            BookingError::Timestamp(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(e: serde_json::Error) -> Self {
        BookingError::InvalidRequest(e)
    }
}

impl From<SheetError> for BookingError {
    fn from(e: SheetError) -> Self {
        BookingError::Sheet(e)
    }
}

impl From<MailError> for BookingError {
    fn from(e: MailError) -> Self {
        BookingError::Mail(e)
    }
}

impl From<time::error::Format> for BookingError {
    fn from(e: time::error::Format) -> Self {
        BookingError::Timestamp(e)
    }
}
