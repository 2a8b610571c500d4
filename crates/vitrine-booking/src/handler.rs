#![forbid(unsafe_code)]

//! Submission endpoint.

use time::OffsetDateTime;

use crate::BookingError;
use crate::config::{BookingConfig, HEADER};
use crate::notify::{Email, Mailer, render_html, render_text};
use crate::record::{BookingRequest, BookingResponse};
use crate::sheet::SheetStore;

/// Stores submissions in a sheet and mails a notification for each.
#[derive(Debug)]
pub struct BookingHandler<S, M> {
    config: BookingConfig,
    sheet: S,
    mailer: M,
}

impl<S: SheetStore, M: Mailer> BookingHandler<S, M> {
    /// Handler over `sheet` and `mailer`.
    #[must_use]
    pub fn new(config: BookingConfig, sheet: S, mailer: M) -> Self {
        Self {
            config,
            sheet,
            mailer,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// The sheet backend.
    #[must_use]
    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    /// The mail backend.
    #[must_use]
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Handle a POST body at the current time.
    pub fn handle_post(&self, body: &str) -> BookingResponse {
        self.handle_post_at(body, OffsetDateTime::now_utc())
    }

    /// Handle a POST body as if received at `now`.
    ///
    /// Never fails: errors become an `error` response carrying the message.
    pub fn handle_post_at(&self, body: &str, now: OffsetDateTime) -> BookingResponse {
        let result = BookingRequest::from_json(body)
            .map_err(BookingError::from)
            .and_then(|request| self.submit(&request, now));
        match result {
            Ok(row_number) => BookingResponse::success(row_number),
            Err(err) => {
                vitrine_core::error!(error = %err, "booking submission failed");
                BookingResponse::error(err.to_string())
            }
        }
    }

    /// Health check.
    #[must_use]
    pub fn handle_get(&self) -> BookingResponse {
        BookingResponse::ok()
    }

    /// Store `request` and send its notification. Returns the row number.
    ///
    /// # Errors
    ///
    /// Sheet, mail and timestamp failures. A mail failure happens after the
    /// row was stored.
    pub fn submit(
        &self,
        request: &BookingRequest,
        now: OffsetDateTime,
    ) -> Result<usize, BookingError> {
        let timestamp = self.config.timestamp(now)?;
        let sheet = &self.config.sheet_name;
        if self.sheet.ensure_sheet(sheet, &HEADER)? {
            vitrine_core::info!(sheet = %sheet, store = self.sheet.name(), "sheet created");
        }
        let row_number = self.sheet.append_row(sheet, &request.to_row(&timestamp))?;

        let email = Email {
            to: self.config.recipient_list().map(str::to_owned).collect(),
            subject: self.config.subject.clone(),
            body: render_text(request, &timestamp, row_number),
            html_body: render_html(request, &timestamp, row_number),
        };
        self.mailer.send(&email)?;
        vitrine_core::info!(row = row_number, "booking stored");
        Ok(row_number)
    }
}
