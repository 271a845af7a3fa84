//! Admin panel state for the spreadsheet sync.

use std::borrow::Borrow;

use tracing::{info, warn};

use crate::api::MapBackend;
use crate::error::{Error, Result};
use crate::i18n::Translator;
use crate::models::SyncResult;
use crate::notify::Notification;

/// Proof that a sync was admitted by [`SyncPanel::begin`]. Carries the url
/// exactly as it was typed.
#[derive(Debug, Clone)]
pub struct SyncTicket {
    sheet_url: String,
}

impl SyncTicket {
    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub async fn send<B: MapBackend>(&self, backend: &B) -> Result<SyncResult> {
        backend.sync_sheet(&self.sheet_url).await
    }
}

/// The sheet url field, the in-flight flag and the last result.
///
/// Only one sync can be outstanding: [`begin`](Self::begin) refuses while a
/// ticket is out, and [`can_submit`](Self::can_submit) drives the button.
#[derive(Debug, Clone, Default)]
pub struct SyncPanel {
    translator: Translator,
    sheet_url: String,
    syncing: bool,
    result: Option<SyncResult>,
}

impl SyncPanel {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            ..Default::default()
        }
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub fn set_sheet_url(&mut self, sheet_url: impl Into<String>) {
        self.sheet_url = sheet_url.into();
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    pub fn can_submit(&self) -> bool {
        !self.syncing && !self.sheet_url.trim().is_empty()
    }

    pub fn result(&self) -> Option<&SyncResult> {
        self.result.as_ref()
    }

    /// Validate the url and mark a request as in flight. A blank url is
    /// recorded as a failed result.
    pub fn begin(&mut self) -> Result<SyncTicket> {
        if self.syncing {
            return Err(Error::Busy);
        }
        if self.sheet_url.trim().is_empty() {
            let message = self.translator.t("enterSheetUrl").to_string();
            self.result = Some(SyncResult::failed(&message));
            return Err(Error::Validation { message });
        }
        self.syncing = true;
        self.result = None;
        Ok(SyncTicket {
            sheet_url: self.sheet_url.clone(),
        })
    }

    /// Record the outcome of a ticket and build the toast for it.
    pub fn complete<E: Borrow<Error>>(
        &mut self,
        ticket: SyncTicket,
        outcome: std::result::Result<SyncResult, E>,
    ) -> Notification {
        self.syncing = false;
        let result = match outcome {
            Ok(result) => {
                info!(
                    sheet = ticket.sheet_url(),
                    success = result.success,
                    added = ?result.markers_added,
                    "sync finished"
                );
                result
            }
            Err(e) => {
                let e = e.borrow();
                warn!(sheet = ticket.sheet_url(), error = %e, "sync failed");
                let message = e
                    .detail()
                    .unwrap_or_else(|| self.translator.t("syncError"))
                    .to_string();
                SyncResult::failed(message)
            }
        };
        let notification = sync_notification(&result, &self.translator);
        self.result = Some(result);
        notification
    }

    /// Run one sync end to end against `backend`.
    ///
    /// A blank url is rejected here without touching the backend.
    pub async fn sync<B: MapBackend>(&mut self, backend: &B) -> Notification {
        let ticket = match self.begin() {
            Ok(ticket) => ticket,
            Err(e) => return Notification::error(e.to_string()),
        };
        let outcome = ticket.send(backend).await;
        self.complete(ticket, outcome)
    }
}

/// Toast for a sync result: its message, the number of markers added and any
/// rows that failed to geocode.
pub fn sync_notification(result: &SyncResult, translator: &Translator) -> Notification {
    let mut notification = match (result.success, result.message.is_empty()) {
        (true, false) => Notification::success(&result.message),
        (true, true) => Notification::success(translator.t("syncSuccess")),
        (false, false) => Notification::error(&result.message),
        (false, true) => Notification::error(translator.t("syncError")),
    };

    if let Some(added) = result.markers_added.filter(|n| *n > 0) {
        notification = notification.with_detail(format!("{} {}", added, translator.t("markersAdded")));
    }

    if let Some(errors) = result.geocode_errors.as_deref().filter(|e| !e.is_empty()) {
        notification = notification.with_detail(translator.t("geocodingErrors"));
        for name in errors {
            notification = notification.with_detail(format!("- {}", name));
        }
    }

    notification
}
