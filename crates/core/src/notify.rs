//! # Outbound notices
//!
//! Notices are composed here and handed to a [`Notifier`] on a detached task.
//! Delivery is best effort: a failed send is logged and never reaches the
//! operation that triggered it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    config::NoticeConfig,
    models::{appointment::Appointment, user::User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    BookingRequested,
    BookingConfirmed,
    BookingRejected,
    AccountVerification,
}

/// A human-readable message addressed to one mailbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notice: &Notice) -> eyre::Result<()>;
}

/// Writes notices to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notice: &Notice) -> eyre::Result<()> {
        info!(
            kind = ?notice.kind,
            to = %notice.to,
            subject = %notice.subject,
            "Notice (log transport):\n{}",
            notice.body
        );
        Ok(())
    }
}

/// Sends notices without waiting for the transport.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Spawns delivery of `notice`. The returned handle may be dropped.
    pub fn dispatch(&self, notice: Notice) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(err) = notifier.send(&notice).await {
                error!(
                    kind = ?notice.kind,
                    to = %notice.to,
                    "Failed to deliver notice: {err:#}"
                );
            }
        })
    }
}

/// Builds the text of every notice the service sends.
#[derive(Debug, Clone)]
pub struct NoticeComposer {
    config: NoticeConfig,
}

impl NoticeComposer {
    pub fn new(config: NoticeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NoticeConfig {
        &self.config
    }

    /// Tells the administrator about a new pending request, with one-click
    /// confirm and reject links.
    pub fn booking_requested(&self, appointment: &Appointment) -> Notice {
        let confirm = self
            .config
            .link(&format!("/appointments/{}/confirm", appointment.id));
        let reject = self
            .config
            .link(&format!("/appointments/{}/reject", appointment.id));
        let notes = appointment.notes.as_deref().unwrap_or("-");

        Notice {
            kind: NoticeKind::BookingRequested,
            to: self.config.admin_email.clone(),
            subject: format!(
                "New booking request: {} {} ({})",
                appointment.date.format("%d/%m/%Y"),
                appointment.time.format("%H:%M"),
                appointment.agency_name
            ),
            body: format!(
                "A new appointment is waiting for approval.\n\n\
                 Client: {}\n\
                 Agency: {}\n\
                 Email: {}\n\
                 Date: {}\n\
                 Time: {} ({} minutes)\n\
                 Notes: {}\n\
                 Reference: {}\n\n\
                 Confirm: {}\n\
                 Reject: {}\n",
                appointment.user_name,
                appointment.agency_name,
                appointment.user_email,
                appointment.date.format("%A %d %B %Y"),
                appointment.time.format("%H:%M"),
                appointment.duration_minutes,
                notes,
                appointment.id,
                confirm,
                reject,
            ),
        }
    }

    pub fn booking_confirmed(&self, appointment: &Appointment) -> Notice {
        let mut body = format!(
            "Dear {},\n\n\
             your appointment on {} at {} has been confirmed.\n",
            appointment.user_name,
            appointment.date.format("%A %d %B %Y"),
            appointment.time.format("%H:%M"),
        );
        if !self.config.venue_address.is_empty() {
            body.push_str(&format!("\nAddress: {}\n", self.config.venue_address));
        }
        if !self.config.contact_phone.is_empty() {
            body.push_str(&format!(
                "For any change please call {}.\n",
                self.config.contact_phone
            ));
        }
        body.push_str(&format!("\nSee you soon,\n{}\n", self.config.service_name));

        Notice {
            kind: NoticeKind::BookingConfirmed,
            to: appointment.user_email.clone(),
            subject: format!(
                "Appointment confirmed: {} {}",
                appointment.date.format("%d/%m/%Y"),
                appointment.time.format("%H:%M")
            ),
            body,
        }
    }

    pub fn booking_rejected(&self, appointment: &Appointment) -> Notice {
        Notice {
            kind: NoticeKind::BookingRejected,
            to: appointment.user_email.clone(),
            subject: format!(
                "Appointment not available: {} {}",
                appointment.date.format("%d/%m/%Y"),
                appointment.time.format("%H:%M")
            ),
            body: format!(
                "Dear {},\n\n\
                 unfortunately we cannot accept your request for {} at {}.\n\
                 Please choose another slot from the booking page.\n\n\
                 Kind regards,\n{}\n",
                appointment.user_name,
                appointment.date.format("%A %d %B %Y"),
                appointment.time.format("%H:%M"),
                self.config.service_name,
            ),
        }
    }

    pub fn account_verification(&self, user: &User, token: &str) -> Notice {
        let link = self.config.link(&format!("/auth/verify?token={token}"));
        Notice {
            kind: NoticeKind::AccountVerification,
            to: user.email.clone(),
            subject: format!("Verify your {} account", self.config.service_name),
            body: format!(
                "Hello {},\n\n\
                 please confirm your email address to activate the account for {}:\n\
                 {}\n",
                user.display_name(),
                user.agency_name,
                link,
            ),
        }
    }
}
