//! Client-side state model for the recruiter's four-column board.
//!
//! The board keeps the last server-confirmed cards apart from the status
//! changes the recruiter has issued but the server has not yet answered.
//! What the recruiter sees is the confirmed cards with the pending changes
//! replayed on top, in issuance order. A server answer removes its pending
//! change; a success only advances the confirmed card when it is at least as
//! recent as what the board already holds, so a slow response can never
//! regress a card.

use chrono::{DateTime, Utc};

use crate::domain::{Application, ApplicationId, ApplicationStatus, BoardEntry, StatusChange};

/// Marker returned by [`BoardState::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u64);

/// A status change the recruiter dropped onto a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCommand {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
    pub interview_date: Option<DateTime<Utc>>,
}

impl BoardCommand {
    /// The request body to send for this command.
    #[must_use]
    pub const fn as_change(&self) -> StatusChange {
        StatusChange {
            status: self.status,
            interview_date: self.interview_date,
        }
    }
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub cards: Vec<BoardEntry>,
}

/// What [`BoardState::reconcile`] did with a server answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The confirmed card advanced to the server state.
    Applied,
    /// The answer was older than the confirmed card and was ignored.
    Stale,
    /// The command failed; its optimistic change was rolled back.
    RolledBack,
    /// No pending command carries this id.
    Unknown,
}

/// Confirmed cards plus pending commands.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    confirmed: Vec<BoardEntry>,
    pending: Vec<(CommandId, BoardCommand)>,
    toasts: Vec<String>,
    next_id: u64,
}

fn overlay(application: &mut Application, command: &BoardCommand) {
    application.status = command.status;
    if let Some(date) = command.as_change().effective_interview_date() {
        application.interview_date = Some(date);
    }
}

impl BoardState {
    /// Board seeded from a server snapshot.
    #[must_use]
    pub fn new(snapshot: Vec<BoardEntry>) -> Self {
        Self {
            confirmed: snapshot,
            ..Self::default()
        }
    }

    /// Record an optimistic status change.
    pub fn issue(&mut self, command: BoardCommand) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, command));
        id
    }

    /// Whether any command is still awaiting its answer.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The last server-confirmed cards.
    #[must_use]
    pub fn confirmed(&self) -> &[BoardEntry] {
        &self.confirmed
    }

    /// Confirmed cards with pending commands applied in issuance order.
    #[must_use]
    pub fn view(&self) -> Vec<BoardEntry> {
        let mut cards = self.confirmed.clone();
        for (_, command) in &self.pending {
            if let Some(card) = cards
                .iter_mut()
                .find(|card| card.application.id == command.application_id)
            {
                overlay(&mut card.application, command);
            }
        }
        cards
    }

    /// The view grouped into the four status columns.
    #[must_use]
    pub fn columns(&self) -> Vec<BoardColumn> {
        let view = self.view();
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                label: status.label(),
                cards: view
                    .iter()
                    .filter(|card| card.application.status == status)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Fold a server answer for `id` into the board.
    ///
    /// `Err` carries the message to show the recruiter.
    pub fn reconcile(&mut self, id: CommandId, answer: Result<Application, String>) -> Reconciled {
        let Some(position) = self.pending.iter().position(|(pending, _)| *pending == id) else {
            return Reconciled::Unknown;
        };
        self.pending.remove(position);

        match answer {
            Err(message) => {
                self.toasts.push(message);
                Reconciled::RolledBack
            }
            Ok(application) => {
                let Some(card) = self
                    .confirmed
                    .iter_mut()
                    .find(|card| card.application.id == application.id)
                else {
                    return Reconciled::Stale;
                };
                if application.updated_at < card.application.updated_at {
                    return Reconciled::Stale;
                }
                card.application = application;
                Reconciled::Applied
            }
        }
    }

    /// Replace the confirmed cards after a full refetch. Pending commands
    /// keep overlaying the new snapshot until answered.
    pub fn replace_snapshot(&mut self, snapshot: Vec<BoardEntry>) {
        self.confirmed = snapshot;
    }

    /// Take the messages queued by failed commands.
    pub fn drain_toasts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.toasts)
    }
}
