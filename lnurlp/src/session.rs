//! Collaborator-facing invoice driver.
//!
//! An [`InvoiceSession`] owns one [`Resolver`] and resolves whatever inputs the
//! collaborator last asked for. Each [`InvoiceSession::request`] snapshots the
//! inputs into an [`AttemptKey`] and runs the pipeline on a tokio task.
//! Superseded attempts run to completion, so resolver observers see every
//! outcome, but their results are dropped and subscribers of
//! [`SessionState`] only ever see the latest inputs' outcome.

use std::sync::Arc;

use tokio::sync::watch;

use crate::amount::AmountSats;
use crate::attempt::{AttemptKey, AttemptTracker};
use crate::error::{RESOLUTION_ABORTED, ResolveError};
use crate::outcome::ResolvedInvoice;
use crate::resolver::Resolver;
use crate::transport::LnurlTransport;

/// Published state of an [`InvoiceSession`].
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The latest attempt is in flight.
    Resolving(AttemptKey),
    /// The latest attempt produced an invoice.
    Resolved {
        /// Inputs of the attempt.
        key: AttemptKey,
        /// Resolved `lightning:` URI.
        invoice: ResolvedInvoice,
    },
    /// The latest attempt failed.
    Failed {
        /// Inputs of the attempt.
        key: AttemptKey,
        /// Classified error.
        error: ResolveError,
    },
}

impl SessionState {
    /// Returns `true` for [`Self::Resolved`] and [`Self::Failed`].
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Failed { .. })
    }

    /// Inputs of the attempt this state belongs to.
    #[must_use]
    pub const fn key(&self) -> Option<&AttemptKey> {
        match self {
            Self::Idle => None,
            Self::Resolving(key) | Self::Resolved { key, .. } | Self::Failed { key, .. } => {
                Some(key)
            }
        }
    }

    /// Text a renderer shows: the invoice URI or the error message.
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Resolved { invoice, .. } => Some(invoice.as_str()),
            Self::Failed { error, .. } => Some(error.message()),
            Self::Idle | Self::Resolving(_) => None,
        }
    }
}

/// Drives resolution for the latest requested inputs.
pub struct InvoiceSession<T> {
    resolver: Arc<Resolver<T>>,
    tracker: Arc<AttemptTracker>,
    state: Arc<watch::Sender<SessionState>>,
}

impl<T> std::fmt::Debug for InvoiceSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceSession")
            .field("resolver", &self.resolver)
            .field("tracker", &self.tracker)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<T: LnurlTransport + 'static> InvoiceSession<T> {
    /// Creates a session around `resolver`.
    pub fn new(resolver: Resolver<T>) -> Self {
        Self::from_shared(Arc::new(resolver))
    }

    /// Creates a session around a shared resolver.
    pub fn from_shared(resolver: Arc<Resolver<T>>) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            resolver,
            tracker: Arc::new(AttemptTracker::new()),
            state: Arc::new(state),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Resolves an invoice for new inputs.
    ///
    /// An empty `message` means no comment. Returns `false`, and does
    /// nothing, when the inputs equal those of the latest attempt.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn request(
        &self,
        address: impl Into<String>,
        amount: AmountSats,
        message: impl Into<String>,
    ) -> bool {
        let Some(ticket) = self
            .tracker
            .begin_if_changed(AttemptKey::new(address, amount, message))
        else {
            return false;
        };
        self.tracker.apply(&ticket, || {
            self.state
                .send_replace(SessionState::Resolving(ticket.key().clone()))
        });

        let resolver = Arc::clone(&self.resolver);
        let tracker = Arc::clone(&self.tracker);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let key = ticket.key().clone();
            let attempt = tokio::spawn(async move {
                resolver
                    .resolve(Some(&key.address), key.amount, key.comment())
                    .await
            });
            // A panicking attempt still settles the session.
            let result = attempt
                .await
                .unwrap_or_else(|_| Err(ResolveError::protocol(RESOLUTION_ABORTED)));
            let key = ticket.key();
            let next = match result {
                Ok(invoice) => SessionState::Resolved {
                    key: key.clone(),
                    invoice,
                },
                Err(error) => SessionState::Failed {
                    key: key.clone(),
                    error,
                },
            };
            tracker.apply(&ticket, || state.send_replace(next));
        });
        true
    }

    /// Waits until the latest attempt settles and returns its state.
    ///
    /// Returns [`SessionState::Idle`] right away when nothing was requested.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        let settled = rx
            .wait_for(|state| !matches!(state, SessionState::Resolving(_)))
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }
}
