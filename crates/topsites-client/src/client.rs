//! The asynchronous request lifecycle.
//!
//! ```text
//! Idle --begin--> InFlight --+--> Completed   (transport returned a body)
//!                            +--> Failed      (transport returned an error)
//!                            +--> Cancelled   (cancel won the race)
//! ```
//!
//! [`TopSitesClient::begin`] signs the request and spawns the transport call
//! on the current tokio runtime, returning a [`RequestHandle`] immediately.
//! [`RequestHandle::cancel`] and the spawned task both settle the outcome
//! under the same lock, so whichever reaches it first decides the terminal
//! state: a response that has already been recorded is never discarded by a
//! late cancel. [`RequestHandle::end`] consumes the handle, waits for the task
//! to stop and decodes the outcome.
//!
//! A client allows one request in flight at a time.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use topsites_auth::{Credentials, RequestSigner, TopSitesRequest};
use topsites_xml::{TopSitesResponse, parse_error_response, parse_top_sites_response};
use tracing::{debug, info, warn};

use crate::config::TopSitesConfig;
use crate::error::{ClientError, ClientResult, ServiceError, TransportError};
use crate::transport::{ReqwestTransport, Transport};

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// No request has been issued.
    Idle,
    /// The transport call is running.
    InFlight,
    /// The transport returned a body.
    Completed,
    /// The transport returned an error.
    Failed,
    /// The request was cancelled before it completed.
    Cancelled,
}

impl RequestState {
    /// Whether the state is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::InFlight => "in-flight",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// State shared between a handle and its transport task.
#[derive(Debug)]
struct Slot {
    state: RequestState,
    outcome: Option<Result<Bytes, TransportError>>,
}

impl Slot {
    fn in_flight() -> Self {
        Self {
            state: RequestState::InFlight,
            outcome: None,
        }
    }

    /// Record the transport result unless the request was already settled.
    fn settle(&mut self, outcome: Result<Bytes, TransportError>) -> bool {
        if self.state != RequestState::InFlight {
            return false;
        }
        self.state = if outcome.is_ok() {
            RequestState::Completed
        } else {
            RequestState::Failed
        };
        self.outcome = Some(outcome);
        true
    }
}

type SharedSlot = Arc<Mutex<Slot>>;

/// Client for the Top Sites service.
///
/// Credentials are not stored: each [`begin`](Self::begin) borrows them only
/// for as long as signing takes.
pub struct TopSitesClient {
    signer: RequestSigner,
    transport: Arc<dyn Transport>,
    current: Mutex<Option<SharedSlot>>,
    next_id: AtomicU64,
}

impl TopSitesClient {
    /// Create a client that talks to the configured endpoint over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &TopSitesConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(
            RequestSigner::new(config.endpoint()),
            Arc::new(transport),
        ))
    }

    /// Create a client from an explicit signer and transport.
    #[must_use]
    pub fn with_transport(signer: RequestSigner, transport: Arc<dyn Transport>) -> Self {
        Self {
            signer,
            transport,
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// State of the most recent request, or [`RequestState::Idle`] if none
    /// was issued.
    #[must_use]
    pub fn state(&self) -> RequestState {
        self.current
            .lock()
            .as_ref()
            .map_or(RequestState::Idle, |slot| slot.lock().state)
    }

    /// Sign `request` and start fetching it in the background.
    ///
    /// Returns as soon as the transport call is spawned. Must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Busy`] if an earlier request is still in flight
    /// - [`ClientError::Auth`] if the request cannot be signed
    /// - [`ClientError::Transport`] if no tokio runtime is available
    pub fn begin(
        &self,
        credentials: &Credentials<'_>,
        request: &TopSitesRequest,
    ) -> ClientResult<RequestHandle> {
        let mut current = self.current.lock();
        if current
            .as_ref()
            .is_some_and(|slot| slot.lock().state == RequestState::InFlight)
        {
            warn!("begin called while a request is in flight");
            return Err(ClientError::Busy);
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let signed = self.signer.sign(credentials, request)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let slot: SharedSlot = Arc::new(Mutex::new(Slot::in_flight()));
        let transport = Arc::clone(&self.transport);
        let task_slot = Arc::clone(&slot);
        let done = Arc::new(Notify::new());
        let task_done = Arc::clone(&done);
        let uri = signed.uri;

        let task = runtime.spawn(async move {
            let outcome = transport.get(&uri).await;
            let ok = outcome.is_ok();
            if task_slot.lock().settle(outcome) {
                debug!(request = id, ok, "Request completed");
            } else {
                debug!(request = id, "Discarding response of cancelled request");
            }
            task_done.notify_waiters();
        });

        info!(
            request = id,
            response_group = %request.response_group,
            host = %self.signer.endpoint().host,
            "Request started"
        );

        *current = Some(Arc::clone(&slot));
        Ok(RequestHandle {
            id,
            slot,
            done,
            task,
        })
    }

    /// Run one request to completion.
    ///
    /// # Errors
    ///
    /// Any error from [`begin`](Self::begin) or [`RequestHandle::end`].
    pub async fn fetch(
        &self,
        credentials: &Credentials<'_>,
        request: &TopSitesRequest,
    ) -> ClientResult<TopSitesResponse> {
        self.begin(credentials, request)?.end().await
    }
}

impl fmt::Debug for TopSitesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopSitesClient")
            .field("signer", &self.signer)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// A request started by [`TopSitesClient::begin`].
#[derive(Debug)]
pub struct RequestHandle {
    id: u64,
    slot: SharedSlot,
    done: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RequestHandle {
    /// Client-local identifier used in log output.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RequestState {
        self.slot.lock().state
    }

    /// Whether the request has reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    /// Wait until the request reaches a terminal state, without consuming the
    /// handle.
    pub async fn finished(&self) -> RequestState {
        loop {
            let notified = self.done.notified();
            let state = self.state();
            if state.is_terminal() {
                return state;
            }
            notified.await;
        }
    }

    /// Ask the transport call to stop.
    ///
    /// Returns `true` if the request moved to [`RequestState::Cancelled`] and
    /// `false` if it had already completed or failed, in which case the
    /// recorded outcome is kept. The remote side may still see the request.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock();
        if slot.state != RequestState::InFlight {
            debug!(request = self.id, state = %slot.state, "Cancel ignored");
            return false;
        }
        slot.state = RequestState::Cancelled;
        drop(slot);

        self.task.abort();
        self.done.notify_waiters();
        info!(request = self.id, "Request cancelled");
        true
    }

    /// Wait for the request to finish and decode its outcome.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Cancelled`] if the request was cancelled
    /// - [`ClientError::Service`] if the service answered with an error document
    /// - [`ClientError::Transport`] if the request failed without one, or the
    ///   body is not an XML document
    /// - [`ClientError::Decode`] if the success document does not match the schema
    pub async fn end(self) -> ClientResult<TopSitesResponse> {
        let Self { id, slot, task, .. } = self;

        if let Err(e) = task.await
            && e.is_panic()
        {
            warn!(request = id, "Request task panicked");
            slot.lock()
                .settle(Err(TransportError::Request("request task panicked".to_owned())));
        }

        let (state, outcome) = {
            let mut slot = slot.lock();
            (slot.state, slot.outcome.take())
        };
        debug!(request = id, state = %state, "Request ended");

        match (state, outcome) {
            (RequestState::Completed, Some(Ok(body))) => decode_success(id, &body),
            (RequestState::Failed, Some(Err(err))) => Err(decode_failure(id, err)),
            (RequestState::Cancelled, _) => Err(ClientError::Cancelled),
            _ => Err(TransportError::Request(format!("request ended in state {state}")).into()),
        }
    }
}

fn decode_success(id: u64, body: &[u8]) -> ClientResult<TopSitesResponse> {
    parse_top_sites_response(body).map_err(|e| {
        warn!(request = id, error = %e, "Failed to decode response");
        ClientError::from(e)
    })
}

fn decode_failure(id: u64, err: TransportError) -> ClientError {
    let Some(body) = err.body() else {
        warn!(request = id, error = %err, "Request failed");
        return err.into();
    };

    match parse_error_response(body) {
        Ok(response) => {
            let service = ServiceError::new(response, err);
            warn!(request = id, error = %service, "Service returned an error document");
            service.into()
        }
        Err(decode) => {
            debug!(request = id, error = %decode, "Failure body is not an error document");
            err.into()
        }
    }
}
