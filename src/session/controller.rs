use std::fmt;

use tracing::{debug, info};

use crate::search::{ResultPage, SearchError, SearchRequest};
use crate::ui::viewport::Viewport;

use super::ports::{NotificationSink, ResultRenderer};
use super::sentinel::ViewportSentinel;

/// Results requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 40;

/// Rows beyond the visible window at which the next page is requested.
pub const DEFAULT_PROXIMITY: usize = 10;

pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, there are no images matching your search query. Please try again.";
pub const END_OF_RESULTS_MESSAGE: &str =
    "We're sorry, but you've reached the end of search results.";

/// Message shown after the first page of a session lands.
pub fn found_message(total_hits: u64) -> String {
    format!("Hooray! We found {total_hits} images.")
}

/// Number of pages the service will serve for `total_hits` results.
pub fn page_count(total_hits: u64, page_size: u32) -> u64 {
    total_hits.div_ceil(u64::from(page_size.max(1)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No session
    #[default]
    Idle,
    /// Sentinel bound, waiting for the boundary to come into view
    AwaitingTrigger,
    /// Exactly one request outstanding
    Fetching,
    /// Every page consumed
    Exhausted,
    /// Last request failed or came back empty
    Failed,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingTrigger => "ready",
            Self::Fetching => "loading",
            Self::Exhausted => "end",
            Self::Failed => "failed",
        }
    }
}

/// Generation number of a session. Bumped on every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(u64);

impl SessionToken {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: SessionToken,
    pub page: u32,
}

/// A request the controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub search: SearchRequest,
}

/// The settled result of a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<ResultPage, SearchError>,
}

/// Why a session ended in [`SessionStatus::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("{}", NO_RESULTS_MESSAGE)]
    NoResults,
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}

/// The active query context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
    page_size: u32,
    current_page: u32,
    total_hits: Option<u64>,
    total_available: Option<u64>,
    loaded: usize,
    status: SessionStatus,
    token: SessionToken,
}

impl SearchSession {
    fn new(query: String, page_size: u32, token: SessionToken) -> Self {
        Self {
            query,
            page_size,
            current_page: 1,
            total_hits: None,
            total_available: None,
            loaded: 0,
            status: SessionStatus::AwaitingTrigger,
            token,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Next page to request (1-based).
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Server-reported hits, once the first page has landed.
    pub const fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    pub const fn total_available(&self) -> Option<u64> {
        self.total_available
    }

    /// Items rendered so far.
    pub const fn loaded(&self) -> usize {
        self.loaded
    }

    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    pub const fn token(&self) -> SessionToken {
        self.token
    }

    fn accepts(&self, ticket: FetchTicket) -> bool {
        self.token == ticket.token
            && self.status == SessionStatus::Fetching
            && self.current_page == ticket.page
    }
}

/// Scroll listener installed once a session runs out of pages.
///
/// Fires once, the first time a scroll brings the end of content on screen.
/// Dropping it removes the listener.
#[derive(Debug)]
struct EndOfContentWatch {
    token: SessionToken,
    last_offset: Option<usize>,
}

impl EndOfContentWatch {
    fn install(token: SessionToken) -> Self {
        crate::perf::log_event("session.end_watch.install", format!("token={token}"));
        Self {
            token,
            last_offset: None,
        }
    }

    fn on_scroll(&mut self, viewport: &Viewport) -> bool {
        let offset = viewport.offset();
        let scrolled = self.last_offset.is_some_and(|prev| prev != offset);
        self.last_offset = Some(offset);
        scrolled && viewport.reached_end()
    }
}

impl Drop for EndOfContentWatch {
    fn drop(&mut self) {
        crate::perf::log_event("session.end_watch.release", format!("token={}", self.token));
    }
}

/// Infinite-scroll state machine.
///
/// Owns the current [`SearchSession`], the sentinel binding, and the
/// end-of-content watch. Output goes through the [`ResultRenderer`] and
/// [`NotificationSink`] passed to each call; network work is returned as a
/// [`FetchRequest`] and its result fed back with
/// [`handle_outcome`](Self::handle_outcome).
#[derive(Debug)]
pub struct PaginationController {
    page_size: u32,
    proximity: usize,
    session: Option<SearchSession>,
    next_token: u64,
    sentinel: ViewportSentinel,
    end_watch: Option<EndOfContentWatch>,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PROXIMITY)
    }
}

impl PaginationController {
    /// `page_size` of zero is treated as one.
    pub fn new(page_size: u32, proximity: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            proximity,
            session: None,
            next_token: 0,
            sentinel: ViewportSentinel::new(),
            end_watch: None,
        }
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub const fn proximity(&self) -> usize {
        self.proximity
    }

    pub const fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.session
            .as_ref()
            .map_or(SessionStatus::Idle, SearchSession::status)
    }

    /// Whether the load-boundary sentinel is currently observing.
    pub const fn is_armed(&self) -> bool {
        self.sentinel.is_bound()
    }

    /// Start a new session for `raw_query`, superseding the current one.
    ///
    /// Results are cleared and the sentinel rebound before anything is
    /// fetched. Whitespace-only input ends the session without fetching.
    /// Any request still in flight for the previous session is ignored when
    /// it arrives.
    pub fn submit<R>(&mut self, raw_query: &str, renderer: &mut R)
    where
        R: ResultRenderer + ?Sized,
    {
        self.sentinel.unbind();
        self.end_watch = None;
        self.next_token += 1;
        let token = SessionToken(self.next_token);
        renderer.clear();

        let query = raw_query.trim();
        if query.is_empty() {
            debug!(%token, "empty query, session cleared");
            self.session = None;
            return;
        }

        info!(%token, query, "search session started");
        self.session = Some(SearchSession::new(query.to_owned(), self.page_size, token));
        self.sentinel.bind(self.proximity);
    }

    /// Feed the current viewport to the sentinel and the end-of-content
    /// watch. `marker_line` is the row just past the last rendered result.
    pub fn observe_viewport<N>(&mut self, viewport: &Viewport, marker_line: usize, notifier: &mut N)
    where
        N: NotificationSink + ?Sized,
    {
        self.sentinel.observe(viewport, marker_line);
        if self
            .end_watch
            .as_mut()
            .is_some_and(|watch| watch.on_scroll(viewport))
        {
            self.end_watch = None;
            notifier.info(END_OF_RESULTS_MESSAGE);
        }
    }

    /// Consume a pending sentinel signal and turn it into a request.
    ///
    /// Returns `None` unless the live binding fired while the session was
    /// waiting for it. The sentinel is unbound before the request is handed
    /// out and stays unbound until the request settles.
    pub fn take_fetch(&mut self) -> Option<FetchRequest> {
        let signal = self.sentinel.take_signal()?;
        let Some(session) = self
            .session
            .as_mut()
            .filter(|session| session.status == SessionStatus::AwaitingTrigger)
        else {
            debug!(binding = ?signal.binding, "sentinel fired outside of an awaiting session");
            self.sentinel.unbind();
            return None;
        };

        self.sentinel.unbind();
        session.status = SessionStatus::Fetching;
        let ticket = FetchTicket {
            token: session.token,
            page: session.current_page,
        };
        debug!(token = %ticket.token, page = ticket.page, "issuing page request");
        Some(FetchRequest {
            ticket,
            search: SearchRequest::new(session.query.clone(), ticket.page, session.page_size),
        })
    }

    /// [`observe_viewport`](Self::observe_viewport) followed by
    /// [`take_fetch`](Self::take_fetch).
    pub fn on_viewport<N>(
        &mut self,
        viewport: &Viewport,
        marker_line: usize,
        notifier: &mut N,
    ) -> Option<FetchRequest>
    where
        N: NotificationSink + ?Sized,
    {
        self.observe_viewport(viewport, marker_line, notifier);
        self.take_fetch()
    }

    /// Apply a settled request.
    ///
    /// Outcomes that do not belong to the live session's outstanding request
    /// are dropped without rendering or notifying.
    pub fn handle_outcome<R, N>(&mut self, outcome: FetchOutcome, renderer: &mut R, notifier: &mut N)
    where
        R: ResultRenderer + ?Sized,
        N: NotificationSink + ?Sized,
    {
        let FetchOutcome { ticket, result } = outcome;
        let Some(session) = self
            .session
            .as_mut()
            .filter(|session| session.accepts(ticket))
        else {
            debug!(token = %ticket.token, page = ticket.page, "discarding stale response");
            crate::perf::log_event(
                "session.stale",
                format!("token={} page={}", ticket.token, ticket.page),
            );
            return;
        };

        let page = match result {
            Ok(page) if !page.items.is_empty() => page,
            Ok(_) => {
                Self::fail(session, FetchFailure::NoResults, notifier);
                return;
            }
            Err(err) => {
                Self::fail(session, FetchFailure::from(err), notifier);
                return;
            }
        };

        renderer.append(&page.items);
        session.loaded += page.items.len();
        session.total_hits = Some(page.total_hits);
        session.total_available = Some(page.total_available);
        if session.current_page == 1 {
            notifier.success(&found_message(page.total_hits));
        }
        session.current_page += 1;

        let consumed = u64::from(session.current_page - 1);
        let last_page = page_count(page.total_hits, session.page_size);
        crate::perf::log_event(
            "session.page",
            format!(
                "token={} page={} items={} total_hits={} last_page={last_page}",
                session.token,
                consumed,
                page.items.len(),
                page.total_hits
            ),
        );
        if consumed >= last_page {
            info!(token = %session.token, pages = consumed, "search results exhausted");
            session.status = SessionStatus::Exhausted;
            self.end_watch = Some(EndOfContentWatch::install(session.token));
        } else {
            session.status = SessionStatus::AwaitingTrigger;
            self.sentinel.bind(self.proximity);
        }
    }

    fn fail<N>(session: &mut SearchSession, failure: FetchFailure, notifier: &mut N)
    where
        N: NotificationSink + ?Sized,
    {
        info!(token = %session.token, page = session.current_page, error = %failure, "search failed");
        session.status = SessionStatus::Failed;
        notifier.failure(&failure.to_string());
    }
}
