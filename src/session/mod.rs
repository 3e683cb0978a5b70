//! Search sessions and infinite-scroll pagination.
//!
//! - [`PaginationController`]: the per-query state machine
//! - [`ViewportSentinel`]: emits a signal when the load boundary nears the viewport
//! - [`ResultRenderer`] / [`NotificationSink`]: where the controller's output goes
//!
//! A session moves `Idle → AwaitingTrigger → Fetching → (AwaitingTrigger |
//! Exhausted | Failed)`. Every submission bumps a [`SessionToken`]; fetch
//! outcomes carry the token they were issued under and are ignored once it
//! is no longer current.

mod controller;
mod ports;
mod sentinel;

pub use controller::{
    DEFAULT_PAGE_SIZE, DEFAULT_PROXIMITY, END_OF_RESULTS_MESSAGE, FetchFailure, FetchOutcome,
    FetchRequest, FetchTicket, NO_RESULTS_MESSAGE, PaginationController, SearchSession,
    SessionStatus, SessionToken, found_message, page_count,
};
pub use ports::{NotificationSink, ResultRenderer};
pub use sentinel::{BindingId, SentinelSignal, ViewportSentinel};
