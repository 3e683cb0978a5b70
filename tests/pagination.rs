//! End-to-end paging through the app model with a real fetch worker.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use pixscroll::app::{Message, Model, ToastLevel, update};
use pixscroll::search::{FetchWorker, ImageItem, ImageSearchService, ResultPage, SearchError, SearchRequest};
use pixscroll::session::{PaginationController, SessionStatus};

/// In-memory index that serves `total` hits for any query.
struct Catalog {
    total: usize,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl Catalog {
    fn new(total: usize) -> Self {
        Self {
            total,
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }
}

impl ImageSearchService for Catalog {
    fn search(&self, request: &SearchRequest) -> Result<ResultPage, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SearchError::Status(500));
        }
        if request.query == "slow" {
            thread::sleep(Duration::from_millis(150));
        }
        let size = request.page_size as usize;
        let start = (request.page as usize - 1) * size;
        let end = (start + size).min(self.total);
        let items = (start..end)
            .map(|i| ImageItem {
                tags: format!("{} {i}", request.query),
                ..ImageItem::default()
            })
            .collect();
        Ok(ResultPage {
            items,
            total_hits: self.total as u64,
            total_available: self.total as u64,
        })
    }
}

fn create_model() -> Model {
    Model::new((80, 24)).with_controller(PaginationController::new(40, 10))
}

fn submit(model: Model, query: &str) -> Model {
    update(model, Message::SubmitQuery(query.to_string()))
}

/// Keep scrolling to the bottom until no more pages are requested.
fn scroll_until_idle(model: &mut Model, worker: &mut FetchWorker) -> usize {
    let mut fetches = 0;
    for _ in 0..50 {
        *model = update(std::mem::take(model), Message::GoToBottom);
        let Some(request) = model.poll_sentinel() else {
            break;
        };
        worker.dispatch(request);
        fetches += 1;
        let outcome = worker
            .wait_outcome(Duration::from_secs(5))
            .expect("outcome");
        model.apply_outcome(outcome);
    }
    fetches
}

#[test]
fn test_scrolling_pages_through_every_result_once() {
    let catalog = Arc::new(Catalog::new(125));
    let mut worker = FetchWorker::new(catalog.clone());
    let mut model = submit(create_model(), "mountains");

    let fetches = scroll_until_idle(&mut model, &mut worker);

    assert_eq!(fetches, 4);
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 4);
    assert_eq!(model.gallery.items().len(), 125);
    assert_eq!(model.gallery.items()[124].tags, "mountains 124");
    assert_eq!(model.status(), SessionStatus::Exhausted);
    assert_eq!(
        model.active_toast(),
        Some(("Hooray! We found 125 images.", ToastLevel::Success))
    );
}

#[test]
fn test_new_query_wins_over_slow_previous_query() {
    let catalog = Arc::new(Catalog::new(10));
    let mut worker = FetchWorker::new(catalog.clone());

    let mut model = submit(create_model(), "slow");
    let slow = model.poll_sentinel().unwrap();
    worker.dispatch(slow);

    model = submit(model, "fast");
    let fast = model.poll_sentinel().unwrap();
    worker.dispatch(fast);

    for _ in 0..2 {
        let outcome = worker
            .wait_outcome(Duration::from_secs(5))
            .expect("outcome");
        model.apply_outcome(outcome);
    }

    assert_eq!(worker.in_flight(), 0);
    assert_eq!(model.gallery.items().len(), 10);
    assert!(
        model
            .gallery
            .items()
            .iter()
            .all(|item| item.tags.starts_with("fast "))
    );
    assert_eq!(model.current_query(), Some("fast"));
}

#[test]
fn test_failed_session_stops_until_resubmitted() {
    let catalog = Arc::new(Catalog::new(30));
    catalog.fail_next.store(true, Ordering::SeqCst);
    let mut worker = FetchWorker::new(catalog.clone());

    let mut model = submit(create_model(), "flaky");
    assert_eq!(scroll_until_idle(&mut model, &mut worker), 1);
    assert_eq!(model.status(), SessionStatus::Failed);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Failure);
    assert!(message.contains("500"), "message: {message}");

    // Further scrolling does not retry on its own
    assert_eq!(scroll_until_idle(&mut model, &mut worker), 0);

    model = submit(model, "flaky");
    assert_eq!(scroll_until_idle(&mut model, &mut worker), 1);
    assert_eq!(model.gallery.items().len(), 30);
    assert_eq!(model.status(), SessionStatus::Exhausted);
}

#[test]
fn test_empty_result_set_fails_without_rendering() {
    let catalog = Arc::new(Catalog::new(0));
    let mut worker = FetchWorker::new(catalog);

    let mut model = submit(create_model(), "xyzzy");
    assert_eq!(scroll_until_idle(&mut model, &mut worker), 1);

    assert!(model.gallery.is_empty());
    assert_eq!(model.status(), SessionStatus::Failed);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Failure)
    );
}
