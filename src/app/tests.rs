use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::search::{ImageItem, ResultPage, SearchError};
use crate::session::{
    END_OF_RESULTS_MESSAGE, FetchOutcome, FetchRequest, NO_RESULTS_MESSAGE, PaginationController,
    SessionStatus,
};

use super::event_loop::Debouncer;
use super::{App, Message, Model, ToastLevel, update};

const PAGE_SIZE: u32 = 40;

fn create_test_model() -> Model {
    Model::new((80, 24)).with_controller(PaginationController::new(PAGE_SIZE, 10))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn wheel(kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: 10,
        row: 10,
        modifiers: KeyModifiers::NONE,
    }
}

fn page_for(request: &FetchRequest, count: usize, total_hits: u64) -> FetchOutcome {
    let items = (0..count)
        .map(|i| ImageItem {
            tags: format!("{} {}", request.search.query, i),
            ..ImageItem::default()
        })
        .collect();
    FetchOutcome {
        ticket: request.ticket,
        result: Ok(ResultPage {
            items,
            total_hits,
            total_available: total_hits,
        }),
    }
}

/// Submit `query` and land a full first page out of `total_hits`.
fn model_with_first_page(query: &str, total_hits: u64) -> Model {
    let mut model = update(create_test_model(), Message::SubmitQuery(query.to_string()));
    let request = model.poll_sentinel().unwrap();
    model.apply_outcome(page_for(&request, PAGE_SIZE as usize, total_hits));
    model
}

#[test]
fn test_model_reserves_chrome_rows() {
    let model = create_test_model();
    assert_eq!(model.viewport.height(), 22);
    assert_eq!(model.viewport.width(), 80);
}

#[test]
fn test_resize_updates_viewport() {
    let model = update(create_test_model(), Message::Resize(100, 40));
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), 38);
}

#[test]
fn test_submit_query_closes_search_bar_and_starts_session() {
    let mut model = create_test_model();
    model.search_input = Some("cats".to_string());
    let model = update(model, Message::SubmitQuery("cats".to_string()));

    assert_eq!(model.search_input, None);
    assert_eq!(model.current_query(), Some("cats"));
    assert_eq!(model.status(), SessionStatus::AwaitingTrigger);
}

#[test]
fn test_start_search_prefills_current_query() {
    let model = update(create_test_model(), Message::StartSearch);
    assert_eq!(model.search_input.as_deref(), Some(""));

    let model = update(model, Message::SubmitQuery("sunset".to_string()));
    let model = update(model, Message::StartSearch);
    assert_eq!(model.search_input.as_deref(), Some("sunset"));

    let model = update(model, Message::CancelSearch);
    assert_eq!(model.search_input, None);
    assert_eq!(model.current_query(), Some("sunset"));
}

#[test]
fn test_first_page_renders_and_announces_total() {
    let model = model_with_first_page("cats", 500);

    assert_eq!(model.gallery.items().len(), PAGE_SIZE as usize);
    assert_eq!(
        model.viewport.total_lines(),
        PAGE_SIZE as usize * crate::gallery::CARD_HEIGHT
    );
    assert_eq!(
        model.active_toast(),
        Some(("Hooray! We found 500 images.", ToastLevel::Success))
    );
}

#[test]
fn test_scrolling_near_the_end_requests_next_page() {
    let mut model = model_with_first_page("cats", 500);
    assert!(model.poll_sentinel().is_none());

    model = update(model, Message::GoToBottom);
    let request = model.poll_sentinel().unwrap();
    assert_eq!(request.search.page, 2);
    assert_eq!(model.status(), SessionStatus::Fetching);

    model.apply_outcome(page_for(&request, PAGE_SIZE as usize, 500));
    assert_eq!(model.gallery.items().len(), 2 * PAGE_SIZE as usize);
    assert_eq!(model.status(), SessionStatus::AwaitingTrigger);
}

#[test]
fn test_new_query_discards_stale_page() {
    let mut model = update(create_test_model(), Message::SubmitQuery("cats".to_string()));
    let stale = model.poll_sentinel().unwrap();

    model = update(model, Message::SubmitQuery("dogs".to_string()));
    model.apply_outcome(page_for(&stale, 5, 5));

    assert!(model.gallery.is_empty());
    assert_eq!(model.active_toast(), None);
    assert_eq!(model.current_query(), Some("dogs"));
}

#[test]
fn test_resubmitting_same_query_scrolls_to_top_and_clears() {
    let mut model = model_with_first_page("cats", 500);
    model = update(model, Message::PageDown);
    assert!(model.viewport.offset() > 0);

    model = update(model, Message::SubmitQuery("cats".to_string()));
    assert_eq!(model.viewport.offset(), 0);
    assert!(model.gallery.is_empty());
}

#[test]
fn test_empty_first_page_shows_failure_toast() {
    let mut model = update(create_test_model(), Message::SubmitQuery("xyzzy".to_string()));
    let request = model.poll_sentinel().unwrap();
    model.apply_outcome(page_for(&request, 0, 0));

    assert_eq!(model.status(), SessionStatus::Failed);
    assert_eq!(
        model.active_toast(),
        Some((NO_RESULTS_MESSAGE, ToastLevel::Failure))
    );
}

#[test]
fn test_transport_error_shows_failure_toast() {
    let mut model = update(create_test_model(), Message::SubmitQuery("cats".to_string()));
    let request = model.poll_sentinel().unwrap();
    model.apply_outcome(FetchOutcome {
        ticket: request.ticket,
        result: Err(SearchError::Status(503)),
    });

    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Failure);
    assert!(message.starts_with("Search failed:"), "message: {message}");
}

#[test]
fn test_end_notice_after_scrolling_exhausted_results() {
    let mut model = model_with_first_page("dogs", u64::from(PAGE_SIZE));
    assert_eq!(model.status(), SessionStatus::Exhausted);
    // The watch records where the view sits before any scroll
    assert!(model.poll_sentinel().is_none());
    assert_eq!(
        model.active_toast(),
        Some(("Hooray! We found 40 images.", ToastLevel::Success))
    );

    model = update(model, Message::GoToBottom);
    assert!(model.poll_sentinel().is_none());
    assert_eq!(
        model.active_toast(),
        Some((END_OF_RESULTS_MESSAGE, ToastLevel::Info))
    );
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert_eq!(model.active_toast(), None);
}

#[test]
fn test_help_toggle_and_quit() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_scroll_keys_only_when_scrollable() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Char('j')), &model), None);

    let model = model_with_first_page("cats", 500);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::ScrollDown(1))
    );
    assert_eq!(App::handle_key(key(KeyCode::Up), &model), None);
    assert_eq!(App::handle_key(ctrl('d'), &model), Some(Message::HalfPageDown));
    assert_eq!(App::handle_key(key(KeyCode::Char('G')), &model), Some(Message::GoToBottom));
    assert_eq!(App::handle_key(key(KeyCode::Char(' ')), &model), Some(Message::PageDown));
}

#[test]
fn test_slash_opens_search_and_keys_edit_query() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('/')), &model),
        Some(Message::StartSearch)
    );

    let mut model = update(model, Message::StartSearch);
    model.search_input = Some("ca".to_string());
    assert_eq!(
        App::handle_key(key(KeyCode::Char('t')), &model),
        Some(Message::SearchInput("cat".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::SearchInput("caq".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Backspace), &model),
        Some(Message::SearchInput("c".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::SubmitQuery("ca".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::CancelSearch)
    );
    assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
}

#[test]
fn test_any_key_closes_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x')), &model),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_r_resubmits_current_query() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Char('r')), &model), None);

    let model = update(model, Message::SubmitQuery("cats".to_string()));
    assert_eq!(
        App::handle_key(key(KeyCode::Char('r')), &model),
        Some(Message::SubmitQuery("cats".to_string()))
    );
}

#[test]
fn test_mouse_wheel_scrolls_results() {
    let model = model_with_first_page("cats", 500);
    assert_eq!(
        App::handle_mouse(wheel(MouseEventKind::ScrollDown), &model),
        Some(Message::ScrollDown(3))
    );
    assert_eq!(App::handle_mouse(wheel(MouseEventKind::ScrollUp), &model), None);

    let model = update(model, Message::ToggleHelp);
    assert_eq!(App::handle_mouse(wheel(MouseEventKind::ScrollDown), &model), None);
}

#[test]
fn test_resize_event_is_debounced() {
    let model = create_test_model();
    let mut debouncer = Debouncer::new(100);
    let msg = App::handle_event(&Event::Resize(120, 40), &model, 0, &mut debouncer);
    assert_eq!(msg, None);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(100), Some((120, 40)));
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model();
    let mut debouncer = Debouncer::new(100);
    let mut release = key(KeyCode::Char('q'));
    release.kind = KeyEventKind::Release;
    assert_eq!(
        App::handle_event(&Event::Key(release), &model, 0, &mut debouncer),
        None
    );
}

#[test]
fn test_paste_appends_to_search_input() {
    let mut model = create_test_model();
    let mut debouncer = Debouncer::new(100);
    let paste = Event::Paste("beach\n".to_string());
    assert_eq!(App::handle_event(&paste, &model, 0, &mut debouncer), None);

    model.search_input = Some("sunset ".to_string());
    assert_eq!(
        App::handle_event(&paste, &model, 0, &mut debouncer),
        Some(Message::SearchInput("sunset beach".to_string()))
    );
}
