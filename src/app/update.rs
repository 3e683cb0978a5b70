use crate::app::Model;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GoToTop,
    GoToBottom,

    // Search bar
    /// Open the search bar, prefilled with the current query
    StartSearch,
    /// Replace the search bar text
    SearchInput(String),
    /// Submit a query, starting a new session
    SubmitQuery(String),
    /// Close the search bar without searching
    CancelSearch,

    // UI
    ToggleHelp,
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    Redraw,
    Quit,
}

/// Apply `msg` to `model` and return the new state.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::StartSearch => {
            let prefill = model.current_query().map(str::to_owned).unwrap_or_default();
            model.search_input = Some(prefill);
        }
        Message::SearchInput(text) => model.search_input = Some(text),
        Message::SubmitQuery(query) => {
            model.search_input = None;
            model.submit_query(&query);
        }
        Message::CancelSearch => model.search_input = None,

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }
    model
}
