use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Message, Model};

use super::event_loop::Debouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut Debouncer<(u16, u16)>,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => {
                crate::perf::log_event(
                    "event.resize.queue",
                    format!("width={width} height={height}"),
                );
                resize_debouncer.queue((*width, *height), now_ms);
                None
            }
            Event::Paste(text) => model.search_input.as_ref().map(|input| {
                let mut next = input.clone();
                next.push_str(text.trim_end_matches(['\r', '\n']));
                Message::SearchInput(next)
            }),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(input) = model.search_input.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelSearch),
                KeyCode::Enter => Some(Message::SubmitQuery(input.clone())),
                KeyCode::Backspace => {
                    let mut next = input.clone();
                    next.pop();
                    Some(Message::SearchInput(next))
                }
                KeyCode::Char('u') if ctrl => Some(Message::SearchInput(String::new())),
                KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                    let mut next = input.clone();
                    next.push(c);
                    Some(Message::SearchInput(next))
                }
                _ => None,
            };
        }

        let viewport = &model.viewport;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                viewport.can_scroll_down().then_some(Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up => viewport.can_scroll_up().then_some(Message::ScrollUp(1)),
            KeyCode::Char('d') if ctrl => Some(Message::HalfPageDown),
            KeyCode::Char('u') if ctrl => Some(Message::HalfPageUp),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            KeyCode::Char('/' | 's') => Some(Message::StartSearch),
            KeyCode::Char('r') => model
                .current_query()
                .map(|query| Message::SubmitQuery(query.to_owned())),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('l') if ctrl => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.search_input.is_some() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::ScrollUp => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(WHEEL_LINES)),
            _ => None,
        }
    }
}
