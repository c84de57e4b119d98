//! Raw terminal input to scroll steps.

use catalog_core::ScrollDirection;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

/// A scroll request: move `steps` times in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScrollRequest {
    pub direction: ScrollDirection,
    pub steps: usize,
}

impl ScrollRequest {
    pub(crate) fn one(direction: ScrollDirection) -> Self {
        Self {
            direction,
            steps: 1,
        }
    }
}

/// Steps that move the window by roughly one screenful.
pub(crate) fn page_steps(display_count: usize, step_size: usize) -> usize {
    (display_count / step_size.max(1)).max(1)
}

/// Mouse wheel and paging keys. Arrow keys move the row cursor and are
/// handled by the table.
pub(crate) fn translate(event: &Event, page_steps: usize) -> Option<ScrollRequest> {
    match event {
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::ScrollDown => Some(ScrollRequest::one(ScrollDirection::Forward)),
            MouseEventKind::ScrollUp => Some(ScrollRequest::one(ScrollDirection::Backward)),
            _ => None,
        },
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => {
            let direction = match code {
                KeyCode::PageDown => ScrollDirection::Forward,
                KeyCode::PageUp => ScrollDirection::Backward,
                _ => return None,
            };
            Some(ScrollRequest {
                direction,
                steps: page_steps,
            })
        }
        _ => None,
    }
}
