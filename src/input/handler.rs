use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::resolver::key_direction;
use crate::game::{Direction, Point};
use crate::render::BoardLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Start,
    Restart,
    Pause,
    /// Leave the current game, or the program when already on the start screen
    Quit,
    /// Leave the program immediately
    Exit,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pointer moved over the board
    Follow(Point),
    /// Button pressed on the board
    Tap(Point),
    /// Button pressed and released far enough apart to be a gesture candidate
    Swipe { start: Point, end: Point },
    None,
}

/// Translates terminal events into game input
pub struct InputHandler {
    press_origin: Option<Point>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self { press_origin: None }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Exit;
        }

        if let Some(direction) = key_direction(key.code) {
            return KeyAction::Steer(direction);
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Start,
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Restart
            }
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Pause,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// Map a mouse event onto the board.
    ///
    /// Presses and moves only count over the board. A release anywhere
    /// completes the gesture started by the last press on the board.
    pub fn handle_mouse_event(&mut self, event: MouseEvent, layout: &BoardLayout) -> PointerAction {
        let on_board = layout.contains(event.column, event.row);
        let point = layout.to_point(event.column, event.row);

        match event.kind {
            MouseEventKind::Moved if on_board => PointerAction::Follow(point),
            MouseEventKind::Down(MouseButton::Left) if on_board => {
                self.press_origin = Some(point);
                PointerAction::Tap(point)
            }
            MouseEventKind::Up(MouseButton::Left) => match self.press_origin.take() {
                Some(start) => PointerAction::Swipe { start, end: point },
                None => PointerAction::None,
            },
            _ => PointerAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Grid;
    use ratatui::layout::Rect;

    fn layout() -> BoardLayout {
        // 30x20 board drawn from column 10, row 5
        BoardLayout::new(Rect::new(10, 5, 60, 20), Grid::new(30, 20, 20))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(up), KeyAction::Steer(Direction::Up));

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(left),
            KeyAction::Steer(Direction::Left)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(s), KeyAction::Steer(Direction::Down));

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_command_keys() {
        let handler = InputHandler::new();
        let press = |code| handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(press(KeyCode::Char(' ')), KeyAction::Start);
        assert_eq!(press(KeyCode::Enter), KeyAction::Start);
        assert_eq!(press(KeyCode::Char('c')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Pause);
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Exit);
    }

    #[test]
    fn test_mouse_move_follows_on_board_only() {
        let mut handler = InputHandler::new();
        let layout = layout();

        let over = handler.handle_mouse_event(mouse(MouseEventKind::Moved, 12, 6), &layout);
        assert_eq!(over, PointerAction::Follow(Point::new(25.0, 30.0)));

        let outside = handler.handle_mouse_event(mouse(MouseEventKind::Moved, 2, 2), &layout);
        assert_eq!(outside, PointerAction::None);
    }

    #[test]
    fn test_press_release_is_swipe() {
        let mut handler = InputHandler::new();
        let layout = layout();

        let down = handler.handle_mouse_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 20, 10),
            &layout,
        );
        assert!(matches!(down, PointerAction::Tap(_)));

        let up = handler.handle_mouse_event(
            mouse(MouseEventKind::Up(MouseButton::Left), 40, 10),
            &layout,
        );
        match up {
            PointerAction::Swipe { start, end } => {
                assert_eq!(end.x - start.x, 200.0);
                assert_eq!(end.y, start.y);
            }
            other => panic!("expected swipe, got {other:?}"),
        }

        // The gesture is consumed
        let again = handler.handle_mouse_event(
            mouse(MouseEventKind::Up(MouseButton::Left), 40, 10),
            &layout,
        );
        assert_eq!(again, PointerAction::None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut handler = InputHandler::new();
        let up = handler.handle_mouse_event(
            mouse(MouseEventKind::Up(MouseButton::Left), 20, 10),
            &layout(),
        );
        assert_eq!(up, PointerAction::None);
    }
}
