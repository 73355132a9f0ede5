use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::layout::{BoardLayout, COLUMNS_PER_CELL};
use crate::game::{Cell, CollisionType, Direction, FoodKind, GameEngine, GameOverReason, GamePhase};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame and report where the board ended up
    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &GameEngine,
        metrics: &GameMetrics,
    ) -> BoardLayout {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(engine, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = self.board_area(chunks[1], engine);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(board_area);
        frame.render_widget(self.render_grid(engine).block(block), board_area);

        let overlay = match engine.phase() {
            GamePhase::Start => Some(self.render_start_screen(engine)),
            GamePhase::Paused => Some(self.render_paused()),
            GamePhase::GameOver => Some(self.render_game_over(engine)),
            GamePhase::Playing => None,
        };
        if let Some((popup, height)) = overlay {
            let popup_area = centered(board_area, 36, height);
            frame.render_widget(Clear, popup_area);
            frame.render_widget(popup, popup_area);
        }

        let controls = self.render_controls(engine);
        frame.render_widget(controls, chunks[2]);

        BoardLayout::new(inner, *engine.grid())
    }

    fn board_area(&self, area: Rect, engine: &GameEngine) -> Rect {
        let grid = engine.grid();
        let width = (grid.width as u16).saturating_mul(COLUMNS_PER_CELL).saturating_add(2);
        let height = (grid.height as u16).saturating_add(2);
        centered(area, width, height)
    }

    fn render_grid(&self, engine: &GameEngine) -> Paragraph<'_> {
        let grid = engine.grid();
        let snake = engine.snake();
        let food = engine.food();
        let marker = engine
            .pointer()
            .filter(|_| engine.phase() == GamePhase::Playing)
            .map(|point| grid.cell_at(point));
        let mut lines = Vec::with_capacity(grid.height);

        for y in 0..grid.height as i32 {
            let mut spans = Vec::with_capacity(grid.width);

            for x in 0..grid.width as i32 {
                let cell = Cell::new(x, y);

                let span = if cell == snake.head() {
                    Span::styled(
                        head_glyph(snake.direction()),
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snake.occupies(cell) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if let Some(food) = food.filter(|food| food.cell == cell) {
                    let (glyph, color) = food_glyph(food.kind);
                    Span::styled(
                        glyph,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else if marker == Some(cell) {
                    Span::styled("+ ", Style::default().fg(Color::Gray))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                engine.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                engine.snake().len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_screen(&self, engine: &GameEngine) -> (Paragraph<'_>, u16) {
        let steering = if engine.config().tap_zones {
            "tap the board or swipe"
        } else {
            "follow with the mouse or drag"
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Arrow keys or WASD to steer"),
            Line::from(steering),
            Line::from(""),
            key_hint("Space", Color::Green, " to start, ", "Q", " to exit"),
        ];

        (popup(text, Color::Green), 9)
    }

    fn render_paused(&self) -> (Paragraph<'_>, u16) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key_hint("P", Color::Yellow, " to resume, ", "Q", " to quit"),
        ];

        (popup(text, Color::Yellow), 6)
    }

    fn render_game_over(&self, engine: &GameEngine) -> (Paragraph<'_>, u16) {
        let reason = match engine.game_over_reason() {
            Some(GameOverReason::Collision(CollisionType::Wall)) => "Hit the wall",
            Some(GameOverReason::Collision(CollisionType::SelfCollision)) => "Bit your own tail",
            Some(GameOverReason::BoardFull) => "Board full, nothing left to eat",
            None => "",
        };
        let final_score = engine.final_score().unwrap_or(engine.score());

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            key_hint("C", Color::Green, " to play again or ", "Q", " to quit"),
        ];

        (popup(text, Color::Red), 9)
    }

    fn render_controls(&self, engine: &GameEngine) -> Paragraph<'_> {
        let pointer = if engine.config().tap_zones {
            "tap/swipe"
        } else {
            "mouse/drag"
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled(pointer, Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn food_glyph(kind: FoodKind) -> (&'static str, Color) {
    match kind {
        FoodKind::Apple => ("● ", Color::Red),
        FoodKind::Carrot => ("♦ ", Color::Rgb(255, 140, 0)),
        FoodKind::Grapes => ("♣ ", Color::Magenta),
        FoodKind::Banana => ("◗ ", Color::Yellow),
        FoodKind::Cherry => ("♥ ", Color::LightRed),
        FoodKind::Orange => ("◉ ", Color::Rgb(255, 165, 0)),
    }
}

fn key_hint<'a>(
    first: &'a str,
    first_color: Color,
    middle: &'a str,
    second: &'a str,
    tail: &'a str,
) -> Line<'a> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Gray)),
        Span::styled(
            first,
            Style::default().fg(first_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(middle, Style::default().fg(Color::Gray)),
        Span::styled(
            second,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(tail, Style::default().fg(Color::Gray)),
    ])
}

fn popup(text: Vec<Line<'_>>, border: Color) -> Paragraph<'_> {
    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw(engine: &GameEngine) -> (BoardLayout, String) {
        let (layout, buffer) = draw_buffer(engine);
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        (layout, text)
    }

    fn draw_buffer(engine: &GameEngine) -> (BoardLayout, Buffer) {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        let mut layout = None;

        terminal
            .draw(|frame| layout = Some(renderer.render(frame, engine, &metrics)))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        (layout.unwrap(), buffer)
    }

    #[test]
    fn test_board_layout_matches_grid() {
        let engine = GameEngine::new(GameConfig::default());
        let (layout, _) = draw(&engine);

        assert_eq!(layout.area().width, 60);
        assert_eq!(layout.area().height, 20);
    }

    #[test]
    fn test_start_screen_shown() {
        let engine = GameEngine::new(GameConfig::default());
        let (_, text) = draw(&engine);
        assert!(text.contains("SNAKE"));
    }

    #[test]
    fn test_head_points_along_heading() {
        let mut engine = GameEngine::new(GameConfig::default());
        engine.start();
        let (_, text) = draw(&engine);

        assert!(text.contains('▶'));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_pointer_marker_drawn_while_playing() {
        let mut engine = GameEngine::new(GameConfig::default());
        engine.start();
        let row = if engine.food().map(|food| food.cell) == Some(Cell::new(15, 16)) {
            17
        } else {
            16
        };
        let (_, text) = draw(&engine);
        assert!(!text.contains('+'));

        let target = engine.grid().cell_center(Cell::new(15, row));
        engine.pointer_move(target);
        let (layout, buffer) = draw_buffer(&engine);
        let area = layout.area();
        let column = area.x + 15 * COLUMNS_PER_CELL;
        assert_eq!(buffer[(column, area.y + row as u16)].symbol(), "+");

        engine.toggle_pause();
        let (_, text) = draw(&engine);
        assert!(!text.contains('+'));
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered(area, 40, 4);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }
}
