use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::game::{EndCause, GameConfig, GameState, Phase, Position};
use crate::metrics::GameMetrics;

use super::glyphs::{GlyphSet, GlyphStyle};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const GAME_OVER_WIDTH: u16 = 36;
const GAME_OVER_HEIGHT: u16 = 12;

/// Everything one frame shows
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub metrics: &'a GameMetrics,
    pub paused: bool,
}

/// Columns and rows of a bordered grid, two columns per cell
fn grid_size(width: usize, height: usize) -> (u16, u16) {
    let columns = width.saturating_mul(2).saturating_add(2);
    let rows = height.saturating_add(2);
    (
        u16::try_from(columns).unwrap_or(u16::MAX),
        u16::try_from(rows).unwrap_or(u16::MAX),
    )
}

/// Smallest terminal (columns, rows) that fits the grid or the game-over
/// panel, with header and footer
pub fn required_size(config: &GameConfig) -> (u16, u16) {
    let (columns, rows) = grid_size(config.grid_width, config.grid_height);
    (
        columns.max(GAME_OVER_WIDTH),
        rows.max(GAME_OVER_HEIGHT)
            .saturating_add(HEADER_HEIGHT + FOOTER_HEIGHT),
    )
}

pub struct Renderer {
    glyphs: GlyphSet,
}

impl Renderer {
    pub fn new(style: GlyphStyle) -> Self {
        Self {
            glyphs: style.glyphs(),
        }
    }

    pub fn render(&self, frame: &mut Frame, view: &FrameView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Game area
                Constraint::Length(FOOTER_HEIGHT), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let bounds = view.state.bounds();
        let (grid_width, grid_height) = grid_size(bounds.width, bounds.height);

        match view.state.phase() {
            Phase::Running => {
                let area = centered(chunks[1], grid_width, grid_height);
                frame.render_widget(self.render_grid(view.state, view.paused), area);
            }
            Phase::GameOver(cause) => {
                let area = centered(
                    chunks[1],
                    grid_width.max(GAME_OVER_WIDTH),
                    grid_height.max(GAME_OVER_HEIGHT),
                );
                frame.render_widget(self.render_game_over(view.state, cause), area);
            }
        }

        frame.render_widget(self.render_controls(view), chunks[2]);
    }

    fn cell<'a>(&self, state: &GameState, pos: Position) -> Span<'a> {
        let snake = state.snake();

        if pos == snake.head() {
            Span::styled(
                self.glyphs.head,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.is_occupied_by_snake(pos) {
            Span::styled(self.glyphs.body, Style::default().fg(Color::Green))
        } else if state.food() == Some(pos) {
            Span::styled(
                self.glyphs.food,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(self.glyphs.empty, Style::default().fg(Color::DarkGray))
        }
    }

    fn render_grid(&self, state: &GameState, paused: bool) -> Paragraph<'_> {
        let bounds = state.bounds();
        let lines: Vec<Line> = (0..bounds.height as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..bounds.width as i32)
                    .map(|x| self.cell(state, Position::new(x, y)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if paused { " Paused " } else { " Snake " };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(self.glyphs.border)
                .border_style(Style::default().fg(if paused {
                    Color::Yellow
                } else {
                    Color::White
                }))
                .title(title),
        )
    }

    fn render_stats(&self, view: &FrameView) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                view.state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(view.state.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(view.state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, cause: EndCause) -> Paragraph<'_> {
        let (headline, color) = match cause {
            EndCause::BoardFull => ("YOU WIN", Color::Green),
            EndCause::Collision(_) => ("GAME OVER", Color::Red),
        };
        let new_record = state.score > 0 && state.score == state.high_score;

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                format!("The snake {}", cause.describe()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.high_score.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        if new_record {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(self.glyphs.border)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, view: &FrameView) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
        ];
        spans.push(Span::raw(if view.paused {
            " to resume | "
        } else {
            " to pause | "
        }));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

/// A `width` x `height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Bounds, Direction, GameEngine, Snake};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn minimum_size(state: &GameState) -> (u16, u16) {
        required_size(&GameConfig::new(
            state.bounds().width,
            state.bounds().height,
        ))
    }

    fn draw(state: &GameState, paused: bool, style: GlyphStyle) -> Buffer {
        let (width, height) = minimum_size(state);
        draw_sized(state, paused, style, width.max(60), height)
    }

    fn draw_sized(
        state: &GameState,
        paused: bool,
        style: GlyphStyle,
        width: u16,
        height: u16,
    ) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let renderer = Renderer::new(style);
        let metrics = GameMetrics::new();
        let view = FrameView {
            state,
            metrics: &metrics,
            paused,
        };
        terminal.draw(|frame| renderer.render(frame, &view)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_required_size() {
        assert_eq!(required_size(&GameConfig::default()), (42, 28));
        // Small grids are padded out to the game-over panel
        assert_eq!(required_size(&GameConfig::new(10, 5)), (36, 18));
        assert_eq!(required_size(&GameConfig::new(30, 12)), (62, 20));
        assert_eq!(
            required_size(&GameConfig::new(usize::MAX, 10)),
            (u16::MAX, 18)
        );
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 30, 30), area);
    }

    #[test]
    fn test_running_frame_shows_snake_and_food() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = GameState::new(snake, GameConfig::small().bounds());
        state.place_food(Position::new(1, 1));
        state.score = 30;

        let text = screen_text(&draw(&state, false, GlyphStyle::Ascii));

        assert!(text.contains("Score: 30"));
        assert!(text.contains("Snake"));
        assert!(text.contains("o o O"));
        assert!(text.contains('*'));
        assert!(text.contains("to pause"));
    }

    #[test]
    fn test_paused_frame() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = GameState::new(snake, GameConfig::small().bounds());

        let text = screen_text(&draw(&state, true, GlyphStyle::Unicode));
        assert!(text.contains("Paused"));
        assert!(text.contains("to resume"));
    }

    #[test]
    fn test_game_over_frame() {
        let mut engine = GameEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(3));
        let snake = Snake::new(Position::new(9, 5), Direction::Right, 3);
        let mut state = GameState::new(snake, GameConfig::small().bounds());
        state.score = 20;
        state.high_score = 50;
        engine.step(&mut state, Action::Continue);
        assert!(!state.is_alive());

        let text = screen_text(&draw(&state, false, GlyphStyle::Unicode));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("hit the wall"));
        assert!(text.contains("Final Score: 20"));
        assert!(text.contains("High Score: 50"));
        assert!(!text.contains("New high score!"));
    }

    #[test]
    fn test_game_over_panel_fits_minimum_terminal() {
        let mut engine = GameEngine::with_rng(GameConfig::new(5, 3), StdRng::seed_from_u64(3));
        let snake = Snake::new(Position::new(4, 1), Direction::Right, 3);
        let mut state = GameState::new(snake, Bounds::new(5, 3));
        state.score = 10;
        state.high_score = 10;
        engine.step(&mut state, Action::Continue);
        assert!(!state.is_alive());

        let (width, height) = minimum_size(&state);
        let text = screen_text(&draw_sized(&state, false, GlyphStyle::Ascii, width, height));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("New high score!"));
        assert!(text.contains("Press R to restart or Q to quit"));
    }
}
