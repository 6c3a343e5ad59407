use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionKind, GameOverReason, GameSnapshot, Position};
use crate::metrics::GameMetrics;

/// Which page of the UI is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title page with the stored high score
    Intro,
    /// Board drawn, controls listed, waiting for a key before the first tick
    Ready,
    Playing,
    GameOver,
}

/// Best-score figures the header and game-over panel display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    pub high_score: u32,
    /// The game just finished beat the previous high score
    pub new_record: bool,
}

pub const HEAD_SYMBOL: char = 'O';
pub const BODY_SYMBOL: char = 'o';
pub const FOOD_SYMBOL: char = '*';
pub const WALL_SYMBOL: char = '#';
pub const EMPTY_SYMBOL: char = ' ';

/// Symbol for one board cell. The head is told apart from the body here; the
/// board itself only knows `Cell::Body`.
pub fn cell_symbol(snapshot: &GameSnapshot, pos: Position) -> char {
    match snapshot.cell(pos) {
        Cell::Empty => EMPTY_SYMBOL,
        Cell::Body if snapshot.head() == Some(pos) => HEAD_SYMBOL,
        Cell::Body => BODY_SYMBOL,
        Cell::Food => FOOD_SYMBOL,
        Cell::Wall => WALL_SYMBOL,
    }
}

/// Board as plain text, one string per row
pub fn board_lines(snapshot: &GameSnapshot) -> Vec<String> {
    (0..snapshot.rows())
        .map(|row| {
            (0..snapshot.cols())
                .map(|col| cell_symbol(snapshot, Position::new(row as i32, col as i32)))
                .collect()
        })
        .collect()
}

fn symbol_style(symbol: char) -> Style {
    match symbol {
        HEAD_SYMBOL => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        BODY_SYMBOL => Style::default().fg(Color::Green),
        FOOD_SYMBOL => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        WALL_SYMBOL => Style::default().fg(Color::Gray),
        _ => Style::default(),
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
/// Terminal extent of `cells` board cells plus a border on each side
fn framed(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX).saturating_add(2)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        screen: Screen,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        scoreboard: Scoreboard,
    ) {
        if screen == Screen::Intro {
            let intro = self.render_intro(scoreboard);
            frame.render_widget(intro, frame.area());
            return;
        }

        let panel_height = match screen {
            Screen::Ready => 10,
            Screen::GameOver => 9,
            _ => 0,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),            // Header
                Constraint::Min(0),               // Board
                Constraint::Length(panel_height), // Instructions or game over
                Constraint::Length(1),            // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics, scoreboard);
        frame.render_widget(stats, chunks[0]);

        let board_area = centered(chunks[1], framed(snapshot.cols()), framed(snapshot.rows()));
        frame.render_widget(self.render_grid(snapshot), board_area);

        match screen {
            Screen::Ready => frame.render_widget(self.render_instructions(), chunks[2]),
            Screen::GameOver => {
                let game_over = self.render_game_over(snapshot, metrics, scoreboard);
                frame.render_widget(game_over, chunks[2])
            }
            _ => {}
        }

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let lines: Vec<Line> = board_lines(snapshot)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|symbol| Span::styled(symbol.to_string(), symbol_style(symbol)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_stats(
        &self,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        scoreboard: Scoreboard,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(format!("{:4}", snapshot.score), value),
                Span::raw("  |  "),
                Span::styled("Length: ", label),
                Span::styled(format!("{:3}", snapshot.snake_len()), value),
                Span::raw("  |  "),
                Span::styled("High Score: ", label),
                Span::styled(format!("{:4}", scoreboard.high_score), value),
                Span::raw("  |  "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_intro(&self, scoreboard: Scoreboard) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scoreboard.high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "ENTER",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_instructions(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![
            Line::from(Span::styled("CONTROLS", Style::default().fg(Color::Yellow))),
            Line::from(""),
            Line::from(vec![Span::styled("W or ↑", key), Span::raw("  move up")]),
            Line::from(vec![Span::styled("S or ↓", key), Span::raw("  move down")]),
            Line::from(vec![Span::styled("A or ←", key), Span::raw("  move left")]),
            Line::from(vec![Span::styled("D or →", key), Span::raw("  move right")]),
            Line::from(vec![Span::styled("Q", key), Span::raw("       quit")]),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to start...",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }

    fn render_game_over(
        &self,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        scoreboard: Scoreboard,
    ) -> Paragraph<'_> {
        let headline = match snapshot.game_over_reason() {
            Some(GameOverReason::BoardFilled) => "BOARD FILLED - YOU WIN",
            Some(GameOverReason::Collision(CollisionKind::SelfCollision)) => {
                "GAME OVER - you bit yourself"
            }
            Some(GameOverReason::Collision(_)) => "GAME OVER - you hit a wall",
            None => "GAME OVER",
        };

        let mut text = vec![
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scoreboard.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games Played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Session Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.best_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if scoreboard.new_record {
            text.push(Line::from(Span::styled(
                "*** NEW HIGH SCORE! ***",
                Style::default()
                    .fg(Color::Yellow)
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
            Span::styled(" to replay or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Layout, StateEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn sample_snapshot() -> std::sync::Arc<GameSnapshot> {
        let mut engine = StateEngine::new();
        engine
            .load_layout(
                Layout::new(
                    3,
                    5,
                    [Position::new(1, 2), Position::new(1, 1)],
                    Direction::Right,
                )
                .with_food(Position::new(0, 4))
                .with_walls([Position::new(2, 0)]),
            )
            .unwrap();
        engine.snapshot()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_board_symbols() {
        let snapshot = sample_snapshot();
        assert_eq!(board_lines(&snapshot), vec!["    *", " oO  ", "#    "]);
    }

    #[test]
    fn test_board_lines_have_fixed_size() {
        let snapshot = sample_snapshot();
        let lines = board_lines(&snapshot);
        assert_eq!(lines.len(), snapshot.rows());
        assert!(lines.iter().all(|line| line.chars().count() == snapshot.cols()));
    }

    #[test]
    fn test_uninitialized_board_is_blank() {
        assert!(board_lines(&GameSnapshot::uninitialized()).is_empty());
    }

    #[test]
    fn test_playing_screen_shows_stats() {
        let snapshot = sample_snapshot();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let scoreboard = Scoreboard {
            high_score: 70,
            new_record: false,
        };

        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    Screen::Playing,
                    &snapshot,
                    &GameMetrics::new(),
                    scoreboard,
                )
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score:"));
        assert!(text.contains("High Score:"));
        assert!(text.contains("oO"));
    }

    #[test]
    fn test_game_over_screen_announces_record() {
        let snapshot = sample_snapshot();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let scoreboard = Scoreboard {
            high_score: 70,
            new_record: true,
        };

        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    Screen::GameOver,
                    &snapshot,
                    &GameMetrics::new(),
                    scoreboard,
                )
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("NEW HIGH SCORE"));
        assert!(text.contains("to replay"));
    }

    #[test]
    fn test_game_over_screen_shows_session_stats() {
        let snapshot = sample_snapshot();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(40);
        metrics.on_game_over(15);

        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    Screen::GameOver,
                    &snapshot,
                    &metrics,
                    Scoreboard::default(),
                )
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Games Played: 2"));
        assert!(text.contains("Session Best: 40"));
    }

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }

    #[test]
    fn test_framed_saturates_for_wide_boards() {
        assert_eq!(framed(5), 7);
        assert_eq!(framed(usize::from(u16::MAX)), u16::MAX);
        assert_eq!(framed(1 << 20), u16::MAX);
    }
}
