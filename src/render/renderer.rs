use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::arcade::ActiveGame;
use crate::catalog::GameKind;
use crate::clock::Clock;
use crate::metrics::SessionMetrics;
use crate::rps::RoundResult;
use crate::snake::{GridCell, SnakeState};
use crate::tictactoe::{Cell, Mark, Status, TicTacToeState};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R, C: Clock>(
        &self,
        frame: &mut Frame,
        game: Option<&ActiveGame<R, C>>,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(
            self.render_header(game.map(ActiveGame::kind), metrics),
            chunks[0],
        );

        // Center the game horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match game {
            None => self.render_welcome(),
            Some(ActiveGame::TicTacToe(engine)) => self.render_tictactoe(&engine.snapshot()),
            Some(ActiveGame::Rps(engine)) => self.render_rps(engine.last_round()),
            Some(ActiveGame::Snake(engine)) => self.render_snake(engine.state(), metrics),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(
            self.render_controls(game.map(ActiveGame::kind)),
            chunks[2],
        );
    }

    fn render_header(&self, kind: Option<GameKind>, metrics: &SessionMetrics) -> Paragraph<'_> {
        let line = match kind {
            Some(kind) => Line::from(vec![
                Span::styled(
                    kind.name(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(kind.description(), Style::default().fg(Color::Gray)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]),
            None => Line::from(Span::styled(
                "Pick a game to start playing",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }

    fn render_welcome(&self) -> Paragraph<'_> {
        let mut lines = vec![Line::from("")];
        for (i, kind) in GameKind::ALL.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("F{}  ", i + 1), Style::default().fg(Color::Cyan)),
                Span::styled(
                    kind.name(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", kind.difficulty()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(game_block(" Arcade "))
    }

    fn render_tictactoe(&self, state: &TicTacToeState) -> Paragraph<'_> {
        let highlight = state.winning_line().unwrap_or_default();
        let is_winning = |index: usize| state.winner().is_some() && highlight.contains(&index);

        let status = match state.status() {
            Status::InProgress { next } => Line::from(vec![
                Span::styled("Turn: ", Style::default().fg(Color::Yellow)),
                mark_span(next, false),
            ]),
            Status::Won(mark) => Line::from(vec![
                Span::styled("Winner: ", Style::default().fg(Color::Yellow)),
                mark_span(mark, true),
            ]),
            Status::Draw => Line::from(Span::styled(
                "Draw",
                Style::default().fg(Color::Yellow),
            )),
        };

        let mut lines = vec![status, Line::from("")];
        for row in 0..3 {
            let mut spans = Vec::new();
            for col in 0..3 {
                let index = row * 3 + col;
                let span = match state.board()[index] {
                    Cell::Filled(mark) => mark_span(mark, is_winning(index)),
                    Cell::Empty => Span::styled(
                        (index + 1).to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                };
                spans.push(Span::raw(" "));
                spans.push(span);
                spans.push(Span::raw(" "));
                if col < 2 {
                    spans.push(Span::styled("│", Style::default().fg(Color::Gray)));
                }
            }
            lines.push(Line::from(spans));
            if row < 2 {
                lines.push(Line::from(Span::styled(
                    "───┼───┼───",
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(game_block(" Tic Tac Toe "))
    }

    fn render_rps(&self, round: Option<RoundResult>) -> Paragraph<'_> {
        let (player, cpu, message) = match round {
            Some(round) => (
                round.player_choice.name(),
                round.opponent_choice.name(),
                round.outcome.message(),
            ),
            None => ("-", "-", "Make your move!"),
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("You: ", Style::default().fg(Color::Gray)),
                Span::styled(player, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("CPU: ", Style::default().fg(Color::Gray)),
                Span::styled(cpu, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(game_block(" Rock · Paper · Scissors "))
    }

    fn render_snake(&self, state: &SnakeState, metrics: &SessionMetrics) -> Paragraph<'_> {
        let mut stats = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", state.tick_interval_ms),
                Style::default().fg(Color::White),
            ),
        ];
        if let Some(last) = metrics.last_snake_score {
            stats.push(Span::raw("    "));
            stats.push(Span::styled("Last: ", Style::default().fg(Color::Yellow)));
            stats.push(Span::styled(last.to_string(), Style::default().fg(Color::White)));
        }
        if !state.running {
            stats.push(Span::raw("    "));
            stats.push(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        let mut lines = vec![Line::from(stats)];
        for row in state.cells() {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    GridCell::Head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    GridCell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                    GridCell::Food => Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    GridCell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(game_block(" Snake "))
    }

    fn render_controls(&self, kind: Option<GameKind>) -> Paragraph<'_> {
        let mut spans = match kind {
            Some(GameKind::Snake) => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" play/pause | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" reset | "),
            ],
            Some(GameKind::TicTacToe) => vec![
                Span::styled("1-9", Style::default().fg(Color::Cyan)),
                Span::raw(" to place | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" reset | "),
            ],
            Some(GameKind::Rps) => vec![
                Span::styled("R", Style::default().fg(Color::Cyan)),
                Span::raw("ock "),
                Span::styled("P", Style::default().fg(Color::Cyan)),
                Span::raw("aper "),
                Span::styled("S", Style::default().fg(Color::Cyan)),
                Span::raw("cissors | "),
            ],
            None => Vec::new(),
        };
        spans.extend([
            Span::styled("Tab/F1-F3", Style::default().fg(Color::Cyan)),
            Span::raw(" switch game | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn game_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

fn mark_span(mark: Mark, highlight: bool) -> Span<'static> {
    let color = match mark {
        Mark::X => Color::Cyan,
        Mark::O => Color::Magenta,
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if highlight {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(mark.symbol().to_string(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::random::ScriptedRandom;
    use crate::snake::{SnakeConfig, SnakeEngine};
    use crate::tictactoe::TicTacToeEngine;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw<R, C: Clock>(game: Option<&ActiveGame<R, C>>) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let metrics = SessionMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, game, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_welcome_lists_games() {
        let screen = draw::<ScriptedRandom, ManualClock>(None);
        assert!(screen.contains("Pick a game"));
        assert!(screen.contains("Snake"));
    }

    #[test]
    fn test_tictactoe_shows_winner() {
        let mut engine = TicTacToeEngine::new();
        for index in [0, 3, 1, 4, 2] {
            engine.apply_move(index);
        }
        let game: ActiveGame<ScriptedRandom, ManualClock> = ActiveGame::TicTacToe(engine);
        assert!(draw(Some(&game)).contains("Winner:"));
    }

    #[test]
    fn test_snake_shows_score_and_pause() {
        let engine = SnakeEngine::new(
            SnakeConfig::new(8),
            ScriptedRandom::new([0]),
            ManualClock::new(),
        )
        .unwrap();
        let game = ActiveGame::Snake(engine);
        let screen = draw(Some(&game));
        assert!(screen.contains("Score:"));
        assert!(screen.contains("PAUSED"));
    }
}
