use crate::game::{Board, Cell, GameState, GameStatus, Position, Run};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Roster;

pub fn render(
    frame: &mut Frame,
    game: &GameState,
    roster: &Roster,
    selected_column: usize,
    last_drop: Option<Position>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(game.height() as u16 + 4), // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game, roster, chunks[0]);
    render_board(frame, game, roster, selected_column, last_drop, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, game: &GameState, roster: &Roster, area: Rect) {
    let (status, color) = match game.status() {
        GameStatus::Ongoing => {
            let player = game.current_player();
            (
                format!("Current Player: {}", roster.name(player)),
                roster.color(player),
            )
        }
        GameStatus::Won(winner) => (
            format!("Game Over  |  {} wins!", roster.name(winner)),
            roster.color(winner),
        ),
        GameStatus::Tie => ("Game Over  |  It's a tie!".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game: &GameState,
    roster: &Roster,
    selected_column: usize,
    last_drop: Option<Position>,
    area: Rect,
) {
    let board = game.board();
    let winning_run = game.winning_run();
    let mut lines = Vec::new();

    // Column numbers with selection indicator; full columns are dimmed
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        let style = if col == selected_column {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if board.is_column_full(col) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        col_line.push(Span::styled(label, style));
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(board.width() * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for (row, cells) in board.rows().enumerate() {
        let mut row_spans = vec![Span::raw("  ║")];
        for (col, &cell) in cells.iter().enumerate() {
            let position = Position::new(row, col);
            let mut span = cell_span(cell, position, winning_run.as_ref(), roster);
            if last_drop == Some(position) {
                span = span.patch_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }
            row_spans.push(span);
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    if !game.is_terminal() {
        lines.push(selection_indicator(board, selected_column));
    }

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn cell_span(cell: Cell, position: Position, winning_run: Option<&Run>, roster: &Roster) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(player) => {
            let style = Style::default().fg(roster.color(player));
            if winning_run.is_some_and(|run| run.contains(position)) {
                Span::styled("(●)", style.add_modifier(Modifier::BOLD))
            } else {
                Span::styled(" ● ", style)
            }
        }
    }
}

fn selection_indicator(board: &Board, selected_column: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("   ")]; // Align with board (3 chars to match "  ║")
    for col in 0..board.width() {
        if col == selected_column {
            spans.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            spans.push(Span::raw("   "));
        }
    }
    spans.push(Span::raw("  ")); // Suffix padding to match " ║"
    Line::from(spans)
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter or 1-9: Drop  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
