//! Stateless rendering of a session.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::games::tictactoe::{Cell, GameOutcome, Position};
use crate::session::{SessionState, TrainingStatus, Turn};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, state: &SessionState, cursor: Position) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(4), // Training
            Constraint::Min(11),   // Board
            Constraint::Length(4), // Game status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Neural Network Training and Game")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_training(frame, chunks[1], state);
    draw_board(frame, chunks[2], state, cursor);
    draw_status(frame, chunks[3], state);

    let help = Paragraph::new("t: train   1-9 / arrows + enter: move   n: new game   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_training(frame: &mut Frame, area: Rect, state: &SessionState) {
    let color = match state.training() {
        TrainingStatus::NotStarted => Color::Gray,
        TrainingStatus::InProgress => Color::Yellow,
        TrainingStatus::Completed => Color::Green,
        TrainingStatus::Failed => Color::Red,
    };

    let mut lines = vec![Line::from(vec![
        Span::raw("Status: "),
        Span::styled(
            state.training().to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])];
    if state.can_train() {
        lines.push(Line::from(Span::styled(
            "Press 't' to start training",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title("Train Neural Network")
        .borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

fn draw_board(frame: &mut Frame, area: Rect, state: &SessionState, cursor: Position) {
    let block = Block::default().title("Tic-Tac-Toe Game").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let board_area = center_rect(inner, 23, 5);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(board_area);

    for row in 0..3 {
        let mut spans = Vec::new();
        for col in 0..3 {
            if let Some(pos) = Position::at(row, col) {
                spans.push(cell_span(state, cursor, pos));
            }
            if col < 2 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            rows[row * 2],
        );
        if row < 2 {
            frame.render_widget(
                Paragraph::new("───────┼───────┼───────")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                rows[row * 2 + 1],
            );
        }
    }
}

fn cell_span(state: &SessionState, cursor: Position, pos: Position) -> Span<'static> {
    let cell = state.board().get(pos);
    let base = match cell {
        Cell::Empty if state.can_select(pos) => Style::default().fg(Color::Gray),
        Cell::Empty => Style::default().fg(Color::DarkGray),
        Cell::PlayerMark => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Cell::OpponentMark => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    let style = if pos == cursor {
        base.bg(Color::White).fg(Color::Black)
    } else {
        base
    };
    let label = match cell {
        Cell::Empty => (pos.to_index() + 1).to_string(),
        other => other.symbol().to_string(),
    };
    Span::styled(format!("   {}   ", label), style)
}

fn draw_status(frame: &mut Frame, area: Rect, state: &SessionState) {
    let mut lines = Vec::new();

    if state.training() != TrainingStatus::Completed {
        lines.push(Line::from(Span::styled(
            "Please train the neural network before playing.",
            Style::default().fg(Color::Red),
        )));
    } else {
        let turn_style = match (state.turn(), state.outcome()) {
            (Turn::GameOver, Some(GameOutcome::PlayerWin)) => Style::default().fg(Color::Green),
            (Turn::GameOver, _) => Style::default().fg(Color::Magenta),
            _ => Style::default().fg(Color::Yellow),
        };
        let mut turn_text = state.turn().to_string();
        if state.turn() == Turn::GameOver {
            if let Some(outcome) = state.outcome() {
                turn_text = format!("{} - press 'n' for a new game", outcome);
            }
        }
        lines.push(Line::from(Span::styled(turn_text, turn_style)));
    }

    if let Some(message) = state.message() {
        lines.push(Line::from(message.to_string()));
    }
    if let Some(error) = state.last_error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
