//! Stateless rendering of a [`Screen`].

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::games::tictactoe::{Mark, Position};
use crate::view::{BoardView, CellView, NameTag, Screen};

/// Draws the current screen.
pub fn draw(frame: &mut Frame, screen: &Screen, cursor: Position) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match screen {
        Screen::Connecting => {
            draw_message(frame, chunks[1], &["Connecting to server..."]);
        }
        Screen::Waiting {
            opponent_not_found,
            link_lost,
        } => {
            let mut lines = vec!["Waiting for opponent"];
            if *opponent_not_found {
                lines.push("No opponent found yet");
            }
            if *link_lost {
                lines.push("Connection lost");
            }
            draw_message(frame, chunks[1], &lines);
        }
        Screen::Board(view) => {
            draw_match(frame, chunks[1], view, cursor);
            let mut status = view.status.clone();
            if view.link_lost {
                status.push_str(" (connection lost)");
            }
            let status = Paragraph::new(status)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(status, chunks[2]);
        }
    }

    let help = Paragraph::new("1-9 or arrows + Enter to move, q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_message(frame: &mut Frame, area: Rect, lines: &[&str]) {
    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, center_rect(area, 40, lines.len() as u16));
}

fn draw_match(frame: &mut Frame, area: Rect, view: &BoardView, cursor: Position) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(11)])
        .split(area);

    let names = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    draw_name(frame, names[0], &view.local, Alignment::Left);
    draw_name(frame, names[1], &view.opponent, Alignment::Right);

    draw_board(frame, rows[2], view, cursor);
}

fn draw_name(frame: &mut Frame, area: Rect, tag: &NameTag, alignment: Alignment) {
    let style = match tag.to_move {
        Some(mark) => Style::default()
            .fg(Color::Black)
            .bg(mark_color(mark))
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    };
    let paragraph = Paragraph::new(Span::styled(format!(" {} ", tag.name), style)).alignment(alignment);
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &BoardView, cursor: Position) {
    let board_area = center_rect(area, 41, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], view, cursor, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, view: &BoardView, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            draw_cell(frame, cols[col * 2], view.cell(pos), pos == cursor);
        }
        if col < 2 {
            let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: CellView, under_cursor: bool) {
    let symbol = match cell.mark {
        Some(mark) => format!(" {} ", mark.symbol()),
        None => "   ".to_string(),
    };

    let mut style = match cell.mark {
        Some(mark) => Style::default().fg(mark_color(mark)).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    };
    if let (true, Some(winner)) = (cell.highlighted, cell.mark) {
        style = style.bg(mark_color(winner)).fg(Color::Black);
    } else if cell.dimmed {
        style = style.fg(Color::DarkGray).remove_modifier(Modifier::BOLD);
    }
    if under_cursor && cell.clickable {
        style = style.bg(Color::White).fg(Color::Black);
    } else if under_cursor {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    let text = vec![Line::from(""), Line::from(Span::styled(symbol, style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─────────────┼─────────────┼─────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::Circle => Color::Red,
        Mark::Cross => Color::Blue,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
