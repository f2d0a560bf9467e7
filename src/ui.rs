use crate::app::{App, AppState};
use crate::chat_view::draw_chat;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    draw_chat(f, app);

    if app.state == AppState::QuitConfirm {
        draw_quit_confirm(f, centered_rect(40, 7, f.area()));
    }
}

fn draw_quit_confirm(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm Quit")
        .style(Style::default().fg(Color::LightYellow).bg(Color::Black));
    f.render_widget(block, area);

    let quit_text = "Are you sure you want to quit?\n\nPress 'y' to confirm or 'n' to cancel.";
    let paragraph = Paragraph::new(quit_text)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area.inner(ratatui::layout::Margin::new(1, 1)));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
