use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Typing indicator row: a spinner plus a fixed "Typing..." label while a
/// request is outstanding, blank otherwise.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    typing: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let (glyph, label) = if self.typing {
            (spinner_frames[self.spinner_idx % spinner_frames.len()], "Typing...")
        } else {
            (" ", "")
        };

        let status = Line::from(vec![
            Span::styled(glyph, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}
