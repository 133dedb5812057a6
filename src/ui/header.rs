use crate::ui::mvi::LifecyclePhase;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, status: &str, failed: bool, phase: LifecyclePhase) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (indicator, indicator_color) = match phase {
            LifecyclePhase::Started => ("●", STATUS_OK),
            LifecyclePhase::Created | LifecyclePhase::Stopped => ("◌ paused", STATUS_WARN),
            LifecyclePhase::Destroyed => ("○ closed", MUTED_TEXT),
        };
        let status_color = if failed {
            STATUS_ERROR
        } else {
            HEADER_TEXT
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(
                "Users",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(status.to_string(), Style::default().fg(status_color)),
            Span::styled("  │  ", separator_style),
            Span::styled(indicator, Style::default().fg(indicator_color)),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
