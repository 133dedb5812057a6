use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, MUTED_TEXT};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One key binding shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub keys: &'static str,
    pub action: &'static str,
}

const FETCH: Hint = Hint {
    keys: "Enter/F",
    action: "Fetch",
};
const SCROLL: Hint = Hint {
    keys: "↑/↓",
    action: "Scroll",
};
const JUMP: Hint = Hint {
    keys: "Home/End",
    action: "Jump",
};
const QUIT: Hint = Hint {
    keys: "Q",
    action: "Quit",
};

/// Key bindings that currently do something.
pub fn hints(trigger_visible: bool, list_visible: bool) -> Vec<Hint> {
    let mut hints = Vec::with_capacity(4);
    if trigger_visible {
        hints.push(FETCH);
    }
    if list_visible {
        hints.push(SCROLL);
        hints.push(JUMP);
    }
    hints.push(QUIT);
    hints
}

pub fn widget(area: Rect, hints: &[Hint]) -> Paragraph<'static> {
    let separator = Span::styled(" │ ", Style::default().fg(HEADER_SEPARATOR));
    let mut spans = vec![Span::raw(" ")];
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(separator.clone());
        }
        spans.push(Span::styled(hint.keys, Style::default().fg(ACCENT)));
        spans.push(Span::styled(
            format!(": {}", hint.action),
            Style::default().fg(MUTED_TEXT),
        ));
    }

    // Right-align the version inside the borders; widths in chars.
    let used: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let version = format!("v{} ", VERSION);
    let inner = area.width.saturating_sub(2) as usize;
    let padding = inner
        .saturating_sub(used)
        .saturating_sub(version.chars().count());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(version, Style::default().fg(MUTED_TEXT)));

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}
