use crate::api::User;
use crate::ui::app::App;
use crate::ui::footer;
use crate::ui::header::Header;
use crate::ui::layout::{bottom_rect_by_size, centered_rect_by_size, layout_regions};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TRIGGER_LABEL: &str = "Fetch Users";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer_area) = layout_regions(area);
    // Read before locking the view: `selected` locks it too.
    let selected = app.selected();
    let view = app.view();

    let header_widget = Header::new();
    frame.render_widget(
        header_widget.widget(view.status(), view.is_failed(), app.lifecycle_phase()),
        header,
    );
    frame.render_widget(Clear, body);

    if view.list_visible() {
        draw_user_list(frame, body, view.users(), selected);
    }

    if view.progress_visible() {
        let glyph = SPINNER[app.spinner_frame() % SPINNER.len()];
        let text = format!("{} Loading users…", glyph);
        let area = centered_rect_by_size(body, text_width(&text).saturating_add(4), 3);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(ACCENT)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(GLOBAL_BORDER)),
                ),
            area,
        );
    }

    if view.trigger_visible() {
        let area = centered_rect_by_size(body, text_width(TRIGGER_LABEL).saturating_add(8), 3);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                TRIGGER_LABEL,
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(ACCENT))
                    .title(Span::styled(" Enter ", Style::default().fg(MUTED_TEXT))),
            ),
            area,
        );
    }

    let hints = footer::hints(view.trigger_visible(), view.list_visible());
    frame.render_widget(footer::widget(footer_area, &hints), footer_area);

    if let Some(toast) = view.toast() {
        let width = text_width(&toast.message).saturating_add(4);
        let area = bottom_rect_by_size(body, width.max(24), 3);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(toast.message.clone())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(Span::styled(" Error ", Style::default().fg(STATUS_ERROR)))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(STATUS_ERROR)),
                ),
            area,
        );
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

fn draw_user_list(frame: &mut Frame<'_>, area: Rect, users: &[User], selected: usize) {
    let id_width = users
        .iter()
        .map(|user| user.id.to_string().len())
        .max()
        .unwrap_or(1);
    let name_width = users
        .iter()
        .map(|user| user.name.chars().count())
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = users
        .iter()
        .map(|user| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:>width$}  ", user.id, width = id_width),
                    Style::default().fg(MUTED_TEXT),
                ),
                Span::styled(
                    format!("{:<width$}", user.name, width = name_width),
                    Style::default().fg(HEADER_TEXT),
                ),
                Span::raw("  "),
                Span::styled(user.email.clone(), Style::default().fg(MUTED_TEXT)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER))
                .title(Span::styled(
                    format!(" Users ({}) ", users.len()),
                    Style::default().fg(ACCENT),
                )),
        )
        .highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT));

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
