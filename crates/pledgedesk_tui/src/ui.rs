//! Rendering for the repositories screen.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{App, OrganizationScope};

/// Format the screen subtitle from the optional organization scope.
pub fn subtitle(scope: Option<&OrganizationScope>) -> String {
    match scope {
        Some(scope) => format!("Repositories of {}", scope.slug),
        None => "Repositories".to_string(),
    }
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let search_height = if app.search.open { 3 } else { 0 };
    let [header_area, table_area, search_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(search_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, app, header_area);
    draw_table(frame, app, table_area);
    if app.search.open {
        draw_search_bar(frame, app, search_area);
    }
    draw_footer(frame, app, footer_area);
    draw_notifications(frame, app);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " Pledgedesk Backoffice ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            subtitle(app.scope()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(if app.listing.loading {
            "  (loading...)"
        } else {
            ""
        }),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let header = Row::new([
        "Name",
        "External Organization",
        "Organization",
        "Platform",
        "Badge label",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows = app.listing.rows().iter().map(|r| {
        Row::new([
            r.name.clone(),
            r.external_organization_name.clone(),
            r.organization_slug.clone(),
            r.platform.to_string(),
            r.badge_label.clone(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Percentage(10),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.search.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("Find"));
    frame.render_widget(input, area);
    frame.set_cursor_position((
        area.x + app.search.input.len() as u16 + 1,
        area.y + 1,
    ));
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if app.search.open {
        &[("enter", "Search"), ("esc", "Clear"), ("^f", "Close")]
    } else if app.scope().is_some() {
        &[
            ("^r", "Refresh"),
            ("^f", "Find"),
            ("^g", "Open in GitHub"),
            ("^p", "Open in Pledgedesk"),
            ("^b", "Rebadge issues"),
            ("^s", "Resync issues"),
            ("esc", "Back"),
            ("q", "Quit"),
        ]
    } else {
        &[
            ("^r", "Refresh"),
            ("^f", "Find"),
            ("^g", "Open in GitHub"),
            ("^p", "Open in Pledgedesk"),
            ("^b", "Rebadge issues"),
            ("^s", "Resync issues"),
            ("q", "Quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_notifications(frame: &mut Frame, app: &App) {
    let width = 44u16.min(frame.area().width);
    let mut y = 1;

    for notification in app.notifications.iter().rev().take(3) {
        let height = 4;
        if y + height >= frame.area().height {
            break;
        }
        let area = Rect {
            x: frame.area().width.saturating_sub(width + 1),
            y,
            width,
            height,
        };

        let border_style = if notification.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        let toast = Paragraph::new(notification.body.as_str())
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(notification.title.as_str()),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(toast, area);
        y += height;
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_subtitle_without_scope() {
        assert_eq!(subtitle(None), "Repositories");
    }

    #[test]
    fn test_subtitle_with_scope() {
        let scope = OrganizationScope {
            id: Uuid::new_v4(),
            slug: "acme".to_string(),
        };
        assert_eq!(subtitle(Some(&scope)), "Repositories of acme");
    }
}
