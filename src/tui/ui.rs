//! UI rendering functions
//!
//! Layout: three bordered panes side by side (namespaces 25%, classes 25%,
//! properties 50%), a one-line footer with key help, and a centered popup
//! for errors.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{App, Pane};
use crate::browser::BrowseError;
use crate::provider::Provider;

const FOCUS: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

/// Draw the whole screen
pub fn draw<P: Provider>(f: &mut Frame, app: &mut App<P>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(rows[0]);

    draw_namespaces(f, app, panes[0]);
    draw_classes(f, app, panes[1]);
    draw_properties(f, app, panes[2]);
    draw_footer(f, app, rows[1]);

    if let Some(ref message) = app.error {
        draw_error(f, message);
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { FOCUS } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn selectable_list<'a>(items: &'a [String], selected: Option<&str>, block: Block<'a>) -> List<'a> {
    let items: Vec<ListItem> = items
        .iter()
        .map(|name| {
            let style = if selected == Some(name.as_str()) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(name.as_str()).style(style)
        })
        .collect();
    List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ")
}

fn draw_namespaces<P: Provider>(f: &mut Frame, app: &mut App<P>, area: Rect) {
    let title = format!("Namespaces ({})", app.browser.root());
    let list = selectable_list(
        app.browser.namespaces(),
        app.browser.selected_namespace(),
        pane_block(title, app.focus == Pane::Namespaces),
    );
    f.render_stateful_widget(list, area, &mut app.namespace_state);
}

fn draw_classes<P: Provider>(f: &mut Frame, app: &mut App<P>, area: Rect) {
    let title = match app.browser.selected_namespace() {
        Some(ns) => format!(
            "Classes in {} ({})",
            app.browser.namespace_path(ns),
            app.browser.classes().len()
        ),
        None => "Classes".to_string(),
    };
    let list = selectable_list(
        app.browser.classes(),
        app.browser.selected_class(),
        pane_block(title, app.focus == Pane::Classes),
    );
    f.render_stateful_widget(list, area, &mut app.class_state);
}

fn draw_properties<P: Provider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let title = match app.browser.selected_class() {
        Some(class) => format!("Properties of {}", class),
        None => "Properties".to_string(),
    };
    let rows: Vec<Row> = app
        .browser
        .properties()
        .iter()
        .skip(app.property_offset)
        .map(|p| Row::new(vec![p.name.clone(), p.display_value().to_string()]))
        .collect();
    let header = Row::new(vec!["Property", "Value"])
        .style(Style::default().fg(FOCUS).add_modifier(Modifier::BOLD));
    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .header(header)
        .block(pane_block(title, app.focus == Pane::Properties));
    f.render_widget(table, area);
}

fn draw_footer<P: Provider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" Tab", Style::default().fg(FOCUS)),
        Span::raw(" pane  "),
        Span::styled("↑↓", Style::default().fg(FOCUS)),
        Span::raw(" move  "),
        Span::styled("Enter", Style::default().fg(FOCUS)),
        Span::raw(" select  "),
        Span::styled("r", Style::default().fg(FOCUS)),
        Span::raw(" reload  "),
        Span::styled("q", Style::default().fg(FOCUS)),
        Span::raw(" quit  "),
        Span::styled(
            format!(
                "{} namespaces, {} classes, {} properties",
                app.browser.namespaces().len(),
                app.browser.classes().len(),
                app.browser.properties().len()
            ),
            Style::default().fg(MUTED),
        ),
    ]);
    f.render_widget(Paragraph::new(help), area);
}

fn draw_error(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 25, f.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            BrowseError::TITLE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(MUTED))),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
