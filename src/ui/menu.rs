use crate::session::{App, MenuField};
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{fit_to_block, key_hint};
use crate::utils::format_time_limit;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(crate) fn draw_title(f: &mut Frame, area: ratatui::layout::Rect) {
    let title = Paragraph::new("Flag Master")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::from(format!("{}{}", marker, label)),
        Span::styled(value, value_style),
    ])
}

pub fn draw_menu(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area);

    let mut text = Text::default();
    text.push_line(field_line(
        "Number of Questions (Max 500): ",
        if app.count_input.is_empty() {
            "_".to_string()
        } else {
            app.count_input.clone()
        },
        app.focused_field == MenuField::Questions,
    ));
    text.push_line(Line::from(""));
    text.push_line(field_line(
        "Time per Question: ",
        format!("< {} >", format_time_limit(app.settings.time_limit)),
        app.focused_field == MenuField::TimeLimit,
    ));
    text.push_line(Line::from(""));
    let dataset_line = format!(
        "Dataset: {} countries from {}",
        app.dataset.len(),
        app.dataset_label
    );
    text.push_line(Line::from(Span::styled(
        fit_to_block(&dataset_line, layout.content_area),
        Style::default().fg(Color::DarkGray),
    )));

    if let Some(message) = &app.message {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let settings = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(settings, layout.content_area);

    let mut spans = Vec::new();
    spans.extend(key_hint("↑/↓", " Field  "));
    spans.extend(key_hint("←/→", " Adjust  "));
    spans.extend(key_hint("0-9", " Count  "));
    spans.extend(key_hint("Enter", " Start Quiz  "));
    spans.extend(key_hint("Esc/Ctrl+C", " Quit"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

pub fn draw_loading(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area);

    let loading = format!("Loading countries from {}...", app.dataset_label);
    let body = Paragraph::new(fit_to_block(&loading, layout.content_area))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.content_area);

    let help = Paragraph::new(Line::from(key_hint("Esc/Ctrl+C", " Quit").to_vec()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

pub fn draw_load_error(f: &mut Frame, app: &App, error: &str) {
    let layout = calculate_screen_chunks(f.area());
    draw_title(f, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Could not load the country dataset",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    let source = format!("Source: {}", app.dataset_label);
    text.push_line(Line::from(fit_to_block(&source, layout.content_area)));
    text.push_line(Line::from(error.to_string()));

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"));
    f.render_widget(body, layout.content_area);

    let mut spans = Vec::new();
    spans.extend(key_hint("r", " Retry  "));
    spans.extend(key_hint("Esc/Ctrl+C", " Quit"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
