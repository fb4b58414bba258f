use crate::session::App;
use crate::ui::key_hint;
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::format_score;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw_summary(f: &mut Frame, app: &App) {
    let layout = calculate_screen_chunks(f.area());
    let stats = &app.quiz.stats;

    let title = Paragraph::new("Quiz Results")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let score_color = if stats.score_quarters >= 0 {
        Color::Green
    } else {
        Color::Red
    };

    let mut text = Text::default();
    text.push_line(Line::from(format!("Total Attempts: {}", stats.attempts)));
    text.push_line(Line::from(format!("Correct Answers: {}", stats.correct)));
    text.push_line(Line::from(format!(
        "Incorrect Answers: {}",
        stats.incorrect
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::from("Your Score: "),
        Span::styled(
            format_score(stats.score()),
            Style::default()
                .fg(score_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let summary = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let mut spans = Vec::new();
    spans.extend(key_hint("r/Enter", " Restart Quiz  "));
    spans.extend(key_hint("Esc", " Quit"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
