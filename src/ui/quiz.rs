use crate::quiz::Phase;
use crate::session::App;
use crate::ui::layout::{calculate_quiz_chunks, centered_rect};
use crate::ui::{fit_to_block, key_hint};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

const QUIT_DIALOG_HEIGHT: u16 = 9;

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let layout = calculate_quiz_chunks(f.area());
    let quiz = &app.quiz;
    let Some(question) = quiz.current_question() else {
        return;
    };

    let header = Paragraph::new(format!(
        "Question {} of {}: {}",
        quiz.stats.question_number, quiz.settings.total_questions, question.options.prompt
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let flag = Paragraph::new(fit_to_block(&question.record.flag_url, layout.flag_area))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Flag"));
    f.render_widget(flag, layout.flag_area);

    let revealing = quiz.showing_correct_answer();
    let selected_value = match &quiz.phase {
        Phase::Revealing { selected, .. } => selected.as_deref(),
        _ => None,
    };

    let items: Vec<ListItem> = question
        .options
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let text = fit_to_block(&format!("{}. {}", i + 1, choice), layout.options_area);
            let style = if revealing {
                if *choice == question.options.correct_answer {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else if Some(choice.as_str()) == selected_value {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                }
            } else if i == app.selected_option {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let options = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let mut status = Text::default();
    match &quiz.phase {
        Phase::Asking { remaining, .. } => {
            let color = if *remaining <= 3 {
                Color::Red
            } else {
                Color::White
            };
            status.push_line(Line::from(Span::styled(
                format!("Time left: {}s", remaining),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        Phase::Revealing { selected, .. } => {
            let headline = if selected.is_some() {
                "Wrong answer"
            } else {
                "Time's up"
            };
            status.push_line(Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            status.push_line(Line::from(Span::styled(
                format!("Correct Answer: {}", question.options.correct_answer),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        Phase::Idle | Phase::Finished => {}
    }
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    let mut spans = Vec::new();
    if !revealing {
        spans.extend(key_hint("↑/↓", " Select  "));
        spans.extend(key_hint("1-4", " Answer  "));
        spans.extend(key_hint("Enter", " Submit  "));
    }
    spans.extend(key_hint("Esc", " Quit to Menu  "));
    spans.extend(key_hint("Ctrl+C", " Exit App"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

/// The quiz stays visible underneath; its countdown keeps running while the
/// dialog is open.
pub fn draw_quit_confirmation(f: &mut Frame, app: &App) {
    draw_quiz(f, app);

    let quiz = &app.quiz;
    let progress = match &quiz.phase {
        Phase::Asking { remaining, .. } => format!("{}s left", remaining),
        Phase::Revealing { .. } => "showing the correct answer".to_string(),
        Phase::Idle | Phase::Finished => "quiz over".to_string(),
    };

    let mut text = Text::default();
    text.push_line(Line::from("Abandon this quiz and return to the settings?"));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!(
            "Question {} of {}, {}",
            quiz.stats.question_number, quiz.settings.total_questions, progress
        ),
        Style::default().fg(Color::DarkGray),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ]));

    let area = centered_rect(70, QUIT_DIALOG_HEIGHT, f.area());
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    "Quit to Menu",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}
