use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::grading::{Answer, Mark, TRUE_FALSE_OPTIONS};
use crate::models::{ChoiceOption, Playable, Question};
use crate::widget::{Banner, MountedWidget, Widget};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(widget), Some(item)) = (app.widget(), app.current_item()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    frame.render_widget(Paragraph::new(item.label()).fg(Color::Cyan), chunks[1]);
    render_prompt(frame, chunks[2], item);

    let cursor = app.cursor();
    let body = match widget {
        MountedWidget::Question(widget) => match widget.question() {
            Question::Text { answer, .. } => text_answer_lines(widget, answer),
            _ => question_option_lines(widget, cursor),
        },
        MountedWidget::Single(widget) => {
            let exercise = widget.question();
            let chosen = exercise
                .options
                .iter()
                .map(|option| widget.submission().as_deref() == Some(option.id.as_str()))
                .collect();
            option_lines(&option_labels(&exercise.options), chosen, false, widget.marks(), cursor)
        }
        MountedWidget::Multiple(widget) => {
            let exercise = widget.question();
            let chosen = exercise
                .options
                .iter()
                .map(|option| widget.submission().contains(&option.id))
                .collect();
            option_lines(&option_labels(&exercise.options), chosen, true, widget.marks(), cursor)
        }
        MountedWidget::Blanks(widget) => {
            let exercise = widget.question();
            let rows: Vec<SlotRow> = exercise
                .ordered_blanks()
                .into_iter()
                .enumerate()
                .map(|(index, blank)| SlotRow {
                    label: format!("Blank {}", index + 1),
                    value: widget.submission().get(&blank.id).cloned(),
                    expected: exercise.correct_answers.get(&blank.id).cloned().unwrap_or_default(),
                })
                .collect();
            slot_lines(rows, widget.marks(), cursor, "Choices", &exercise.options)
        }
        MountedWidget::Pairs(widget) => {
            let rows: Vec<SlotRow> = widget
                .question()
                .pairs
                .iter()
                .map(|pair| SlotRow {
                    label: pair.left.clone(),
                    value: widget.submission().get(&pair.left).cloned(),
                    expected: pair.right.clone(),
                })
                .collect();
            slot_lines(rows, widget.marks(), cursor, "Match with", widget.right_column())
        }
    };
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[3]);

    render_banner(frame, chunks[4], widget.banner());
    render_controls(frame, chunks[5], widget);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{}/{}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, item: &Playable) {
    let lines = match item {
        Playable::Question(question) => vec![Line::from(question.prompt().bold())],
        Playable::Exercise(exercise) => vec![
            Line::from(exercise.title().bold()),
            Line::from(plain_text(exercise.content())).fg(Color::Gray),
        ],
    };
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .fg(Color::White);
    frame.render_widget(widget, area);
}

fn question_option_lines(widget: &Widget<Question>, cursor: usize) -> Vec<Line<'static>> {
    let question = widget.question();
    let labels: Vec<String> = match question {
        Question::TrueFalse { .. } => TRUE_FALSE_OPTIONS
            .iter()
            .map(|value| if *value { "True" } else { "False" }.to_string())
            .collect(),
        _ => question.options().to_vec(),
    };
    let chosen = (0..labels.len())
        .map(|index| is_chosen(widget.submission(), index))
        .collect();
    let multiple = matches!(question, Question::Multiple { .. });
    option_lines(&labels, chosen, multiple, widget.marks(), cursor)
}

fn option_labels(options: &[ChoiceOption]) -> Vec<String> {
    options.iter().map(|option| option.label().to_string()).collect()
}

fn option_lines(
    labels: &[String],
    chosen: Vec<bool>,
    multiple: bool,
    marks: Option<Vec<Mark>>,
    cursor: usize,
) -> Vec<Line<'static>> {
    let submitted = marks.is_some();
    let mut lines = Vec::with_capacity(labels.len() * 2);

    for (index, (label, chosen)) in labels.iter().zip(chosen).enumerate() {
        let mark = marks.as_ref().and_then(|marks| marks.get(index).copied());
        let style = row_style(mark, index == cursor);
        let marker = if !submitted && index == cursor { ">" } else { " " };
        let checkbox = match (multiple, chosen) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(•)",
            (false, false) => "( )",
        };
        let letter = OPTION_LABELS.get(index).copied().unwrap_or('?');

        let mut spans = vec![
            Span::styled(format!(" {} {} {}. ", marker, checkbox, letter), style),
            Span::styled(label.clone(), style),
        ];
        if mark == Some(Mark::Missed) {
            spans.push(Span::styled("  (correct answer)", Style::default().fg(Color::DarkGray)));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

/// A blank or a left-hand item with its chosen value.
struct SlotRow {
    label: String,
    value: Option<String>,
    expected: String,
}

fn slot_lines(
    rows: Vec<SlotRow>,
    marks: Option<Vec<Mark>>,
    cursor: usize,
    heading: &str,
    choices: &[String],
) -> Vec<Line<'static>> {
    let submitted = marks.is_some();
    let width = rows.iter().map(|row| row.label.chars().count()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(rows.len() + 2);

    for (index, row) in rows.into_iter().enumerate() {
        let mark = marks.as_ref().and_then(|marks| marks.get(index).copied());
        let style = row_style(mark, index == cursor);
        let marker = if !submitted && index == cursor { ">" } else { " " };
        let value = row.value.unwrap_or_else(|| "Select...".to_string());
        let shown = if submitted {
            value
        } else {
            format!("◂ {} ▸", value)
        };

        let mut spans = vec![
            Span::styled(format!(" {} {:<width$}  →  ", marker, row.label, width = width), style),
            Span::styled(shown, style),
        ];
        if mark == Some(Mark::WronglyChosen) {
            spans.push(Span::styled(
                format!("  (correct: {})", row.expected),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!(" {}: ", heading), Style::default().fg(Color::DarkGray)),
        Span::styled(choices.join("  ·  "), Style::default().fg(Color::Gray)),
    ]));
    lines
}

fn render_banner(frame: &mut Frame, area: Rect, banner: Option<Banner>) {
    let Some(banner) = banner else {
        return;
    };
    let color = match banner {
        Banner::Correct => Color::Green,
        Banner::Incorrect => Color::Red,
    };
    let widget = Paragraph::new(banner.message())
        .alignment(Alignment::Center)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, widget: &MountedWidget) {
    let hint = Style::default().fg(Color::DarkGray);
    let spans = if widget.is_submitted() {
        vec![Span::styled("enter next  ·  q quit", hint)]
    } else {
        let submit = if widget.can_submit() {
            Style::default().fg(Color::Green)
        } else {
            hint.add_modifier(Modifier::CROSSED_OUT)
        };
        let (navigate, quit) = match widget {
            _ if widget.is_typing() => ("type your answer  ·  ", "  ·  esc quit"),
            MountedWidget::Blanks(_) | MountedWidget::Pairs(_) => {
                ("j/k move  ·  h/l choose  ·  ", "  ·  q quit")
            }
            _ => ("j/k navigate  ·  space select  ·  ", "  ·  q quit"),
        };
        vec![
            Span::styled(navigate, hint),
            Span::styled("enter submit", submit),
            Span::styled(quit, hint),
        ]
    };

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn text_answer_lines(widget: &Widget<Question>, reference: &str) -> Vec<Line<'static>> {
    let typed = match widget.submission() {
        Answer::Text(text) => text.clone(),
        _ => String::new(),
    };

    match widget.marks().and_then(|marks| marks.first().copied()) {
        Some(Mark::Correct) => vec![Line::from(Span::styled(
            format!(" {}", typed),
            row_style(Some(Mark::Correct), false),
        ))],
        Some(mark) => vec![
            Line::from(Span::styled(format!(" {}", typed), row_style(Some(mark), false))),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Answer: ", Style::default().fg(Color::DarkGray)),
                Span::styled(reference.to_string(), Style::default().fg(Color::Green)),
            ]),
        ],
        None => vec![Line::from(vec![
            Span::styled(" > ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(typed, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ])],
    }
}

fn is_chosen(answer: &Answer, index: usize) -> bool {
    match answer {
        Answer::Single(chosen) => *chosen == Some(index),
        Answer::Multiple(chosen) => chosen.contains(&index),
        Answer::TrueFalse(chosen) => {
            chosen.is_some_and(|value| TRUE_FALSE_OPTIONS.get(index) == Some(&value))
        }
        Answer::Text(_) => false,
    }
}

fn row_style(mark: Option<Mark>, under_cursor: bool) -> Style {
    match mark {
        Some(Mark::Correct) => Style::default().fg(Color::Green).bold(),
        Some(Mark::WronglyChosen) => Style::default().fg(Color::Red).bold(),
        Some(Mark::Missed) => Style::default().fg(Color::Green),
        Some(Mark::Neutral) => Style::default().fg(Color::Gray),
        None if under_cursor => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

/// Drop inline markup from exercise content.
fn plain_text(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.trim().to_string()
}
