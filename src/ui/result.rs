use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

const PROMPT_WIDTH: usize = 55;

/// Score of a finished run, overall and per kind of item.
#[derive(Debug, PartialEq)]
struct Tally {
    correct: usize,
    total: usize,
    /// Label, correct and total per kind, in order of first appearance.
    by_kind: Vec<(&'static str, usize, usize)>,
}

impl Tally {
    fn of(app: &App) -> Self {
        let mut by_kind: Vec<(&'static str, usize, usize)> = Vec::new();
        for (item, verdict) in app.items().iter().zip(app.verdicts()) {
            let label = item.label();
            let index = match by_kind.iter().position(|(seen, _, _)| *seen == label) {
                Some(index) => index,
                None => {
                    by_kind.push((label, 0, 0));
                    by_kind.len() - 1
                }
            };
            let entry = &mut by_kind[index];
            entry.1 += usize::from(verdict == Some(true));
            entry.2 += 1;
        }

        Self {
            correct: app.calculate_score(),
            total: app.total_questions(),
            by_kind,
        }
    }

    fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 / self.total) as u32
    }

    fn color(&self) -> Color {
        match self.percent() {
            90.. => Color::Green,
            70..=89 => Color::Cyan,
            50..=69 => Color::Yellow,
            _ => Color::Red,
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let tally = Tally::of(app);

    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(tally.by_kind.len() as u16 + 1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_score(frame, chunks[0], app.title(), &tally);
    render_kinds(frame, chunks[1], &tally);
    render_breakdown(frame, chunks[2], app);

    let controls = Paragraph::new("j/k scroll  ·  r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}

fn render_score(frame: &mut Frame, area: Rect, title: &str, tally: &Tally) {
    let lines = vec![
        Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} of {} correct  ({}%)", tally.correct, tally.total, tally.percent()),
            Style::default().fg(tally.color()).bold(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_kinds(frame: &mut Frame, area: Rect, tally: &Tally) {
    let lines: Vec<Line> = tally
        .by_kind
        .iter()
        .map(|(kind, correct, total)| {
            Line::from(vec![
                Span::styled(format!("{:<20}", kind), Style::default().fg(Color::Gray)),
                Span::styled(format!("{}/{}", correct, total), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .items()
        .iter()
        .zip(app.verdicts())
        .enumerate()
        .map(|(index, (item, verdict))| {
            let (symbol, color) = match verdict {
                Some(true) => ("✓", Color::Green),
                Some(false) => ("✗", Color::Red),
                None => ("–", Color::DarkGray),
            };
            Line::from(vec![
                Span::styled(format!("{} ", symbol), Style::default().fg(color).bold()),
                Span::styled(format!("{:>2}  ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(shorten(item.prompt()), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn shorten(prompt: &str) -> String {
    match prompt.char_indices().nth(PROMPT_WIDTH) {
        Some((end, _)) => format!("{}…", &prompt[..end]),
        None => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionId};

    fn app() -> App {
        let mut app = App::with_questions(
            "Mixed",
            vec![
                Question::TrueFalse {
                    id: QuestionId::from("1"),
                    question: "Water is wet".to_string(),
                    correct_answer: true,
                },
                Question::Text {
                    id: QuestionId::from("2"),
                    question: "2 + 2?".to_string(),
                    answer: "4".to_string(),
                },
                Question::TrueFalse {
                    id: QuestionId::from("3"),
                    question: "Fire is cold".to_string(),
                    correct_answer: false,
                },
            ],
        );
        app.start_quiz();
        app.toggle_option();
        app.confirm();
        app.confirm();
        app.type_char('5');
        app.confirm();
        app.confirm();
        app
    }

    #[test]
    fn test_tally_groups_by_kind() {
        let tally = Tally::of(&app());
        assert_eq!(tally.correct, 1);
        assert_eq!(tally.total, 3);
        assert_eq!(tally.percent(), 33);
        assert_eq!(tally.color(), Color::Red);
        assert_eq!(
            tally.by_kind,
            vec![("True/False", 1, 2), ("Text Answer", 0, 1)]
        );
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("short"), "short");
        let long = "é".repeat(60);
        assert_eq!(shorten(&long).chars().count(), PROMPT_WIDTH + 1);
    }
}
