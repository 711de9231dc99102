use crate::checker::Segment;
use crate::ui::app::{App, FocusPane, Mode, StatusKind};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const INPUT_HEIGHT: u16 = 7;
const MIN_TEXT_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        frame.area(),
    );

    // Header + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[1]);

    render_rules(frame, app, body_chunks[0]);

    let available = body_chunks[1].height.saturating_sub(INPUT_HEIGHT);
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(stats_height(app, available)),
            Constraint::Min(0),
        ])
        .split(body_chunks[1]);

    render_input(frame, app, right_chunks[0]);
    render_stats(frame, app, right_chunks[1]);

    let text_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right_chunks[2]);

    render_original(frame, app, text_chunks[0]);
    render_corrected(frame, app, text_chunks[1]);

    render_footer(frame, app, main_chunks[2]);
}

fn border_style(app: &App, pane: FocusPane) -> Style {
    if app.focus == pane {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.fg_dim)
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let tab = |label: &'static str, mode: Mode| {
        if app.mode == mode {
            Span::styled(
                label,
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(theme.fg_dim))
        }
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "  PROOFREAD  ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        tab(" Text ", Mode::Text),
        Span::raw(" "),
        tab(" File ", Mode::File),
        Span::styled(
            format!("   {}", app.server_url),
            Style::default().fg(theme.fg_dim),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    frame.render_widget(header, area);
}

fn render_rules(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let items: Vec<ListItem> = if app.rules.is_empty() {
        let hint = if app.rules_in_flight {
            "Loading rules…"
        } else {
            "No rules loaded ([r] to reload)"
        };
        vec![ListItem::new(hint).style(Style::default().fg(theme.fg_dim))]
    } else {
        app.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let selected = app.is_selected(&rule.name);
                let marker = if selected { "[x]" } else { "[ ]" };
                let mut style = if selected {
                    Style::default().fg(theme.secondary)
                } else {
                    Style::default().fg(theme.fg)
                };
                if i == app.rule_cursor && app.focus == FocusPane::Rules {
                    style = Style::default()
                        .fg(theme.bg)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD);
                }
                ListItem::new(format!("{} {}", marker, rule.name)).style(style)
            })
            .collect()
    };

    let title = format!("Rules ({}/{})", app.selected.len(), app.rules.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style(app, FocusPane::Rules)),
    );

    let mut state = ListState::default();
    if !app.rules.is_empty() {
        state.select(Some(app.rule_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let cursor = if app.editing { "▏" } else { "" };

    let (title, lines) = match app.mode {
        Mode::Text => {
            let mut lines: Vec<Line> = if app.input_text.is_empty() && !app.editing {
                vec![Line::styled(
                    "Press [i] to type text to check",
                    Style::default().fg(theme.fg_dim),
                )]
            } else {
                app.input_text.split('\n').map(Line::from).collect()
            };
            if app.editing {
                if let Some(last) = lines.last_mut() {
                    last.push_span(Span::styled(cursor, Style::default().fg(theme.accent)));
                }
            }
            ("Text", lines)
        }
        Mode::File => {
            let mut lines = vec![Line::from(vec![
                Span::styled("Path: ", Style::default().fg(theme.fg_dim)),
                Span::raw(app.file_path.clone()),
                Span::styled(cursor, Style::default().fg(theme.accent)),
            ])];
            if let Some(label) = &app.file_label {
                lines.push(Line::from(vec![
                    Span::styled("Uploaded: ", Style::default().fg(theme.fg_dim)),
                    Span::raw(label.clone()),
                ]));
            }
            if let Some(error) = &app.file_error {
                lines.push(Line::styled(error.clone(), Style::default().fg(theme.error)));
            }
            ("File", lines)
        }
    };

    let title = if app.editing {
        format!("{} (editing, Esc to finish)", title)
    } else {
        title.to_string()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style(app, FocusPane::Input)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn stats_height(app: &App, available: u16) -> u16 {
    let rows = app.report.as_ref().map_or(1, |r| {
        (1 + r.breakdown_lines().len()).max(r.result.errors.len())
    });
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    // borders; the text panes keep at least MIN_TEXT_HEIGHT rows
    rows.saturating_add(2)
        .min(available.saturating_sub(MIN_TEXT_HEIGHT))
        .max(3)
}

/// Scroll offset for a pane holding `rows` lines. Panes that fit stay put.
fn pane_scroll(app: &App, rows: usize, area: Rect) -> u16 {
    let visible = usize::from(area.height.saturating_sub(2));
    let overflow = rows.saturating_sub(visible);
    app.results_scroll.min(u16::try_from(overflow).unwrap_or(u16::MAX))
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_summary(frame, app, chunks[0]);
    render_details(frame, app, chunks[1]);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines = Vec::new();

    match &app.report {
        Some(report) => {
            let mut count_line = vec![
                Span::styled("Errors: ", Style::default().fg(theme.fg_dim)),
                Span::styled(
                    report.error_count().to_string(),
                    Style::default()
                        .fg(if report.error_count() == 0 {
                            theme.success
                        } else {
                            theme.error
                        })
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   checked {}", report.checked_at.format("%H:%M:%S")),
                    Style::default().fg(theme.fg_dim),
                ),
            ];
            if let Some(filename) = &report.result.filename {
                count_line.push(Span::styled(
                    format!("   {}", filename),
                    Style::default().fg(theme.fg_dim),
                ));
            }
            lines.push(Line::from(count_line));

            for (i, line) in report.breakdown_lines().into_iter().enumerate() {
                let style = if i == 0 {
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg)
                };
                lines.push(Line::styled(line, style));
            }
        }
        None => lines.push(Line::styled(
            "No results yet. Press [c] to check.",
            Style::default().fg(theme.fg_dim),
        )),
    }

    let scroll = pane_scroll(app, lines.len(), area);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Stats")
                .border_style(border_style(app, FocusPane::Results)),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines: Vec<Line> = match &app.report {
        Some(report) if !report.result.errors.is_empty() => report
            .detail_lines()
            .into_iter()
            .map(|line| Line::styled(line, Style::default().fg(theme.fg_dim)))
            .collect(),
        Some(_) => vec![Line::styled(
            "No corrections",
            Style::default().fg(theme.success),
        )],
        None => Vec::new(),
    };

    let scroll = pane_scroll(app, lines.len(), area);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Corrections")
                .border_style(border_style(app, FocusPane::Results)),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Turn highlight segments into display lines, splitting on newlines.
pub fn segments_to_lines(segments: &[Segment], theme: &Theme) -> Vec<Line<'static>> {
    let highlight_style = Style::default()
        .fg(theme.error)
        .bg(theme.highlight_bg)
        .add_modifier(Modifier::UNDERLINED);
    let suggestion_style = Style::default().fg(theme.fg_dim);

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    for segment in segments {
        let style = match segment {
            Segment::Plain(_) => Style::default().fg(theme.fg),
            Segment::Highlight { .. } => highlight_style,
        };
        let mut parts = segment.text().split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
        if let Segment::Highlight { word, correction } = segment {
            if !correction.is_empty() && correction != word {
                current.push(Span::styled(
                    format!(" (→ {})", correction),
                    suggestion_style,
                ));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

fn render_original(frame: &mut Frame, app: &App, area: Rect) {
    let lines = app
        .report
        .as_ref()
        .map(|r| segments_to_lines(&r.segments, &app.theme))
        .unwrap_or_default();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Original")
                .border_style(border_style(app, FocusPane::Results)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_corrected(frame: &mut Frame, app: &App, area: Rect) {
    let text = app
        .report
        .as_ref()
        .map(|r| r.corrected_text().to_string())
        .unwrap_or_default();

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(app.theme.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Corrected")
                .border_style(border_style(app, FocusPane::Results)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let footer = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => theme.success,
                StatusKind::Error => theme.error,
            };
            Paragraph::new(status.text.clone()).style(Style::default().fg(color))
        }
        None => {
            let help = if app.editing {
                "[Esc] Done  [Backspace] Delete"
            } else {
                "[Space] Toggle  [a/n] All/None  [m] Mode  [i] Edit  [c] Check  [e] Export  [r] Reload  [t] Theme  [Q] Quit"
            };
            Paragraph::new(help).style(Style::default().fg(theme.fg_dim))
        }
    };

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CheckResult, Completion, Outcome, Rule, Stats, TextError};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn test_app() -> App {
        App::new(
            "http://127.0.0.1:5000".to_string(),
            PathBuf::from("."),
            Theme::default_theme().clone(),
        )
    }

    fn result_with(errors: Vec<TextError>, error_types: &[(String, usize)]) -> CheckResult {
        CheckResult {
            original_text: "teh cat".to_string(),
            corrected_text: "the cat".to_string(),
            stats: Stats {
                total_errors: errors.len(),
                error_types: error_types.iter().cloned().collect(),
            },
            errors,
            filename: None,
        }
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn hl(word: &str) -> Segment {
        Segment::Highlight {
            word: word.to_string(),
            correction: String::new(),
        }
    }

    #[test]
    fn test_segments_to_lines_splits_newlines() {
        let theme = Theme::default_theme();
        let segments = vec![
            Segment::Plain("first line\nsecond ".to_string()),
            hl("teh"),
            Segment::Plain("\n".to_string()),
        ];
        let lines = segments_to_lines(&segments, theme);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].to_string(), "first line");
        assert_eq!(lines[1].to_string(), "second teh");
        assert_eq!(lines[1].spans[1].style.bg, Some(theme.highlight_bg));
        assert_eq!(lines[2].to_string(), "");
    }

    #[test]
    fn test_segments_to_lines_shows_correction() {
        let theme = Theme::default_theme();
        let segments = vec![
            Segment::Highlight {
                word: "teh".to_string(),
                correction: "the".to_string(),
            },
            Segment::Plain(" cat".to_string()),
        ];
        let lines = segments_to_lines(&segments, theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "teh (→ the) cat");
        assert_eq!(lines[0].spans[1].style.fg, Some(theme.fg_dim));
        assert_eq!(lines[0].spans[1].style.bg, None);
    }

    #[test]
    fn test_every_error_type_is_rendered() {
        let types: Vec<(String, usize)> =
            (0..15).map(|i| (format!("type{:02}", i), 1)).collect();
        let mut app = test_app();
        app.apply(Completion::Checked(Outcome::Success(result_with(
            vec![TextError::new("teh", "the")],
            &types,
        ))));

        let screen = draw(&app, 120, 40);
        let missing: Vec<&str> = types
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !screen.contains(&format!("{}: 1", name)))
            .collect();
        assert!(missing.is_empty(), "missing breakdown lines: {:?}", missing);
        assert!(screen.contains("Errors: 1"));
        assert!(screen.contains("teh → the"));
    }

    #[test]
    fn test_rule_cursor_stays_visible() {
        let mut app = test_app();
        let rules = (0..60).map(|i| Rule::new(format!("rule{:02}", i))).collect();
        app.apply(Completion::RulesLoaded(Outcome::Success(rules)));
        for _ in 0..50 {
            app.next_rule();
        }
        app.toggle_current();

        let screen = draw(&app, 120, 30);
        assert!(screen.contains("[x] rule50"));
        assert!(!screen.contains("[ ] rule00"));
    }

    #[test]
    fn test_stats_height_saturates() {
        let mut app = test_app();
        assert_eq!(stats_height(&app, 30), 3);

        let errors = vec![TextError::new("teh", "the"); 70_000];
        app.apply(Completion::Checked(Outcome::Success(result_with(errors, &[]))));
        assert_eq!(stats_height(&app, 30), 24);
        assert_eq!(stats_height(&app, 4), 3);
    }

    #[test]
    fn test_segments_to_lines_empty() {
        let lines = segments_to_lines(&[], Theme::default_theme());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.is_empty());
    }
}
