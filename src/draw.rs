use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nba_api::localtime::localize_time;
use nba_api::{ScoreboardGame, TeamStatLines};

static TABS: &[&str; 2] = &["Scoreboard", "Game Detail"];

const HELP_LINES: &[(&str, &str)] = &[
    ("j / k", "move selection / scroll plays"),
    ("h / l", "previous / next day"),
    ("Enter", "open game detail"),
    ("r", "refresh now"),
    ("1 / 2", "switch tab"),
    ("f", "toggle full screen"),
    ("\"", "toggle log pane"),
    ("Esc", "back"),
    ("q", "quit"),
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Scoreboard => draw_scoreboard(f, layout.main, app),
            MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Scoreboard => 0,
        MenuItem::GameDetail => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App) {
    let date = app.state.scoreboard.date.format("%a %b %-d, %Y");
    let block = default_border(Color::White).title(format!(" Scoreboard: {date} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let games = app.games();
    if games.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Scoreboard load failed:\n{err}")
        } else if app.state.scoreboard_loaded {
            "No games scheduled. h/l to change day".to_string()
        } else {
            "Loading scoreboard...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  h/l=day  Enter=details  r=refresh  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let matchup_width = games.iter().map(|g| g.matchup.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = games
        .iter()
        .enumerate()
        .map(|(idx, game)| {
            let selected = idx == app.state.scoreboard.selected;
            let marker = if selected { ">" } else { " " };
            let row_style = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker} {:<matchup_width$}  ", game.matchup), row_style),
                Span::styled(format!("{:<9}", game.score), row_style),
                status_span(game, app),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), content);
}

fn status_span(game: &ScoreboardGame, app: &App) -> Span<'static> {
    match game.state.as_str() {
        "in" => Span::styled("LIVE", Style::default().fg(Color::Green)),
        "post" => Span::styled("FINAL", Style::default().fg(Color::DarkGray)),
        _ => {
            let tipoff = localize_time(&game.tipoff, app.settings.timezone);
            Span::raw(if tipoff.is_empty() { "TBD".to_string() } else { tipoff })
        }
    }
}

// ---------------------------------------------------------------------------
// Game detail
// ---------------------------------------------------------------------------

fn draw_game_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.game_detail.loaded {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Load failed:\n{err}")
        } else if app.state.game_detail.event_id.is_some() {
            "Loading game summary...".to_string()
        } else {
            "Select a game on the Scoreboard and press Enter".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let summary = app.summary();
    let mut lines: Vec<Line> = Vec::new();

    let header = [summary.quarter_label(), summary.game_clock(), summary.game_status()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(Line::styled(header, Style::default().add_modifier(Modifier::BOLD)));
    lines.push(Line::default());

    let stats = TeamStatLines::from_summary(&summary);
    if !stats.is_empty() {
        for (label, values) in stats.rows() {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<4} "), Style::default().fg(Color::Yellow)),
                Span::raw(values.join("   ")),
            ]));
        }
        lines.push(Line::default());
    }

    for info in [summary.venue(), summary.attendance()] {
        if !info.is_empty() {
            lines.push(Line::from(info));
        }
    }
    let officials = summary.officials();
    if !officials.is_empty() {
        lines.push(Line::from(format!("Officials: {}", officials.join(", "))));
    }

    lines.push(Line::default());
    lines.push(Line::styled("Scoring Plays: (j/k scroll)", Style::default().fg(Color::Yellow)));

    let plays = summary.scoring_plays();
    if plays.is_empty() {
        lines.push(Line::styled("No scoring plays yet", Style::default().fg(Color::DarkGray)));
    }

    let max_lines = inner.height.saturating_sub(lines.len() as u16) as usize;
    let offset = app.state.game_detail.scroll_offset as usize;
    for play in plays.into_iter().skip(offset).take(max_lines.max(1)) {
        let (period, clock, description) = play.into_triple();
        lines.push(Line::from(vec![
            Span::styled(format!("{period:<12} {clock:>5}  "), Style::default().fg(Color::DarkGray)),
            Span::raw(description),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:>8}  "), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
