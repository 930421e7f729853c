use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Widget},
};

use crate::model::WindowResult;

pub struct StatusBar<'a> {
    pub source: &'a str,
    pub windows: usize,
    pub tickers: usize,
    pub overall_mae: Option<f64>,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mae = match self.overall_mae {
            Some(v) => format!("{:.6}", v),
            None => "--".to_string(),
        };
        let line = Line::from(vec![
            Span::styled(
                " Kalman Filter Backtest Results ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.source, Style::default().fg(Color::White)),
            Span::styled(
                format!(
                    " | {} tickers | {} windows | mean MAE {}",
                    self.tickers, self.windows, mae
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

pub struct WindowTable<'a> {
    rows: &'a [WindowResult],
    scroll: usize,
}

impl<'a> WindowTable<'a> {
    pub fn new(rows: &'a [WindowResult], scroll: usize) -> Self {
        Self { rows, scroll }
    }
}

impl Widget for WindowTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Windows ({}) ", self.rows.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let visible = self
            .rows
            .iter()
            .skip(self.scroll)
            .take(area.height.saturating_sub(3) as usize)
            .map(|r| {
                Row::new(vec![
                    r.ticker.clone(),
                    r.start_idx.to_string(),
                    format!("{:.8}", r.mae),
                ])
            });

        let header = Row::new(vec!["ticker", "start_idx", "mae"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        Table::new(
            visible,
            [
                Constraint::Min(10),
                Constraint::Length(10),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .block(block)
        .render(area, buf);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Yellow);
        let text = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(" [↑/↓]", key),
            Span::styled(" scroll ", text),
            Span::styled("[PgUp/PgDn]", key),
            Span::styled(" page ", text),
            Span::styled("[Home/End]", key),
            Span::styled(" jump ", text),
            Span::styled("[Q]", key),
            Span::styled(" quit", text),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
