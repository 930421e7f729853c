use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

use crate::model::TickerSummary;

/// Bar heights are integers, so MAE is plotted in millionths.
const MAE_SCALE: f64 = 1_000_000.0;

pub struct MaeChart<'a> {
    summaries: &'a [TickerSummary],
}

impl<'a> MaeChart<'a> {
    pub fn new(summaries: &'a [TickerSummary]) -> Self {
        Self { summaries }
    }
}

impl Widget for MaeChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" MAE by Ticker ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.summaries.is_empty() {
            Paragraph::new("no windows")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }

        let bars: Vec<Bar> = self
            .summaries
            .iter()
            .map(|s| {
                Bar::default()
                    .label(Line::from(s.ticker.clone()))
                    .value((s.mean_mae * MAE_SCALE).round().max(0.0) as u64)
                    .text_value(format!("{:.5}", s.mean_mae))
                    .style(Style::default().fg(Color::Cyan))
            })
            .collect();

        let inner_width = area.width.saturating_sub(2);
        let n = self.summaries.len() as u16;
        let bar_width = (inner_width / n.max(1)).saturating_sub(1).clamp(3, 12);

        BarChart::default()
            .block(block)
            .bar_width(bar_width)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
