pub mod chart;
pub mod dashboard;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::backtest::summarize;
use crate::input::ViewerCommand;
use crate::model::{TickerSummary, WindowResult};

use chart::MaeChart;
use dashboard::{KeybindBar, StatusBar, WindowTable};

const PAGE_ROWS: usize = 20;

/// Everything the results viewer draws.
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub source: String,
    pub rows: Vec<WindowResult>,
    pub summaries: Vec<TickerSummary>,
    pub scroll: usize,
}

impl ViewerState {
    pub fn new(source: &str, rows: Vec<WindowResult>) -> Self {
        let summaries = summarize(&rows);
        Self {
            source: source.to_string(),
            rows,
            summaries,
            scroll: 0,
        }
    }

    /// Mean MAE over every window of every ticker.
    pub fn overall_mae(&self) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        Some(self.rows.iter().map(|r| r.mae).sum::<f64>() / self.rows.len() as f64)
    }

    fn max_scroll(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Applies a command; returns `false` once the viewer should close.
    pub fn apply(&mut self, cmd: ViewerCommand) -> bool {
        match cmd {
            ViewerCommand::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            ViewerCommand::ScrollDown => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            ViewerCommand::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_ROWS),
            ViewerCommand::PageDown => {
                self.scroll = (self.scroll + PAGE_ROWS).min(self.max_scroll())
            }
            ViewerCommand::Top => self.scroll = 0,
            ViewerCommand::Bottom => self.scroll = self.max_scroll(),
            ViewerCommand::Quit => return false,
        }
        true
    }
}

pub fn render(frame: &mut Frame, state: &ViewerState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // windows + chart
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            source: &state.source,
            windows: state.rows.len(),
            tickers: state.summaries.len(),
            overall_mae: state.overall_mae(),
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(20)])
        .split(outer[1]);

    frame.render_widget(WindowTable::new(&state.rows, state.scroll), main_area[0]);
    frame.render_widget(MaeChart::new(&state.summaries), main_area[1]);
    frame.render_widget(KeybindBar, outer[2]);
}
