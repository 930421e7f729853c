use ratatui::backend::TestBackend;
use ratatui::Terminal;

use kf_backtest::input::ViewerCommand;
use kf_backtest::model::WindowResult;
use kf_backtest::ui::{self, ViewerState};

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn rows(n: usize) -> Vec<WindowResult> {
    (0..n)
        .map(|i| WindowResult {
            ticker: if i % 2 == 0 { "AAPL" } else { "MSFT" }.to_string(),
            start_idx: (i / 2) * 5,
            mae: 0.01 * (i + 1) as f64,
        })
        .collect()
}

#[test]
/// The viewer shows the window table, the per-ticker chart and the keybind bar.
fn render_shows_table_and_chart() {
    let backend = TestBackend::new(120, 30);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    let state = ViewerState::new("runs/results.csv", rows(4));

    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("render should succeed");

    let text = buffer_text(&terminal);
    assert!(text.contains("Kalman Filter Backtest Results"));
    assert!(text.contains("Windows (4)"));
    assert!(text.contains("start_idx"));
    assert!(text.contains("MAE by Ticker"));
    assert!(text.contains("AAPL"));
    assert!(text.contains("MSFT"));
    assert!(text.contains("quit"));
}

#[test]
fn render_empty_results_without_panicking() {
    let backend = TestBackend::new(80, 20);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    let state = ViewerState::new("runs/results.csv", Vec::new());

    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("render should succeed");

    let text = buffer_text(&terminal);
    assert!(text.contains("no windows"));
    assert!(state.overall_mae().is_none());
}

#[test]
fn viewer_state_summarizes_per_ticker() {
    let state = ViewerState::new("r.csv", rows(4));
    assert_eq!(state.summaries.len(), 2);
    assert_eq!(state.summaries[0].ticker, "AAPL");
    assert!((state.summaries[0].mean_mae - 0.02).abs() < 1e-12);
    assert!((state.summaries[1].mean_mae - 0.03).abs() < 1e-12);
    assert!((state.overall_mae().unwrap() - 0.025).abs() < 1e-12);
}

#[test]
fn scrolling_is_clamped_to_table() {
    let mut state = ViewerState::new("r.csv", rows(5));
    assert!(state.apply(ViewerCommand::ScrollUp));
    assert_eq!(state.scroll, 0);
    state.apply(ViewerCommand::PageDown);
    assert_eq!(state.scroll, 4);
    state.apply(ViewerCommand::ScrollDown);
    assert_eq!(state.scroll, 4);
    state.apply(ViewerCommand::Top);
    assert_eq!(state.scroll, 0);
    state.apply(ViewerCommand::Bottom);
    assert_eq!(state.scroll, 4);
    assert!(!state.apply(ViewerCommand::Quit));
}
