pub mod price_frame;
pub mod returns;
pub mod window;

pub use price_frame::PriceFrame;
pub use returns::{ReturnMatrix, ReturnSeries};
pub use window::{BacktestConfig, TickerSummary, WindowResult};
