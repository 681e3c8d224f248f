pub mod chart;
pub mod presenter;

pub use chart::{Bar, BarChart};
pub use presenter::{Presentation, ResultPresenter, View, IDLE_PROMPT};
