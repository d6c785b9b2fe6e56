// =============================================================================
// Rendering boundary — chart-panel configuration
// =============================================================================
//
// Builds the configuration objects handed to the external browser charting
// library. The shape is owned by that library; the only contract this side
// guarantees is ordered series of `{x, y}` points. Theme and visible window
// are explicit values passed into every builder, never module-level state.

pub mod panels;
pub mod style;

pub use panels::{build_page, ChartPage, ChartPanel};
pub use style::{ChartTheme, SessionWindow};
