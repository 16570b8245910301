pub mod commands;
pub mod shared_str;
pub mod surface;
pub mod types;

pub use commands::{RenderCommand, replay};
pub use shared_str::SharedStr;
pub use surface::{CommandRecorder, Surface, TextMeasure};
pub use types::{Color, FontMetrics, Point, Rect, Size};
