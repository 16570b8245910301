pub mod frame;
pub mod node;
pub mod range;
pub mod viewport;

pub use frame::{FrameName, FramePayload};
pub use node::{DEFAULT_MAX_DEPTH, IntervalNode};
pub use range::{BoundedRange, Range};
pub use viewport::ViewportModel;
