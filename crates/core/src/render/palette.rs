//! Static frame palettes.

use hchart_protocol::Color;

use crate::model::FramePayload;

/// Who owns the code a frame runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameCategory {
    /// Language runtime and third-party libraries.
    Vendor,
    /// The operating-system platform.
    Platform,
    /// Everything else: the profiled application.
    Application,
}

const MANAGED_VENDOR: &[&str] = &["java.", "javax.", "sun.", "kotlin.", "dalvik."];
const MANAGED_PLATFORM: &[&str] = &["android.", "com.android.", "androidx."];
const NATIVE_VENDOR: &[&str] = &["std::", "__", "libc"];
const NATIVE_PLATFORM: &[&str] = &["art::", "android::", "bionic"];

fn classify_by_prefix(qualified: &str, vendor: &[&str], platform: &[&str]) -> FrameCategory {
    if vendor.iter().any(|p| qualified.starts_with(p)) {
        FrameCategory::Vendor
    } else if platform.iter().any(|p| qualified.starts_with(p)) {
        FrameCategory::Platform
    } else {
        FrameCategory::Application
    }
}

pub fn classify(payload: &FramePayload) -> FrameCategory {
    let qualified = payload.name().qualified(payload.separator());
    match payload {
        FramePayload::Native(_) => classify_by_prefix(&qualified, NATIVE_VENDOR, NATIVE_PLATFORM),
        FramePayload::Managed(_) | FramePayload::Usage { .. } => {
            classify_by_prefix(&qualified, MANAGED_VENDOR, MANAGED_PLATFORM)
        }
    }
}

/// Fill and border for one palette entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub fill: Color,
    pub border: Color,
}

impl Swatch {
    const fn new(fill: Color, border: Color) -> Self {
        Self { fill, border }
    }
}

// Managed frames: warm tones.
const MANAGED_VENDOR_SWATCH: Swatch = Swatch::new(
    Color::rgb8(0xf9, 0xe2, 0xaf),
    Color::rgb8(0xdf, 0xb9, 0x6a),
);
const MANAGED_PLATFORM_SWATCH: Swatch = Swatch::new(
    Color::rgb8(0xa6, 0xe3, 0xa1),
    Color::rgb8(0x6d, 0xb8, 0x67),
);
const MANAGED_APP_SWATCH: Swatch = Swatch::new(
    Color::rgb8(0x89, 0xb4, 0xfa),
    Color::rgb8(0x4f, 0x7f, 0xd0),
);

// Native frames: cool tones.
const NATIVE_VENDOR_SWATCH: Swatch = Swatch::new(
    Color::rgb8(0xb4, 0xbe, 0xfe),
    Color::rgb8(0x7f, 0x8a, 0xd6),
);
const NATIVE_PLATFORM_SWATCH: Swatch = Swatch::new(
    Color::rgb8(0x94, 0xe2, 0xd5),
    Color::rgb8(0x5b, 0xb3, 0xa4),
);
const NATIVE_APP_SWATCH: Swatch = Swatch::new(
    Color::rgb8(0xcb, 0xa6, 0xf7),
    Color::rgb8(0x98, 0x6c, 0xcf),
);

/// Usage frames interpolate from cold (0) to hot (1).
pub const USAGE_COLD: Swatch = Swatch::new(
    Color::rgb8(0x89, 0xdc, 0xeb),
    Color::rgb8(0x4f, 0xa8, 0xba),
);
pub const USAGE_HOT: Swatch = Swatch::new(
    Color::rgb8(0xf3, 0x8b, 0xa8),
    Color::rgb8(0xc4, 0x4f, 0x70),
);

/// Frames outside the selected subtree.
pub const DESELECTED: Swatch = Swatch::new(
    Color::rgb8(0xd0, 0xd0, 0xd6),
    Color::rgb8(0xa8, 0xa8, 0xb0),
);

pub const SELECTED_BORDER: Color = Color::rgb8(0x1e, 0x1e, 0x2e);
pub const LABEL_TEXT: Color = Color::rgb8(0x11, 0x11, 0x1b);
pub const PLACEHOLDER_TEXT: Color = Color::rgb8(0x6c, 0x70, 0x86);

/// Colors depend on the payload only, never on the rectangle.
pub fn swatch(payload: &FramePayload) -> Swatch {
    use FrameCategory::*;
    match (payload, classify(payload)) {
        (FramePayload::Managed(_), Vendor) => MANAGED_VENDOR_SWATCH,
        (FramePayload::Managed(_), Platform) => MANAGED_PLATFORM_SWATCH,
        (FramePayload::Managed(_), Application) => MANAGED_APP_SWATCH,
        (FramePayload::Native(_), Vendor) => NATIVE_VENDOR_SWATCH,
        (FramePayload::Native(_), Platform) => NATIVE_PLATFORM_SWATCH,
        (FramePayload::Native(_), Application) => NATIVE_APP_SWATCH,
        (FramePayload::Usage { usage, .. }, _) => Swatch::new(
            USAGE_COLD.fill.lerp(USAGE_HOT.fill, *usage),
            USAGE_COLD.border.lerp(USAGE_HOT.border, *usage),
        ),
    }
}

/// Lighter variant for the hovered frame.
pub fn focused(swatch: Swatch) -> Swatch {
    let white = Color::rgba(1.0, 1.0, 1.0, 1.0);
    Swatch::new(swatch.fill.lerp(white, 0.35), swatch.border)
}
