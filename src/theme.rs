use iced::Color;

use crate::core::notification::Severity;

// ── Background colors ──
pub const BG_PRIMARY: Color = Color::from_rgb(
    0x0c as f32 / 255.0,
    0x0f as f32 / 255.0,
    0x1a as f32 / 255.0,
);
pub const BG_SECONDARY: Color = Color::from_rgb(
    0x14 as f32 / 255.0,
    0x18 as f32 / 255.0,
    0x29 as f32 / 255.0,
);
pub const BG_TERTIARY: Color = Color::from_rgb(
    0x1c as f32 / 255.0,
    0x20 as f32 / 255.0,
    0x39 as f32 / 255.0,
);
pub const BG_HOVER: Color = Color::from_rgb(
    0x25 as f32 / 255.0,
    0x2a as f32 / 255.0,
    0x45 as f32 / 255.0,
);

pub const BORDER: Color = Color::from_rgb(
    0x2a as f32 / 255.0,
    0x2f as f32 / 255.0,
    0x4a as f32 / 255.0,
);

// ── Text colors ──
pub const TEXT_PRIMARY: Color = Color::from_rgb(
    0xe8 as f32 / 255.0,
    0xea as f32 / 255.0,
    0xf0 as f32 / 255.0,
);
pub const TEXT_SECONDARY: Color = Color::from_rgb(
    0x9d as f32 / 255.0,
    0xa3 as f32 / 255.0,
    0xb8 as f32 / 255.0,
);
pub const TEXT_MUTED: Color = Color::from_rgb(
    0x6b as f32 / 255.0,
    0x71 as f32 / 255.0,
    0x94 as f32 / 255.0,
);

// ── Accent ──
pub const ACCENT: Color = Color::from_rgb(
    0x63 as f32 / 255.0,
    0x66 as f32 / 255.0,
    0xf1 as f32 / 255.0,
);
pub const ACCENT_HOVER: Color = Color::from_rgb(
    0x81 as f32 / 255.0,
    0x8c as f32 / 255.0,
    0xf8 as f32 / 255.0,
);

// ── Semantic ──
pub const SUCCESS: Color = Color::from_rgb(
    0x22 as f32 / 255.0,
    0xc5 as f32 / 255.0,
    0x5e as f32 / 255.0,
);
pub const WARNING: Color = Color::from_rgb(
    0xf5 as f32 / 255.0,
    0x9e as f32 / 255.0,
    0x0b as f32 / 255.0,
);
pub const ERROR: Color = Color::from_rgb(
    0xef as f32 / 255.0,
    0x44 as f32 / 255.0,
    0x44 as f32 / 255.0,
);
pub const INFO: Color = Color::from_rgb(
    0x3b as f32 / 255.0,
    0x82 as f32 / 255.0,
    0xf6 as f32 / 255.0,
);

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => INFO,
        Severity::Success => SUCCESS,
        Severity::Warning => WARNING,
        Severity::Error => ERROR,
    }
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { a: alpha, ..color }
}
