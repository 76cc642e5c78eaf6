//! Built-in type scale presets.

use crate::dimension::Dimension;

use super::fields::LetterSpacing;

/// A named combination of size, weight, line height and letter spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub font_size: Dimension,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: LetterSpacing,
}

/// The preset table, largest first.
pub const PRESETS: &[Preset] = &[
    Preset {
        label: "Display",
        font_size: Dimension::px(48.0),
        font_weight: 700,
        line_height: 1.1,
        letter_spacing: LetterSpacing::em(-0.02),
    },
    Preset {
        label: "Heading 1",
        font_size: Dimension::px(36.0),
        font_weight: 700,
        line_height: 1.2,
        letter_spacing: LetterSpacing::em(-0.01),
    },
    Preset {
        label: "Heading 2",
        font_size: Dimension::px(30.0),
        font_weight: 600,
        line_height: 1.25,
        letter_spacing: LetterSpacing::NORMAL,
    },
    Preset {
        label: "Heading 3",
        font_size: Dimension::px(24.0),
        font_weight: 600,
        line_height: 1.3,
        letter_spacing: LetterSpacing::NORMAL,
    },
    Preset {
        label: "Heading 4",
        font_size: Dimension::px(20.0),
        font_weight: 600,
        line_height: 1.4,
        letter_spacing: LetterSpacing::NORMAL,
    },
    Preset {
        label: "Body Large",
        font_size: Dimension::px(18.0),
        font_weight: 400,
        line_height: 1.6,
        letter_spacing: LetterSpacing::NORMAL,
    },
    Preset {
        label: "Body",
        font_size: Dimension::px(16.0),
        font_weight: 400,
        line_height: 1.5,
        letter_spacing: LetterSpacing::NORMAL,
    },
    Preset {
        label: "Body Small",
        font_size: Dimension::px(14.0),
        font_weight: 400,
        line_height: 1.5,
        letter_spacing: LetterSpacing::NORMAL,
    },
    Preset {
        label: "Caption",
        font_size: Dimension::px(12.0),
        font_weight: 400,
        line_height: 1.4,
        letter_spacing: LetterSpacing::em(0.01),
    },
    Preset {
        label: "Overline",
        font_size: Dimension::px(12.0),
        font_weight: 600,
        line_height: 1.4,
        letter_spacing: LetterSpacing::em(0.08),
    },
];

/// Looks a preset up by its label.
pub fn preset_by_label(label: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label))
}

/// Finds the preset with exactly this size and weight.
///
/// Matching is exact: `16px`/400 is "Body", `16.5px`/400 and `1rem`/400 are
/// nothing.
pub fn matching_preset(font_size: &Dimension, font_weight: u16) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.font_size == *font_size && p.font_weight == font_weight)
}
