//! Per-slide transition settings and the global display mode.

use std::fmt;
use std::ops::RangeInclusive;

/// Allowed entry/exit transition duration, in seconds.
pub const TRANSITION_DURATION: RangeInclusive<f32> = 0.5..=5.0;
pub const TRANSITION_DURATION_STEP: f32 = 0.1;

/// Allowed on-screen duration, in seconds.
pub const DISPLAY_DURATION: RangeInclusive<f32> = 1.0..=10.0;
pub const DISPLAY_DURATION_STEP: f32 = 0.5;

/// Edge a slide is implied to enter from or leave through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Top => write!(f, "Top"),
            Self::Bottom => write!(f, "Bottom"),
        }
    }
}

/// How many consecutive slides the preview shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub enum DisplayMode {
    #[default]
    Single,
    Pair,
}

impl DisplayMode {
    pub const ALL: [Self; 2] = [Self::Single, Self::Pair];

    /// Number of slides rendered side by side.
    pub fn span(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Pair => 2,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single Image"),
            Self::Pair => write!(f, "Image Pairs"),
        }
    }
}

/// Transition settings attached to one slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideSettings {
    pub entry_direction: Direction,
    pub exit_direction: Direction,
    pub entry_duration: f32,
    pub exit_duration: f32,
    pub display_duration: f32,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            entry_direction: Direction::Left,
            exit_direction: Direction::Right,
            entry_duration: 1.0,
            exit_duration: 1.0,
            display_duration: 3.0,
        }
    }
}

/// A single edited field together with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    EntryDirection(Direction),
    ExitDirection(Direction),
    EntryDuration(f32),
    ExitDuration(f32),
    DisplayDuration(f32),
}

impl SlideSettings {
    /// Returns a copy with exactly one field replaced.
    ///
    /// Durations are clamped into their allowed range and snapped to the
    /// slider step, so the result is always a valid record.
    #[must_use]
    pub fn with_change(self, change: SettingChange) -> Self {
        let mut next = self;
        match change {
            SettingChange::EntryDirection(dir) => next.entry_direction = dir,
            SettingChange::ExitDirection(dir) => next.exit_direction = dir,
            SettingChange::EntryDuration(secs) => {
                next.entry_duration =
                    snap(secs, &TRANSITION_DURATION, TRANSITION_DURATION_STEP);
            }
            SettingChange::ExitDuration(secs) => {
                next.exit_duration = snap(secs, &TRANSITION_DURATION, TRANSITION_DURATION_STEP);
            }
            SettingChange::DisplayDuration(secs) => {
                next.display_duration = snap(secs, &DISPLAY_DURATION, DISPLAY_DURATION_STEP);
            }
        }
        next
    }
}

/// Clamp `value` into `range` and round it to the nearest multiple of `step`
/// counted from the range start.
fn snap(value: f32, range: &RangeInclusive<f32>, step: f32) -> f32 {
    let (min, max) = (*range.start(), *range.end());
    if !value.is_finite() {
        return min;
    }
    let steps = ((value.clamp(min, max) - min) / step).round();
    // Two-decimal rounding strips float noise (1.2000000476 -> 1.2).
    let snapped = (min + steps * step).clamp(min, max);
    (snapped * 100.0).round() / 100.0
}
