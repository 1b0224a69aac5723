//! Continuous ambient animation.
//!
//! Every cell loops the same 2 s pulse forever, starting once its wave delay has
//! elapsed. A cycle is three keyframes `[rest, peak, rest]`; each half is eased with a
//! quadratic ease-in-out. Opacity oscillates around the depth preset's base opacity,
//! scale breathes between 0.9 and 1.15, a brightness/hue sweep and a cyan glow pulse
//! ride along. While a cell is popped its scale snaps to 0.8.
//!
//! The driver is a pure function of layout, pop flag and elapsed time, independent of
//! the cell state machine.

use crate::model::layout::CellLayout;
use serde::Serialize;
use std::time::Duration;

/// Length of one ambient cycle.
pub const CYCLE: Duration = Duration::from_secs(2);
/// Scale while the pop overlay is active.
pub const POP_SCALE: f64 = 0.8;
/// Glow color, RGB.
pub const GLOW_RGB: (u8, u8, u8) = (20, 183, 211);

#[derive(Debug, Clone, Copy)]
struct Keyframes {
    rest: f64,
    peak: f64,
}

impl Keyframes {
    const fn new(rest: f64, peak: f64) -> Self {
        Self { rest, peak }
    }

    fn at(self, progress: f64) -> f64 {
        let (from, to, t) = if progress < 0.5 {
            (self.rest, self.peak, progress * 2.0)
        } else {
            (self.peak, self.rest, (progress - 0.5) * 2.0)
        };
        from + (to - from) * ease_in_out(t)
    }
}

// opacity is a multiplier on the depth preset's base opacity
const OPACITY: Keyframes = Keyframes::new(0.7, 1.1);
const SCALE: Keyframes = Keyframes::new(0.9, 1.15);
const BRIGHTNESS: Keyframes = Keyframes::new(0.8, 1.3);
const HUE_ROTATE_DEG: Keyframes = Keyframes::new(0.0, 10.0);
const GLOW_RADIUS_PX: Keyframes = Keyframes::new(0.0, 10.0);
const GLOW_ALPHA: Keyframes = Keyframes::new(0.0, 0.4);

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Visual parameters of a cell at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientPose {
    /// Opacity in `[0, 1]`-ish; peaks slightly above the base opacity.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Brightness filter factor.
    pub brightness: f64,
    /// Hue rotation in degrees.
    pub hue_rotate_deg: f64,
    /// Glow blur radius in pixels.
    pub glow_radius_px: f64,
    /// Glow alpha.
    pub glow_alpha: f64,
}

impl AmbientPose {
    /// Pose before the wave delay has elapsed.
    pub const INITIAL: AmbientPose = AmbientPose {
        opacity: 0.0,
        scale: 0.9,
        brightness: 1.0,
        hue_rotate_deg: 0.0,
        glow_radius_px: 0.0,
        glow_alpha: 0.0,
    };

    /// CSS `filter` value.
    pub fn filter_css(&self) -> String {
        format!(
            "brightness({:.3}) hue-rotate({:.2}deg)",
            self.brightness, self.hue_rotate_deg
        )
    }

    /// CSS `box-shadow` value.
    pub fn box_shadow_css(&self) -> String {
        let (r, g, b) = GLOW_RGB;
        format!(
            "0 0 {:.2}px rgba({}, {}, {}, {:.3})",
            self.glow_radius_px, r, g, b, self.glow_alpha
        )
    }
}

/// Computes ambient poses.
pub struct AmbientDriver;

impl AmbientDriver {
    /// Position inside the current cycle, in `[0, 1)`, or `None` while the wave delay
    /// has not elapsed yet.
    pub fn cycle_progress(elapsed: Duration, wave_delay: Duration) -> Option<f64> {
        let running = elapsed.checked_sub(wave_delay)?;
        let cycle = CYCLE.as_secs_f64();
        Some((running.as_secs_f64() % cycle) / cycle)
    }

    /// Pose of a cell `elapsed` after mount.
    pub fn pose(layout: &CellLayout, popped: bool, elapsed: Duration) -> AmbientPose {
        let mut pose = match Self::cycle_progress(elapsed, layout.wave_delay()) {
            None => AmbientPose::INITIAL,
            Some(progress) => AmbientPose {
                opacity: OPACITY.at(progress) * layout.depth.base_opacity,
                scale: SCALE.at(progress),
                brightness: BRIGHTNESS.at(progress),
                hue_rotate_deg: HUE_ROTATE_DEG.at(progress),
                glow_radius_px: GLOW_RADIUS_PX.at(progress),
                glow_alpha: GLOW_ALPHA.at(progress),
            },
        };
        if popped {
            pose.scale = POP_SCALE;
        }
        pose
    }
}
