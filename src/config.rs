//! Editor tunables, with defaults taken from [`crate::consts`] and optional
//! overrides from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{
    DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y, HANDLE_RADIUS_PX, MIN_ELEMENT_SIZE, TOOLBAR_OFFSET_Y, ZOOM_MAX_PERCENT,
    ZOOM_MIN_PERCENT, ZOOM_STEP_PERCENT,
};
use crate::error::ConfigError;

/// Allowed zoom range and increment, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: u16,
    pub max: u16,
    pub step: u16,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: ZOOM_MIN_PERCENT, max: ZOOM_MAX_PERCENT, step: ZOOM_STEP_PERCENT }
    }
}

impl ZoomLimits {
    /// Clamp a (possibly out-of-range) zoom level into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, zoom: i32) -> u16 {
        let clamped = zoom.clamp(i32::from(self.min), i32::from(self.max));
        u16::try_from(clamped).unwrap_or(self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Resize floor for width and height, in canvas pixels.
    pub min_element_size: f64,
    pub zoom: ZoomLimits,
    /// Position given to newly added elements.
    pub default_position: Point,
    /// Distance the floating toolbar anchor sits above an element.
    pub toolbar_offset: f64,
    /// Screen-space half extent of a resize handle's hit square.
    pub handle_radius_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_element_size: MIN_ELEMENT_SIZE,
            zoom: ZoomLimits::default(),
            default_position: Point::new(DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y),
            toolbar_offset: TOOLBAR_OFFSET_Y,
            handle_radius_px: HANDLE_RADIUS_PX,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `SLIDE_CANVAS_MIN_SIZE`: default 20
    /// - `SLIDE_CANVAS_ZOOM_MIN`: default 10
    /// - `SLIDE_CANVAS_ZOOM_MAX`: default 300
    /// - `SLIDE_CANVAS_ZOOM_STEP`: default 10
    /// - `SLIDE_CANVAS_TOOLBAR_OFFSET`: default 60
    /// - `SLIDE_CANVAS_HANDLE_RADIUS`: default 6
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for unparsable values and a range error when the
    /// resulting limits are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Same as [`EditorConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_element_size: parse_var(&lookup, "SLIDE_CANVAS_MIN_SIZE", defaults.min_element_size)?,
            zoom: ZoomLimits {
                min: parse_var(&lookup, "SLIDE_CANVAS_ZOOM_MIN", defaults.zoom.min)?,
                max: parse_var(&lookup, "SLIDE_CANVAS_ZOOM_MAX", defaults.zoom.max)?,
                step: parse_var(&lookup, "SLIDE_CANVAS_ZOOM_STEP", defaults.zoom.step)?,
            },
            default_position: defaults.default_position,
            toolbar_offset: parse_var(&lookup, "SLIDE_CANVAS_TOOLBAR_OFFSET", defaults.toolbar_offset)?,
            handle_radius_px: parse_var(&lookup, "SLIDE_CANVAS_HANDLE_RADIUS", defaults.handle_radius_px)?,
        };
        config.validate()?;
        tracing::debug!(
            min_size = config.min_element_size,
            zoom_min = config.zoom.min,
            zoom_max = config.zoom.max,
            zoom_step = config.zoom.step,
            "editor config loaded"
        );
        Ok(config)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_element_size.is_nan() || self.min_element_size <= 0.0 {
            return Err(ConfigError::MinSize(self.min_element_size));
        }
        if self.zoom.min == 0 || self.zoom.min > self.zoom.max {
            return Err(ConfigError::ZoomRange { min: self.zoom.min, max: self.zoom.max });
        }
        if self.zoom.step == 0 {
            return Err(ConfigError::ZoomStep);
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var: key.to_string(), value: raw }),
    }
}
