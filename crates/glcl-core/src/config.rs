//! Demo configuration: window geometry, dataset size and platform choice.
//!
//! Every field has a default; environment variables override them:
//!
//! | variable        | field                     |
//! |-----------------|---------------------------|
//! | `GLCL_POINTS`   | [`PlotConfig::point_count`] |
//! | `GLCL_WIDTH`    | window width              |
//! | `GLCL_HEIGHT`   | window height             |
//! | `GLCL_PLATFORM` | [`PlotConfig::platform_index`] |
//! | `GLCL_DEVICE`   | [`PlotConfig::device_index`] |

use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const ENV_POINTS: &str = "GLCL_POINTS";
pub const ENV_WIDTH: &str = "GLCL_WIDTH";
pub const ENV_HEIGHT: &str = "GLCL_HEIGHT";
pub const ENV_PLATFORM: &str = "GLCL_PLATFORM";
pub const ENV_DEVICE: &str = "GLCL_DEVICE";

/// Window position and size in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 600,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub title: String,
    pub window: WindowGeometry,
    /// Number of points in the generated dataset.
    pub point_count: usize,
    /// Preferred compute platform; `None` picks the first one with GL sharing.
    pub platform_index: Option<usize>,
    /// Preferred device on the chosen platform; `None` picks the first.
    pub device_index: Option<usize>,
    pub clear_color: [f32; 4],
    pub line_color: [f32; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "GL/CL interop sine plot".to_string(),
            window: WindowGeometry::default(),
            point_count: 10_000,
            platform_index: None,
            device_index: None,
            clear_color: [0.0, 0.0, 0.0, 0.0],
            line_color: [1.0, 1.0, 0.0],
        }
    }
}

impl PlotConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(points) = parse_positive::<usize>(&lookup, ENV_POINTS)? {
            config.point_count = points;
        }
        if let Some(width) = parse_positive::<u32>(&lookup, ENV_WIDTH)? {
            config.window.width = width;
        }
        if let Some(height) = parse_positive::<u32>(&lookup, ENV_HEIGHT)? {
            config.window.height = height;
        }
        config.platform_index = parse_var(&lookup, ENV_PLATFORM)?;
        config.device_index = parse_var(&lookup, ENV_DEVICE)?;

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value {raw:?} for {key}")),
        _ => Ok(None),
    }
}

/// Like [`parse_var`], for counts and sizes that must be at least 1.
fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = parse_var::<T>(lookup, key)?;
    if value.as_ref() == Some(&T::default()) {
        bail!("{key} must be at least 1");
    }
    Ok(value)
}
