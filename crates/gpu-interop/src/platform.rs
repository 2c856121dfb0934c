//! Platform selection strategies for creating a GL-sharing compute context.
//!
//! Apple's OpenCL derives the platform from the CGL share group alone. Every
//! other implementation needs an explicit platform handle paired with the GL
//! context and display (or device context) properties. A [`ContextStrategy`]
//! is picked once at startup by [`default_strategy`].

use std::fmt::Debug;

use crate::error::InteropError;

/// Extension advertised by platforms that can share buffers with GL.
pub const KHR_GL_SHARING: &str = "cl_khr_gl_sharing";
/// Apple's spelling of the same capability.
pub const APPLE_GL_SHARING: &str = "cl_APPLE_gl_sharing";

/// Description of one enumerated compute platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub index: usize,
    pub name: String,
    pub extensions: Vec<String>,
}

impl PlatformInfo {
    /// Build from a space-separated extension string as reported by the driver.
    pub fn new(index: usize, name: impl Into<String>, extensions: &str) -> Self {
        Self {
            index,
            name: name.into(),
            extensions: extensions.split_whitespace().map(str::to_owned).collect(),
        }
    }

    pub fn supports_gl_sharing(&self) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext == KHR_GL_SHARING || ext == APPLE_GL_SHARING)
    }
}

/// Native window-system API that owns the current GL context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSystem {
    Glx,
    Egl,
    Wgl,
    Cgl,
}

/// Raw native handles of the current GL context, as plain addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlShareHandles {
    pub window_system: WindowSystem,
    /// GLXContext, EGLContext, HGLRC or CGLContextObj.
    pub context: usize,
    /// X11 `Display*`, `EGLDisplay` or `HDC`. Unused on CGL.
    pub display: usize,
    /// CGL share group. Only set on CGL.
    pub share_group: usize,
}

/// One context property of a sharing request, decoupled from any compute API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingProperty {
    GlContext(usize),
    GlxDisplay(usize),
    EglDisplay(usize),
    WglHdc(usize),
    CglShareGroup(usize),
}

/// What a compute backend needs to create a context sharing with GL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharingRequest {
    /// Index into the enumerated platforms, or `None` to let the sharing
    /// properties determine the platform.
    pub platform: Option<usize>,
    /// Preferred device on that platform; `None` takes the first.
    pub device: Option<usize>,
    pub properties: Vec<SharingProperty>,
}

/// Turns the enumerated platforms and the current GL handles into a
/// [`SharingRequest`].
pub trait ContextStrategy: Debug {
    fn name(&self) -> &'static str;

    fn sharing_request(
        &self,
        platforms: &[PlatformInfo],
        handles: Option<&GlShareHandles>,
    ) -> Result<SharingRequest, InteropError>;
}

/// Apple: the CGL share group alone selects platform and devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareGroupStrategy;

impl ContextStrategy for ShareGroupStrategy {
    fn name(&self) -> &'static str {
        "cgl-share-group"
    }

    fn sharing_request(
        &self,
        platforms: &[PlatformInfo],
        handles: Option<&GlShareHandles>,
    ) -> Result<SharingRequest, InteropError> {
        if !platforms.iter().any(PlatformInfo::supports_gl_sharing) {
            return Err(InteropError::NoInteropCapablePlatform);
        }
        let handles = handles
            .filter(|h| h.share_group != 0)
            .ok_or(InteropError::NoCurrentGlContext)?;

        Ok(SharingRequest {
            platform: None,
            device: None,
            properties: vec![SharingProperty::CglShareGroup(handles.share_group)],
        })
    }
}

/// Everyone else: an explicit platform plus GL context and display.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformPairedStrategy {
    pub platform: Option<usize>,
    pub device: Option<usize>,
}

impl PlatformPairedStrategy {
    fn select<'a>(&self, platforms: &'a [PlatformInfo]) -> Result<&'a PlatformInfo, InteropError> {
        match self.platform {
            Some(index) => {
                let platform = platforms
                    .iter()
                    .find(|p| p.index == index)
                    .ok_or(InteropError::InvalidPlatformIndex {
                        index,
                        available: platforms.len(),
                    })?;
                if platform.supports_gl_sharing() {
                    Ok(platform)
                } else {
                    Err(InteropError::NoInteropCapablePlatform)
                }
            }
            None => platforms
                .iter()
                .find(|p| p.supports_gl_sharing())
                .ok_or(InteropError::NoInteropCapablePlatform),
        }
    }
}

impl ContextStrategy for PlatformPairedStrategy {
    fn name(&self) -> &'static str {
        "platform-paired"
    }

    fn sharing_request(
        &self,
        platforms: &[PlatformInfo],
        handles: Option<&GlShareHandles>,
    ) -> Result<SharingRequest, InteropError> {
        let platform = self.select(platforms)?;
        let handles = handles
            .filter(|h| h.context != 0)
            .ok_or(InteropError::NoCurrentGlContext)?;

        let mut properties = vec![SharingProperty::GlContext(handles.context)];
        match handles.window_system {
            WindowSystem::Glx => properties.push(SharingProperty::GlxDisplay(handles.display)),
            WindowSystem::Egl => properties.push(SharingProperty::EglDisplay(handles.display)),
            WindowSystem::Wgl => properties.push(SharingProperty::WglHdc(handles.display)),
            WindowSystem::Cgl => {
                properties.push(SharingProperty::CglShareGroup(handles.share_group))
            }
        }

        Ok(SharingRequest {
            platform: Some(platform.index),
            device: self.device,
            properties,
        })
    }
}

/// The entry of a driver's own platform listing that a [`SharingRequest`]
/// refers to: `index`, or the first platform when the request leaves it
/// open. An empty listing means there is nothing to share with.
pub fn pick_platform<T>(listed: Vec<T>, index: Option<usize>) -> Result<T, InteropError> {
    let available = listed.len();
    if available == 0 {
        return Err(InteropError::NoInteropCapablePlatform);
    }
    let index = index.unwrap_or(0);
    listed
        .into_iter()
        .nth(index)
        .ok_or(InteropError::InvalidPlatformIndex { index, available })
}

/// The strategy for the platform this binary was built for.
pub fn default_strategy(platform: Option<usize>, device: Option<usize>) -> Box<dyn ContextStrategy> {
    if cfg!(target_os = "macos") {
        Box::new(ShareGroupStrategy)
    } else {
        Box::new(PlatformPairedStrategy { platform, device })
    }
}
