//! Connected displays
//!
//! A [`Monitor`] is a lookup result, not an owner: the native layer creates and
//! destroys monitors as displays come and go. Lookups return `None` when no
//! monitor matches, so callers must be prepared for an absent display.

use crate::context::Context;
use crate::geometry::{ContentScale, Geometry, Position, Size};
use crate::handle::{Handle, NativeHandle, PointerHandle};
use crate::window::Window;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolution, colour depth and refresh rate of a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoMode {
    /// Width in screen coordinates
    pub width: u32,
    /// Height in screen coordinates
    pub height: u32,
    /// Bit depth of the red channel
    pub red_bits: u32,
    /// Bit depth of the green channel
    pub green_bits: u32,
    /// Bit depth of the blue channel
    pub blue_bits: u32,
    /// Refresh rate in Hz
    pub refresh_rate: u32,
}

impl VideoMode {
    /// 24-bit mode with the given resolution and refresh rate
    pub const fn new(width: u32, height: u32, refresh_rate: u32) -> Self {
        Self {
            width,
            height,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            refresh_rate,
        }
    }

    /// Resolution
    pub const fn size(&self) -> Size<u32> {
        Size::new(self.width, self.height)
    }

    /// Order used for mode lists: colour depth, then area, then width, then refresh rate
    pub(crate) fn sort_key(&self) -> (u32, u64, u32, u32) {
        (
            self.red_bits + self.green_bits + self.blue_bits,
            u64::from(self.width) * u64::from(self.height),
            self.width,
            self.refresh_rate,
        )
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ {}Hz (R{}G{}B{})",
            self.width, self.height, self.refresh_rate, self.red_bits, self.green_bits, self.blue_bits
        )
    }
}

/// Per-channel gamma lookup tables of equal length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GammaRamp {
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
}

impl GammaRamp {
    /// Build a ramp from three channels; `None` unless they are non-empty and equally long
    pub fn new(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Option<Self> {
        (!red.is_empty() && red.len() == green.len() && red.len() == blue.len()).then_some(Self { red, green, blue })
    }

    /// Ramp GLFW generates for a gamma exponent
    ///
    /// Returns `None` for non-positive or non-finite exponents and for fewer
    /// than two entries.
    pub fn from_exponent(gamma: f32, size: usize) -> Option<Self> {
        if !(gamma.is_finite() && gamma > 0.0) || size < 2 {
            return None;
        }
        let last = (size - 1) as f64;
        let exponent = 1.0 / f64::from(gamma);
        let channel: Vec<u16> = (0..size)
            .map(|i| {
                let value = (i as f64 / last).powf(exponent) * 65535.0 + 0.5;
                value.min(65535.0) as u16
            })
            .collect();
        Some(Self {
            red: channel.clone(),
            green: channel.clone(),
            blue: channel,
        })
    }

    /// Identity ramp
    pub fn linear(size: usize) -> Self {
        let last = size.saturating_sub(1).max(1) as u64;
        let channel: Vec<u16> = (0..size as u64)
            .map(|i| u16::try_from(i * 65535 / last).unwrap_or(u16::MAX))
            .collect();
        Self {
            red: channel.clone(),
            green: channel.clone(),
            blue: channel,
        }
    }

    /// Red channel
    pub fn red(&self) -> &[u16] {
        &self.red
    }

    /// Green channel
    pub fn green(&self) -> &[u16] {
        &self.green
    }

    /// Blue channel
    pub fn blue(&self) -> &[u16] {
        &self.blue
    }

    /// Entries per channel
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// Whether the ramp has no entries
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// A connected display
///
/// Mutators change state shared by every user of the display, not just this
/// wrapper.
#[derive(Debug, Clone)]
pub struct Monitor {
    context: Context,
    pointer: PointerHandle,
}

impl Monitor {
    pub(crate) fn from_handle(context: &Context, handle: Handle) -> Option<Self> {
        PointerHandle::try_new(handle).map(|pointer| Self {
            context: context.clone(),
            pointer,
        })
    }

    /// Every connected monitor, primary first
    pub fn monitors(context: &Context) -> Vec<Self> {
        let handles = context.platform().monitors();
        handles
            .into_iter()
            .filter_map(|handle| Self::from_handle(context, handle))
            .collect()
    }

    /// The primary monitor, `None` when no display is connected
    pub fn primary(context: &Context) -> Option<Self> {
        let handle = context.platform().primary_monitor();
        Self::from_handle(context, handle)
    }

    /// The monitor a full screen window is on, `None` for windowed windows
    pub fn window_monitor(window: &Window) -> Option<Self> {
        window.monitor()
    }

    /// Virtual position of the upper-left corner
    pub fn position(&self) -> Position<i32> {
        self.context.platform().monitor_pos(self.handle()).into()
    }

    /// Physical size in millimetres
    pub fn physical_size(&self) -> Size<i32> {
        self.context.platform().monitor_physical_size(self.handle()).into()
    }

    /// Area not occupied by task bars and docks
    pub fn workarea(&self) -> Geometry<i32> {
        self.context.platform().monitor_workarea(self.handle()).into()
    }

    /// Content scale
    pub fn content_scale(&self) -> ContentScale {
        self.context.platform().monitor_content_scale(self.handle()).into()
    }

    /// Human-readable name, not guaranteed unique
    pub fn name(&self) -> Option<String> {
        self.context.platform().monitor_name(self.handle())
    }

    /// Current video mode
    pub fn video_mode(&self) -> Option<VideoMode> {
        self.context.platform().video_mode(self.handle())
    }

    /// Supported video modes in ascending order
    pub fn video_modes(&self) -> Vec<VideoMode> {
        self.context.platform().video_modes(self.handle())
    }

    /// Apply a ramp generated from a gamma exponent
    pub fn set_gamma(&self, gamma: f32) {
        self.context.platform().set_gamma(self.handle(), gamma);
    }

    /// Current gamma ramp
    pub fn gamma_ramp(&self) -> Option<GammaRamp> {
        self.context.platform().gamma_ramp(self.handle())
    }

    /// Apply a gamma ramp
    pub fn set_gamma_ramp(&self, ramp: &GammaRamp) {
        self.context.platform().set_gamma_ramp(self.handle(), ramp);
    }

    /// Application value attached to the monitor
    pub fn user_pointer(&self) -> usize {
        self.context.platform().monitor_user_pointer(self.handle())
    }

    /// Attach an application value to the monitor
    pub fn set_user_pointer(&self, pointer: usize) {
        self.context.platform().set_monitor_user_pointer(self.handle(), pointer);
    }
}

impl NativeHandle for Monitor {
    fn handle(&self) -> Handle {
        self.pointer.handle()
    }
}

impl PartialEq for Monitor {
    fn eq(&self, other: &Self) -> bool {
        self.handle() == other.handle()
    }
}

impl Eq for Monitor {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessMonitor, HeadlessPlatform};
    use approx::assert_relative_eq;

    #[test]
    fn test_primary_monitor_has_name() {
        let context = Context::headless();
        let primary = Monitor::primary(&context).expect("headless platform has a display");
        assert!(!primary.name().unwrap_or_default().is_empty());
    }

    #[test]
    fn test_primary_absent_without_displays() {
        let context = Context::new(HeadlessPlatform::without_monitors());
        assert!(Monitor::primary(&context).is_none());
        assert!(Monitor::monitors(&context).is_empty());
    }

    #[test]
    fn test_monitors_list_primary_first() {
        let platform = HeadlessPlatform::new();
        platform.add_monitor(HeadlessMonitor::new("Side", 1280, 1024).at(1920, 0).with_content_scale(1.5, 1.5));
        let context = Context::new(platform);

        let monitors = Monitor::monitors(&context);
        assert_eq!(monitors.len(), 2);
        assert_eq!(Some(monitors[0].clone()), Monitor::primary(&context));

        let side = &monitors[1];
        assert_eq!(side.name().as_deref(), Some("Side"));
        assert_eq!(side.position(), Position::new(1920, 0));
        assert_eq!(side.workarea(), Geometry::new(1920, 0, 1280, 1024));
        assert_relative_eq!(side.content_scale().x_scale, 1.5);
        assert_eq!(side.video_mode(), Some(VideoMode::new(1280, 1024, 60)));
    }

    #[test]
    fn test_user_pointer_is_shared_between_wrappers() {
        let context = Context::headless();
        let first = Monitor::primary(&context).unwrap();
        let second = Monitor::primary(&context).unwrap();

        first.set_user_pointer(0xbeef);
        assert_eq!(second.user_pointer(), 0xbeef);
    }

    #[test]
    fn test_set_gamma_replaces_ramp() {
        let context = Context::headless();
        let monitor = Monitor::primary(&context).unwrap();

        monitor.set_gamma(2.2);
        let ramp = monitor.gamma_ramp().unwrap();
        assert_eq!(ramp, GammaRamp::from_exponent(2.2, ramp.len()).unwrap());
        assert_ne!(ramp, GammaRamp::linear(ramp.len()));
    }

    #[test]
    fn test_gamma_ramp_requires_equal_channels() {
        assert!(GammaRamp::new(vec![0; 4], vec![0; 4], vec![0; 3]).is_none());
        assert!(GammaRamp::new(Vec::new(), Vec::new(), Vec::new()).is_none());
        assert_eq!(GammaRamp::new(vec![1; 4], vec![2; 4], vec![3; 4]).map(|r| r.len()), Some(4));
    }

    #[test]
    fn test_unit_exponent_matches_linear_ramp() {
        let generated = GammaRamp::from_exponent(1.0, 256).unwrap();
        let linear = GammaRamp::linear(256);
        assert_eq!(generated, linear);
        assert_eq!(linear.red()[255], u16::MAX);
        assert_eq!(linear.green()[1], 257);
        assert!(GammaRamp::from_exponent(0.0, 256).is_none());
        assert!(GammaRamp::from_exponent(f32::NAN, 256).is_none());
    }

    #[test]
    fn test_video_modes_ascend() {
        let context = Context::headless();
        let modes = Monitor::primary(&context).unwrap().video_modes();
        assert!(!modes.is_empty());
        assert!(modes.windows(2).all(|pair| pair[0].sort_key() < pair[1].sort_key()));
        assert_eq!(VideoMode::new(1920, 1080, 60).to_string(), "1920x1080 @ 60Hz (R8G8B8)");
    }

    #[test]
    #[ignore = "requires a display"]
    fn test_glfw_primary_monitor_has_name() {
        let context = Context::glfw(&crate::config::FacadeConfig::default()).unwrap();
        let primary = Monitor::primary(&context).unwrap();
        assert!(!primary.name().unwrap_or_default().is_empty());
    }

    #[test]
    #[ignore = "requires a display"]
    fn test_glfw_primary_gamma_ramp_round_trip() {
        let context = Context::glfw(&crate::config::FacadeConfig::default()).unwrap();
        let primary = Monitor::primary(&context).unwrap();
        let original = primary.gamma_ramp().unwrap();

        primary.set_gamma(1.0);
        assert_eq!(primary.gamma_ramp().map(|ramp| ramp.len()), Some(original.len()));
        primary.set_gamma_ramp(&original);
        assert_eq!(primary.gamma_ramp(), Some(original));
    }
}
