//! Editor sizing and the single-instance rule.
//!
//! The editor's content is produced by an external runtime that owns its own
//! window; the core only negotiates the window size with the host and makes
//! sure at most one editor is open per process.

use std::env;

use crate::error::{PluginError, PluginResult};
use crate::types::Size;

// =============================================================================
// Sizing
// =============================================================================

/// Resize capabilities reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHints {
    pub resizable_x: bool,
    pub resizable_y: bool,
    pub preserve_aspect_ratio: bool,
    pub aspect_ratio_x: u32,
    pub aspect_ratio_y: u32,
}

/// Aspect-locked editor size constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConstraints {
    /// Size the editor opens at.
    pub default_size: Size,
    /// Horizontal aspect ratio term.
    pub ratio_x: u32,
    /// Vertical aspect ratio term.
    pub ratio_y: u32,
    /// Multiple of the ratio below which the editor never shrinks.
    pub min_scale: u32,
}

impl EditorConstraints {
    /// 16:9 at 1280x720, never smaller than 160x90.
    pub const DEFAULT: Self = Self {
        default_size: Size::new(1280, 720),
        ratio_x: 16,
        ratio_y: 9,
        min_scale: 10,
    };

    /// Smallest allowed size.
    pub const fn min_size(&self) -> Size {
        Size::new(self.ratio_x * self.min_scale, self.ratio_y * self.min_scale)
    }

    /// Adjust a size requested by the host.
    ///
    /// The size is raised to the minimum, then snapped to the largest whole
    /// multiple of the aspect ratio that either dimension allows. Growing
    /// from any edge or corner keeps the ratio; shrinking from a single edge
    /// is overruled by the other dimension.
    pub fn constrain(&self, requested: Size) -> Size {
        let min = self.min_size();
        let width = requested.width.max(min.width);
        let height = requested.height.max(min.height);

        let scale = (width / self.ratio_x).max(height / self.ratio_y);
        Size::new(scale * self.ratio_x, scale * self.ratio_y)
    }

    /// Resize hints for the host.
    pub const fn resize_hints(&self) -> ResizeHints {
        ResizeHints {
            resizable_x: true,
            resizable_y: true,
            preserve_aspect_ratio: true,
            aspect_ratio_x: self.ratio_x,
            aspect_ratio_y: self.ratio_y,
        }
    }
}

impl Default for EditorConstraints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Single instance
// =============================================================================

/// Marks an editor as open for the whole process.
///
/// The marker is an environment variable holding the parent window handle,
/// which the external editor runtime reads to find its host window. The
/// variable is cleared when the guard is dropped.
#[derive(Debug)]
pub struct EditorInstanceGuard {
    var: &'static str,
    window_handle: usize,
}

impl EditorInstanceGuard {
    /// Claim the editor slot for `window_handle`.
    ///
    /// Fails with [`PluginError::Editor`] if another editor already holds it.
    pub fn acquire(var: &'static str, window_handle: usize) -> PluginResult<Self> {
        if let Some(existing) = env::var_os(var).filter(|value| !value.is_empty()) {
            return Err(PluginError::Editor(format!(
                "an editor is already open in this process (window {})",
                existing.to_string_lossy()
            )));
        }

        env::set_var(var, window_handle.to_string());
        log::debug!("editor attached to window {window_handle}");
        Ok(Self { var, window_handle })
    }

    /// Parent window handle this guard was acquired for.
    pub fn window_handle(&self) -> usize {
        self.window_handle
    }

    /// Whether any editor currently holds the slot named `var`.
    pub fn is_held(var: &str) -> bool {
        env::var_os(var).is_some_and(|value| !value.is_empty())
    }
}

impl Drop for EditorInstanceGuard {
    fn drop(&mut self) {
        env::remove_var(self.var);
        log::debug!("editor detached from window {}", self.window_handle);
    }
}
