//! Editor window bookkeeping.
//!
//! The editor's pixels come from an external runtime that draws into the
//! host window on its own thread. This side only claims the single editor
//! slot, negotiates the window size and keeps the control shadow listening
//! to host automation while the window is open.

use tandem_core::{
    ControlParameters, EditorConstraints, EditorInstanceGuard, PluginConfig, PluginResult,
    ResizeHints, Size,
};

use crate::CONFIG;

/// An open editor.
#[derive(Debug)]
pub struct SynthEditor {
    _guard: EditorInstanceGuard,
    constraints: EditorConstraints,
    size: Size,
}

impl SynthEditor {
    /// Open the editor in `window_handle` and attach the control shadow.
    ///
    /// Fails if another editor is already open in this process.
    pub fn open(control: &mut ControlParameters, window_handle: usize) -> PluginResult<Self> {
        Self::open_with_config(&CONFIG, control, window_handle)
    }

    /// [`open`](Self::open) with the instance variable and size of `config`.
    pub fn open_with_config(
        config: &'static PluginConfig,
        control: &mut ControlParameters,
        window_handle: usize,
    ) -> PluginResult<Self> {
        let guard = EditorInstanceGuard::acquire(config.editor_instance_var, window_handle)?;
        let constraints = EditorConstraints {
            default_size: config.editor_size,
            ..EditorConstraints::DEFAULT
        };
        control.attach_editor();

        Ok(Self {
            _guard: guard,
            size: constraints.constrain(constraints.default_size),
            constraints,
        })
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size the host would get for `requested`, without applying it.
    pub fn check_size(&self, requested: Size) -> Size {
        self.constraints.constrain(requested)
    }

    /// Apply a host resize. Returns the size actually used.
    pub fn set_size(&mut self, requested: Size) -> Size {
        self.size = self.constraints.constrain(requested);
        self.size
    }

    pub fn resize_hints(&self) -> ResizeHints {
        self.constraints.resize_hints()
    }

    /// Close the editor and detach the control shadow.
    pub fn close(self, control: &mut ControlParameters) {
        control.detach_editor();
    }
}
