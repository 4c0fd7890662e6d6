//! Source adapter surface
//!
//! Artplayer calls plugin hooks opportunistically: whatever subset of
//! `update`, `destroy`, `start`, `stop` and `mute` a plugin returns.

use crate::Result;

/// Hooks a plugin exposes to the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub update: bool,
    pub destroy: bool,
    pub start: bool,
    pub stop: bool,
    pub mute: bool,
}

/// An external media backend made to look like the host's media element
pub trait SourceAdapter {
    /// Plugin name reported to the host
    fn name(&self) -> &'static str;

    /// Hooks this adapter actually implements
    fn capabilities(&self) -> Capabilities;

    /// Refresh UI derived from the backend
    fn update(&self) -> Result<()> {
        Ok(())
    }

    /// Release every external resource; idempotent
    fn destroy(&self) {}

    fn start(&self) {}

    fn stop(&self) {}

    fn mute(&self) {}
}
