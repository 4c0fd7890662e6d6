//! On-demand loading of external SDK scripts
//!
//! One attempt per page: a script is injected only when its library is not
//! already on `window` and no `<script>` tag with the same source exists.

use crate::Result;
use tracing::{debug, info};

/// Page-level script environment
pub trait ScriptEnvironment {
    /// The library's global is present
    fn is_library_ready(&self) -> bool;

    /// A `<script src=...>` tag for `src` is already in the document
    fn has_script(&self, src: &str) -> bool;

    /// Append a `<script>` tag for `src`
    fn inject_script(&self, src: &str) -> Result<()>;
}

/// Outcome of [`ensure_script`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Library usable now
    Available,
    /// Tag injected by this call; wait for its load event
    Injected,
    /// Tag injected earlier by someone else; wait for its load event
    Pending,
}

/// Make sure the script for `src` is loaded or loading
pub fn ensure_script<E: ScriptEnvironment + ?Sized>(env: &E, src: &str) -> Result<ScriptStatus> {
    if env.is_library_ready() {
        return Ok(ScriptStatus::Available);
    }
    if env.has_script(src) {
        debug!(src, "Script tag already present");
        return Ok(ScriptStatus::Pending);
    }
    env.inject_script(src)?;
    info!(src, "Script injected");
    Ok(ScriptStatus::Injected)
}
