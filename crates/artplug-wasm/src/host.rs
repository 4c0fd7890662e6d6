//! Artplayer as a [`HostPlayer`], plus the glue shared by both plugins

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use artplug_core::selector::{ControlDescriptor, LabelFn, SettingDescriptor};
use artplug_core::{
    Error, EventPayload, HostEvent, HostPlayer, PluginOptions, SelectorItem, SelectorKind, SourceAdapter,
};
use js_sys::{Array, Function, Object};
use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::bindings::{Artplayer, Panel};
use crate::dom::{describe, get, set};

/// Handles a selector choice; returns the label to display
pub type SelectHandler = Rc<dyn Fn(SelectorKind, SelectorItem) -> String>;

/// Serialize into a plain JS object (maps become objects)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Surface {
    Control,
    Setting,
}

/// An Artplayer instance seen through [`HostPlayer`]
pub struct ArtHost {
    art: Artplayer,
    on_select: Option<SelectHandler>,
    // Last selector array pushed per panel; `check` needs the host's own items
    selectors: RefCell<HashMap<(Surface, String), Array>>,
}

impl ArtHost {
    pub fn new(art: Artplayer) -> Self {
        Self {
            art,
            on_select: None,
            selectors: RefCell::new(HashMap::new()),
        }
    }

    /// Host whose selector panels report choices to `handler`
    pub fn with_selection(art: Artplayer, handler: SelectHandler) -> Self {
        Self {
            on_select: Some(handler),
            ..Self::new(art)
        }
    }

    /// Report `err` through `Artplayer.utils.errorHandle`
    ///
    /// Returns the value to throw back to the caller.
    pub fn raise(&self, err: &Error) -> JsValue {
        let message = JsValue::from_str(&err.to_string());
        let handle = get(&get(&get(&self.art, "constructor"), "utils"), "errorHandle");
        if let Some(handle) = handle.dyn_ref::<Function>() {
            if let Err(thrown) = handle.call2(&JsValue::NULL, &JsValue::FALSE, &message) {
                return thrown;
            }
        }
        js_sys::Error::new(&err.to_string()).into()
    }

    fn select_callback(&self, panel: &str) -> Option<JsValue> {
        let handler = Rc::clone(self.on_select.as_ref()?);
        let kind = SelectorKind::from_panel_name(panel)?;
        let callback = move |item: JsValue| -> JsValue {
            match serde_wasm_bindgen::from_value::<SelectorItem>(item) {
                Ok(item) => JsValue::from_str(&handler(kind, item)),
                Err(err) => {
                    warn!(panel = kind.panel_name(), %err, "Unreadable selector item");
                    JsValue::UNDEFINED
                }
            }
        };
        Some(Closure::wrap(Box::new(callback) as Box<dyn FnMut(JsValue) -> JsValue>).into_js_value())
    }

    fn push(&self, surface: Surface, name: &str, value: JsValue) -> Result<(), JsValue> {
        if let Ok(selector) = get(&value, "selector").dyn_into::<Array>() {
            self.selectors
                .borrow_mut()
                .insert((surface, name.to_string()), selector);
        }
        if let Some(callback) = self.select_callback(name) {
            set(&value, "onSelect", &callback)?;
        }
        self.panel(surface).update(&value)?;
        Ok(())
    }

    fn panel(&self, surface: Surface) -> Panel {
        match surface {
            Surface::Control => self.art.controls(),
            Surface::Setting => self.art.setting(),
        }
    }

    fn check(&self, surface: Surface, panel: &str, item: &SelectorItem) {
        let stored = self
            .selectors
            .borrow()
            .get(&(surface, panel.to_string()))
            .and_then(|items| {
                items
                    .iter()
                    .find(|candidate| get(candidate, "value").as_f64() == Some(f64::from(item.value)))
            });
        let result = match stored {
            Some(js_item) => Ok(js_item),
            None => to_js(item),
        }
        .and_then(|js_item| self.panel(surface).check(&js_item));
        if let Err(err) = result {
            debug!(panel, cause = %describe(&err), "Selector check failed");
        }
    }
}

impl HostPlayer for ArtHost {
    fn emit(&self, event: HostEvent, data: Option<f64>) {
        let payload = EventPayload::new(event, data);
        match to_js(&payload) {
            Ok(payload) => self.art.emit(&event.name(), &payload),
            Err(err) => warn!(%event, cause = %describe(&err), "Could not emit event"),
        }
    }

    fn show_notice(&self, message: &str) {
        if let Err(err) = set(&self.art.notice(), "show", &JsValue::from_str(message)) {
            debug!(cause = %describe(&err), "Could not show notice");
        }
    }

    fn set_loading(&self, show: bool) {
        if let Err(err) = set(&self.art.loading(), "show", &JsValue::from_bool(show)) {
            debug!(cause = %describe(&err), "Could not toggle loading");
        }
    }

    fn update_control(&self, descriptor: &ControlDescriptor) {
        let result = to_js(descriptor).and_then(|value| self.push(Surface::Control, descriptor.name, value));
        if let Err(err) = result {
            warn!(panel = descriptor.name, cause = %describe(&err), "Control update failed");
        }
    }

    fn check_control(&self, panel: &str, item: &SelectorItem) {
        self.check(Surface::Control, panel, item);
    }

    fn update_setting(&self, descriptor: &SettingDescriptor) {
        let result = to_js(descriptor).and_then(|value| {
            // Resolve the icon key against the host's icon set
            let icon = get(&self.art.icons(), descriptor.icon);
            if !icon.is_undefined() {
                set(&value, "icon", &icon)?;
            }
            self.push(Surface::Setting, descriptor.name, value)
        });
        if let Err(err) = result {
            warn!(panel = descriptor.name, cause = %describe(&err), "Setting update failed");
        }
    }

    fn check_setting(&self, panel: &str, item: &SelectorItem) {
        self.check(Surface::Setting, panel, item);
    }
}

/// Read `art.option`, keeping at least `url` and `autoplay` when the rest is malformed
pub fn plugin_options(art: &Artplayer) -> PluginOptions {
    let option = art.option();
    serde_wasm_bindgen::from_value(option.clone()).unwrap_or_else(|err| {
        warn!(%err, "Unreadable player options, using defaults");
        PluginOptions {
            autoplay: get(&option, "autoplay").is_truthy(),
            ..PluginOptions::with_url(get(&option, "url").as_string().unwrap_or_default())
        }
    })
}

/// Wrap a user `getName(item, index)` function
pub fn label_fn<T: Serialize + 'static>(name: JsValue) -> Option<LabelFn<T>> {
    let function = name.dyn_into::<Function>().ok()?;
    Some(Rc::new(move |item: &T, index: usize| {
        let item = to_js(item).unwrap_or(JsValue::UNDEFINED);
        match function.call2(&JsValue::NULL, &item, &JsValue::from(index as u32)) {
            Ok(label) => label_text(&label),
            Err(err) => {
                warn!(cause = %describe(&err), "getName threw");
                String::new()
            }
        }
    }))
}

/// `String(value)` for a `getName` result; empty for `null` and `undefined`
fn label_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(number) = value.as_f64() {
        return number.to_string();
    }
    if let Some(flag) = value.as_bool() {
        return flag.to_string();
    }
    match value.dyn_ref::<Object>() {
        Some(object) => String::from(object.to_string()),
        None => String::new(),
    }
}

/// Subscribe to a host event for the life of the page
pub fn listen(art: &Artplayer, event: &str, handler: impl FnMut() + 'static) {
    let handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    art.on(event, handler.as_ref().unchecked_ref());
    handler.forget();
}

/// The object returned to Artplayer from a plugin factory
pub fn plugin_surface(adapter: Rc<dyn SourceAdapter>, host: Rc<ArtHost>) -> Result<JsValue, JsValue> {
    let surface = Object::new();
    set(&surface, "name", &JsValue::from_str(adapter.name()))?;
    let capabilities = adapter.capabilities();

    if capabilities.update {
        let adapter = Rc::clone(&adapter);
        let update = move || -> Result<(), JsValue> { adapter.update().map_err(|err| host.raise(&err)) };
        let update = Closure::wrap(Box::new(update) as Box<dyn FnMut() -> Result<(), JsValue>>);
        set(&surface, "update", &update.into_js_value())?;
    }

    let methods: [(&str, bool, fn(&dyn SourceAdapter)); 4] = [
        ("destroy", capabilities.destroy, |a| a.destroy()),
        ("start", capabilities.start, |a| a.start()),
        ("stop", capabilities.stop, |a| a.stop()),
        ("mute", capabilities.mute, |a| a.mute()),
    ];
    for (name, enabled, call) in methods {
        if !enabled {
            continue;
        }
        let adapter = Rc::clone(&adapter);
        let method = Closure::wrap(Box::new(move || call(&*adapter)) as Box<dyn FnMut()>);
        set(&surface, name, &method.into_js_value())?;
    }

    Ok(surface.into())
}
