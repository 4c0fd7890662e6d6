//! Browser-side implementations of the core page traits

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use artplug_core::media::{PROXIED_METHODS, PROXIED_PROPERTIES};
use artplug_core::youtube::{ContainerSpec, EmbedContainer, IntervalTimer};
use artplug_core::{Error, MediaControllable, Result, ScriptEnvironment, VideoElement};
use js_sys::{Function, Number, Object, Promise, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlVideoElement};

/// `target[key]`, or `undefined` when the lookup throws
pub fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

pub fn set(target: &JsValue, key: &str, value: &JsValue) -> std::result::Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// First `<script>` whose `src` attribute equals `src`
pub fn script_tag(src: &str) -> Option<Element> {
    let selector = format!("script[src=\"{}\"]", src.replace('"', "\\\""));
    document()?.query_selector(&selector).ok().flatten()
}

/// Render a thrown JS value for logs and error messages
pub fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

/// A third-party library exposed on `window`
#[derive(Debug, Clone, Copy)]
pub struct PageScripts {
    library: &'static str,
    global: &'static str,
    member: Option<&'static str>,
}

impl PageScripts {
    /// `window.Hls`
    pub fn hls() -> Self {
        Self {
            library: "HLS.js",
            global: "Hls",
            member: None,
        }
    }

    /// `window.YT.Player`
    pub fn youtube() -> Self {
        Self {
            library: "YouTube IFrame API",
            global: "YT",
            member: Some("Player"),
        }
    }
}

impl ScriptEnvironment for PageScripts {
    fn is_library_ready(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let global = get(&window, self.global);
        match self.member {
            Some(member) => global.is_object() && get(&global, member).is_function(),
            None => global.is_function(),
        }
    }

    fn has_script(&self, src: &str) -> bool {
        script_tag(src).is_some()
    }

    fn inject_script(&self, src: &str) -> Result<()> {
        let failed = |err: JsValue| {
            debug!(src, cause = %describe(&err), "Script injection failed");
            Error::script_load(self.library, src)
        };
        let document = document().ok_or_else(|| Error::script_load(self.library, src))?;
        let script = document.create_element("script").map_err(failed)?;
        script.set_attribute("src", src).map_err(failed)?;
        script.set_attribute("async", "").map_err(failed)?;
        let parent: Element = match document.head() {
            Some(head) => head.into(),
            None => document
                .document_element()
                .ok_or_else(|| Error::script_load(self.library, src))?,
        };
        parent.append_child(&script).map_err(failed)?;
        Ok(())
    }
}

/// The host's `<video>` element
#[derive(Debug, Clone)]
pub struct NativeVideo {
    element: HtmlVideoElement,
}

impl NativeVideo {
    pub fn new(element: HtmlVideoElement) -> Self {
        Self { element }
    }

    // Calls through the instance so installed overrides apply
    fn invoke(&self, method: &str) {
        let function = get(&self.element, method);
        if let Some(function) = function.dyn_ref::<Function>() {
            if let Err(err) = function.call0(&self.element) {
                debug!(method, cause = %describe(&err), "Video call rejected");
            }
        }
    }
}

fn define_accessor(
    target: &Object,
    key: &str,
    getter: JsValue,
    setter: Option<JsValue>,
) -> std::result::Result<(), JsValue> {
    let descriptor = Object::new();
    set(&descriptor, "get", &getter)?;
    if let Some(setter) = setter {
        set(&descriptor, "set", &setter)?;
    }
    set(&descriptor, "configurable", &JsValue::TRUE)?;
    Object::define_property(target, &JsValue::from_str(key), &descriptor);
    Ok(())
}

fn define_method(target: &Object, key: &str, method: JsValue) -> std::result::Result<(), JsValue> {
    let descriptor = Object::new();
    set(&descriptor, "value", &method)?;
    set(&descriptor, "configurable", &JsValue::TRUE)?;
    set(&descriptor, "writable", &JsValue::TRUE)?;
    Object::define_property(target, &JsValue::from_str(key), &descriptor);
    Ok(())
}

fn number_getter(proxy: &Rc<dyn MediaControllable>, read: fn(&dyn MediaControllable) -> f64) -> JsValue {
    let proxy = Rc::clone(proxy);
    Closure::wrap(Box::new(move || JsValue::from_f64(read(&*proxy))) as Box<dyn FnMut() -> JsValue>)
        .into_js_value()
}

fn number_setter(proxy: &Rc<dyn MediaControllable>, write: fn(&dyn MediaControllable, f64)) -> JsValue {
    let proxy = Rc::clone(proxy);
    Closure::wrap(Box::new(move |value: JsValue| write(&*proxy, Number::new(&value).value_of()))
        as Box<dyn FnMut(JsValue)>)
    .into_js_value()
}

fn install(element: &Object, proxy: &Rc<dyn MediaControllable>) -> std::result::Result<(), JsValue> {
    define_accessor(
        element,
        "currentTime",
        number_getter(proxy, |p| p.current_time()),
        Some(number_setter(proxy, |p, v| p.set_current_time(v))),
    )?;
    define_accessor(element, "duration", number_getter(proxy, |p| p.duration()), None)?;
    define_accessor(
        element,
        "volume",
        number_getter(proxy, |p| p.volume()),
        Some(number_setter(proxy, |p, v| p.set_volume(v))),
    )?;
    define_accessor(
        element,
        "playbackRate",
        number_getter(proxy, |p| p.playback_rate()),
        Some(number_setter(proxy, |p, v| p.set_playback_rate(v))),
    )?;

    let muted_get = {
        let proxy = Rc::clone(proxy);
        Closure::wrap(Box::new(move || JsValue::from_bool(proxy.muted())) as Box<dyn FnMut() -> JsValue>)
            .into_js_value()
    };
    let muted_set = {
        let proxy = Rc::clone(proxy);
        Closure::wrap(Box::new(move |value: JsValue| proxy.set_muted(value.is_truthy())) as Box<dyn FnMut(JsValue)>)
            .into_js_value()
    };
    define_accessor(element, "muted", muted_get, Some(muted_set))?;

    let play = {
        let proxy = Rc::clone(proxy);
        Closure::wrap(Box::new(move || {
            proxy.play();
            JsValue::from(Promise::resolve(&JsValue::UNDEFINED))
        }) as Box<dyn FnMut() -> JsValue>)
        .into_js_value()
    };
    define_method(element, "play", play)?;

    let pause = {
        let proxy = Rc::clone(proxy);
        Closure::wrap(Box::new(move || proxy.pause()) as Box<dyn FnMut()>).into_js_value()
    };
    define_method(element, "pause", pause)
}

impl VideoElement for NativeVideo {
    fn set_hidden(&self, hidden: bool) {
        let style = self.element.style();
        let result = if hidden {
            style.set_property("display", "none")
        } else {
            style.remove_property("display").map(|_| ())
        };
        if let Err(err) = result {
            debug!(cause = %describe(&err), "Could not toggle video visibility");
        }
    }

    fn can_play_type(&self, mime: &str) -> bool {
        !self.element.can_play_type(mime).is_empty()
    }

    fn set_src(&self, url: &str) {
        self.element.set_src(url);
    }

    fn play(&self) {
        self.invoke("play");
    }

    fn pause(&self) {
        self.invoke("pause");
    }

    fn set_muted(&self, muted: bool) {
        if let Err(err) = set(&self.element, "muted", &JsValue::from_bool(muted)) {
            debug!(cause = %describe(&err), "Could not set muted");
        }
    }

    fn install_proxy(&self, proxy: Rc<dyn MediaControllable>) {
        if let Err(err) = install(self.element.unchecked_ref(), &proxy) {
            warn!(cause = %describe(&err), "Could not install media proxy");
        }
    }

    fn remove_proxy(&self) {
        for key in PROXIED_PROPERTIES.iter().chain(PROXIED_METHODS.iter()) {
            // Own properties only; the prototype accessors reappear
            if let Err(err) = Reflect::delete_property(self.element.unchecked_ref::<Object>(), &JsValue::from_str(key)) {
                debug!(key, cause = %describe(&err), "Could not remove media proxy");
            }
        }
    }
}

/// Absolutely positioned wrapper hosting the YouTube iframe
pub struct DomContainer {
    outer: HtmlElement,
    target: HtmlElement,
}

impl DomContainer {
    /// Create the wrapper inside `root`
    ///
    /// The iframe API replaces `target`, so the styled wrapper is what gets
    /// removed on teardown.
    pub fn mount(root: &HtmlElement, spec: &ContainerSpec) -> std::result::Result<Self, JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("document is not available"))?;
        let outer: HtmlElement = document.create_element("div")?.dyn_into()?;
        outer.set_id(&spec.id);
        for (property, value) in spec.style.iter() {
            outer.style().set_property(property, value)?;
        }

        let target: HtmlElement = document.create_element("div")?.dyn_into()?;
        target.style().set_property("width", "100%")?;
        target.style().set_property("height", "100%")?;
        outer.append_child(&target)?;
        root.append_child(&outer)?;

        Ok(Self { outer, target })
    }

    pub fn target(&self) -> &HtmlElement {
        &self.target
    }
}

impl EmbedContainer for DomContainer {
    fn detach(&self) {
        self.outer.remove();
    }
}

/// `setInterval` wrapper
pub struct BrowserInterval {
    tick: Closure<dyn FnMut()>,
    handle: Cell<Option<i32>>,
}

impl BrowserInterval {
    pub fn new(tick: impl FnMut() + 'static) -> Self {
        Self {
            tick: Closure::wrap(Box::new(tick) as Box<dyn FnMut()>),
            handle: Cell::new(None),
        }
    }
}

impl IntervalTimer for BrowserInterval {
    fn start(&self, period: Duration) {
        self.stop();
        let Some(window) = web_sys::window() else {
            return;
        };
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(self.tick.as_ref().unchecked_ref(), millis) {
            Ok(handle) => self.handle.set(Some(handle)),
            Err(err) => warn!(cause = %describe(&err), "Could not start sync timer"),
        }
    }

    fn stop(&self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_interval_with_handle(handle);
        }
    }

    fn is_active(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for BrowserInterval {
    fn drop(&mut self) {
        self.stop();
    }
}
