//! Host player contract
//!
//! The adapters talk to Artplayer only through these traits; `artplug-wasm`
//! implements them over the real player and the tests over recorders.

use crate::media::MediaControllable;
use crate::selector::{ControlDescriptor, SelectorItem, SettingDescriptor};
use crate::types::HostEvent;
use std::rc::Rc;

/// Artplayer instance surface used by the adapters
pub trait HostPlayer {
    /// `art.emit(event.name(), {type, data})`
    fn emit(&self, event: HostEvent, data: Option<f64>);

    /// `art.notice.show = message`
    fn show_notice(&self, message: &str);

    /// `art.loading.show = show`
    fn set_loading(&self, show: bool);

    /// `art.controls.update(descriptor)`
    fn update_control(&self, descriptor: &ControlDescriptor);

    /// `art.controls.check(item)` for the named control
    fn check_control(&self, panel: &str, item: &SelectorItem);

    /// `art.setting.update(descriptor)`
    fn update_setting(&self, descriptor: &SettingDescriptor);

    /// `art.setting.check(item)` for the named setting
    fn check_setting(&self, panel: &str, item: &SelectorItem);
}

/// The host's `<video>` element (`art.template.$video`)
pub trait VideoElement {
    /// Toggle `style.display = "none"`
    fn set_hidden(&self, hidden: bool);

    /// Non-empty `canPlayType(mime)`
    fn can_play_type(&self, mime: &str) -> bool;

    fn set_src(&self, url: &str);

    /// `play()` through whatever is installed on the element
    fn play(&self);

    /// `pause()` through whatever is installed on the element
    fn pause(&self);

    /// `muted = value` through whatever is installed on the element
    fn set_muted(&self, muted: bool);

    /// Decorate the element so its media surface forwards to `proxy`
    fn install_proxy(&self, proxy: Rc<dyn MediaControllable>);

    /// Drop the decoration, restoring native behaviour
    fn remove_proxy(&self);
}

impl<T: HostPlayer + ?Sized> HostPlayer for Rc<T> {
    fn emit(&self, event: HostEvent, data: Option<f64>) {
        (**self).emit(event, data)
    }

    fn show_notice(&self, message: &str) {
        (**self).show_notice(message)
    }

    fn set_loading(&self, show: bool) {
        (**self).set_loading(show)
    }

    fn update_control(&self, descriptor: &ControlDescriptor) {
        (**self).update_control(descriptor)
    }

    fn check_control(&self, panel: &str, item: &SelectorItem) {
        (**self).check_control(panel, item)
    }

    fn update_setting(&self, descriptor: &SettingDescriptor) {
        (**self).update_setting(descriptor)
    }

    fn check_setting(&self, panel: &str, item: &SelectorItem) {
        (**self).check_setting(panel, item)
    }
}

impl<T: VideoElement + ?Sized> VideoElement for Rc<T> {
    fn set_hidden(&self, hidden: bool) {
        (**self).set_hidden(hidden)
    }

    fn can_play_type(&self, mime: &str) -> bool {
        (**self).can_play_type(mime)
    }

    fn set_src(&self, url: &str) {
        (**self).set_src(url)
    }

    fn play(&self) {
        (**self).play()
    }

    fn pause(&self) {
        (**self).pause()
    }

    fn set_muted(&self, muted: bool) {
        (**self).set_muted(muted)
    }

    fn install_proxy(&self, proxy: Rc<dyn MediaControllable>) {
        (**self).install_proxy(proxy)
    }

    fn remove_proxy(&self) {
        (**self).remove_proxy()
    }
}
