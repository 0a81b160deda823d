//! User notices.
//!
//! The browser's blocking `alert` is the only feedback channel. The same
//! channel reports uncaught errors through a page-wide hook installed once
//! at start.

use std::sync::Once;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::ErrorEvent;

use crate::widget::Notifier;

/// Shows notices with `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        alert(message);
    }
}

fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window.alert_with_message(message) {
                log::error!("Failed to show alert: {:?}", e);
            }
        }
        None => log::error!("No window to show alert: {}", message),
    }
}

/// Notice text for an uncaught page error.
pub fn global_error_notice(message: &str, source: &str, line: u32) -> String {
    format!("Global Error: {} at {}:{}", message, source, line)
}

static HOOK: Once = Once::new();

/// Report uncaught script errors and Rust panics as notices.
///
/// Later calls are no-ops.
pub fn install_global_error_hook() {
    HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        // Chains whatever hook is installed, normally console_error_panic_hook
        std::panic::set_hook(Box::new(move |info| {
            default_hook(info);
            alert(&global_error_notice(
                &panic_message(info.payload()),
                info.location().map(|l| l.file()).unwrap_or("unknown"),
                info.location().map(|l| l.line()).unwrap_or(0),
            ));
        }));

        let Some(window) = web_sys::window() else {
            log::warn!("No window: page error hook not installed");
            return;
        };

        let onerror = Closure::wrap(Box::new(move |event: ErrorEvent| {
            log::error!("Uncaught error: {:?}", event.error());
            alert(&global_error_notice(
                &event.message(),
                &event.filename(),
                event.lineno(),
            ));
        }) as Box<dyn FnMut(ErrorEvent)>);

        if let Err(e) =
            window.add_event_listener_with_callback("error", onerror.as_ref().unchecked_ref())
        {
            log::error!("Failed to install page error hook: {:?}", e);
        }
        // Lives for the lifetime of the page
        onerror.forget();
    });
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
