//! Browser host
//!
//! Finds the canvas, wires `keydown`/`blur` listeners and owns the
//! `setInterval` handle that drives `App::on_tick`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{FocusEvent, HtmlCanvasElement, KeyboardEvent};

use crate::app::{App, Response, TimerCommand};
use crate::error::ConfigError;
use crate::renderer::Canvas2d;
use crate::settings::Settings;
use crate::sim::Playfield;

/// Attribute on `<html>` that may carry a JSON settings override
const SETTINGS_ATTRIBUTE: &str = "data-settings";

fn to_js(e: ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

struct Host {
    app: App,
    canvas: Canvas2d,
    interval: Option<i32>,
    tick_fn: Option<js_sys::Function>,
}

impl Host {
    fn apply(&mut self, response: Response) {
        match response.timer {
            TimerCommand::Keep => {}
            TimerCommand::Start { period_ms } => {
                self.stop_timer();
                let (Some(window), Some(tick_fn)) = (web_sys::window(), self.tick_fn.as_ref())
                else {
                    log::error!("Cannot start tick timer: no window");
                    return;
                };
                match window.set_interval_with_callback_and_timeout_and_arguments_0(
                    tick_fn,
                    period_ms as i32,
                ) {
                    Ok(id) => self.interval = Some(id),
                    Err(e) => log::error!("setInterval failed: {:?}", e),
                }
            }
            TimerCommand::Stop => self.stop_timer(),
        }
    }

    fn stop_timer(&mut self) {
        if let (Some(id), Some(window)) = (self.interval.take(), web_sys::window()) {
            window.clear_interval_with_handle(id);
        }
    }

    fn tick(&mut self) {
        let response = self.app.on_tick(&mut self.canvas);
        self.apply(response);
    }

    fn key(&mut self, code: &str) -> bool {
        let response = self.app.on_key(code, &mut self.canvas);
        self.apply(response);
        response.consumed
    }

    fn blur(&mut self) {
        let response = self.app.on_blur(&mut self.canvas);
        self.apply(response);
    }
}

pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Dodge Paddle starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let overrides = document
        .document_element()
        .and_then(|el| el.get_attribute(SETTINGS_ATTRIBUTE));
    let settings = Settings::from_json_or_default(overrides.as_deref());

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&settings.canvas_id)
        .ok_or_else(|| {
            to_js(ConfigError::SurfaceUnavailable(format!(
                "no element with id '{}'",
                settings.canvas_id
            )))
        })?
        .dyn_into()
        .map_err(|_| to_js(ConfigError::SurfaceUnavailable("not a canvas".to_string())))?;

    let field = Playfield::new(canvas.width(), canvas.height()).map_err(to_js)?;
    let surface = Canvas2d::from_canvas(&canvas).map_err(to_js)?;
    let seed = js_sys::Date::now() as u64;
    let app = App::new(settings, field, seed).map_err(to_js)?;

    let host = Rc::new(RefCell::new(Host {
        app,
        canvas: surface,
        interval: None,
        tick_fn: None,
    }));

    // Tick callback, handed to setInterval on every (re)start
    {
        let host_ref = host.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            host_ref.borrow_mut().tick();
        });
        let tick_fn = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        host.borrow_mut().tick_fn = Some(tick_fn);
        closure.forget();
    }

    // Keyboard
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if host.borrow_mut().key(&event.code()) {
                event.prevent_default();
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window blur (click outside, tab switch)
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
            host.borrow_mut().blur();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let mut guard = host.borrow_mut();
        let h = &mut *guard;
        let response = h.app.start(&mut h.canvas);
        h.apply(response);
    }

    log::info!("Dodge Paddle running!");
    Ok(())
}
