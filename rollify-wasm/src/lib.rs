//! WASM bridge wiring the Rollify page behaviors to the browser DOM.

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::rc::Rc;

    use chrono::Utc;
    use js_sys::Reflect;
    use rollify_core::{
        apply_push_event, apply_swap_completed, render_timestamps, reset_dice_selectors,
        GlueConfig, PushEvent, View,
    };
    use serde::Deserialize;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{
        console, CustomEvent, Document, Element, Event, HtmlElement, HtmlInputElement,
        HtmlSelectElement, Window,
    };

    /// Event htmx's SSE extension dispatches for every push message.
    const SSE_MESSAGE_EVENT: &str = "htmx:sseMessage";
    /// Event htmx dispatches after a partial update lands in the DOM.
    const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";

    /// [`View`] backed by the live browser document.
    struct DomView {
        document: Document,
    }

    impl View for DomView {
        type Node = Element;

        fn find_by_class(&self, class: &str) -> Vec<Element> {
            let list = self.document.get_elements_by_class_name(class);
            (0..list.length())
                .filter_map(|index| list.item(index))
                .collect()
        }

        fn find_by_id(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_value(&self, node: &Element, value: &str) {
            if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
                select.set_value(value);
            } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            }
        }

        fn text(&self, node: &Element) -> String {
            node.text_content().unwrap_or_default()
        }

        fn set_text(&self, node: &Element, text: &str) {
            node.set_text_content(Some(text));
        }

        fn attr(&self, node: &Element, name: &str) -> Option<String> {
            node.get_attribute(name)
        }

        fn set_attr(&self, node: &Element, name: &str, value: &str) {
            if let Err(err) = node.set_attribute(name, value) {
                console::warn_1(&err);
            }
        }

        fn set_style(&self, node: &Element, property: &str, value: &str) {
            let Some(element) = node.dyn_ref::<HtmlElement>() else {
                return;
            };
            if let Err(err) = element.style().set_property(property, value) {
                console::warn_1(&err);
            }
        }
    }

    /// Partial config override passed in from JavaScript.
    #[derive(Deserialize)]
    struct JsGlueConfig {
        #[serde(default)]
        dice_selector_class: Option<String>,
        #[serde(default)]
        badge_id: Option<String>,
        #[serde(default)]
        timestamp_class: Option<String>,
        #[serde(default)]
        timestamp_attr: Option<String>,
        #[serde(default)]
        tooltip_attr: Option<String>,
        #[serde(default)]
        history_row_id: Option<String>,
        #[serde(default)]
        refresh_interval_ms: Option<u32>,
    }

    impl From<JsGlueConfig> for GlueConfig {
        fn from(overrides: JsGlueConfig) -> Self {
            let mut base = GlueConfig::default();
            if let Some(class) = overrides.dice_selector_class {
                base.dice_selector_class = class;
            }
            if let Some(id) = overrides.badge_id {
                base.badge_id = id;
            }
            if let Some(class) = overrides.timestamp_class {
                base.timestamp_class = class;
            }
            if let Some(attr) = overrides.timestamp_attr {
                base.timestamp_attr = attr;
            }
            if let Some(attr) = overrides.tooltip_attr {
                base.tooltip_attr = attr;
            }
            if let Some(id) = overrides.history_row_id {
                base.history_row_id = id;
            }
            if let Some(period) = overrides.refresh_interval_ms {
                base.refresh_interval_ms = period;
            }
            base
        }
    }

    fn event_detail(event: &Event) -> Option<JsValue> {
        event
            .dyn_ref::<CustomEvent>()
            .map(|custom| custom.detail())
    }

    fn detail_string(detail: &JsValue, key: &str) -> Option<String> {
        Reflect::get(detail, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
    }

    fn swapped_element_id(detail: &JsValue) -> Option<String> {
        let elt = Reflect::get(detail, &JsValue::from_str("elt")).ok()?;
        let element: Element = elt.dyn_into().ok()?;
        Some(element.id())
    }

    /// Page-lifetime resources of the glue: the refresh timer and both
    /// DOM listeners, owned explicitly so teardown actually releases
    /// them instead of leaking ambient registrations.
    #[wasm_bindgen]
    pub struct RollerApp {
        window: Window,
        body: HtmlElement,
        view: Rc<DomView>,
        config: Rc<GlueConfig>,
        interval_id: i32,
        _tick: Closure<dyn FnMut()>,
        sse_listener: Closure<dyn FnMut(Event)>,
        swap_listener: Closure<dyn FnMut(Event)>,
    }

    impl RollerApp {
        fn mount(config: GlueConfig) -> Result<RollerApp, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let document = window
                .document()
                .ok_or_else(|| JsValue::from_str("no document"))?;
            let body = document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?;

            let config = Rc::new(config);
            let view = Rc::new(DomView { document });

            // Initial pass over the server-rendered page.
            render_timestamps(view.as_ref(), &config, Utc::now());

            let tick = {
                let view = Rc::clone(&view);
                let config = Rc::clone(&config);
                Closure::wrap(Box::new(move || {
                    render_timestamps(view.as_ref(), &config, Utc::now());
                }) as Box<dyn FnMut()>)
            };
            let interval_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                config.refresh_interval_ms as i32,
            )?;

            let sse_listener = {
                let view = Rc::clone(&view);
                let config = Rc::clone(&config);
                Closure::wrap(Box::new(move |event: Event| {
                    let Some(detail) = event_detail(&event) else {
                        return;
                    };
                    let Some(tag) = detail_string(&detail, "type") else {
                        console::warn_1(&JsValue::from_str("sse message without a type tag"));
                        return;
                    };
                    apply_push_event(view.as_ref(), &config, &PushEvent::from_tag(&tag));
                }) as Box<dyn FnMut(Event)>)
            };
            body.add_event_listener_with_callback(
                SSE_MESSAGE_EVENT,
                sse_listener.as_ref().unchecked_ref(),
            )?;

            let swap_listener = {
                let view = Rc::clone(&view);
                let config = Rc::clone(&config);
                Closure::wrap(Box::new(move |event: Event| {
                    let Some(detail) = event_detail(&event) else {
                        return;
                    };
                    let swapped_id = swapped_element_id(&detail);
                    apply_swap_completed(
                        view.as_ref(),
                        &config,
                        swapped_id.as_deref(),
                        Utc::now(),
                    );
                }) as Box<dyn FnMut(Event)>)
            };
            body.add_event_listener_with_callback(
                AFTER_SWAP_EVENT,
                swap_listener.as_ref().unchecked_ref(),
            )?;

            Ok(RollerApp {
                window,
                body,
                view,
                config,
                interval_id,
                _tick: tick,
                sse_listener,
                swap_listener,
            })
        }
    }

    #[wasm_bindgen]
    impl RollerApp {
        /// Reset every dice selector using this app's markers.
        #[wasm_bindgen(js_name = cleanDiceSelectors)]
        pub fn clean_dice_selectors(&self) {
            reset_dice_selectors(self.view.as_ref(), &self.config);
        }

        /// Stop the refresh timer and detach both listeners.
        pub fn unmount(self) {}
    }

    impl Drop for RollerApp {
        fn drop(&mut self) {
            self.window.clear_interval_with_handle(self.interval_id);
            let _ = self.body.remove_event_listener_with_callback(
                SSE_MESSAGE_EVENT,
                self.sse_listener.as_ref().unchecked_ref(),
            );
            let _ = self.body.remove_event_listener_with_callback(
                AFTER_SWAP_EVENT,
                self.swap_listener.as_ref().unchecked_ref(),
            );
        }
    }

    /// Mount the page glue: initial timestamp render, refresh timer,
    /// SSE badge listener, and the after-swap re-render hook.
    #[wasm_bindgen(js_name = mountDiceRollerPage)]
    pub fn mount_dice_roller_page(config: Option<JsValue>) -> Result<RollerApp, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config {
            Some(js_config) => {
                let overrides: JsGlueConfig = from_value(js_config)
                    .map_err(|err| JsValue::from_str(&format!("invalid glue config: {err}")))?;
                GlueConfig::from(overrides)
            }
            None => GlueConfig::default(),
        };

        RollerApp::mount(config)
    }

    /// Standalone selector reset for inline triggers in server-rendered
    /// markup, using the default markers.
    #[wasm_bindgen(js_name = cleanDiceSelectors)]
    pub fn clean_dice_selectors() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        reset_dice_selectors(&DomView { document }, &GlueConfig::default());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_app::{clean_dice_selectors, mount_dice_roller_page, RollerApp};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_dice_roller_page(
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "rollify-wasm only supports the wasm32 target",
    ))
}
