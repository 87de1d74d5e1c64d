//! Forwards document `CustomEvent`s to the bus and bus notifications back to the document, so script
//! outside the wasm module can drive boards with events like `board-cell__clear-row`.

use std::rc::Rc;

use cellboard_core::{Addressed, Bus, Command, Notification, SubscriptionId};
use gloo::events::EventListener;
use gloo::utils::document;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit};

pub const COMMAND_PREFIX: &str = "board-cell__";
pub const READY_EVENT: &str = "wc-ready";
pub const CLICK_EVENT: &str = "board-cell__click";

pub fn command_event_name(command: &str) -> String {
    format!("{COMMAND_PREFIX}{command}")
}

pub struct DomBridge {
    bus: Rc<Bus>,
    subscription: SubscriptionId,
    _listeners: Vec<EventListener>,
}

impl DomBridge {
    pub fn attach(bus: &Rc<Bus>) -> Self {
        let target = document();
        let listeners: Vec<EventListener> = Command::event_names()
            .map(|name| {
                let bus = Rc::clone(bus);
                EventListener::new(&target, command_event_name(name), move |event| {
                    let Some(event) = event.dyn_ref::<CustomEvent>() else {
                        return;
                    };
                    match command_from_detail(name, &event.detail()) {
                        Ok(command) => bus.commands().publish(command),
                        Err(err) => log::warn!("ignored {}{}: {}", COMMAND_PREFIX, name, err),
                    }
                })
            })
            .collect();

        let subscription = bus.notifications().subscribe(|notification| {
            let result = match notification {
                Notification::Ready { detail, .. } => dispatch(READY_EVENT, detail),
                Notification::Click(detail) => dispatch(CLICK_EVENT, detail),
            };
            if let Err(err) = result {
                log::error!("could not dispatch {:?}: {:?}", notification, err);
            }
        });

        log::debug!("DOM bridge attached for {} event names", listeners.len());
        Self {
            bus: Rc::clone(bus),
            subscription,
            _listeners: listeners,
        }
    }
}

impl Drop for DomBridge {
    fn drop(&mut self) {
        self.bus.notifications().unsubscribe(self.subscription);
    }
}

fn command_from_detail(name: &str, detail: &JsValue) -> Result<Addressed<Command>, String> {
    if detail.is_undefined() || detail.is_null() {
        return Err("event has no detail".to_string());
    }
    let json = js_sys::JSON::stringify(detail)
        .ok()
        .and_then(|json| json.as_string())
        .ok_or_else(|| "detail is not JSON-compatible".to_string())?;
    Addressed::from_event(name, &json).map_err(|err| err.to_string())
}

fn dispatch<T: Serialize>(name: &str, detail: &T) -> Result<(), JsValue> {
    let json = serde_json::to_string(detail).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&js_sys::JSON::parse(&json)?);
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    document().dispatch_event(&event)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_follow_component_prefix() {
        assert_eq!(command_event_name("clear-row"), "board-cell__clear-row");
        assert_eq!(
            command_event_name(Command::ClearAll.name()),
            "board-cell__clear-all"
        );
        let names: Vec<String> = Command::event_names().map(command_event_name).collect();
        assert!(names.contains(&"board-cell__disable-board-click".to_string()));
        assert!(names.contains(&"board-cell__change-cells-content".to_string()));
    }
}
