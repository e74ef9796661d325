use crate::constants::PANEL_ID;
use scene_core::panel::{ColorCallback, ControlPanel, ToggleCallback};
use scene_core::Rgb;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Control panel made of plain `<input type=color>` and checkbox rows.
///
/// Listener closures are owned here and dropped with the panel.
pub struct DomControlPanel {
    document: web::Document,
    root: web::Element,
    listeners: Vec<Closure<dyn FnMut(web::Event)>>,
}

impl DomControlPanel {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let root = match document.get_element_by_id(PANEL_ID) {
            Some(el) => el,
            None => {
                let el = document
                    .create_element("div")
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el.set_id(PANEL_ID);
                let body = document
                    .body()
                    .ok_or_else(|| anyhow::anyhow!("no body"))?;
                body.append_child(&el)
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el
            }
        };
        Ok(Self {
            document: document.clone(),
            root,
            listeners: Vec::new(),
        })
    }

    fn add_row(&mut self, label: &str, input_type: &str) -> Option<web::HtmlInputElement> {
        let row = self.document.create_element("label").ok()?;
        row.set_class_name("control");
        let text = self.document.create_element("span").ok()?;
        text.set_text_content(Some(label));
        let input = self
            .document
            .create_element("input")
            .ok()?
            .dyn_into::<web::HtmlInputElement>()
            .ok()?;
        input.set_type(input_type);
        _ = row.append_child(&text);
        _ = row.append_child(&input);
        _ = self.root.append_child(&row);
        Some(input)
    }

    fn listen(&mut self, input: &web::HtmlInputElement, event: &str, handler: impl FnMut(web::Event) + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = input.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        self.listeners.push(closure);
    }
}

fn event_input(ev: &web::Event) -> Option<web::HtmlInputElement> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
}

impl ControlPanel for DomControlPanel {
    fn add_color(&mut self, label: &str, current: Rgb, mut on_change: ColorCallback) {
        let Some(input) = self.add_row(label, "color") else {
            log::error!("[panel] could not create control {}", label);
            return;
        };
        input.set_value(&current.to_hex());
        let label = label.to_string();
        self.listen(&input, "input", move |ev| {
            let Some(input) = event_input(&ev) else {
                return;
            };
            match Rgb::from_hex(&input.value()) {
                Ok(c) => on_change(c),
                Err(e) => log::warn!("[panel] {}: {}", label, e),
            }
        });
    }

    fn add_toggle(&mut self, label: &str, current: bool, mut on_change: ToggleCallback) {
        let Some(input) = self.add_row(label, "checkbox") else {
            log::error!("[panel] could not create control {}", label);
            return;
        };
        input.set_checked(current);
        self.listen(&input, "change", move |ev| {
            if let Some(input) = event_input(&ev) {
                on_change(input.checked());
            }
        });
    }
}
