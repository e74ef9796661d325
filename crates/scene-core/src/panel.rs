//! Adapter between a control-panel toolkit and the parameter store.

use crate::error::{Result, SceneError};
use crate::params::{ParamField, ParamKind, ParamValue, Rgb, ShadingParameterStore, UniformSink};
use std::cell::RefCell;
use std::rc::Rc;

pub type ColorCallback = Box<dyn FnMut(Rgb)>;
pub type ToggleCallback = Box<dyn FnMut(bool)>;

/// Widget toolkit capability: renders a labelled control seeded with
/// `current` and calls `on_change` whenever the user edits it.
pub trait ControlPanel {
    fn add_color(&mut self, label: &str, current: Rgb, on_change: ColorCallback);
    fn add_toggle(&mut self, label: &str, current: bool, on_change: ToggleCallback);
}

/// Panel entries in display order.
pub const PANEL_ENTRIES: [(ParamField, &str); 5] = [
    (ParamField::Color, "color"),
    (ParamField::DirectionalLightEnabled, "OnDirectionalLight"),
    (ParamField::DirectionalLightColor, "directionalLight"),
    (ParamField::PointLightEnabled, "OnPointLight"),
    (ParamField::PointLightColor, "pointLight"),
];

/// Registers one control per shading field. Holds no parameter state; the
/// only thing it remembers is whether it already ran.
#[derive(Debug, Default)]
pub struct ControlPanelBinder {
    constructed: bool,
}

impl ControlPanelBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Populate `panel` from the store's current values. A scene gets one
    /// panel; a second call is a lifecycle bug and is refused.
    pub fn construct<P, S>(
        &mut self,
        panel: &mut P,
        store: &Rc<RefCell<ShadingParameterStore<S>>>,
    ) -> Result<usize>
    where
        P: ControlPanel + ?Sized,
        S: UniformSink + 'static,
    {
        if self.constructed {
            return Err(SceneError::BinderAlreadyConstructed);
        }
        self.constructed = true;

        let snapshot = store.borrow().get();
        for (field, label) in PANEL_ENTRIES {
            match (field.kind(), snapshot.value(field)) {
                (ParamKind::Color, ParamValue::Color(current)) => {
                    let store = Rc::clone(store);
                    panel.add_color(
                        label,
                        current,
                        Box::new(move |c| apply(&store, field, ParamValue::Color(c))),
                    );
                }
                (ParamKind::Toggle, ParamValue::Toggle(current)) => {
                    let store = Rc::clone(store);
                    panel.add_toggle(
                        label,
                        current,
                        Box::new(move |b| apply(&store, field, ParamValue::Toggle(b))),
                    );
                }
                (kind, value) => {
                    log::error!("[panel] {} is {:?} but holds {:?}", field.name(), kind, value);
                }
            }
        }
        log::info!("[panel] bound {} controls", PANEL_ENTRIES.len());
        Ok(PANEL_ENTRIES.len())
    }
}

fn apply<S: UniformSink>(
    store: &Rc<RefCell<ShadingParameterStore<S>>>,
    field: ParamField,
    value: ParamValue,
) {
    if let Err(e) = store.borrow_mut().set_field(field, value) {
        log::error!("[panel] {}", e);
    }
}
