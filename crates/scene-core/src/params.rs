//! Shading parameters and their uniform bindings.
//!
//! `ShadingParameterStore` owns the canonical record. Every mutation goes
//! through [`ShadingParameterStore::set`], which writes the record and the
//! bound uniform slot in the same call, so a frame drawn after `set`
//! returns always sees the new value.

use crate::constants::*;
use crate::error::{Result, SceneError};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with components in `[0, 1]`.
///
/// Fields are private so an out-of-range triple cannot be built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    r: f32,
    g: f32,
    b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Result<Self> {
        let valid = |c: f32| c.is_finite() && (0.0..=1.0).contains(&c);
        if valid(r) && valid(g) && valid(b) {
            Ok(Self { r, g, b })
        } else {
            Err(SceneError::InvalidColor(format!("({r}, {g}, {b})")))
        }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    pub fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SceneError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| SceneError::InvalidColor(s.to_string()))
    }

    pub fn to_hex(self) -> String {
        let q = |c: f32| (c * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    pub fn r(self) -> f32 {
        self.r
    }

    pub fn g(self) -> f32 {
        self.g
    }

    pub fn b(self) -> f32 {
        self.b
    }

    /// Linear-light components, the form the shading program consumes.
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

impl FromStr for Rgb {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// Names of the tunable fields. The string form is the property path the
/// control panel binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    Color,
    DirectionalLightColor,
    DirectionalLightEnabled,
    PointLightColor,
    PointLightEnabled,
}

impl ParamField {
    pub const ALL: [ParamField; 5] = [
        ParamField::Color,
        ParamField::DirectionalLightColor,
        ParamField::DirectionalLightEnabled,
        ParamField::PointLightColor,
        ParamField::PointLightEnabled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamField::Color => "color",
            ParamField::DirectionalLightColor => "directionalLightColor",
            ParamField::DirectionalLightEnabled => "directionalLightEnabled",
            ParamField::PointLightColor => "pointLightColor",
            ParamField::PointLightEnabled => "pointLightEnabled",
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamField::Color | ParamField::DirectionalLightColor | ParamField::PointLightColor => {
                ParamKind::Color
            }
            ParamField::DirectionalLightEnabled | ParamField::PointLightEnabled => {
                ParamKind::Toggle
            }
        }
    }

    /// The uniform slot this field is bound to. Exhaustive, so every field
    /// has exactly one slot.
    pub fn slot(self) -> UniformSlot {
        match self {
            ParamField::Color => UniformSlot::Color,
            ParamField::DirectionalLightColor => UniformSlot::DirectionalLightColor,
            ParamField::DirectionalLightEnabled => UniformSlot::DirectionalLightOn,
            ParamField::PointLightColor => UniformSlot::PointLightColor,
            ParamField::PointLightEnabled => UniformSlot::PointLightOn,
        }
    }
}

impl FromStr for ParamField {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        ParamField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| SceneError::UnknownParameter(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Color,
    Toggle,
}

impl ParamKind {
    fn label(self) -> &'static str {
        match self {
            ParamKind::Color => "color",
            ParamKind::Toggle => "boolean",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Color(Rgb),
    Toggle(bool),
}

impl ParamValue {
    pub fn kind(self) -> ParamKind {
        match self {
            ParamValue::Color(_) => ParamKind::Color,
            ParamValue::Toggle(_) => ParamKind::Toggle,
        }
    }
}

impl From<Rgb> for ParamValue {
    fn from(c: Rgb) -> Self {
        ParamValue::Color(c)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Toggle(b)
    }
}

/// The canonical lighting/color record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingParameters {
    pub color: Rgb,
    pub directional_light_color: Rgb,
    pub directional_light_enabled: bool,
    pub point_light_color: Rgb,
    pub point_light_enabled: bool,
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self {
            color: Rgb::from_u32(DEFAULT_COLOR),
            directional_light_color: Rgb::from_u32(DEFAULT_DIRECTIONAL_LIGHT_COLOR),
            directional_light_enabled: DEFAULT_DIRECTIONAL_LIGHT_ENABLED,
            point_light_color: Rgb::from_u32(DEFAULT_POINT_LIGHT_COLOR),
            point_light_enabled: DEFAULT_POINT_LIGHT_ENABLED,
        }
    }
}

impl ShadingParameters {
    pub fn value(&self, field: ParamField) -> ParamValue {
        match field {
            ParamField::Color => self.color.into(),
            ParamField::DirectionalLightColor => self.directional_light_color.into(),
            ParamField::DirectionalLightEnabled => self.directional_light_enabled.into(),
            ParamField::PointLightColor => self.point_light_color.into(),
            ParamField::PointLightEnabled => self.point_light_enabled.into(),
        }
    }

    fn assign(&mut self, field: ParamField, value: ParamValue) {
        match (field, value) {
            (ParamField::Color, ParamValue::Color(c)) => self.color = c,
            (ParamField::DirectionalLightColor, ParamValue::Color(c)) => {
                self.directional_light_color = c
            }
            (ParamField::DirectionalLightEnabled, ParamValue::Toggle(b)) => {
                self.directional_light_enabled = b
            }
            (ParamField::PointLightColor, ParamValue::Color(c)) => self.point_light_color = c,
            (ParamField::PointLightEnabled, ParamValue::Toggle(b)) => self.point_light_enabled = b,
            // kinds are checked by the store before assignment
            _ => {}
        }
    }
}

/// Opaque identifiers of the shading program's tunable inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    Color,
    DirectionalLightColor,
    DirectionalLightOn,
    PointLightColor,
    PointLightOn,
}

impl UniformSlot {
    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::Color => "uColor",
            UniformSlot::DirectionalLightColor => "uColorLightDirection",
            UniformSlot::DirectionalLightOn => "uLightDirectionOn",
            UniformSlot::PointLightColor => "uColorPointLight",
            UniformSlot::PointLightOn => "uPointLightOn",
        }
    }
}

/// Write-only destination for uniform values.
pub trait UniformSink {
    fn write_slot(&mut self, slot: UniformSlot, value: ParamValue);
}

/// GPU image of the shading program's parameter block (WGSL `ShadingParams`).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadingBlock {
    pub color: [f32; 4],
    pub directional_light_color: [f32; 4],
    pub point_light_color: [f32; 4],
    pub directional_light_on: u32,
    pub point_light_on: u32,
    pub exposure: f32,
    pub _pad: f32,
}

/// Value as it sits in a slot, after color-space conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotValue {
    Color([f32; 3]),
    Toggle(bool),
}

impl From<ParamValue> for SlotValue {
    fn from(v: ParamValue) -> Self {
        match v {
            ParamValue::Color(c) => SlotValue::Color(c.to_linear()),
            ParamValue::Toggle(b) => SlotValue::Toggle(b),
        }
    }
}

/// CPU-side uniform block with a revision counter the renderer uses to
/// decide when to re-upload.
#[derive(Clone, Debug)]
pub struct ShadingUniforms {
    block: ShadingBlock,
    revision: u64,
}

impl Default for ShadingUniforms {
    fn default() -> Self {
        Self {
            block: ShadingBlock {
                exposure: TONE_MAPPING_EXPOSURE,
                ..ShadingBlock::default()
            },
            revision: 0,
        }
    }
}

impl ShadingUniforms {
    pub fn block(&self) -> &ShadingBlock {
        &self.block
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn read(&self, slot: UniformSlot) -> SlotValue {
        let rgb = |c: [f32; 4]| SlotValue::Color([c[0], c[1], c[2]]);
        match slot {
            UniformSlot::Color => rgb(self.block.color),
            UniformSlot::DirectionalLightColor => rgb(self.block.directional_light_color),
            UniformSlot::DirectionalLightOn => SlotValue::Toggle(self.block.directional_light_on != 0),
            UniformSlot::PointLightColor => rgb(self.block.point_light_color),
            UniformSlot::PointLightOn => SlotValue::Toggle(self.block.point_light_on != 0),
        }
    }
}

impl UniformSink for ShadingUniforms {
    fn write_slot(&mut self, slot: UniformSlot, value: ParamValue) {
        match (slot, SlotValue::from(value)) {
            (UniformSlot::Color, SlotValue::Color([r, g, b])) => self.block.color = [r, g, b, 1.0],
            (UniformSlot::DirectionalLightColor, SlotValue::Color([r, g, b])) => {
                self.block.directional_light_color = [r, g, b, 1.0]
            }
            (UniformSlot::PointLightColor, SlotValue::Color([r, g, b])) => {
                self.block.point_light_color = [r, g, b, 1.0]
            }
            (UniformSlot::DirectionalLightOn, SlotValue::Toggle(on)) => {
                self.block.directional_light_on = on as u32
            }
            (UniformSlot::PointLightOn, SlotValue::Toggle(on)) => self.block.point_light_on = on as u32,
            (slot, value) => {
                log::error!("[uniforms] {} cannot hold {:?}", slot.name(), value);
                return;
            }
        }
        self.revision += 1;
    }
}

/// Owner of the canonical [`ShadingParameters`] and its uniform binding.
pub struct ShadingParameterStore<S: UniformSink = ShadingUniforms> {
    params: ShadingParameters,
    sink: S,
}

impl<S: UniformSink> ShadingParameterStore<S> {
    /// Bind `params` to `sink`, pushing every field once so the slots start
    /// in step with the record.
    pub fn new(params: ShadingParameters, mut sink: S) -> Self {
        for field in ParamField::ALL {
            sink.write_slot(field.slot(), params.value(field));
        }
        Self { params, sink }
    }

    /// Read-only snapshot of the current record.
    pub fn get(&self) -> ShadingParameters {
        self.params
    }

    pub fn value(&self, field: ParamField) -> ParamValue {
        self.params.value(field)
    }

    /// Set a field by its property path.
    pub fn set(&mut self, field: &str, value: impl Into<ParamValue>) -> Result<()> {
        let field = field.parse::<ParamField>()?;
        self.set_field(field, value)
    }

    pub fn set_field(&mut self, field: ParamField, value: impl Into<ParamValue>) -> Result<()> {
        let value = value.into();
        if value.kind() != field.kind() {
            return Err(SceneError::ParameterType {
                field: field.name(),
                expected: field.kind().label(),
            });
        }
        self.params.assign(field, value);
        self.sink.write_slot(field.slot(), value);
        log::debug!("[params] {} -> {:?} ({})", field.name(), value, field.slot().name());
        Ok(())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl Default for ShadingParameterStore<ShadingUniforms> {
    fn default() -> Self {
        Self::new(ShadingParameters::default(), ShadingUniforms::default())
    }
}
