use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::color::ColorValue;
use crate::core::math::Vec2;
use crate::core::random::{Rng, SingleOrMultiple};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticlesOptions {
    pub number: NumberOptions,
    pub color: ColorOptions,
    pub shape: ShapeOptions,
    pub opacity: OpacityOptions,
    pub size: SizeOptions,
    pub rotate: RotateOptions,
    #[serde(rename = "move")]
    pub movement: MoveOptions,
    pub line_linked: LineLinkedOptions,
    pub collisions: CollisionsOptions,
    pub stroke: SingleOrMultiple<StrokeOptions>,
    pub shadow: ShadowOptions,
}

impl ParticlesOptions {
    /// Applies JSON patches on top of these options, later patches winning.
    pub fn with_overrides(&self, patches: &[&Value]) -> Result<Self, serde_json::Error> {
        let mut merged = serde_json::to_value(self)?;
        for patch in patches {
            super::merge_json(&mut merged, patch);
        }
        serde_json::from_value(merged)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberOptions {
    pub value: u32,
    /// Hard cap on live particles; 0 means unlimited.
    pub limit: u32,
    pub density: DensityOptions,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self { value: 100, limit: 0, density: DensityOptions::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DensityOptions {
    pub enable: bool,
    pub area: f32,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self { enable: false, area: 800.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub value: SingleOrMultiple<ColorValue>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self { value: SingleOrMultiple::Single(ColorValue::text("#ffffff")) }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    #[default]
    Circle,
    #[serde(alias = "square")]
    Edge,
    Triangle,
    Polygon,
    Star,
    #[serde(alias = "character")]
    Char,
    #[serde(alias = "images")]
    Image,
    Line,
}

impl ShapeType {
    pub const ALL: [ShapeType; 8] = [
        ShapeType::Circle,
        ShapeType::Edge,
        ShapeType::Triangle,
        ShapeType::Polygon,
        ShapeType::Star,
        ShapeType::Char,
        ShapeType::Image,
        ShapeType::Line,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::Edge => "edge",
            ShapeType::Triangle => "triangle",
            ShapeType::Polygon => "polygon",
            ShapeType::Star => "star",
            ShapeType::Char => "char",
            ShapeType::Image => "image",
            ShapeType::Line => "line",
        }
    }

    /// Other keys the shape-specific option table may use for this shape.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ShapeType::Edge => &["square"],
            ShapeType::Char => &["character"],
            ShapeType::Image => &["images"],
            _ => &[],
        }
    }

    /// Numeric code written into the draw buffer.
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Shape-specific payload: fill/close flags, a partial particle options
/// override, and free-form parameters passed through to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles: Option<Value>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageShapeOptions {
    pub src: String,
    pub width: f32,
    pub height: f32,
    pub replace_color: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
}

impl Default for ImageShapeOptions {
    fn default() -> Self {
        Self { src: String::new(), width: 100.0, height: 100.0, replace_color: false, fill: None, close: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeOptions {
    #[serde(rename = "type")]
    pub kind: SingleOrMultiple<ShapeType>,
    pub options: BTreeMap<String, SingleOrMultiple<ShapeData>>,
    pub image: SingleOrMultiple<ImageShapeOptions>,
}

impl ShapeOptions {
    /// Shape-specific data for `shape`, looked up by name then by alias.
    pub fn data_for(&self, shape: ShapeType) -> Option<&SingleOrMultiple<ShapeData>> {
        std::iter::once(shape.name())
            .chain(shape.aliases().iter().copied())
            .find_map(|key| self.options.get(key))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomValue {
    pub enable: bool,
    pub minimum_value: f32,
}

impl Default for RandomValue {
    fn default() -> Self {
        Self { enable: false, minimum_value: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationOptions {
    pub enable: bool,
    pub speed: f32,
    pub minimum_value: f32,
    pub sync: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self { enable: false, speed: 1.0, minimum_value: 0.0, sync: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpacityOptions {
    pub value: f32,
    pub random: RandomValue,
    pub animation: AnimationOptions,
}

impl Default for OpacityOptions {
    fn default() -> Self {
        Self {
            value: 1.0,
            random: RandomValue { enable: false, minimum_value: 1.0 },
            animation: AnimationOptions { enable: false, speed: 2.0, minimum_value: 0.0, sync: false },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeOptions {
    pub value: f32,
    pub random: RandomValue,
    pub animation: AnimationOptions,
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            value: 3.0,
            random: RandomValue { enable: false, minimum_value: 1.0 },
            animation: AnimationOptions { enable: false, speed: 5.0, minimum_value: 0.0, sync: false },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotateDirection {
    #[default]
    Clockwise,
    CounterClockwise,
    Random,
}

impl RotateDirection {
    /// Settles `Random` into one of the two concrete directions.
    pub fn resolve(self, rng: &mut Rng) -> RotateDirection {
        match self {
            RotateDirection::Random if rng.chance(0.5) => RotateDirection::Clockwise,
            RotateDirection::Random => RotateDirection::CounterClockwise,
            direction => direction,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotateAnimation {
    pub enable: bool,
    pub speed: f32,
    pub sync: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotateOptions {
    pub value: f32,
    pub random: bool,
    pub direction: RotateDirection,
    pub animation: RotateAnimation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveDirection {
    #[default]
    None,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl MoveDirection {
    /// Unit vector for the direction; diagonals are normalized.
    pub fn base_velocity(self) -> Vec2 {
        let d = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            MoveDirection::None => Vec2::ZERO,
            MoveDirection::Top => Vec2::new(0.0, -1.0),
            MoveDirection::TopRight => Vec2::new(d, -d),
            MoveDirection::Right => Vec2::new(1.0, 0.0),
            MoveDirection::BottomRight => Vec2::new(d, d),
            MoveDirection::Bottom => Vec2::new(0.0, 1.0),
            MoveDirection::BottomLeft => Vec2::new(-d, d),
            MoveDirection::Left => Vec2::new(-1.0, 0.0),
            MoveDirection::TopLeft => Vec2::new(-d, -d),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutMode {
    #[default]
    Out,
    Bounce,
    BounceHorizontal,
    BounceVertical,
    Destroy,
}

impl OutMode {
    pub fn bounces_horizontally(self) -> bool {
        matches!(self, OutMode::Bounce | OutMode::BounceHorizontal)
    }

    pub fn bounces_vertically(self) -> bool {
        matches!(self, OutMode::Bounce | OutMode::BounceVertical)
    }

    pub fn is_bounce(self) -> bool {
        self.bounces_horizontally() || self.bounces_vertically()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttractOptions {
    pub enable: bool,
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl Default for AttractOptions {
    fn default() -> Self {
        Self { enable: false, rotate_x: 3000.0, rotate_y: 3000.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveOptions {
    pub enable: bool,
    pub speed: f32,
    pub direction: MoveDirection,
    pub random: bool,
    pub straight: bool,
    pub out_mode: OutMode,
    pub attract: AttractOptions,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            enable: true,
            speed: 2.0,
            direction: MoveDirection::None,
            random: false,
            straight: false,
            out_mode: OutMode::Out,
            attract: AttractOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineLinkedOptions {
    pub enable: bool,
    pub distance: f32,
    pub color: ColorValue,
    pub opacity: f32,
    pub width: f32,
}

impl Default for LineLinkedOptions {
    fn default() -> Self {
        Self { enable: false, distance: 100.0, color: ColorValue::text("#ffffff"), opacity: 1.0, width: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlapOptions {
    /// Relocation attempts before a colliding particle is dropped.
    pub retries: u32,
}

impl Default for OverlapOptions {
    fn default() -> Self {
        Self { retries: 32 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollisionsOptions {
    pub enable: bool,
    pub overlap: OverlapOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrokeOptions {
    pub width: f32,
    pub color: ColorValue,
    pub opacity: f32,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self { width: 0.0, color: ColorValue::text("#ff0000"), opacity: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadowOptions {
    pub enable: bool,
    pub blur: f32,
    pub color: ColorValue,
    pub offset: Vec2,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self { enable: false, blur: 0.0, color: ColorValue::text("#000000"), offset: Vec2::ZERO }
    }
}
