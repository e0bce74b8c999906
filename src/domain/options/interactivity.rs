use serde::{Deserialize, Serialize};

use crate::core::random::SingleOrMultiple;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractivityOptions {
    pub events: EventsOptions,
    pub modes: ModesOptions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventsOptions {
    pub on_hover: HoverEvent,
    pub on_click: ClickEvent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoverMode {
    #[default]
    Grab,
    Bubble,
    Repulse,
    Connect,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClickMode {
    #[default]
    Push,
    Remove,
    Bubble,
    Repulse,
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HoverEvent {
    pub enable: bool,
    pub mode: SingleOrMultiple<HoverMode>,
    pub parallax: ParallaxOptions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClickEvent {
    pub enable: bool,
    pub mode: SingleOrMultiple<ClickMode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxOptions {
    pub enable: bool,
    pub force: f32,
    pub smooth: f32,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self { enable: false, force: 2.0, smooth: 10.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModesOptions {
    pub grab: GrabMode,
    pub bubble: BubbleMode,
    pub repulse: RepulseMode,
    pub connect: ConnectMode,
    pub push: PushMode,
    pub remove: RemoveMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkOpacity {
    pub opacity: f32,
}

impl Default for LinkOpacity {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrabMode {
    pub distance: f32,
    pub line_linked: LinkOpacity,
}

impl Default for GrabMode {
    fn default() -> Self {
        Self { distance: 100.0, line_linked: LinkOpacity { opacity: 1.0 } }
    }
}

/// `duration` is in seconds; `size` and `opacity` are the bubble targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BubbleMode {
    pub distance: f32,
    pub duration: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Default for BubbleMode {
    fn default() -> Self {
        Self { distance: 200.0, duration: 0.4, size: 40.0, opacity: 0.8 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepulseMode {
    pub distance: f32,
    pub duration: f32,
}

impl Default for RepulseMode {
    fn default() -> Self {
        Self { distance: 200.0, duration: 0.4 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectMode {
    pub distance: f32,
    pub radius: f32,
    pub line_linked: LinkOpacity,
}

impl Default for ConnectMode {
    fn default() -> Self {
        Self { distance: 80.0, radius: 60.0, line_linked: LinkOpacity { opacity: 0.5 } }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PushMode {
    pub quantity: usize,
}

impl Default for PushMode {
    fn default() -> Self {
        Self { quantity: 4 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoveMode {
    pub quantity: usize,
}

impl Default for RemoveMode {
    fn default() -> Self {
        Self { quantity: 2 }
    }
}
