use std::sync::Arc;

use crate::core::color::{Rgb, WHITE};
use crate::core::error::{check_dimensions, Result};
use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::options::{Options, ParticlesOptions};
use crate::domain::retina::Retina;
use crate::spatial::polygon::PolygonMask;
use crate::systems::interactions::ActiveEffectors;

use super::pointer::InteractivityState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Uniform point on the canvas.
    pub fn random_point(&self, rng: &mut Rng) -> Vec2 {
        Vec2::new(rng.next_f32() * self.width, rng.next_f32() * self.height)
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }
}

/// Image descriptor known to the renderer. Loading is the host's job.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAsset {
    pub src: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ImageRegistry {
    images: Vec<ImageAsset>,
}

impl ImageRegistry {
    pub fn register(&mut self, asset: ImageAsset) -> usize {
        self.images.push(asset);
        self.images.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&ImageAsset> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Read-only environment of a frame: options, canvas, retina constants,
/// pointer state, polygon mask and image registry.
pub struct Container {
    options: Options,
    particles_options: Arc<ParticlesOptions>,
    canvas: CanvasSize,
    retina: Retina,
    interactivity: InteractivityState,
    polygon: Option<PolygonMask>,
    images: ImageRegistry,
    effectors: ActiveEffectors,
    line_color: Rgb,
}

impl Container {
    pub fn new(options: Options, width: f32, height: f32, device_pixel_ratio: f32) -> Result<Self> {
        check_dimensions(width, height)?;

        let retina = Retina::new(&options, device_pixel_ratio);
        let polygon = PolygonMask::from_options(&options.polygon, retina.pixel_ratio);
        let effectors = ActiveEffectors::from_events(&options.interactivity.events);
        let line_color = options.particles.line_linked.color.to_rgb(&mut Rng::default()).unwrap_or(WHITE);

        let mut images = ImageRegistry::default();
        for image in options.particles.shape.image.iter().filter(|image| !image.src.is_empty()) {
            images.register(ImageAsset { src: image.src.clone(), width: image.width, height: image.height });
        }

        Ok(Self {
            particles_options: Arc::new(options.particles.clone()),
            options,
            canvas: CanvasSize { width, height },
            retina,
            interactivity: InteractivityState::default(),
            polygon,
            images,
            effectors,
            line_color,
        })
    }

    pub fn from_json(json: &str, width: f32, height: f32, device_pixel_ratio: f32) -> Result<Self> {
        let options = Options::from_json(json)?;
        log::info!("options loaded: {} emitters", options.emitters.len());
        Self::new(options, width, height, device_pixel_ratio)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn particles_options(&self) -> &Arc<ParticlesOptions> {
        &self.particles_options
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn retina(&self) -> &Retina {
        &self.retina
    }

    pub fn interactivity(&self) -> &InteractivityState {
        &self.interactivity
    }

    pub(crate) fn interactivity_mut(&mut self) -> &mut InteractivityState {
        &mut self.interactivity
    }

    pub fn polygon(&self) -> Option<&PolygonMask> {
        self.polygon.as_ref()
    }

    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageRegistry {
        &mut self.images
    }

    pub fn effectors(&self) -> ActiveEffectors {
        self.effectors
    }

    /// Color for link, connect and grab lines.
    pub fn line_color(&self) -> Rgb {
        self.line_color
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        check_dimensions(width, height)?;
        self.canvas = CanvasSize { width, height };
        Ok(())
    }

    /// Replaces the polygon mask vertices (unscaled canvas pixels). Returns
    /// whether a usable mask resulted.
    pub fn set_polygon_points(&mut self, points: Vec<Vec2>) -> bool {
        self.options.polygon.points = points;
        self.polygon = PolygonMask::from_options(&self.options.polygon, self.retina.pixel_ratio);
        self.polygon.is_some()
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        self.interactivity.pointer_move(position);
    }

    pub fn pointer_leave(&mut self) {
        self.interactivity.pointer_leave();
    }

    /// Click bubble and repulse timers.
    pub(crate) fn advance_timers(&mut self, seconds: f32) {
        self.interactivity.advance(seconds, &self.options.interactivity.modes);
    }
}
