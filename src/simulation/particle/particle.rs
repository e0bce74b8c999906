use std::sync::Arc;

use crate::core::color::{color_to_rgb, Rgb};
use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::ids::{EmitterId, ParticleId};
use crate::domain::options::{
    MoveDirection, MoveOptions, ParticlesOptions, PolygonMaskType, RotateDirection, ShapeData,
    ShapeType, StrokeOptions,
};
use crate::domain::retina::ParticleRetina;
use crate::spatial::grid::GridEntry;

use super::super::container::Container;
use super::super::emitter::Emitter;
use super::options_cache::OptionsCache;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Increasing,
    Decreasing,
}

/// A value that may bounce between a minimum and its configured maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedValue {
    pub value: f32,
    /// Per-frame step; `None` when the animation is disabled.
    pub velocity: Option<f32>,
    pub status: AnimationStatus,
}

impl AnimatedValue {
    pub fn fixed(value: f32) -> Self {
        Self { value, velocity: None, status: AnimationStatus::Decreasing }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BubblePhase {
    #[default]
    Idle,
    In,
    Out,
}

/// Transient overrides written by the bubble effector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BubbleState {
    pub radius: Option<f32>,
    pub opacity: Option<f32>,
    pub phase: BubblePhase,
}

impl BubbleState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleImage {
    pub index: usize,
    pub ratio: f32,
    pub replace_color: bool,
    pub src: String,
}

/// Everything construction needs besides the position and emitter.
pub(crate) struct SpawnContext<'a> {
    pub container: &'a Container,
    pub rng: &'a mut Rng,
    pub cache: &'a mut OptionsCache,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub emitter: Option<EmitterId>,
    /// Effective options: base, then shape-specific, then emitter overrides.
    pub options: Arc<ParticlesOptions>,
    pub retina: ParticleRetina,
    pub shape: ShapeType,
    pub shape_data: Option<ShapeData>,
    pub fill: bool,
    pub close: bool,
    pub image: Option<ParticleImage>,
    pub position: Vec2,
    pub initial_position: Option<Vec2>,
    /// Parallax offset; not part of collision.
    pub offset: Vec2,
    pub velocity: Vec2,
    pub initial_velocity: Vec2,
    pub direction: MoveDirection,
    pub size: AnimatedValue,
    pub opacity: AnimatedValue,
    /// Degrees
    pub angle: f32,
    pub rotate_direction: RotateDirection,
    pub color: Option<Rgb>,
    pub stroke: StrokeOptions,
    pub stroke_color: Option<Rgb>,
    pub shadow_color: Option<Rgb>,
    pub bubble: BubbleState,
    destroyed: bool,
}

impl Particle {
    pub(crate) fn new(
        ctx: &mut SpawnContext<'_>,
        id: ParticleId,
        position: Option<Vec2>,
        emitter: Option<&Emitter>,
    ) -> Self {
        let container = ctx.container;
        let base = emitter
            .and_then(Emitter::particles_options)
            .cloned()
            .unwrap_or_else(|| container.particles_options().clone());

        let shape = base.shape.kind.pick(ctx.rng).copied().unwrap_or_default();
        let shape_pick = base
            .shape
            .data_for(shape)
            .and_then(|data| data.pick_indexed(ctx.rng))
            .map(|(index, data)| (index, data.clone()));

        let options = match &shape_pick {
            Some((index, data)) if data.particles.is_some() => {
                ctx.cache.resolve(container, emitter, shape, *index, data, &base)
            }
            _ => base,
        };
        let (mut fill, mut close) = shape_pick
            .as_ref()
            .map(|(_, data)| (data.fill.unwrap_or(true), data.close.unwrap_or(true)))
            .unwrap_or((true, true));

        let retina = container.retina().particle(&options);

        // minimum sizes are unscaled, like the size animation floor
        let size_value = if options.size.random.enable {
            ctx.rng.range(options.size.random.minimum_value, retina.size_value)
        } else {
            retina.size_value
        };

        let direction = emitter.map(Emitter::direction).unwrap_or(options.movement.direction);

        let mut angle = if options.rotate.random { ctx.rng.next_f32() * 360.0 } else { options.rotate.value };
        let rotate_direction = options.rotate.direction.resolve(ctx.rng);

        let size_animation = &options.size.animation;
        let size_velocity = size_animation.enable.then(|| {
            let speed = retina.size_animation_speed / 100.0;
            if size_animation.sync { speed } else { speed * ctx.rng.next_f32() }
        });
        let size = AnimatedValue { value: size_value, velocity: size_velocity, status: AnimationStatus::Decreasing };

        if options.rotate.animation.enable && !options.rotate.animation.sync {
            angle = ctx.rng.next_f32() * 360.0;
        }

        let position = calc_position(container, ctx.rng, position, size_value);
        let polygon = &container.options().polygon;
        let initial_position = (polygon.enable && polygon.kind == PolygonMaskType::Inline).then_some(position);

        let color = color_to_rgb(&options.color.value, ctx.rng);

        let opacity_options = &options.opacity;
        let opacity_value = if opacity_options.random.enable {
            ctx.rng.range(opacity_options.random.minimum_value, opacity_options.value)
        } else {
            opacity_options.value
        };
        let opacity_velocity = opacity_options.animation.enable.then(|| {
            let speed = opacity_options.animation.speed / 100.0;
            if opacity_options.animation.sync { speed } else { speed * ctx.rng.next_f32() }
        });
        let opacity =
            AnimatedValue { value: opacity_value, velocity: opacity_velocity, status: AnimationStatus::Decreasing };

        let velocity = calculate_velocity(&options.movement, direction, ctx.rng);

        let image = if shape == ShapeType::Image && !container.images().is_empty() {
            let index = ctx.rng.index(container.images().len());
            let asset = container.images().get(index);
            let shape_image = options.shape.image.get(index);
            let (width, height) = shape_image
                .map(|image| (image.width, image.height))
                .or_else(|| asset.map(|asset| (asset.width, asset.height)))
                .unwrap_or((1.0, 1.0));
            let ratio = width / height;
            if let Some(shape_image) = shape_image {
                fill = shape_image.fill.unwrap_or(fill);
                close = shape_image.close.unwrap_or(close);
            }
            Some(ParticleImage {
                index,
                ratio: if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 },
                replace_color: shape_image.map(|image| image.replace_color).unwrap_or(false),
                src: shape_image
                    .filter(|image| !image.src.is_empty())
                    .map(|image| image.src.clone())
                    .or_else(|| asset.map(|asset| asset.src.clone()))
                    .unwrap_or_default(),
            })
        } else {
            None
        };

        let stroke = options.stroke.pick(ctx.rng).cloned().unwrap_or_default();
        let stroke_color = stroke.color.to_rgb(ctx.rng);
        let shadow_color = options.shadow.color.to_rgb(ctx.rng);

        Self {
            id,
            emitter: emitter.map(Emitter::id),
            retina,
            shape,
            shape_data: shape_pick.map(|(_, data)| data),
            fill,
            close,
            image,
            position,
            initial_position,
            offset: Vec2::ZERO,
            velocity,
            initial_velocity: velocity,
            direction,
            size,
            opacity,
            angle,
            rotate_direction,
            color,
            stroke,
            stroke_color,
            shadow_color,
            bubble: BubbleState::default(),
            destroyed: false,
            options,
        }
    }

    /// Drawn radius; the bubble radius wins while active.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.bubble.radius.unwrap_or(self.size.value)
    }

    /// Drawn opacity; the bubble opacity wins while active.
    #[inline]
    pub fn draw_opacity(&self) -> f32 {
        self.bubble.opacity.unwrap_or(self.opacity.value)
    }

    /// Position including the parallax offset.
    #[inline]
    pub fn draw_position(&self) -> Vec2 {
        self.position + self.offset
    }

    pub fn reset_velocity(&mut self) {
        self.velocity = self.initial_velocity;
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Marks the particle for removal after the current update pass.
    pub(crate) fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn grid_entry(&self) -> GridEntry {
        GridEntry { id: self.id, position: self.position, radius: self.size.value }
    }
}

/// Explicit position wins; then a point inside the polygon mask; then a
/// uniform canvas point nudged inward when it hugs an edge.
pub(crate) fn calc_position(container: &Container, rng: &mut Rng, position: Option<Vec2>, size: f32) -> Vec2 {
    if let Some(position) = position {
        return position;
    }

    if container.options().polygon.enable {
        if let Some(mask) = container.polygon() {
            return mask.random_point_inside(rng);
        }
    }

    let canvas = container.canvas();
    let mut pos = canvas.random_point(rng);
    if pos.x > canvas.width - size * 2.0 {
        pos.x -= size;
    } else if pos.x < size * 2.0 {
        pos.x += size;
    }
    if pos.y > canvas.height - size * 2.0 {
        pos.y -= size;
    } else if pos.y < size * 2.0 {
        pos.y += size;
    }
    pos
}

/// Base direction vector, then either scaled (`straight`) or jittered.
pub(crate) fn calculate_velocity(movement: &MoveOptions, direction: MoveDirection, rng: &mut Rng) -> Vec2 {
    let base = direction.base_velocity();
    if movement.straight {
        if movement.random {
            Vec2::new(base.x * rng.next_f32(), base.y * rng.next_f32())
        } else {
            base
        }
    } else {
        Vec2::new(base.x + rng.next_f32() - 0.5, base.y + rng.next_f32() - 0.5)
    }
}
