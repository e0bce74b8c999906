use crate::core::color::{Rgb, WHITE};
use crate::core::math::Vec2;
use crate::systems::interactions::LinkLine;

use super::{Particle, PerfTimer, SimulationCore};

/// Floats per particle in the draw buffer:
/// x, y, radius, opacity, angle, r, g, b, shape, stroke width, image index, fill.
pub const DRAW_STRIDE: usize = 12;

/// Floats per line in the link buffer:
/// x1, y1, x2, y2, opacity, width, kind, r, g, b.
pub const LINK_STRIDE: usize = 10;

/// One particle, resolved for drawing.
#[derive(Clone, Copy, Debug)]
pub struct ShapeDrawData<'a> {
    pub particle: &'a Particle,
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: Rgb,
}

impl<'a> ShapeDrawData<'a> {
    pub fn new(particle: &'a Particle) -> Self {
        Self {
            particle,
            position: particle.draw_position(),
            radius: particle.radius(),
            opacity: particle.draw_opacity(),
            color: particle.color.unwrap_or(WHITE),
        }
    }
}

/// Drawing backend. The engine decides what to draw; the surface decides how.
pub trait Surface {
    fn draw_link(&mut self, link: &LinkLine, color: Rgb);
    fn draw_particle(&mut self, data: &ShapeDrawData<'_>);
}

pub(super) fn extract_draw_data(core: &mut SimulationCore) -> usize {
    let timer = if core.perf_enabled { Some(PerfTimer::start()) } else { None };

    core.draw_buffer.clear();
    core.draw_buffer.reserve(core.particles.count() * DRAW_STRIDE);
    for particle in core.particles.iter() {
        let data = ShapeDrawData::new(particle);
        let image = particle.image.as_ref().map_or(-1.0, |image| image.index as f32);
        core.draw_buffer.extend_from_slice(&[
            data.position.x,
            data.position.y,
            data.radius,
            data.opacity,
            particle.angle,
            data.color.r as f32,
            data.color.g as f32,
            data.color.b as f32,
            particle.shape.code() as f32,
            particle.stroke.width,
            image,
            if particle.fill { 1.0 } else { 0.0 },
        ]);
    }

    let line = core.container.line_color();
    core.link_buffer.clear();
    for link in core.particles.links() {
        core.link_buffer.extend_from_slice(&[
            link.from.x,
            link.from.y,
            link.to.x,
            link.to.y,
            link.opacity,
            link.width,
            link.kind.code() as f32,
            line.r as f32,
            line.g as f32,
            line.b as f32,
        ]);
    }

    if let Some(timer) = timer {
        core.perf_stats.extract_ms = timer.elapsed_ms();
    }
    core.particles.count()
}

/// Lines first so particles sit on top of them.
pub(super) fn draw<S: Surface>(core: &SimulationCore, surface: &mut S) {
    let line = core.container.line_color();
    for link in core.particles.links() {
        surface.draw_link(link, line);
    }
    for particle in core.particles.iter() {
        surface.draw_particle(&ShapeDrawData::new(particle));
    }
}
