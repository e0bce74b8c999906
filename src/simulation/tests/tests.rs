use super::*;
use crate::core::color::Rgb;
use crate::domain::options::{MoveDirection, MoveOptions, ShapeType};
use crate::spatial::grid::{GridEntry, SpatialGrid};
use crate::systems::interactions::{LinkKind, LinkLine};

const FRAME_MS: f32 = 1000.0 / 60.0;

fn core(json: &str) -> SimulationCore {
    let options = Options::from_json(json).unwrap();
    SimulationCore::with_seed(options, 200.0, 200.0, 1.0, 7).unwrap()
}

/// Static particles, nothing spawned by `init`.
fn still(extra_particles: &str, rest: &str) -> SimulationCore {
    let sep = if extra_particles.is_empty() { "" } else { "," };
    let json = format!(
        r#"{{"particles": {{"number": {{"value": 0}}, "move": {{"enable": false}}{}{}}}{}}}"#,
        sep, extra_particles, rest
    );
    core(&json)
}

fn ids(core: &SimulationCore) -> Vec<u32> {
    core.particles().iter().map(|p| p.id.0).collect()
}

fn at(x: f32, y: f32) -> Option<Vec2> {
    Some(Vec2::new(x, y))
}

// === COLLECTION ===

#[test]
fn init_spawns_configured_number() {
    let mut core = core(r#"{"particles": {"number": {"value": 25}}}"#);
    core.init();
    assert_eq!(core.count(), 25);
    assert_eq!(ids(&core), (0..25).collect::<Vec<_>>());
    for p in core.particles() {
        assert!(p.position.x >= 0.0 && p.position.x <= 200.0);
        assert!(p.position.y >= 0.0 && p.position.y <= 200.0);
    }
}

#[test]
fn init_respects_limit() {
    let mut core = core(r#"{"particles": {"number": {"value": 50, "limit": 20}}}"#);
    core.init();
    assert_eq!(core.count(), 20);
}

#[test]
fn removing_keeps_order() {
    let mut core = core(r#"{"particles": {"number": {"value": 5}}}"#);
    core.init();
    assert!(core.remove(ParticleId(1)));
    assert!(core.remove(ParticleId(3)));
    assert!(!core.remove(ParticleId(3)));
    assert_eq!(ids(&core), vec![0, 2, 4]);
}

#[test]
fn remove_at_twice_skips_removed_slots() {
    let mut core = core(r#"{"particles": {"number": {"value": 5}}}"#);
    core.init();
    assert_eq!(core.remove_at(1, 1), 1);
    assert_eq!(core.remove_at(2, 1), 1);
    assert_eq!(ids(&core), vec![0, 2, 4]);
}

#[test]
fn remove_quantity_drains_in_steps() {
    let mut core = core(r#"{"particles": {"number": {"value": 5}}}"#);
    core.init();
    core.remove_quantity(3);
    assert_eq!(core.count(), 2);
    core.remove_quantity(2);
    assert_eq!(core.count(), 0);
}

#[test]
fn remove_at_clamps_quantity() {
    let mut core = core(r#"{"particles": {"number": {"value": 5}}}"#);
    core.init();
    assert_eq!(core.remove_at(3, 10), 2);
    assert_eq!(ids(&core), vec![0, 1, 2]);
    assert_eq!(core.remove_at(3, 1), 0);
    assert_eq!(core.remove_at(0, 0), 0);
}

#[test]
fn remove_quantity_takes_oldest() {
    let mut core = core(r#"{"particles": {"number": {"value": 5}}}"#);
    core.init();
    assert_eq!(core.remove_quantity(3), 3);
    assert_eq!(ids(&core), vec![3, 4]);
    assert_eq!(core.remove_quantity(5), 2);
    assert_eq!(core.count(), 0);
    assert_eq!(core.remove_quantity(1), 0);
}

#[test]
fn push_evicts_oldest_at_limit() {
    let mut core = core(r#"{"particles": {"number": {"value": 8, "limit": 10}}}"#);
    core.init();
    assert_eq!(core.push(4, None), 4);
    assert_eq!(core.count(), 10);
    assert_eq!(core.particles().get(0).map(|p| p.id.0), Some(2));
}

#[test]
fn push_at_position() {
    let mut core = still("", "");
    assert_eq!(core.push(3, at(40.0, 60.0)), 3);
    assert!(core.particles().iter().all(|p| p.position == Vec2::new(40.0, 60.0)));
}

#[test]
fn clear_empties_everything() {
    let mut core = core(r#"{"particles": {"number": {"value": 12}}}"#);
    core.init();
    core.update(FRAME_MS);
    core.clear();
    assert!(core.particles().is_empty());
    assert!(core.particles().grid().is_empty());
    assert_eq!(core.frame(), 0);
}

#[test]
fn grid_tracks_live_particles() {
    let mut core = core(r#"{"particles": {"number": {"value": 30}}}"#);
    core.init();
    core.update(FRAME_MS);
    assert_eq!(core.particles().grid().len(), core.count());
    core.remove_quantity(10);
    assert_eq!(core.particles().grid().len(), 20);
}

#[test]
fn density_scales_with_canvas() {
    let options = Options::from_json(
        r#"{"particles": {"number": {"value": 10, "density": {"enable": true, "area": 800}}}}"#,
    )
    .unwrap();
    let mut core = SimulationCore::with_seed(options, 1000.0, 800.0, 1.0, 3).unwrap();
    core.init();
    assert_eq!(core.count(), 10);

    core.resize(2000.0, 800.0).unwrap();
    assert_eq!(core.count(), 20);
    core.resize(500.0, 800.0).unwrap();
    assert_eq!(core.count(), 5);
}

#[test]
fn resize_rejects_bad_dimensions() {
    let mut core = core("{}");
    assert!(core.resize(0.0, 10.0).is_err());
    assert_eq!(core.width(), 200.0);
}

#[test]
fn particles_near_uses_exact_radius() {
    let mut core = still("", "");
    core.add_particle(at(10.0, 10.0));
    core.add_particle(at(20.0, 10.0));
    core.add_particle(at(150.0, 150.0));

    let mut near = core.particles_near(12.0, 10.0, 10.0);
    near.sort();
    assert_eq!(near, vec![ParticleId(0), ParticleId(1)]);
    assert_eq!(core.particles_near(12.0, 10.0, 5.0), vec![ParticleId(0)]);
    assert!(core.particles_near(100.0, 100.0, 20.0).is_empty());

    core.remove(ParticleId(0));
    core.update(FRAME_MS);
    assert_eq!(core.particles_near(12.0, 10.0, 10.0), vec![ParticleId(1)]);
}

// === OVERLAP ===

#[test]
fn overlap_report_counts_cell_candidates() {
    let mut grid = SpatialGrid::new(100.0, 100.0);
    grid.insert(GridEntry { id: ParticleId(0), position: Vec2::new(10.0, 10.0), radius: 3.0 });
    grid.insert(GridEntry { id: ParticleId(1), position: Vec2::new(20.0, 10.0), radius: 3.0 });

    let report = is_overlapping(&grid, ParticleId(9), Vec2::new(30.0, 10.0), 3.0);
    assert_eq!(report, OverlapReport { collision_found: false, iterations: 2 });

    let report = is_overlapping(&grid, ParticleId(9), Vec2::new(12.0, 10.0), 3.0);
    assert!(report.collision_found);
    assert_eq!(report.iterations, 1);

    // own entry is skipped
    let report = is_overlapping(&grid, ParticleId(0), Vec2::new(10.0, 10.0), 3.0);
    assert!(!report.collision_found);
}

#[test]
fn saturated_spot_rejects_new_particle() {
    let mut core = still(r#""collisions": {"enable": true}"#, "");
    assert!(core.add_particle(at(50.0, 50.0)).is_some());
    core.particles.take_counters();

    // one live particle, one candidate examined: the spot is saturated
    assert!(core.add_particle(at(50.0, 50.0)).is_none());
    assert_eq!(core.count(), 1);
    assert_eq!(core.particles.take_counters().rejected, 1);
}

#[test]
fn random_spawns_relocate_until_free() {
    let mut core = still(r#""collisions": {"enable": true}"#, "");
    for _ in 0..20 {
        core.add_particle(None);
    }
    assert!(core.count() > 0);
    let particles = core.particles().as_slice();
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let same_cell = core.particles().grid().cell_index(a.position) == core.particles().grid().cell_index(b.position);
            if same_cell {
                assert!(a.position.distance(b.position) > a.radius() + b.radius());
            }
        }
    }
}

#[test]
fn check_overlap_moves_colliding_particle() {
    let mut core = still(r#""collisions": {"enable": true}"#, "");
    core.add_particle(at(50.0, 50.0));
    core.add_particle(at(150.0, 150.0));
    core.particles.particles_mut()[1].position = Vec2::new(50.0, 50.0);

    let outcome = core.check_overlap(1, None);
    assert!(matches!(outcome, Some(OverlapOutcome::Placed { relocations }) if relocations >= 1));
    assert_ne!(core.particles().get(1).map(|p| p.position), Some(Vec2::new(50.0, 50.0)));
    assert_eq!(core.check_overlap(5, None), None);
}

// === UPDATER ===

#[test]
fn update_moves_particles() {
    let mut core = core(r#"{"particles": {"number": {"value": 0}, "move": {"speed": 4, "direction": "right", "straight": true, "outMode": "bounce"}}}"#);
    core.add_particle(at(100.0, 100.0));
    core.update(FRAME_MS);
    let p = core.particles().get(0).unwrap();
    assert!((p.position.x - 102.0).abs() < 1e-3);
    assert!((p.position.y - 100.0).abs() < 1e-3);
    assert_eq!(core.frame(), 1);
}

#[test]
fn disabled_move_holds_position() {
    let mut core = still("", "");
    core.add_particle(at(100.0, 100.0));
    for _ in 0..10 {
        core.update(FRAME_MS);
    }
    assert_eq!(core.particles().get(0).map(|p| p.position), Some(Vec2::new(100.0, 100.0)));
}

#[test]
fn out_mode_wraps_to_opposite_edge() {
    let mut core = core(r#"{"particles": {"number": {"value": 0}}}"#);
    core.add_particle(at(100.0, 100.0));
    {
        let p = &mut core.particles.particles_mut()[0];
        p.position = Vec2::new(210.0, 100.0);
        p.velocity = Vec2::ZERO;
    }
    core.update(FRAME_MS);
    let p = core.particles().get(0).unwrap();
    assert_eq!(p.position.x, -p.size.value);
}

#[test]
fn out_mode_destroy_removes_particle() {
    let mut core = core(r#"{"particles": {"number": {"value": 0}, "move": {"outMode": "destroy"}}}"#);
    core.add_particle(at(100.0, 100.0));
    core.add_particle(at(50.0, 50.0));
    {
        let p = &mut core.particles.particles_mut()[0];
        p.position = Vec2::new(300.0, 100.0);
        p.velocity = Vec2::ZERO;
    }
    core.enable_perf_metrics(true);
    core.update(FRAME_MS);
    assert_eq!(ids(&core), vec![1]);
    assert_eq!(core.get_perf_stats().particles_removed(), 1);
}

#[test]
fn bounce_flips_velocity_at_edge() {
    let mut core = core(r#"{"particles": {"number": {"value": 0}, "move": {"outMode": "bounce"}}}"#);
    core.add_particle(at(100.0, 100.0));
    {
        let p = &mut core.particles.particles_mut()[0];
        p.position = Vec2::new(199.0, 100.0);
        p.velocity = Vec2::new(1.0, 0.0);
    }
    core.update(FRAME_MS);
    assert!(core.particles().get(0).unwrap().velocity.x < 0.0);
}

#[test]
fn opacity_animation_steps_down_first() {
    let mut core = still(
        r#""opacity": {"value": 1, "animation": {"enable": true, "speed": 2, "minimumValue": 0, "sync": true}}"#,
        "",
    );
    core.add_particle(at(100.0, 100.0));
    core.update(FRAME_MS);
    let p = core.particles().get(0).unwrap();
    assert_eq!(p.opacity.status, AnimationStatus::Decreasing);
    assert!((p.opacity.value - 0.98).abs() < 1e-4);
}

#[test]
fn polygon_mask_places_particles_inside() {
    let mut core = still("", r#", "polygon": {"enable": true, "type": "inside"}"#);
    assert!(core.set_polygon_mask(vec![Vec2::new(20.0, 20.0), Vec2::new(120.0, 20.0), Vec2::new(20.0, 120.0)]));
    assert!(!core.set_polygon_mask(vec![Vec2::new(0.0, 0.0)]));
    assert!(core.set_polygon_mask(vec![Vec2::new(20.0, 20.0), Vec2::new(120.0, 20.0), Vec2::new(20.0, 120.0)]));

    for _ in 0..10 {
        core.add_particle(None);
    }
    let mask = core.container().polygon().unwrap();
    assert!(core.particles().iter().all(|p| mask.contains(p.position)));
}

#[test]
fn random_size_floor_is_unscaled() {
    let options = Options::from_json(
        r#"{"detectRetina": true, "particles": {"number": {"value": 0}, "move": {"enable": false}, "size": {"value": 3, "random": {"enable": true, "minimumValue": 1}}}}"#,
    )
    .unwrap();
    let mut core = SimulationCore::with_seed(options, 200.0, 200.0, 2.0, 7).unwrap();
    for _ in 0..200 {
        core.add_particle(at(100.0, 100.0));
    }
    let sizes: Vec<f32> = core.particles().iter().map(|p| p.size.value).collect();
    assert!(sizes.iter().all(|s| (1.0..6.0).contains(s)));
    assert!(sizes.iter().any(|s| *s < 2.0));
}

#[test]
fn rotation_wraps_both_ways() {
    let mut core = still(
        r#""rotate": {"value": 359, "direction": "clockwise", "animation": {"enable": true, "speed": 3, "sync": true}}"#,
        "",
    );
    core.add_particle(at(100.0, 100.0));
    core.update(FRAME_MS);
    let angle = core.particles().get(0).unwrap().angle;
    assert!((angle - 2.0).abs() < 1e-3, "angle {}", angle);

    let mut core = still(
        r#""rotate": {"value": 1, "direction": "counterClockwise", "animation": {"enable": true, "speed": 3, "sync": true}}"#,
        "",
    );
    core.add_particle(at(100.0, 100.0));
    core.update(FRAME_MS);
    let angle = core.particles().get(0).unwrap().angle;
    assert!((angle - 358.0).abs() < 1e-3, "angle {}", angle);
}

#[test]
fn parallax_eases_toward_pointer() {
    let mut core = still(
        "",
        r#", "interactivity": {"events": {"onHover": {"parallax": {"enable": true, "force": 2, "smooth": 10}}}}"#,
    );
    core.add_particle(at(100.0, 100.0));
    core.update(FRAME_MS);
    assert_eq!(core.particles().get(0).unwrap().offset, Vec2::ZERO);

    // size 3, force 2: target offset is 1.5 times the pointer's distance from center
    core.pointer_move(150.0, 100.0);
    core.update(FRAME_MS);
    let offset = core.particles().get(0).unwrap().offset;
    assert!((offset.x - 7.5).abs() < 1e-3 && offset.y.abs() < 1e-6, "offset {:?}", offset);

    core.update(FRAME_MS);
    let offset = core.particles().get(0).unwrap().offset;
    assert!((offset.x - 14.25).abs() < 1e-3, "offset {:?}", offset);
    assert_eq!(core.particles().get(0).unwrap().position, Vec2::new(100.0, 100.0));
}

fn velocity_after_frame(core: &mut SimulationCore, position: Vec2) -> Vec2 {
    {
        let p = &mut core.particles.particles_mut()[0];
        p.position = position;
        p.velocity = Vec2::new(1.0, 0.0);
    }
    core.update(FRAME_MS);
    core.particles().get(0).unwrap().velocity
}

#[test]
fn inline_polygon_reverses_past_radius() {
    let mut core = still("", r#", "polygon": {"enable": true, "type": "inline", "move": {"radius": 10}}"#);
    core.add_particle(at(100.0, 100.0));
    assert_eq!(velocity_after_frame(&mut core, Vec2::new(105.0, 100.0)), Vec2::new(1.0, 0.0));
    assert_eq!(velocity_after_frame(&mut core, Vec2::new(115.0, 100.0)), Vec2::new(-1.0, 0.0));
}

#[test]
fn inside_and_outside_polygon_reverse_on_crossing() {
    let triangle = vec![Vec2::new(20.0, 20.0), Vec2::new(120.0, 20.0), Vec2::new(20.0, 120.0)];

    let mut core = still("", r#", "polygon": {"enable": true, "type": "inside"}"#);
    assert!(core.set_polygon_mask(triangle.clone()));
    core.add_particle(at(40.0, 40.0));
    assert_eq!(velocity_after_frame(&mut core, Vec2::new(40.0, 40.0)), Vec2::new(1.0, 0.0));
    assert_eq!(velocity_after_frame(&mut core, Vec2::new(150.0, 150.0)), Vec2::new(-1.0, 0.0));

    let mut core = still("", r#", "polygon": {"enable": true, "type": "outside"}"#);
    assert!(core.set_polygon_mask(triangle));
    core.add_particle(at(150.0, 150.0));
    assert_eq!(velocity_after_frame(&mut core, Vec2::new(150.0, 150.0)), Vec2::new(1.0, 0.0));
    assert_eq!(velocity_after_frame(&mut core, Vec2::new(40.0, 40.0)), Vec2::new(-1.0, 0.0));
}

#[test]
fn spawn_helpers() {
    let core = still("", "");
    let mut rng = Rng::new(11);
    assert_eq!(
        particle::calc_position(core.container(), &mut rng, at(5.0, 6.0), 3.0),
        Vec2::new(5.0, 6.0)
    );
    for _ in 0..20 {
        let p = particle::calc_position(core.container(), &mut rng, None, 3.0);
        assert!(p.x >= 0.0 && p.x <= 200.0 && p.y >= 0.0 && p.y <= 200.0);
    }

    let straight = MoveOptions { straight: true, ..MoveOptions::default() };
    assert_eq!(particle::calculate_velocity(&straight, MoveDirection::Top, &mut rng), Vec2::new(0.0, -1.0));

    let jitter = particle::calculate_velocity(&MoveOptions::default(), MoveDirection::Right, &mut rng);
    assert!(jitter.x >= 0.5 && jitter.x <= 1.5);
    assert!(jitter.y.abs() <= 0.5);
}

#[test]
fn shape_override_is_cached_per_shape() {
    let mut core = still(
        r#""shape": {"type": "star", "options": {"star": {"particles": {"size": {"value": 7}}}}}"#,
        "",
    );
    for _ in 0..3 {
        core.add_particle(None);
    }
    assert!(core.particles().iter().all(|p| p.shape == ShapeType::Star && p.size.value == 7.0));
    assert_eq!(core.particles.cached_options(), 1);
}

// === EFFECTORS ===

#[test]
fn grab_draws_line_to_pointer() {
    let mut core = still("", r#", "interactivity": {"events": {"onHover": {"enable": true, "mode": "grab"}}}"#);
    core.add_particle(at(50.0, 50.0));
    core.pointer_move(60.0, 50.0);
    core.update(FRAME_MS);

    let grab: Vec<&LinkLine> = core.particles().links().iter().filter(|l| l.kind == LinkKind::Grab).collect();
    assert_eq!(grab.len(), 1);
    assert!((grab[0].opacity - 0.9).abs() < 1e-5);
    assert_eq!(grab[0].to, Vec2::new(60.0, 50.0));

    core.pointer_leave();
    core.update(FRAME_MS);
    assert!(core.particles().links().is_empty());
}

#[test]
fn linked_particles_fade_with_distance() {
    let mut core = still(r#""lineLinked": {"enable": true, "distance": 100}"#, "");
    core.add_particle(at(50.0, 50.0));
    core.add_particle(at(60.0, 50.0));
    core.add_particle(at(190.0, 190.0));
    core.update(FRAME_MS);

    let links = core.particles().links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].kind, LinkKind::Link);
    assert!((links[0].opacity - 0.9).abs() < 1e-5);
}

#[test]
fn connect_needs_pointer_near_first_particle() {
    let mut core = still("", r#", "interactivity": {"events": {"onHover": {"enable": true, "mode": "connect"}}}"#);
    core.add_particle(at(50.0, 50.0));
    core.add_particle(at(90.0, 50.0));
    core.pointer_move(190.0, 190.0);
    core.update(FRAME_MS);
    assert!(core.particles().links().is_empty());

    core.pointer_move(55.0, 50.0);
    core.update(FRAME_MS);
    assert!(core.particles().links().iter().any(|l| l.kind == LinkKind::Connect));
}

#[test]
fn hover_bubble_grows_under_pointer() {
    let mut core = still("", r#", "interactivity": {"events": {"onHover": {"enable": true, "mode": "bubble"}}}"#);
    core.add_particle(at(50.0, 50.0));
    core.add_particle(at(199.0, 199.0));
    core.pointer_move(50.0, 50.0);
    core.update(FRAME_MS);

    let near = core.particles().get(0).unwrap();
    assert_eq!(near.bubble.phase, BubblePhase::In);
    assert!((near.radius() - 40.0).abs() < 1e-4);
    let far = core.particles().get(1).unwrap();
    assert_eq!(far.bubble.phase, BubblePhase::Idle);
    assert_eq!(far.radius(), 3.0);

    core.pointer_leave();
    core.update(FRAME_MS);
    assert_eq!(core.particles().get(0).unwrap().bubble.phase, BubblePhase::Idle);
}

#[test]
fn hover_repulse_pushes_away() {
    let mut core = still("", r#", "interactivity": {"events": {"onHover": {"enable": true, "mode": "repulse"}}}"#);
    core.add_particle(at(100.0, 100.0));
    core.pointer_move(90.0, 100.0);
    core.update(FRAME_MS);
    assert!(core.particles().get(0).unwrap().position.x > 100.0);
}

#[test]
fn collisions_exchange_velocity() {
    let mut core = core(r#"{"particles": {"number": {"value": 0}, "move": {"speed": 0}, "collisions": {"enable": false}}}"#);
    core.add_particle(at(100.0, 100.0));
    core.add_particle(at(104.0, 100.0));
    {
        let particles = core.particles.particles_mut();
        particles[0].velocity = Vec2::new(1.0, 0.0);
        particles[1].velocity = Vec2::new(-1.0, 0.0);
        let options = std::sync::Arc::make_mut(&mut particles[0].options);
        options.collisions.enable = true;
    }
    core.update(FRAME_MS);
    let particles = core.particles().as_slice();
    assert!((particles[0].velocity.x + 1.0).abs() < 1e-4);
    assert!((particles[1].velocity.x - 1.0).abs() < 1e-4);
}

#[test]
fn attract_is_equal_and_opposite_within_link_distance() {
    let mut core = core(
        r#"{"particles": {"number": {"value": 0}, "lineLinked": {"distance": 100}, "move": {"enable": false, "attract": {"enable": true, "rotateX": 1, "rotateY": 2}}}}"#,
    );
    core.add_particle(at(50.0, 50.0));
    core.add_particle(at(80.0, 90.0));
    core.add_particle(at(190.0, 190.0));
    let before: Vec<Vec2> = core.particles().iter().map(|p| p.velocity).collect();

    core.update(FRAME_MS);
    let after: Vec<Vec2> = core.particles().iter().map(|p| p.velocity).collect();

    // delta (-30, -40) over (1000, 2000)
    let d0 = after[0] - before[0];
    let d1 = after[1] - before[1];
    assert!((d0.x - 0.03).abs() < 1e-5 && (d0.y - 0.02).abs() < 1e-5, "d0 {:?}", d0);
    assert!((d0.x + d1.x).abs() < 1e-5 && (d0.y + d1.y).abs() < 1e-5, "d1 {:?}", d1);
    assert_eq!(after[2], before[2]);
}

// === COMMANDS ===

#[test]
fn click_push_waits_for_next_frame() {
    let mut core = still("", r#", "interactivity": {"events": {"onClick": {"enable": true, "mode": "push"}}}"#);
    core.click(40.0, 40.0);
    assert_eq!(core.pending_commands(), &[PendingCommand::Click(Vec2::new(40.0, 40.0))]);
    assert_eq!(core.count(), 0);

    core.update(FRAME_MS);
    assert_eq!(core.count(), 4);
    assert!(core.pending_commands().is_empty());
    assert_eq!(core.container().interactivity().pointer.click_position, at(40.0, 40.0));
}

#[test]
fn click_remove_drops_oldest() {
    let mut core = core(
        r#"{"particles": {"number": {"value": 5}}, "interactivity": {"events": {"onClick": {"enable": true, "mode": "remove"}}}}"#,
    );
    core.init();
    core.click(10.0, 10.0);
    core.update(FRAME_MS);
    assert_eq!(ids(&core), vec![2, 3, 4]);
}

#[test]
fn disabled_click_does_nothing() {
    let mut core = still("", r#", "interactivity": {"events": {"onClick": {"enable": false, "mode": "push"}}}"#);
    core.click(40.0, 40.0);
    core.update(FRAME_MS);
    assert_eq!(core.count(), 0);
}

#[test]
fn click_repulse_then_release() {
    let mut core = still("", r#", "interactivity": {"events": {"onClick": {"enable": true, "mode": "repulse"}}}"#);
    core.add_particle(at(100.0, 100.0));
    let initial = core.particles().get(0).unwrap().initial_velocity;

    core.click(105.0, 100.0);
    core.update(FRAME_MS);
    assert_eq!(core.container().interactivity().repulse.phase, RepulsePhase::Active);
    assert!(core.particles().get(0).unwrap().velocity.x < 0.0);

    core.update(400.0);
    assert_eq!(core.container().interactivity().repulse.phase, RepulsePhase::Releasing);
    assert_eq!(core.particles().get(0).unwrap().velocity, initial);

    core.update(FRAME_MS);
    assert_eq!(core.container().interactivity().repulse.phase, RepulsePhase::Idle);
}

#[test]
fn click_bubble_grows_then_restores() {
    let mut core = still("", r#", "interactivity": {"events": {"onClick": {"enable": true, "mode": "bubble"}}}"#);
    core.add_particle(at(100.0, 100.0));
    core.click(100.0, 100.0);

    core.update(200.0);
    let p = core.particles().get(0).unwrap();
    assert_eq!(p.bubble.phase, BubblePhase::In);
    assert!(p.radius() > 3.0);

    core.update(300.0);
    assert_eq!(core.particles().get(0).unwrap().bubble.phase, BubblePhase::Out);

    core.update(500.0);
    let p = core.particles().get(0).unwrap();
    assert_eq!(p.bubble.phase, BubblePhase::Idle);
    assert_eq!(p.radius(), 3.0);
}

// === EMITTERS ===

#[test]
fn emitter_spawns_with_override() {
    let mut core = still("", "");
    let id = core
        .add_emitter_json(
            r#"{"position": {"x": 50, "y": 50}, "direction": "top", "rate": {"quantity": 2, "delay": 0.1}, "particles": {"size": {"value": 9}}}"#,
        )
        .unwrap();

    core.update(150.0);
    assert_eq!(core.count(), 2);
    for p in core.particles() {
        assert_eq!(p.emitter, Some(id));
        assert_eq!(p.size.value, 9.0);
        assert_eq!(p.direction, MoveDirection::Top);
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
    }
}

#[test]
fn finished_emitters_are_dropped() {
    let mut core = still("", "");
    core.add_emitter_json(r#"{"life": {"count": 1, "duration": 0.1}, "rate": {"quantity": 1, "delay": 0.1}}"#)
        .unwrap();
    assert_eq!(core.emitters().len(), 1);
    core.update(150.0);
    assert_eq!(core.count(), 1);
    assert!(core.emitters().is_empty());
}

#[test]
fn configured_emitters_start_on_init() {
    let mut core = still("", r#", "emitters": [{"position": {"x": 10, "y": 10}}, {"position": {"x": 90, "y": 90}}]"#);
    core.init();
    assert_eq!(core.emitters().len(), 2);
    assert_eq!(core.emitters()[1].position(), Vec2::new(180.0, 180.0));

    core.resize(100.0, 100.0).unwrap();
    assert_eq!(core.emitters()[1].position(), Vec2::new(90.0, 90.0));

    let first = core.emitters()[0].id();
    assert!(core.move_emitter(first, 50.0, 50.0));
    assert_eq!(core.emitters()[0].position(), Vec2::new(50.0, 50.0));
    assert!(core.remove_emitter(first));
    assert!(!core.remove_emitter(first));
}

#[test]
fn limit_caps_emitters_and_direct_adds() {
    let mut core = core(r#"{"particles": {"number": {"value": 0, "limit": 10}, "move": {"enable": false}}}"#);
    core.add_emitter_json(r#"{"rate": {"quantity": 5, "delay": 0.1}}"#).unwrap();

    for _ in 0..120 {
        core.update(FRAME_MS);
        assert!(core.count() <= 10);
    }
    assert_eq!(core.count(), 10);

    let oldest = core.particles().get(0).map(|p| p.id).unwrap();
    let added = core.add_particle(at(20.0, 20.0)).unwrap();
    assert_eq!(core.count(), 10);
    assert!(core.particles().find(oldest).is_none());
    assert_eq!(core.particles().get(9).map(|p| p.id), Some(added));

    // a long stall releases many batches at once
    core.update(10_000.0);
    assert_eq!(core.count(), 10);
    assert_eq!(core.particles().grid().len(), 10);
}

#[test]
fn bad_emitter_override_is_rejected() {
    let mut core = still("", "");
    assert!(core.add_emitter_json(r#"{"particles": {"move": {"speed": "fast"}}}"#).is_err());
    assert!(core.emitters().is_empty());
}

// === RENDER ===

#[derive(Default)]
struct Recorder {
    particles: Vec<(Vec2, f32, Rgb)>,
    links: Vec<(LinkKind, Rgb)>,
}

impl Surface for Recorder {
    fn draw_link(&mut self, link: &LinkLine, color: Rgb) {
        self.links.push((link.kind, color));
    }

    fn draw_particle(&mut self, data: &ShapeDrawData<'_>) {
        self.particles.push((data.position, data.radius, data.color));
    }
}

#[test]
fn extract_fills_flat_buffers() {
    let mut core = still(
        r##""color": {"value": "#ff0000"}, "lineLinked": {"enable": true, "color": "#00ff00"}"##,
        "",
    );
    core.add_particle(at(10.0, 20.0));
    core.add_particle(at(30.0, 20.0));
    core.update(FRAME_MS);

    assert_eq!(core.extract_draw_data(), 2);
    let draw = core.draw_buffer();
    assert_eq!(draw.len(), 2 * DRAW_STRIDE);
    assert_eq!(&draw[0..4], &[10.0, 20.0, 3.0, 1.0]);
    assert_eq!(&draw[5..8], &[255.0, 0.0, 0.0]);
    assert_eq!(draw[8], ShapeType::Circle.code() as f32);
    assert_eq!(draw[10], -1.0);

    let links = core.link_buffer();
    assert_eq!(links.len(), LINK_STRIDE);
    assert_eq!(&links[7..10], &[0.0, 255.0, 0.0]);
}

#[test]
fn draw_hands_lines_then_particles_to_surface() {
    let mut core = still(r#""lineLinked": {"enable": true}"#, "");
    core.add_particle(at(10.0, 20.0));
    core.add_particle(at(30.0, 20.0));
    core.update(FRAME_MS);

    let mut surface = Recorder::default();
    core.draw(&mut surface);
    assert_eq!(surface.particles.len(), 2);
    assert_eq!(surface.particles[0], (Vec2::new(10.0, 20.0), 3.0, Rgb { r: 255, g: 255, b: 255 }));
    assert_eq!(surface.links, vec![(LinkKind::Link, Rgb { r: 255, g: 255, b: 255 })]);
}

// === PERF ===

#[test]
fn perf_stats_snapshot_last_step() {
    let mut core = core(r#"{"particles": {"number": {"value": 15}}}"#);
    core.init();
    core.update(FRAME_MS);
    assert_eq!(core.get_perf_stats().particle_count(), 0);

    core.enable_perf_metrics(true);
    core.update(FRAME_MS);
    let stats = core.get_perf_stats();
    assert_eq!(stats.particle_count(), 15);
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.grid_cells() > 0);
    assert!(stats.occupied_cells() >= 1);

    core.enable_perf_metrics(false);
    assert_eq!(core.get_perf_stats().particle_count(), 0);
}
