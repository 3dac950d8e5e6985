//! Tests for target selection, pooling, fire control and the projectile
//! lifecycle, driven through the combat engine.

use std::collections::BTreeSet;

use hecs::World;

use salvo_core::capabilities::{DamageOutcome, Hitable};
use salvo_core::color::ColorId;
use salvo_core::commands::EngineCommand;
use salvo_core::components::{BodySegment, HomingProjectile};
use salvo_core::config::{CombatConfig, SpawnPoint};
use salvo_core::constants::POOL_INITIAL_SIZE;
use salvo_core::enums::{ProjectilePhase, Resolution, TurretState};
use salvo_core::events::CombatEvent;
use salvo_core::state::CombatSnapshot;
use salvo_core::types::{Position, TargetId, UnitId};
use salvo_core::visibility::AlwaysVisible;

use crate::engine::CombatEngine;
use crate::pool::{ProjectilePool, ReleaseOutcome};
use crate::registry::TargetRegistry;
use crate::scenario::{ChainLayout, Scenario};
use crate::world_setup;

const RED: ColorId = ColorId(0);
const GREEN: ColorId = ColorId(1);

/// Default config with a single spawn point at the origin facing +y.
fn base_config() -> CombatConfig {
    CombatConfig {
        spawn_points: vec![SpawnPoint {
            position: Position::ORIGIN,
            heading_deg: 0.0,
        }],
        ..Default::default()
    }
}

fn engine_with(config: CombatConfig) -> CombatEngine {
    CombatEngine::with_visibility(config, AlwaysVisible)
}

fn fired(snap: &CombatSnapshot) -> Vec<(UnitId, TargetId)> {
    snap.events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::UnitFired { unit, target, .. } => Some((*unit, *target)),
            _ => None,
        })
        .collect()
}

fn resolutions(snap: &CombatSnapshot) -> Vec<Resolution> {
    snap.events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::ProjectileResolved { resolution, .. } => Some(*resolution),
            _ => None,
        })
        .collect()
}

fn run_collecting(engine: &mut CombatEngine, ticks: usize) -> Vec<CombatEvent> {
    (0..ticks).flat_map(|_| engine.tick().events).collect()
}

// ---- Target selection ----

fn registry_with(world: &mut World, targets: &[(ColorId, Position)]) -> TargetRegistry {
    let mut registry = TargetRegistry::new();
    for (i, (color, position)) in targets.iter().enumerate() {
        let id = TargetId(i as u32);
        let entity = world_setup::spawn_target(world, id, *color, 100.0, *position);
        assert!(registry.register(id, entity));
    }
    registry
}

#[test]
fn test_nearest_target_selected() {
    let mut world = World::new();
    let registry = registry_with(
        &mut world,
        &[
            (RED, Position::planar(0.0, 3.0)),
            (RED, Position::planar(0.0, 1.0)),
            (RED, Position::planar(0.0, 5.0)),
        ],
    );

    let nearest = registry.find_nearest(&world, RED, &Position::ORIGIN, &AlwaysVisible);
    assert_eq!(nearest, Some(TargetId(1)));
}

#[test]
fn test_nearest_skips_ineligible_targets() {
    let mut world = World::new();
    let registry = registry_with(
        &mut world,
        &[
            (GREEN, Position::planar(0.0, 1.0)), // wrong color
            (RED, Position::planar(0.0, 2.0)),   // reserved
            (RED, Position::planar(0.0, 3.0)),   // off screen
            (RED, Position::planar(0.0, 4.0)),   // dead
            (RED, Position::planar(0.0, 6.0)),
        ],
    );

    let reserved = registry.entity_of(TargetId(1)).unwrap();
    assert!(world.get::<&mut BodySegment>(reserved).unwrap().set_reserved());
    let dead = registry.entity_of(TargetId(3)).unwrap();
    world.get::<&mut BodySegment>(dead).unwrap().take_damage(1000.0);

    let visible = |p: &Position| (p.y - 3.0).abs() > 0.1;
    let nearest = registry.find_nearest(&world, RED, &Position::ORIGIN, &visible);
    assert_eq!(nearest, Some(TargetId(4)));

    assert_eq!(
        registry.find_nearest(&world, ColorId(4), &Position::ORIGIN, &AlwaysVisible),
        None
    );
}

#[test]
fn test_nearest_tie_goes_to_first_registered() {
    let mut world = World::new();
    let registry = registry_with(
        &mut world,
        &[
            (RED, Position::planar(2.0, 0.0)),
            (RED, Position::planar(-2.0, 0.0)),
        ],
    );
    let nearest = registry.find_nearest(&world, RED, &Position::ORIGIN, &AlwaysVisible);
    assert_eq!(nearest, Some(TargetId(0)));
}

#[test]
fn test_registry_unregister_keeps_order() {
    let mut world = World::new();
    let mut registry = registry_with(
        &mut world,
        &[
            (RED, Position::ORIGIN),
            (GREEN, Position::ORIGIN),
            (RED, Position::ORIGIN),
        ],
    );

    assert!(registry.unregister(TargetId(1)).is_some());
    assert!(registry.unregister(TargetId(1)).is_none());
    let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![TargetId(0), TargetId(2)]);
    assert_eq!(registry.count_by_color(&world).get(&RED), Some(&2));
}

// ---- Projectile pool ----

#[test]
fn test_pool_reuses_and_respects_bound() {
    let mut world = World::new();
    let mut pool = ProjectilePool::new(CombatConfig::default().projectile.template(), 2);

    pool.prewarm(&mut world, &[RED], 5);
    assert_eq!(pool.occupancy(RED), 2, "prewarm is capped at max size");

    let handles: Vec<_> = (0..4).map(|_| pool.acquire(&mut world, RED)).collect();
    assert_eq!(pool.occupancy(RED), 0);
    assert_eq!(pool.total_instantiated(), 4);
    for &h in &handles {
        let p = world.get::<&HomingProjectile>(h).unwrap();
        assert_eq!(p.phase, ProjectilePhase::Ready);
        assert_eq!(p.color, RED);
    }

    let outcomes: Vec<_> = handles
        .iter()
        .map(|&h| pool.release(&mut world, h, RED))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ReleaseOutcome::Pooled,
            ReleaseOutcome::Pooled,
            ReleaseOutcome::Disposed,
            ReleaseOutcome::Disposed
        ]
    );
    assert_eq!(pool.occupancy(RED), 2);
    assert_eq!(pool.disposed(), 2);
    assert!(!world.contains(handles[3]));

    // FIFO reuse, no new allocation.
    assert_eq!(pool.acquire(&mut world, RED), handles[0]);
    assert_eq!(pool.total_instantiated(), 4);
}

#[test]
fn test_pool_colors_are_independent() {
    let mut world = World::new();
    let mut pool = ProjectilePool::new(CombatConfig::default().projectile.template(), 4);
    pool.prewarm(&mut world, &[RED, GREEN], 3);

    pool.acquire(&mut world, GREEN);
    let by_color = pool.occupancy_by_color();
    assert_eq!(by_color.get(&RED), Some(&3));
    assert_eq!(by_color.get(&GREEN), Some(&2));
    assert_eq!(pool.occupancy(ColorId(9)), 0);
}

#[test]
fn test_pool_skips_stale_handle() {
    let mut world = World::new();
    let mut pool = ProjectilePool::new(CombatConfig::default().projectile.template(), 4);
    pool.prewarm(&mut world, &[RED], 1);

    let first = pool.acquire(&mut world, RED);
    assert_eq!(pool.release(&mut world, first, RED), ReleaseOutcome::Pooled);
    world.despawn(first).unwrap();

    let second = pool.acquire(&mut world, RED);
    assert_ne!(second, first);
    assert!(world.contains(second));
    assert_eq!(pool.total_instantiated(), 2);
}

// ---- Fire control and projectile lifecycle ----

#[test]
fn test_end_to_end_single_hit() {
    let mut engine = CombatEngine::new(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));
    let unit = engine.create_unit(RED, 2);

    let snap = engine.tick();
    assert_eq!(fired(&snap), vec![(unit, target)]);
    assert_eq!(engine.unit(unit).unwrap().ammo, 1);
    assert!(engine.target(target).unwrap().reserved);

    let flights = engine.projectiles();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0].0.target, Some(target));
    assert_eq!(flights[0].0.source, Some(unit));
    assert_eq!(engine.pool().occupancy(RED), POOL_INITIAL_SIZE - 1);

    let mut hit = false;
    for _ in 0..50 {
        let snap = engine.tick();
        if resolutions(&snap).contains(&Resolution::Hit) {
            hit = true;
            break;
        }
    }
    assert!(hit, "projectile should reach a target 5 units away");

    let segment = engine.target(target).unwrap();
    assert_eq!(segment.health, 50.0);
    assert!(!segment.reserved, "reservation released on resolution");
    assert!(engine.projectiles().is_empty());
    assert_eq!(engine.pool().occupancy(RED), POOL_INITIAL_SIZE);
}

#[test]
fn test_second_shot_destroys_target_and_retires_unit() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));
    let unit = engine.create_unit(RED, 2);

    let events = run_collecting(&mut engine, 200);

    let destroyed = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::TargetDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert!(events.contains(&CombatEvent::TargetDestroyed { target, color: RED }));
    assert!(events.contains(&CombatEvent::UnitExhausted { unit }));

    assert!(engine.target(target).is_none());
    assert!(engine.unit(unit).is_none());
    assert_eq!(engine.live_targets(), 0);
    assert_eq!(engine.active_units(), 0);
    assert_eq!(engine.pool().occupancy(RED), POOL_INITIAL_SIZE);
}

#[test]
fn test_reserved_target_not_engaged_twice() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));
    let first = engine.create_unit(RED, 3);
    let second = engine.create_unit(RED, 3);

    let snap = engine.tick();
    assert_eq!(fired(&snap), vec![(first, target)]);
    assert_eq!(engine.unit(second).unwrap().ammo, 3);
}

#[test]
fn test_in_flight_projectiles_own_distinct_targets() {
    let mut engine = engine_with(base_config());
    for (x, y) in [(0.0, 4.0), (3.0, 3.0), (-3.0, 2.0), (1.0, -4.0)] {
        engine.spawn_target(RED, Position::planar(x, y));
    }
    engine.create_units([(RED, 3), (RED, 3), (RED, 3)]);

    let mut max_in_flight = 0;
    for _ in 0..400 {
        engine.tick();
        let flights = engine.projectiles();
        max_in_flight = max_in_flight.max(flights.len());

        let mut seen = BTreeSet::new();
        for (projectile, _) in &flights {
            let target = projectile.target.unwrap();
            assert!(seen.insert(target), "target {target} bound twice");
            if let Some(segment) = engine.target(target) {
                assert!(segment.reserved);
            }
        }

        let reserved = snapshot_reserved(&engine);
        assert_eq!(reserved, flights.len());
    }
    assert!(max_in_flight > 1);
}

fn snapshot_reserved(engine: &CombatEngine) -> usize {
    engine
        .world()
        .query::<&BodySegment>()
        .iter()
        .filter(|(_, s)| s.reserved)
        .count()
}

#[test]
fn test_multiple_shots_in_one_evaluation() {
    let mut config = base_config();
    config.cannon.fire_rate_secs = 0.0;
    let mut engine = engine_with(config);
    let targets: Vec<_> = [2.0, 3.0, 4.0]
        .iter()
        .map(|&y| engine.spawn_target(RED, Position::planar(0.0, y)))
        .collect();
    let unit = engine.create_unit(RED, 3);

    let snap = engine.tick();
    let shots: Vec<_> = fired(&snap).into_iter().map(|(_, t)| t).collect();
    assert_eq!(shots, targets);
    assert!(snap.events.contains(&CombatEvent::UnitExhausted { unit }));
    assert_eq!(engine.projectiles().len(), 3);
    assert_eq!(engine.active_units(), 0);
}

#[test]
fn test_unit_without_ammo_never_fires() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));
    let unit = engine.create_unit(RED, 0);

    let events = run_collecting(&mut engine, 60);
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitFired { .. })));
    assert!(!engine.target(target).unwrap().reserved);
    assert!(engine.unit(unit).is_some(), "empty units stay registered");
}

#[test]
fn test_unit_turns_before_firing() {
    let mut config = base_config();
    config.cannon.rotation_speed_deg = 6.0;
    let mut engine = engine_with(config);
    let bearing = 6.0_f64.to_radians();
    let target = engine.spawn_target(RED, Position::planar(5.0 * bearing.sin(), 5.0 * bearing.cos()));
    let unit = engine.create_unit(RED, 1);

    let snap = engine.tick();
    assert!(fired(&snap).is_empty(), "6 deg off with 5 deg tolerance must not fire");
    let cannon = engine.unit(unit).unwrap();
    assert_eq!(cannon.state, TurretState::Aligning);
    assert_eq!(cannon.current_target, Some(target));
    assert!(cannon.heading_deg > 0.0 && cannon.heading_deg < 1.0);
    assert_eq!(cannon.ammo, 1);

    // Keeps turning every frame and fires once inside tolerance.
    let events = run_collecting(&mut engine, 40);
    assert!(events.contains(&CombatEvent::UnitFired {
        unit,
        target,
        remaining_ammo: 0
    }));
}

#[test]
fn test_target_on_top_of_unit_does_not_stall_fire() {
    let mut engine = engine_with(base_config());
    let underfoot = engine.spawn_target_with_health(RED, Position::ORIGIN, 50.0);
    let ahead = engine.spawn_target(RED, Position::planar(0.0, 3.0));
    let unit = engine.create_unit_at(
        RED,
        2,
        SpawnPoint {
            position: Position::ORIGIN,
            heading_deg: 90.0,
        },
    );

    let snap = engine.tick();
    assert_eq!(fired(&snap), vec![(unit, underfoot)]);
    // Launched from the muzzle on top of the target: lands the same tick.
    assert!(snap.events.contains(&CombatEvent::TargetDestroyed {
        target: underfoot,
        color: RED
    }));

    let events = run_collecting(&mut engine, 120);
    assert!(events.contains(&CombatEvent::UnitFired {
        unit,
        target: ahead,
        remaining_ammo: 0
    }));
}

#[test]
fn test_color_mismatch_never_fires() {
    let mut engine = engine_with(base_config());
    engine.spawn_target(RED, Position::planar(0.0, 5.0));
    engine.create_unit(GREEN, 3);

    let events = run_collecting(&mut engine, 60);
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitFired { .. })));
}

#[test]
fn test_invisible_target_skipped() {
    let mut engine = CombatEngine::with_visibility(base_config(), |p: &Position| p.x >= 0.0);
    let hidden = engine.spawn_target(RED, Position::planar(-1.0, 1.0));
    let shown = engine.spawn_target(RED, Position::planar(0.0, 4.0));
    let unit = engine.create_unit(RED, 1);

    let snap = engine.tick();
    assert_eq!(fired(&snap), vec![(unit, shown)]);
    assert!(!engine.target(hidden).unwrap().reserved);
}

#[test]
fn test_viewport_excludes_offscreen_target() {
    let mut engine = CombatEngine::new(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 9.5));
    engine.create_unit(RED, 1);

    let events = run_collecting(&mut engine, 30);
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitFired { .. })));
    assert!(!engine.target(target).unwrap().reserved);
}

#[test]
fn test_target_destroyed_mid_flight_loses_projectile() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));
    engine.create_unit(RED, 2);
    engine.tick();
    assert_eq!(engine.projectiles().len(), 1);

    assert_eq!(engine.damage_target(target, 1000.0), DamageOutcome::Destroyed);
    assert_eq!(engine.damage_target(target, 1000.0), DamageOutcome::Ignored);

    let snap = engine.tick();
    assert!(snap
        .events
        .contains(&CombatEvent::TargetDestroyed { target, color: RED }));
    assert_eq!(resolutions(&snap), vec![Resolution::TargetLost]);
    assert!(engine.projectiles().is_empty());
    assert_eq!(engine.pool().occupancy(RED), POOL_INITIAL_SIZE);
}

#[test]
fn test_destruction_reported_once() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));

    assert_eq!(
        engine.damage_target(target, 60.0),
        DamageOutcome::Damaged { remaining: 40.0 }
    );
    assert_eq!(engine.damage_target(target, 60.0), DamageOutcome::Destroyed);
    assert_eq!(engine.damage_target(target, 60.0), DamageOutcome::Ignored);

    let snap = engine.tick();
    let destroyed = snap
        .events
        .iter()
        .filter(|e| matches!(e, CombatEvent::TargetDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert_eq!(engine.live_targets(), 0);
    assert!(snap.targets.is_empty());
}

#[test]
fn test_projectile_expires_when_target_out_of_reach() {
    let mut config = base_config();
    config.projectile.speed = 0.5;
    config.projectile.self_destruct_secs = 0.5;
    let mut engine = engine_with(config);
    let target = engine.spawn_target(RED, Position::planar(0.0, 5.0));
    engine.create_unit(RED, 2);

    let events = run_collecting(&mut engine, 40);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ProjectileResolved {
            resolution: Resolution::Expired,
            ..
        }
    )));

    let segment = engine.target(target).unwrap();
    assert_eq!(segment.health, 100.0);
    assert!(!segment.reserved);
    assert!(engine.projectiles().is_empty());
    assert_eq!(engine.pool().occupancy(RED), POOL_INITIAL_SIZE);
}

#[test]
fn test_start_delay_holds_fire() {
    let mut config = base_config();
    config.fire_control.start_delay_secs = 1.0;
    let mut engine = engine_with(config);
    engine.spawn_target(RED, Position::planar(0.0, 5.0));
    engine.create_unit(RED, 1);

    let early = run_collecting(&mut engine, 55);
    assert!(!early
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitFired { .. })));

    let later = run_collecting(&mut engine, 30);
    assert!(later
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitFired { .. })));
}

// ---- Commands ----

#[test]
fn test_commands_recolor_and_rearm_unit() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(GREEN, Position::planar(0.0, 5.0));
    let unit = engine.create_unit(RED, 0);

    assert!(engine.add_ammo(unit, -5));
    assert_eq!(engine.unit(unit).unwrap().ammo, 0);
    assert!(!engine.add_ammo(UnitId(99), 1));

    engine.queue_commands([
        EngineCommand::SetUnitColor { unit, color: GREEN },
        EngineCommand::AddAmmo { unit, amount: 1 },
    ]);
    let snap = engine.tick();

    assert_eq!(fired(&snap), vec![(unit, target)]);
    assert!(snap.events.contains(&CombatEvent::UnitExhausted { unit }));
}

#[test]
fn test_removed_unit_projectile_still_lands() {
    let mut engine = engine_with(base_config());
    let target = engine.spawn_target(RED, Position::planar(0.0, 3.0));
    let unit = engine.create_unit(RED, 3);
    engine.tick();

    assert!(engine.remove_unit(unit));
    assert!(!engine.remove_unit(unit));
    assert_eq!(engine.active_units(), 0);

    let events = run_collecting(&mut engine, 40);
    assert!(events.contains(&CombatEvent::TargetDamaged {
        target,
        amount: 50.0,
        remaining: 50.0
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::UnitFired { .. })));
}

#[test]
fn test_create_units_from_color_map() {
    let mut engine = engine_with(base_config());
    let request: std::collections::BTreeMap<ColorId, u32> =
        [(RED, 2), (GREEN, 5)].into_iter().collect();
    let units = engine.create_units(request);

    assert_eq!(units, vec![UnitId(0), UnitId(1)]);
    assert_eq!(engine.unit(units[1]).unwrap().ammo, 5);
    assert_eq!(engine.unit(units[1]).unwrap().color, GREEN);
}

#[test]
fn test_spawn_target_command_health_override() {
    let mut engine = engine_with(base_config());
    engine.queue_commands([
        EngineCommand::SpawnTarget {
            color: RED,
            position: Position::planar(-20.0, 0.0),
            max_health: Some(30.0),
        },
        EngineCommand::SpawnTarget {
            color: GREEN,
            position: Position::planar(20.0, 0.0),
            max_health: None,
        },
    ]);

    let snap = engine.tick();
    let health: Vec<_> = snap.targets.iter().map(|t| t.max_health).collect();
    assert_eq!(health, vec![30.0, 100.0]);
    assert_eq!(engine.targets_by_color().get(&RED), Some(&1));
}

#[test]
fn test_spawn_points_round_robin() {
    let mut config = base_config();
    config.spawn_points = vec![
        SpawnPoint {
            position: Position::planar(-2.0, 0.0),
            heading_deg: 0.0,
        },
        SpawnPoint {
            position: Position::planar(2.0, 0.0),
            heading_deg: 90.0,
        },
    ];
    let mut engine = engine_with(config);
    let units = engine.create_units([(RED, 1), (GREEN, 1), (RED, 1)]);

    let positions: Vec<_> = units
        .iter()
        .map(|&u| engine.unit_position(u).unwrap())
        .collect();
    assert_eq!(
        positions,
        vec![
            Position::planar(-2.0, 0.0),
            Position::planar(2.0, 0.0),
            Position::planar(-2.0, 0.0)
        ]
    );
    assert_eq!(engine.unit(units[1]).unwrap().heading_deg, 90.0);
    assert_eq!(engine.units_by_color().get(&RED), Some(&2));
}

#[test]
fn test_missing_spawn_points_fall_back_to_origin() {
    let mut engine = engine_with(CombatConfig::default());
    let unit = engine.create_unit(RED, 1);
    assert_eq!(engine.unit_position(unit), Some(Position::ORIGIN));
}

// ---- Snapshots and scenarios ----

#[test]
fn test_snapshot_lists_pools_per_palette_color() {
    let mut engine = engine_with(base_config());
    let snap = engine.tick();
    assert_eq!(snap.pools.len(), 6);
    assert!(snap.pools.iter().all(|p| p.idle == POOL_INITIAL_SIZE));
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_chain_layout_is_seeded() {
    let layout = ChainLayout {
        seed: 99,
        segments: 8,
        colors: vec![RED, GREEN, ColorId(2)],
        start: Position::planar(-3.0, 2.0),
        spacing: 0.5,
        direction_deg: 90.0,
        max_health: None,
    };
    let a = layout.commands();
    let b = layout.commands();
    assert_eq!(a, b);
    assert_eq!(a.len(), 8);

    match &a[1] {
        EngineCommand::SpawnTarget { position, .. } => {
            assert!((position.x + 2.5).abs() < 1e-9);
            assert!((position.y - 2.0).abs() < 1e-9);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_scenario_script_issues_each_entry_once() {
    let json = r#"{
        "name": "scripted",
        "script": [
            { "at_tick": 5, "commands": [ { "type": "CreateUnit", "color": 0, "ammo": 2 } ] }
        ]
    }"#;
    let mut scenario = Scenario::from_json_str(json).unwrap();
    assert_eq!(scenario.chain_len(), 0);
    assert!(scenario.due(0).is_empty());
    assert_eq!(
        scenario.due(5),
        vec![EngineCommand::CreateUnit { color: RED, ammo: 2 }]
    );
    assert!(scenario.due(6).is_empty());
}

#[test]
fn test_demo_scenario_makes_progress() {
    let mut engine = CombatEngine::new(base_config());
    let mut scenario = Scenario::demo();

    let mut events = Vec::new();
    for _ in 0..scenario.ticks {
        scenario.run(&mut engine);
        events.extend(engine.tick().events);
    }

    let spawned = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::TargetSpawned { .. }))
        .count();
    assert_eq!(spawned, scenario.chain_len());
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::TargetDestroyed { .. })));
    assert!(engine.projectiles().is_empty());
    assert_eq!(snapshot_reserved(&engine), 0);
}

#[test]
fn test_determinism_same_scenario() {
    let mut engine_a = CombatEngine::new(base_config());
    let mut engine_b = CombatEngine::new(base_config());
    let mut scenario_a = Scenario::demo();
    let mut scenario_b = Scenario::demo();

    for _ in 0..600 {
        scenario_a.run(&mut engine_a);
        scenario_b.run(&mut engine_b);
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged for the same scenario");
    }
}
