//! Combat engine: the single entry point for a combat session.
//!
//! `CombatEngine` owns the combat context and the fire controller, processes
//! queued commands at tick boundaries, runs the systems and produces
//! `CombatSnapshot`s. Headless and deterministic.

use std::collections::{BTreeMap, VecDeque};

use hecs::World;
use log::{info, warn};

use salvo_core::capabilities::DamageOutcome;
use salvo_core::color::{ColorId, ColorRegistry};
use salvo_core::commands::EngineCommand;
use salvo_core::components::{BodySegment, Cannon, HomingProjectile};
use salvo_core::config::{CombatConfig, SpawnPoint};
use salvo_core::events::CombatEvent;
use salvo_core::state::CombatSnapshot;
use salvo_core::types::{Position, SimTime, TargetId, UnitId};
use salvo_core::visibility::{Viewport, VisibilityPredicate};

use crate::context::CombatContext;
use crate::pool::ProjectilePool;
use crate::systems;
use crate::systems::fire_control::FireController;
use crate::world_setup;

pub struct CombatEngine {
    ctx: CombatContext,
    fire_control: FireController,
    config: CombatConfig,
    command_queue: VecDeque<EngineCommand>,
    next_target_id: u32,
    next_unit_id: u32,
}

impl CombatEngine {
    /// Create an engine that engages only targets inside the configured viewport.
    pub fn new(config: CombatConfig) -> Self {
        let viewport = Viewport::new(&config.viewport);
        Self::with_visibility(config, viewport)
    }

    /// Create an engine with a custom visibility predicate.
    pub fn with_visibility(
        config: CombatConfig,
        visibility: impl VisibilityPredicate + 'static,
    ) -> Self {
        let colors = ColorRegistry::new(config.palette.iter().cloned());
        let pool = ProjectilePool::new(config.projectile.template(), config.pool.max_size);
        let mut ctx = CombatContext::new(config.dt(), colors, pool, Box::new(visibility));

        let palette = ctx.colors.all_ids();
        ctx.pool
            .prewarm(&mut ctx.world, &palette, config.pool.initial_size);
        info!(
            "combat engine ready: {} colors, {} pooled projectiles per color",
            palette.len(),
            config.pool.initial_size.min(config.pool.max_size)
        );

        Self {
            ctx,
            fire_control: FireController::new(&config.fire_control),
            config,
            command_queue: VecDeque::new(),
            next_target_id: 0,
            next_unit_id: 0,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: EngineCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = EngineCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> CombatSnapshot {
        self.process_commands();
        self.run_systems();
        self.ctx.time.advance(self.ctx.dt);

        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx, &self.fire_control, events)
    }

    /// Spawn a target with the configured max health.
    pub fn spawn_target(&mut self, color: ColorId, position: Position) -> TargetId {
        self.spawn_target_with_health(color, position, self.config.target.max_health)
    }

    pub fn spawn_target_with_health(
        &mut self,
        color: ColorId,
        position: Position,
        max_health: f64,
    ) -> TargetId {
        let id = TargetId(self.next_target_id);
        self.next_target_id += 1;

        let entity =
            world_setup::spawn_target(&mut self.ctx.world, id, color, max_health, position);
        self.ctx.targets.register(id, entity);
        self.ctx
            .events
            .push(CombatEvent::TargetSpawned { target: id, color });
        id
    }

    /// Create a firing unit at the next spawn point (round-robin).
    pub fn create_unit(&mut self, color: ColorId, ammo: u32) -> UnitId {
        let spawn = self.next_spawn_point();
        self.create_unit_at(color, ammo, spawn)
    }

    /// Create a firing unit at an explicit spawn point.
    pub fn create_unit_at(&mut self, color: ColorId, ammo: u32, spawn: SpawnPoint) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;

        let cannon =
            world_setup::build_cannon(id, color, ammo, &self.config.cannon, spawn.heading_deg);
        let entity = world_setup::spawn_cannon(&mut self.ctx.world, cannon, spawn.position);
        self.fire_control.register_unit(id, entity);

        info!("unit {id} ({color}) deployed with {ammo} rounds");
        self.ctx
            .events
            .push(CombatEvent::UnitSpawned { unit: id, color, ammo });
        id
    }

    /// Create several units in order.
    pub fn create_units(
        &mut self,
        units: impl IntoIterator<Item = (ColorId, u32)>,
    ) -> Vec<UnitId> {
        units
            .into_iter()
            .map(|(color, ammo)| self.create_unit(color, ammo))
            .collect()
    }

    /// Withdraw a unit before it runs dry. Its projectiles already in flight
    /// keep tracking.
    pub fn remove_unit(&mut self, unit: UnitId) -> bool {
        match self.fire_control.unregister_unit(unit) {
            Some(entity) => {
                let _ = self.ctx.world.despawn(entity);
                info!("unit {unit} withdrawn");
                true
            }
            None => false,
        }
    }

    /// Top up a unit's ammo. Returns false if the unit is not active.
    pub fn add_ammo(&mut self, unit: UnitId, amount: i64) -> bool {
        self.with_cannon(unit, |cannon| cannon.add_ammo(amount))
    }

    /// Change a unit's matching color. Returns false if the unit is not active.
    pub fn set_unit_color(&mut self, unit: UnitId, color: ColorId) -> bool {
        self.with_cannon(unit, |cannon| cannon.set_color(color))
    }

    /// Damage a target from outside the projectile system.
    pub fn damage_target(&mut self, target: TargetId, amount: f64) -> DamageOutcome {
        systems::damage::apply(&mut self.ctx, target, amount)
    }

    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.ctx.colors
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn pool(&self) -> &ProjectilePool {
        &self.ctx.pool
    }

    pub fn fire_control(&self) -> &FireController {
        &self.fire_control
    }

    /// Current state of a live target.
    pub fn target(&self, id: TargetId) -> Option<BodySegment> {
        let entity = self.ctx.targets.entity_of(id)?;
        let segment = self.ctx.world.get::<&BodySegment>(entity).ok()?;
        Some(BodySegment::clone(&segment))
    }

    /// Current state of an active unit.
    pub fn unit(&self, id: UnitId) -> Option<Cannon> {
        let entity = self.fire_control.entity_of(id)?;
        let cannon = self.ctx.world.get::<&Cannon>(entity).ok()?;
        Some(Cannon::clone(&cannon))
    }

    pub fn unit_position(&self, id: UnitId) -> Option<Position> {
        let entity = self.fire_control.entity_of(id)?;
        let position = self.ctx.world.get::<&Position>(entity).ok()?;
        Some(*position)
    }

    /// In-flight projectiles with their positions, in launch order.
    pub fn projectiles(&self) -> Vec<(HomingProjectile, Position)> {
        self.ctx
            .in_flight
            .iter()
            .filter_map(|&entity| {
                let projectile = self.ctx.world.get::<&HomingProjectile>(entity).ok()?;
                let position = self.ctx.world.get::<&Position>(entity).ok()?;
                Some((HomingProjectile::clone(&projectile), *position))
            })
            .collect()
    }

    pub fn live_targets(&self) -> usize {
        self.ctx.targets.len()
    }

    pub fn active_units(&self) -> usize {
        self.fire_control.len()
    }

    pub fn targets_by_color(&self) -> BTreeMap<ColorId, usize> {
        self.ctx.targets.count_by_color(&self.ctx.world)
    }

    pub fn units_by_color(&self) -> BTreeMap<ColorId, usize> {
        let mut counts = BTreeMap::new();
        for (_, entity) in self.fire_control.units() {
            if let Ok(cannon) = self.ctx.world.get::<&Cannon>(entity) {
                *counts.entry(cannon.color).or_insert(0) += 1;
            }
        }
        counts
    }

    fn with_cannon(&mut self, unit: UnitId, f: impl FnOnce(&mut Cannon)) -> bool {
        let Some(entity) = self.fire_control.entity_of(unit) else {
            return false;
        };
        match self.ctx.world.get::<&mut Cannon>(entity) {
            Ok(mut cannon) => {
                f(&mut *cannon);
                true
            }
            Err(_) => false,
        }
    }

    fn next_spawn_point(&self) -> SpawnPoint {
        let points = &self.config.spawn_points;
        if points.is_empty() {
            warn!("no spawn points configured, placing unit at origin");
            return SpawnPoint::default();
        }
        points[self.fire_control.len() % points.len()]
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::SpawnTarget {
                color,
                position,
                max_health,
            } => {
                let max_health = max_health.unwrap_or(self.config.target.max_health);
                self.spawn_target_with_health(color, position, max_health);
            }
            EngineCommand::CreateUnit { color, ammo } => {
                self.create_unit(color, ammo);
            }
            EngineCommand::CreateUnits { units } => {
                self.create_units(units.into_iter().map(|u| (u.color, u.ammo)));
            }
            EngineCommand::AddAmmo { unit, amount } => {
                if !self.add_ammo(unit, amount) {
                    warn!("add ammo: unit {unit} is not active");
                }
            }
            EngineCommand::SetUnitColor { unit, color } => {
                if !self.set_unit_color(unit, color) {
                    warn!("set color: unit {unit} is not active");
                }
            }
            EngineCommand::DamageTarget { target, amount } => {
                self.damage_target(target, amount);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        self.fire_control.run(&mut self.ctx);
        systems::turret::run(&self.fire_control, &mut self.ctx);
        systems::projectile::run(&mut self.ctx);
    }
}
