//! Damage application and target destruction.

use hecs::Entity;
use log::{debug, info};

use salvo_core::capabilities::{DamageOutcome, Hitable};
use salvo_core::color::ColorId;
use salvo_core::components::BodySegment;
use salvo_core::events::CombatEvent;
use salvo_core::types::TargetId;

use crate::context::CombatContext;

/// Apply `amount` damage to a registered target.
///
/// Unknown or already-dead targets are ignored. On destruction the target
/// leaves the registry, `TargetDestroyed` is emitted, and only then is the
/// entity despawned.
pub fn apply(ctx: &mut CombatContext, target: TargetId, amount: f64) -> DamageOutcome {
    let Some(entity) = ctx.targets.entity_of(target) else {
        return DamageOutcome::Ignored;
    };

    let (outcome, color) = match ctx.world.get::<&mut BodySegment>(entity) {
        Ok(mut segment) => (segment.take_damage(amount), segment.color),
        Err(_) => return DamageOutcome::Ignored,
    };

    match outcome {
        DamageOutcome::Damaged { remaining } => {
            debug!("target {target} took {amount:.1} damage, {remaining:.1} left");
            ctx.events.push(CombatEvent::TargetDamaged {
                target,
                amount,
                remaining,
            });
        }
        DamageOutcome::Destroyed => destroy(ctx, target, entity, color),
        DamageOutcome::Ignored => {}
    }

    outcome
}

fn destroy(ctx: &mut CombatContext, target: TargetId, entity: Entity, color: ColorId) {
    ctx.targets.unregister(target);
    ctx.events.push(CombatEvent::TargetDestroyed { target, color });
    info!("target {target} ({color}) destroyed");
    let _ = ctx.world.despawn(entity);
}
