//! Per-frame turret tracking: units keep turning toward the target they are
//! aligning on, and drop it once it dies or leaves the registry.

use salvo_core::components::Cannon;
use salvo_core::types::Position;

use crate::context::CombatContext;
use crate::systems::fire_control::FireController;

pub fn run(controller: &FireController, ctx: &mut CombatContext) {
    for (_, entity) in controller.units() {
        let (target, origin) = match (
            ctx.world.get::<&Cannon>(entity),
            ctx.world.get::<&Position>(entity),
        ) {
            (Ok(cannon), Ok(position)) => (cannon.current_target, *position),
            _ => continue,
        };
        let Some(target) = target else {
            continue;
        };

        let fix = ctx.targets.fix(&ctx.world, target);
        if let Ok(mut cannon) = ctx.world.get::<&mut Cannon>(entity) {
            match fix {
                Some(fix) if fix.alive => cannon.track(&origin, &fix.position, ctx.dt),
                _ => cannon.clear_target(),
            }
        }
    }
}
