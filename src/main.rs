//! Headless replay of a scripted level
//!
//! Plays a short scene (tap a block, catch the hook, let go, land on the bed)
//! through a `LevelSession` and prints every command as a JSON line.
//!
//! Usage: `cat-nap [tuning.json]`

use std::collections::BTreeSet;
use std::error::Error;

use cat_nap::sim::{
    Body, Category, Command, ContactEvent, EntityId, HookRig, LevelLayout, PostStepTick,
    SceneEvent, TouchEvent,
};
use cat_nap::{LevelSession, Tuning};
use glam::Vec2;

const BOUNDARY: EntityId = EntityId(0);
const CAT: EntityId = EntityId(1);
const BED: EntityId = EntityId(2);
const BLOCK: EntityId = EntityId(3);
const HOOK: EntityId = EntityId(12);

fn demo_level() -> LevelLayout {
    LevelLayout {
        index: 1,
        scene_size: Vec2::new(2048.0, 1536.0),
        boundary: BOUNDARY,
        actor: CAT,
        goal: BED,
        hook: Some(HookRig {
            base: EntityId(10),
            base_position: Vec2::new(1024.0, 1300.0),
            rope: EntityId(11),
            rope_length: 300.0,
            hook: HOOK,
            hook_size: Vec2::new(60.0, 80.0),
        }),
    }
}

fn script() -> Vec<SceneEvent> {
    let cat = Body::new(CAT, Category::Actor, Vec2::new(1024.0, 900.0), Vec2::new(120.0, 90.0));
    let bed = Body::new(BED, Category::Goal, Vec2::new(1024.0, 300.0), Vec2::new(200.0, 100.0));
    let block = Body::new(BLOCK, Category::Obstacle, Vec2::new(1024.0, 500.0), Vec2::new(300.0, 60.0));
    let hook = Body::new(HOOK, Category::HookActor, Vec2::new(1024.0, 1000.0), Vec2::new(60.0, 80.0));
    let upright = SceneEvent::PostStep(PostStepTick {
        actor_rotation: 0.0,
        actor_contact_test_enabled: true,
    });

    let mut events = vec![
        SceneEvent::Contact(ContactEvent::new(hook, cat)),
        upright,
        SceneEvent::Touch(TouchEvent::on(block)),
        SceneEvent::Touch(TouchEvent::on(cat)),
        upright,
        SceneEvent::Contact(ContactEvent::new(cat, bed)),
    ];
    // Long enough for the reload to come due
    events.extend(std::iter::repeat_n(upright, 700));
    events
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Cat Nap (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let (mut session, setup) = LevelSession::start(vec![demo_level()], tuning, 1)?;
    let mut assets = BTreeSet::new();
    print_commands(&setup, &mut assets)?;

    for event in script() {
        let out = session.dispatch(&event)?;
        print_commands(&out, &mut assets)?;
    }

    let assets: Vec<_> = assets.into_iter().collect();
    log::info!("Assets used: {}", assets.join(", "));
    log::info!(
        "Replay finished: level {}, {} reload(s)",
        session.level(),
        session.reloads()
    );
    Ok(())
}

fn print_commands(
    commands: &[Command],
    assets: &mut BTreeSet<&'static str>,
) -> Result<(), serde_json::Error> {
    for command in commands {
        println!("{}", serde_json::to_string(command)?);
        assets.extend(command.asset_names());
    }
    Ok(())
}
