//! Headless stage2d demo
//!
//! Builds a small scene - a floor, a falling hero, a gravity-gated
//! platform group, a debris pool - and runs it for a few seconds of
//! simulated time, logging progress. Run with `RUST_LOG=info` (or `debug`
//! for per-frame output).

use stage2d::{
    Body, Camera, CameraOptions, Clock, Color, Group, Pool, Stage, TickInput, tick,
};

const FRAMES: u32 = 240;
const FIXED_DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("stage2d demo starting...");

    let mut stage = Stage::new();
    let root = stage.root();

    // a floor built from tiles: the dominant-axis response compares
    // against box centers, so ground is tile-sized, never one wide slab
    let mut floor_ids = Vec::new();
    for i in -8..=8 {
        let mut tile = Body::rect(64.0, 40.0, Color::rgb(0.2, 0.2, 0.2));
        tile.position.set(64.0 * i as f32, 400.0);
        tile.collide = true;
        let id = stage.spawn_body(tile);
        stage.add_child(root, id)?;
        floor_ids.push(id);
    }

    // the hero: falls, collides, and is what the camera watches
    let mut hero = Body::rect(24.0, 24.0, Color::rgb(0.8, 0.3, 0.2));
    hero.position.set(0.0, -200.0);
    hero.gravity = true;
    hero.collide = true;
    let hero = stage.spawn_body(hero);
    stage.add_child(root, hero)?;

    // floating platforms live in a group with its gravity gate closed, so
    // the gravity pass never touches them
    let platforms = stage.spawn_group(Group::new(false));
    stage.add_child(root, platforms)?;
    let mut platform_ids = Vec::new();
    for i in 0..3 {
        let mut platform = Body::rect(120.0, 16.0, Color::BLACK);
        platform.position.set(150.0 + 180.0 * i as f32, 250.0 - 40.0 * i as f32);
        platform.collide = true;
        let id = stage.spawn_body(platform);
        stage.add_child(platforms, id)?;
        platform_ids.push(id);
    }

    // debris bodies wait in a pool until the scene needs them
    let mut pool: Pool<stage2d::NodeId> = Pool::new(8);
    pool.fill(|items| {
        let mut debris = Body::rect(8.0, 8.0, Color::rgb(0.5, 0.5, 0.1));
        debris.gravity = true;
        debris.collide = true;
        items.push_back(stage.spawn_body(debris));
    });
    log::info!("pool filled with {} debris bodies", pool.len());

    // drop two debris pieces above the first platform
    let mut debris_ids = Vec::new();
    for offset in [-6.0, 6.0] {
        if let Some(id) = stage.restore(&mut pool, root)? {
            if let Some(body) = stage.body_mut(id) {
                body.position.set(150.0 + offset, 0.0);
            }
            debris_ids.push(id);
        }
    }

    let mut camera = Camera::new(CameraOptions {
        width: 800.0,
        height: 600.0,
        ..CameraOptions::default()
    });
    camera.follow(hero);

    let mut colliders = vec![hero];
    colliders.extend(floor_ids.iter().copied());
    colliders.extend(platform_ids.iter().copied());
    colliders.extend(debris_ids.iter().copied());

    let mut clock = Clock::new();
    let mut wall_time = 0.0f32;
    for frame in 0..FRAMES {
        // the demo runs as fast as it can, so feed the fixed step and keep
        // the wall clock for reporting only
        wall_time += clock.tick();
        let input = TickInput {
            dt: Some(FIXED_DT),
            gravity: 1.0,
            colliders: colliders.clone(),
        };
        tick(&mut stage, &mut camera, &input);

        if frame % 60 == 0 {
            if let Some(body) = stage.body(hero) {
                log::info!(
                    "t={:.2}s hero at ({:.1}, {:.1}) vel ({:.1}, {:.1}) down={}",
                    frame as f32 * FIXED_DT,
                    body.position.x,
                    body.position.y,
                    body.velocity.x,
                    body.velocity.y,
                    body.hit.down,
                );
            }
        }
    }

    let hero_body = stage.body(hero).ok_or("hero vanished")?;
    log::info!(
        "done in {:.1}ms of wall time: hero rested at ({:.1}, {:.1}), camera offset ({:.1}, {:.1})",
        wall_time * 1000.0,
        hero_body.position.x,
        hero_body.position.y,
        camera.position.x,
        camera.position.y,
    );

    // recycle the debris and snapshot the scene
    for id in &debris_ids {
        stage.recycle(&mut pool, *id)?;
    }
    log::info!("pool holds {} of {} after recycling", pool.len(), pool.capacity());

    let snapshot = serde_json::to_string(&stage)?;
    log::info!("scene snapshot is {} bytes of JSON", snapshot.len());

    Ok(())
}
