use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, info, warn};
use winit::{
    event::{Event, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, TimestepConfig};
use engine::input::{Action, InputConfig, InputManager, InputSource};
use engine::physics::{presets, PhysicsWorld};
use engine::visual::Camera;
use game::characters::{BulletSpawner, CharacterManager, CharacterProfile};

const ARENA_SIZE: f32 = 20.0;
const WALL_THICKNESS: f32 = 1.0;
const ZOOM_STEP: f32 = 0.1;
const TITLE: &str = "Top-down Facing";

/// Player bindings, with optional overrides from the file named on the command line
fn load_bindings() -> Result<InputConfig> {
    let mut config = InputConfig::player_defaults();

    if let Some(path) = std::env::args().nth(1) {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read bindings file {}", path))?;
        let count = config
            .apply_overrides(&text)
            .with_context(|| format!("Invalid bindings file {}", path))?;
        info!("Applied {} binding overrides from {}", count, path);
    }

    for action in Action::ALL {
        if config.has_binding(action) {
            debug!("{} -> {:?}", action, config.bindings_for(action));
        } else {
            warn!("No input bound to {}", action);
        }
    }
    info!("{} player bindings", config.binding_count());

    Ok(config)
}

/// Four walls enclosing a square arena centred on the origin
fn build_arena(physics: &mut PhysicsWorld) {
    let half = ARENA_SIZE / 2.0;
    let walls = [
        (Vec2::new(0.0, half), Vec2::new(ARENA_SIZE, WALL_THICKNESS)),
        (Vec2::new(0.0, -half), Vec2::new(ARENA_SIZE, WALL_THICKNESS)),
        (Vec2::new(half, 0.0), Vec2::new(WALL_THICKNESS, ARENA_SIZE)),
        (Vec2::new(-half, 0.0), Vec2::new(WALL_THICKNESS, ARENA_SIZE)),
    ];

    for (position, size) in walls {
        let body = physics.add_rigid_body(presets::wall_body(position));
        physics.add_collider(presets::wall_collider(size), body);
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting topdown-facing demo...");

    let mut input = InputManager::new(load_bindings()?);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let size = window.inner_size();
    let mut camera = Camera::new(Vec2::ZERO, size.width as f32, size.height as f32);

    let mut game_loop = GameLoop::new(TimestepConfig::default());
    let dt = game_loop.fixed_timestep();
    let mut physics = PhysicsWorld::new(dt);
    build_arena(&mut physics);

    let profile = CharacterProfile::standard();
    let mut characters = CharacterManager::new(BulletSpawner::new(&profile.weapon));
    let player = characters.spawn_character("Player", &profile, &mut physics, Vec2::ZERO)?;
    characters.spawn_character("Dummy", &profile, &mut physics, Vec2::new(4.0, 2.0))?;

    info!("Controls: WASD move, mouse aims, left click shoots, space teleports");
    info!("1 directional, 2 mouse look, 3 fixed direction, Esc pause");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    camera.resize(physical_size.width as f32, physical_size.height as f32);
                    info!("Window resized to {:?}", physical_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let screen = Vec2::new(position.x as f32, position.y as f32);
                    input.process_cursor_moved(screen, &camera);
                }
                WindowEvent::CursorLeft { .. } => input.process_cursor_left(),
                WindowEvent::MouseWheel { delta, .. } => {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(position) => position.y as f32 / 40.0,
                    };
                    camera.set_zoom(camera.zoom() * (1.0 + lines * ZOOM_STEP));
                    input.refresh_cursor(&camera);
                }
                WindowEvent::Focused(false) => input.reset(),
                WindowEvent::Occluded(occluded) => {
                    characters.set_visuals_available(!occluded);
                }
                WindowEvent::RedrawRequested => {
                    if input.player_mut().consume_trigger(Action::Menu) {
                        game_loop.toggle_pause();
                        if game_loop.is_paused() {
                            window.set_title(&format!("{} (paused)", TITLE));
                        } else {
                            window.set_title(TITLE);
                        }
                    }

                    let ticks = game_loop.begin_frame();
                    for _ in 0..ticks {
                        characters.update(Some(player), input.player_mut(), &mut physics, dt);
                        physics.step();
                        characters.after_step(&mut physics, dt);
                    }

                    if let Some(position) = characters
                        .get(player)
                        .and_then(|character| character.position(&physics))
                    {
                        camera.set_position(position);
                    }
                    input.refresh_cursor(&camera);
                    input.update();

                    if game_loop.frame_count() % 120 == 0 {
                        if let Some(character) = characters.get(player) {
                            let head = character.rig().head_position();
                            debug!(
                                "{}: {:?} {} {} body {} head {} at ({:.2}, {:.2}) flipped {} aim {:.0} | {} bullets, {} bodies",
                                character.name,
                                character.movement().settings().movement_mode,
                                character.motion().name(),
                                character.motion().direction(),
                                character.rig().body_cell(),
                                character.rig().head_cell(),
                                head.x,
                                head.y,
                                character.rig().is_flipped(),
                                character.weapon().angle(),
                                characters.bullets().count(),
                                physics.body_count(),
                            );
                            debug!(
                                "{} ticks ({} dropped), {:.0} fps",
                                game_loop.tick_count(),
                                game_loop.dropped_ticks(),
                                game_loop.fps()
                            );
                        }
                    }

                    window.request_redraw();
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
