use std::time::{Duration, Instant};

use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod menu;
mod render;
mod screens;
mod text;
mod track_preview;

use config::GameConfig;
use input::MenuAction;
use menu::manager::WidgetManager;
use menu::stack::{ScreenId, ScreenStack, StackStatus};
use render::{draw_widgets, TextureRegistry};
use screens::{RustkartScreenFactory, UiAssets};
use track_preview::TrackPreviewRegistry;

const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Generic texture loading helper
fn load_texture<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Result<sdl2::render::Texture<'a>, String> {
    texture_creator
        .load_texture(path)
        .map_err(|e| format!("Failed to load {}: {}", path, e))
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = GameConfig::load().unwrap_or_else(|err| {
        warn!("config load failed, using defaults: {}", err);
        GameConfig::default()
    });
    info!(width = config.width, height = config.height, "starting");

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window("rustkart", config.width, config.height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .build()
        .map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();

    // Keep the first joystick open for the lifetime of the loop, if any.
    let joystick_subsystem = sdl_context.joystick()?;
    let _joystick = if joystick_subsystem.num_joysticks()? > 0 {
        joystick_subsystem.open(0).ok()
    } else {
        None
    };

    let mut textures = TextureRegistry::new();
    let logo = match load_texture(&texture_creator, "assets/gui/logo.png") {
        Ok(texture) => Some(textures.register(texture)),
        Err(err) => {
            warn!("logo not loaded, menu runs without it: {}", err);
            None
        }
    };

    let tracks = TrackPreviewRegistry::builtin();
    let factory = RustkartScreenFactory {
        assets: UiAssets {
            logo,
            track_names: (0..tracks.count())
                .filter_map(|i| tracks.get(i))
                .map(|t| t.name.to_string())
                .collect(),
        },
    };

    let mut wm = WidgetManager::new();
    let mut stack = ScreenStack::new();
    stack.push(ScreenId::MainMenu, &wm);

    let mut event_pump = sdl_context.event_pump()?;
    let mut last_frame = Instant::now();

    'running: loop {
        for event in event_pump.poll_iter() {
            let Some(action) = input::translate_event(&event) else {
                continue;
            };
            match action {
                MenuAction::Quit => break 'running,
                // The engine's y axis points up.
                MenuAction::Pointer(x, y) => {
                    let flipped = MenuAction::Pointer(x, config.height as i32 - y);
                    stack.handle_action(&flipped, &mut wm, &mut config);
                }
                other => stack.handle_action(&other, &mut wm, &mut config),
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        if stack.update(dt, &mut wm, &factory, &mut config) == StackStatus::Empty {
            info!("screen stack empty, exiting");
            break 'running;
        }

        // Follow resolution changes applied from the options screen.
        if canvas.window().size() != (config.width, config.height) {
            canvas
                .window_mut()
                .set_size(config.width, config.height)
                .map_err(|e| e.to_string())?;
        }

        canvas.set_draw_color(Color::RGB(12, 24, 48));
        canvas.clear();
        draw_widgets(&mut canvas, &wm, &textures, &tracks, config.height)?;
        canvas.present();

        std::thread::sleep(FRAME_TIME);
    }

    Ok(())
}
