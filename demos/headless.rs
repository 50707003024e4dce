//=========================================================================
// Headless Demo
//=========================================================================
//
// Runs a small scene on a `ManualHost` and prints what was drawn.
//
// Run with:
//   RUST_LOG=debug cargo run --example headless
//
//=========================================================================

use gridcanvas_engine::core::render::DrawCommand;
use gridcanvas_engine::prelude::*;

//=== Drifter =============================================================

/// Moves right one cell per second and wraps around the grid.
struct Drifter {
    core: ObjectCore,
}

impl GameObject for Drifter {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn update(&mut self, event: &mut TickEvent<'_>) -> HookResult {
        let width = event.game.grid().x;
        let position = &mut self.core.transform.position;
        position.x = (position.x + event.time.delta_time) % width;
        event.game.request_redraw();
        Ok(())
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }
}

impl Drawable for Drifter {
    fn draw(&mut self, event: &mut DrawEvent<'_>) -> HookResult {
        let Transform { position, scale, .. } = self.core.transform;
        event.renderer().draw_circle(
            position.x,
            position.y,
            scale.x,
            &DrawSettings::new().with_color("orange"),
        );
        Ok(())
    }
}

//=== Main ================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let host = ManualHost::new();
    let renderer = RecordingRenderer::new();
    let mut game = GameBuilder::new()
        .with_grid(Vector2::new(8.0, 6.0))
        .with_draw_always(false)
        .with_host(host.clone())
        .with_renderer(renderer.clone())
        .build();
    game.rescale_canvas_to_parent(Vector2::new(640.0, 480.0), 1.0);

    let spawned = game.subscribe(Channel::SpawnedGameObject, |signal, _| {
        if let Signal::SpawnedGameObject(id) = signal {
            log::info!(target: "demo", "Spawned {:?}", id);
        }
    });

    let board = Shape::rect(Transform::new(Vector2::new(1.0, 1.0), Vector2::new(6.0, 4.0)))
        .with_properties(DrawSettings::new().with_color("#203040"))
        .with_hitbox(true)
        .named("board");
    if let Err(e) = game.add_game_object(board) {
        log::error!(target: "demo", "Cannot add board: {}", e);
        return;
    }

    let checker = image::RgbaImage::from_fn(8, 8, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 255])
        }
    });
    let badge = Sprite::new("checker", Transform::new(Vector2::new(6.0, 0.0), Vector2::new(2.0, 2.0)))
        .with_texture(checker)
        .named("badge");
    if let Err(e) = game.add_game_object(badge) {
        log::error!(target: "demo", "Cannot add badge: {}", e);
    }

    let startup = game.load_game_and_start(|game| {
        let drifter = Drifter {
            core: ObjectCore::new()
                .named("drifter")
                .with_sorting_order(1)
                .with_transform(Transform::new(Vector2::new(0.0, 2.5), Vector2::ONE)),
        };
        if let Err(e) = game.add_game_object(drifter) {
            log::error!(target: "demo", "Cannot add drifter: {}", e);
        }
    });
    log::info!(target: "demo", "Startup: {:?}", startup.status());
    game.unsubscribe(spawned);

    // Pointer over the board centre, then a click.
    game.handle_input(InputEvent::MouseMoved { x: 320.0, y: 240.0 });
    game.handle_input(InputEvent::MouseClick { button: MouseButton::Left });

    let fired = host.run_frames(&mut game, 0.0, 250.0, 9);
    game.stop_game_loop();
    host.run_frames(&mut game, 2250.0, 250.0, 1);

    let commands = renderer.commands();
    let circles = commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::Circle { .. }))
        .count();
    let images = commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::Image { .. }))
        .count();
    println!(
        "{} frames fired, {} drawn, {} circles, {} images, elapsed {:.2}s, hovered {:?}",
        fired,
        renderer.frames_drawn(),
        circles,
        images,
        game.elapsed_time(),
        game.hovered_game_object_id(),
    );
}
