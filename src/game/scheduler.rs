//=========================================================================
// Frame Scheduler
//=========================================================================
//
// Drives ticks from host animation frames.
//
// Loop lifecycle:
// ```text
//   Idle ──start_game_loop()──► BurnIn ──frame──► Running ──frame──► tick ...
//     ▲                                             │
//     └──────────── frame after stop_game_loop() ◄──┘
// ```
//
// The first burn-in frame only records its timestamp, so the first real
// tick has the short delta between two consecutive refreshes. Later
// burn-ins keep the old reference: a restart reports the paused gap.
//
// Tick order:
// 1. Apply finished resource loads
// 2. Advance the clock (raw and scaled delta)
// 3. Hover edge detection
// 4. Key and scroll batch signals
// 5. Update pass
// 6. Fixed update pass
// 7. Clear frame-local input
// 8. Draw pass (focus and dirty-flag gated)
//
// Every phase is followed by applying the spawns and destroys its hooks
// queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::hooks::{guarded, PointerHook};
use super::Game;
use crate::core::object::{DrawEvent, GameObjectId, TickEvent};
use crate::core::signals::Signal;
use crate::core::time::FrameTime;

//=== LoopPhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopPhase {
    /// No frame chain is active.
    Idle,
    /// One frame requested; its timestamp seeds the clock.
    BurnIn,
    /// Ticking on every frame.
    Running,
}

//=== Loop Control ========================================================

impl Game {
    /// Begins scheduling ticks.
    ///
    /// Has no effect (besides a warning) while the loop already exists.
    pub fn start_game_loop(&mut self) {
        if self.context.is_playing() || self.phase == LoopPhase::BurnIn {
            warn!(target: "game::loop", "Cannot start new game loop when the game loop exists.");
            return;
        }

        match self.phase {
            LoopPhase::Running => {
                // Stopped, but its last frame is still outstanding: keep that chain.
                self.context.set_playing(true);
            }
            _ => {
                debug!(target: "game::loop", "Game loop burn-in");
                self.phase = LoopPhase::BurnIn;
                self.request_frame();
            }
        }
    }

    /// Halts rescheduling after the current tick.
    pub fn stop_game_loop(&mut self) {
        warn!(
            target: "game::loop",
            "Stopped the game loop! Restarting the game loop will cause a time skip."
        );
        self.context.set_playing(false);
        if self.phase == LoopPhase::BurnIn {
            self.phase = LoopPhase::Idle;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.context.is_playing()
    }

    /// Whether the game is waiting for the host to deliver a frame.
    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Host callback for a display refresh at `timestamp_ms`.
    ///
    /// Frames the game did not request are ignored.
    pub fn animation_frame(&mut self, timestamp_ms: f64) {
        if !self.frame_requested {
            warn!(target: "game::loop", "Ignoring unrequested animation frame at {timestamp_ms}ms");
            return;
        }
        self.frame_requested = false;

        match self.phase {
            LoopPhase::Idle => {
                if self.pending_start.is_some() {
                    self.poll_resources();
                    if self.pending_start.is_some() {
                        self.request_frame();
                    }
                }
            }
            LoopPhase::BurnIn => {
                if !self.clock.is_marked() {
                    self.clock.mark(timestamp_ms);
                }
                self.phase = LoopPhase::Running;
                self.context.set_playing(true);
                self.request_frame();
            }
            LoopPhase::Running => {
                self.tick(timestamp_ms);
                if self.context.is_playing() {
                    self.request_frame();
                } else {
                    debug!(target: "game::loop", "Game loop chain ended");
                    self.phase = LoopPhase::Idle;
                }
            }
        }
    }

    pub(super) fn request_frame(&mut self) {
        if !self.frame_requested {
            self.frame_requested = true;
            self.host.request_animation_frame();
        }
    }

    //=== Tick ============================================================

    fn tick(&mut self, timestamp_ms: f64) {
        self.poll_resources();

        let time = self.clock.advance(timestamp_ms, self.context.time_scale());
        self.context.set_time(time);
        trace!(target: "game::loop", "tick dt={:.4}s raw={:.4}s", time.delta_time, time.unscaled_delta_time);

        self.objects.sort();

        self.detect_hover_edges();
        self.apply_commands();

        self.emit_input_signals();
        self.apply_commands();

        self.run_update_pass(time);
        self.apply_commands();

        self.run_fixed_update_pass(time);
        self.apply_commands();

        self.context.input_mut().clear_frame();

        if self.should_draw() {
            self.run_draw_pass();
            self.apply_commands();
        }
    }

    //--- Hover Edges ------------------------------------------------------

    fn detect_hover_edges(&mut self) {
        let current = self.mouse_hovered_game_object();
        if current == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered {
            self.dispatch_pointer(previous, PointerHook::HoverEnd, None);
        }
        if let Some(next) = current {
            self.dispatch_pointer(next, PointerHook::HoverStart, None);
        }
        self.hovered = current;
    }

    //--- Input Signals ----------------------------------------------------

    fn emit_input_signals(&mut self) {
        let input = self.context.input();
        let key_down = input.has_key_presses();
        let key_up = input.has_key_releases();
        let scrolled = input.mouse_scroll_delta().is_non_zero();

        if key_down {
            let snapshot = self.context.input().clone();
            self.context.emit(Signal::KeyDown(snapshot));
        }
        if key_up {
            let snapshot = self.context.input().clone();
            self.context.emit(Signal::KeyUp(snapshot));
        }
        if scrolled {
            let snapshot = self.context.input().clone();
            self.context.emit(Signal::MouseScroll(snapshot));
        }
    }

    //--- Update Passes ----------------------------------------------------

    fn run_update_pass(&mut self, time: FrameTime) {
        for id in self.objects.ids() {
            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };
            if !object.is_enabled() {
                continue;
            }
            let context = &mut self.context;
            guarded("update", object, |object| {
                object.update(&mut TickEvent { game: context, time })
            });
        }
    }

    fn run_fixed_update_pass(&mut self, time: FrameTime) {
        for id in self.objects.ids() {
            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };
            if !object.is_enabled() {
                continue;
            }
            let context = &mut self.context;
            guarded("fixed_update", object, |object| {
                object.fixed_update(&mut TickEvent { game: context, time })
            });
        }
    }

    //--- Draw Pass --------------------------------------------------------

    fn should_draw(&self) -> bool {
        if !self.context.settings().refresh_when_unfocused && !self.host.has_focus() {
            trace!(target: "game::loop", "Host unfocused; draw skipped");
            return false;
        }
        self.context.needs_redraw() || self.context.settings().draw_always
    }

    fn run_draw_pass(&mut self) {
        self.context.renderer_mut().clear();
        self.context.emit(Signal::Draw);

        for id in self.objects.ids() {
            self.draw_object(id);
        }

        self.context.clear_redraw();
    }

    fn draw_object(&mut self, id: GameObjectId) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        if !object.is_enabled() {
            return;
        }
        match object.as_drawable() {
            Some(drawable) if drawable.visible() => {}
            _ => return,
        }

        let context = &mut self.context;
        guarded("draw", &mut *object, |object| match object.as_drawable_mut() {
            Some(drawable) => drawable.draw(&mut DrawEvent { game: context }),
            None => Ok(()),
        });

        let wants_hitbox = object.as_clickable().is_some_and(|clickable| clickable.show_hitbox());
        if wants_hitbox {
            let transform = object.core().transform;
            self.context.renderer_mut().draw_debug_hitbox(&transform);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use crate::core::math::{Transform, Vector2};
    use crate::core::object::test_support::{CallLog, Stub};
    use crate::core::object::GameObject;
    use crate::core::render::{DrawCommand, RecordingRenderer};
    use crate::core::signals::Channel;
    use crate::game::{Game, GameBuilder};
    use crate::platform::ManualHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn game_with(host: &ManualHost, renderer: &RecordingRenderer) -> Game {
        GameBuilder::new()
            .with_host(host.clone())
            .with_renderer(renderer.clone())
            .build()
    }

    /// Starts the loop and runs the burn-in frame at t = 0.
    fn running(host: &ManualHost, renderer: &RecordingRenderer) -> Game {
        let mut game = game_with(host, renderer);
        game.start_game_loop();
        assert!(host.run_frame(&mut game, 0.0));
        game
    }

    #[test]
    fn burn_in_defers_playing_by_one_frame() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = game_with(&host, &renderer);

        game.start_game_loop();
        assert!(!game.is_playing());
        assert!(game.is_frame_requested());

        host.run_frame(&mut game, 1000.0);
        assert!(game.is_playing());
        assert_eq!(renderer.frames_drawn(), 0);

        host.run_frame(&mut game, 1016.0);
        assert_eq!(renderer.frames_drawn(), 1);
        assert!((game.context().time().unscaled_delta_time - 0.016).abs() < 1e-9);
    }

    #[test]
    fn starting_twice_keeps_a_single_frame_chain() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        game.start_game_loop();
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn stop_ends_the_chain_after_the_current_tick() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);

        game.stop_game_loop();
        assert!(!game.is_playing());
        assert!(host.run_frame(&mut game, 16.0));
        assert_eq!(renderer.frames_drawn(), 1);
        assert!(!game.is_frame_requested());
        assert!(!host.run_frame(&mut game, 32.0));
    }

    #[test]
    fn restart_after_stop_skips_time() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        game.stop_game_loop();
        host.run_frame(&mut game, 16.0);

        game.start_game_loop();
        host.run_frame(&mut game, 5000.0);
        host.run_frame(&mut game, 5016.0);
        assert!((game.context().time().unscaled_delta_time - 5.0).abs() < 1e-9);
        assert!((game.elapsed_time() - 5.016).abs() < 1e-9);
    }

    #[test]
    fn unrequested_frames_are_ignored() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = game_with(&host, &renderer);
        game.animation_frame(16.0);
        assert!(!game.is_playing());
        assert_eq!(renderer.frames_drawn(), 0);
    }

    #[test]
    fn failing_update_does_not_stop_the_others() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);

        let first = game.add_game_object(Stub::new()).unwrap();
        let mut bad = Stub::new();
        bad.fail_update = true;
        game.add_game_object(bad).unwrap();
        let mut panicking = Stub::new();
        panicking.panic_update = true;
        game.add_game_object(panicking).unwrap();
        let last = game.add_game_object(Stub::new()).unwrap();

        host.run_frame(&mut game, 16.0);
        assert_eq!(game.get(first).unwrap().updates, 1);
        assert_eq!(game.get(last).unwrap().updates, 1);
        assert!(game.is_playing());
    }

    #[test]
    fn passes_run_in_order_and_skip_disabled_objects() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        let log = CallLog::default();

        let mut drawn = Stub::new().named("a").with_log(&log);
        drawn.drawable = true;
        game.add_game_object(drawn).unwrap();
        let mut disabled = Stub::new().named("off").with_log(&log);
        disabled.core_mut().enabled = false;
        game.add_game_object(disabled).unwrap();
        log.borrow_mut().clear();

        host.run_frame(&mut game, 16.0);
        assert_eq!(*log.borrow(), vec!["a:update", "a:fixed_update", "a:draw"]);
    }

    #[test]
    fn time_scale_zero_freezes_scaled_delta() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        game.set_time_scale(0.0);

        host.run_frame(&mut game, 100.0);
        let time = game.context().time();
        assert_eq!(time.delta_time, 0.0);
        assert!((time.unscaled_delta_time - 0.1).abs() < 1e-9);
        assert_eq!(game.scaled_elapsed_time(), 0.0);
    }

    #[test]
    fn draw_is_gated_by_dirty_flag_when_not_drawing_always() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = GameBuilder::new()
            .with_host(host.clone())
            .with_renderer(renderer.clone())
            .with_draw_always(false)
            .build();
        game.start_game_loop();
        host.run_frame(&mut game, 0.0);

        host.run_frame(&mut game, 16.0);
        host.run_frame(&mut game, 32.0);
        assert_eq!(renderer.frames_drawn(), 1);

        game.request_redraw();
        host.run_frame(&mut game, 48.0);
        assert_eq!(renderer.frames_drawn(), 2);
    }

    #[test]
    fn unfocused_host_skips_draw_but_keeps_ticking() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = GameBuilder::new()
            .with_host(host.clone())
            .with_renderer(renderer.clone())
            .with_refresh_when_unfocused(false)
            .build();
        game.start_game_loop();
        host.run_frame(&mut game, 0.0);
        let stub = game.add_game_object(Stub::new()).unwrap();

        host.set_focus(false);
        host.run_frame(&mut game, 16.0);
        assert_eq!(renderer.frames_drawn(), 0);
        assert_eq!(game.get(stub).unwrap().updates, 1);
        assert!(game.is_frame_requested());
    }

    #[test]
    fn draw_signal_precedes_object_draws_and_hitboxes_follow() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);

        game.subscribe(Channel::Draw, |_, game| {
            game.renderer_mut().draw_rectangle(0.0, 0.0, 4.0, 3.0, &Default::default());
        });
        let mut stub = Stub::clickable().with_transform(Transform::new(Vector2::ZERO, Vector2::ONE));
        stub.show_hitbox = true;
        game.add_game_object(stub).unwrap();

        host.run_frame(&mut game, 16.0);
        let commands = renderer.commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::Rectangle { width, .. } if width == 4.0));
        assert!(matches!(commands[2], DrawCommand::Rectangle { width, .. } if width == 1.0));
        assert!(commands[3..].iter().any(|command| matches!(command, DrawCommand::Line { .. })));
    }

    #[test]
    fn panicking_draw_listener_keeps_the_loop_alive() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        let draws = Rc::new(RefCell::new(0));

        game.subscribe(Channel::Draw, |_, _| panic!("overlay failed"));
        let counted = Rc::clone(&draws);
        game.subscribe(Channel::Draw, move |_, _| *counted.borrow_mut() += 1);

        host.run_frame(&mut game, 16.0);
        assert!(game.is_playing());
        assert!(game.is_frame_requested());
        host.run_frame(&mut game, 32.0);
        assert_eq!(*draws.borrow(), 2);
        assert_eq!(renderer.frames_drawn(), 2);
    }

    #[test]
    fn hover_edges_fire_once_per_change() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::with_grid_scale(100.0);
        let mut game = running(&host, &renderer);
        let log = CallLog::default();
        game.add_game_object(
            Stub::clickable()
                .named("a")
                .with_log(&log)
                .with_transform(Transform::new(Vector2::ZERO, Vector2::ONE)),
        )
        .unwrap();
        log.borrow_mut().clear();

        let hover_log = |log: &CallLog| -> Vec<String> {
            log.borrow().iter().filter(|entry| entry.contains("hover")).cloned().collect()
        };

        game.handle_input(crate::core::input::InputEvent::MouseMoved { x: 50.0, y: 50.0 });
        host.run_frame(&mut game, 16.0);
        host.run_frame(&mut game, 32.0);
        assert_eq!(hover_log(&log), vec!["a:hover_start"]);

        game.handle_input(crate::core::input::InputEvent::MouseMoved { x: 350.0, y: 50.0 });
        host.run_frame(&mut game, 48.0);
        assert_eq!(hover_log(&log), vec!["a:hover_start", "a:hover_end"]);
    }

    #[test]
    fn key_signals_carry_the_frame_batch() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(Channel::KeyDown, move |signal, _| {
            if let Some(input) = signal.input() {
                let mut keys: Vec<String> = input.keys_pressed().map(|key| key.to_string()).collect();
                keys.sort();
                sink.borrow_mut().push(keys);
            }
        });

        game.handle_input(crate::core::input::InputEvent::KeyDown { key: "KeyA".into() });
        game.handle_input(crate::core::input::InputEvent::KeyDown { key: "Space".into() });
        host.run_frame(&mut game, 16.0);
        host.run_frame(&mut game, 32.0);

        assert_eq!(*seen.borrow(), vec![vec!["a".to_string(), "space".to_string()]]);
        assert!(!game.input().has_key_presses());
    }

    #[test]
    fn key_release_batch_is_signalled_once() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        let seen = Rc::new(RefCell::new(Vec::new()));
        for channel in [Channel::KeyDown, Channel::KeyUp] {
            let sink = Rc::clone(&seen);
            game.subscribe(channel, move |signal, _| {
                let released: Vec<String> = signal
                    .input()
                    .map(|input| input.keys_released().map(|key| key.to_string()).collect())
                    .unwrap_or_default();
                sink.borrow_mut().push((signal.channel(), released));
            });
        }

        game.handle_input(crate::core::input::InputEvent::KeyUp { key: "Escape".into() });
        host.run_frame(&mut game, 16.0);
        host.run_frame(&mut game, 32.0);

        assert_eq!(*seen.borrow(), vec![(Channel::KeyUp, vec!["escape".to_string()])]);
        assert!(!game.input().has_key_releases());
    }

    #[test]
    fn scroll_is_signalled_once_and_cleared_after_the_tick() {
        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(Channel::MouseScroll, move |signal, _| {
            if let Some(input) = signal.input() {
                sink.borrow_mut().push(input.mouse_scroll_delta());
            }
        });

        game.handle_input(crate::core::input::InputEvent::MouseWheel { delta_x: 0.0, delta_y: -100.0 });
        game.handle_input(crate::core::input::InputEvent::MouseWheel { delta_x: 4.0, delta_y: -20.0 });
        assert!(seen.borrow().is_empty(), "scroll is reported by the tick, not the event");

        host.run_frame(&mut game, 16.0);
        assert_eq!(*seen.borrow(), vec![Vector2::new(4.0, 120.0)]);
        assert_eq!(game.input().mouse_scroll_delta(), Vector2::ZERO);

        host.run_frame(&mut game, 32.0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn objects_spawned_by_hooks_join_after_the_pass() {
        use crate::core::error::HookResult;
        use crate::core::object::{ObjectCore, TickEvent};

        struct Spawner {
            core: ObjectCore,
            spawned: bool,
        }

        impl GameObject for Spawner {
            fn core(&self) -> &ObjectCore {
                &self.core
            }
            fn core_mut(&mut self) -> &mut ObjectCore {
                &mut self.core
            }
            fn update(&mut self, event: &mut TickEvent<'_>) -> HookResult {
                if !self.spawned {
                    self.spawned = true;
                    event.game.spawn(Stub::new().named("child"));
                }
                Ok(())
            }
        }

        let host = ManualHost::new();
        let renderer = RecordingRenderer::new();
        let mut game = running(&host, &renderer);
        game.add_game_object(Spawner { core: ObjectCore::new(), spawned: false })
            .unwrap();

        host.run_frame(&mut game, 16.0);
        let children = game.get_game_objects_by_name("child");
        assert_eq!(children.len(), 1);
        let child = children[0].downcast_ref::<Stub>().unwrap();
        assert_eq!(child.updates, 0);
    }
}
