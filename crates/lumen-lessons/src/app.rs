use anyhow::Result;

use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use lumen_engine::render::{RenderCtx, Scene, UniformHandle};
use lumen_motion::{OutputParameters, ParameterDriver, ScaleInput};

use crate::config::LessonsConfig;
use crate::lessons::Lesson;
use crate::uniforms::{TintUniform, TransformUniform, TINT_BLOCK, TRANSFORM_BLOCK};

/// A built scene plus the uniform handles resolved for it.
struct ActiveLesson {
    kind: Lesson,
    scene: Scene,
    tint: Option<UniformHandle>,
    transform: Option<UniformHandle>,
}

impl ActiveLesson {
    fn build(ctx: &RenderCtx<'_>, kind: Lesson, config: &LessonsConfig) -> Result<Self> {
        let scene = Scene::new(ctx, &kind.scene_config(config))?;

        let (tint, transform) = match kind {
            Lesson::Pulse => (Some(scene.uniform(TINT_BLOCK)?), None),
            Lesson::Cube => (None, Some(scene.uniform(TRANSFORM_BLOCK)?)),
            Lesson::Triangle | Lesson::Textured | Lesson::Blend => (None, None),
        };

        Ok(Self {
            kind,
            scene,
            tint,
            transform,
        })
    }

    fn upload(&self, queue: &wgpu::Queue, params: &OutputParameters, aspect: f32) -> Result<()> {
        if let Some(h) = self.tint {
            self.scene
                .write_uniform(queue, h, &TintUniform::from_params(params))?;
        }
        if let Some(h) = self.transform {
            self.scene
                .write_uniform(queue, h, &TransformUniform::from_params(params, aspect))?;
        }
        Ok(())
    }
}

/// Runs one lesson at a time; number keys switch, Escape quits.
pub struct LessonsApp {
    config: LessonsConfig,
    driver: ParameterDriver,
    active: Option<ActiveLesson>,
    pending: Option<Lesson>,
}

impl LessonsApp {
    pub fn new(config: LessonsConfig) -> Self {
        Self {
            driver: ParameterDriver::new(config.driver),
            pending: Some(config.first_lesson),
            active: None,
            config,
        }
    }

    fn active_kind(&self) -> Option<Lesson> {
        self.active.as_ref().map(|a| a.kind)
    }

    fn activate(&mut self, ctx: &FrameCtx<'_, '_>, kind: Lesson) {
        let built = {
            let rctx = ctx.render_ctx();
            ActiveLesson::build(&rctx, kind, &self.config)
        };

        match built {
            Ok(lesson) => {
                log::info!("lesson {}: {}", kind.digit(), kind.title());
                ctx.window
                    .set_title(&window_title(&self.config.window.title, kind));
                self.active = Some(lesson);
            }
            Err(e) => {
                log::error!("failed to build lesson `{}`: {e:#}", kind.title());
            }
        }
    }
}

impl App for LessonsApp {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        if is_exit(event) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(next) = requested_lesson(ctx.input_frame, self.active_kind()) {
            self.pending = Some(next);
        }
        if let Some(kind) = self.pending.take() {
            self.activate(ctx, kind);
        }

        let params = self.driver.frame(ctx.time.elapsed, scale_input(ctx.input));

        if let Some(active) = self.active.as_ref() {
            let aspect = ctx.gpu.aspect_ratio();
            if let Err(e) = active.upload(ctx.gpu.queue(), &params, aspect) {
                log::error!("uniform upload failed: {e:#}");
            }
        }

        let active = &mut self.active;
        ctx.render(|rctx, target| {
            if let Some(lesson) = active.as_mut() {
                lesson.scene.draw(rctx, target);
            }
        })
    }
}

fn is_exit(event: &InputEvent) -> bool {
    matches!(
        event,
        InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            ..
        }
    )
}

/// Scale direction from held arrow keys, sampled once per frame.
fn scale_input(input: &InputState) -> ScaleInput {
    ScaleInput::from_keys(input.key_down(Key::ArrowUp), input.key_down(Key::ArrowDown))
}

/// Lesson selected by a digit this frame, if it differs from `current`.
fn requested_lesson(frame: &InputFrame, current: Option<Lesson>) -> Option<Lesson> {
    frame
        .pressed_digit()
        .and_then(Lesson::from_digit)
        .filter(|l| Some(*l) != current)
}

fn window_title(base: &str, lesson: Lesson) -> String {
    format!("{base} · {} [{}]", lesson.title(), lesson.digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::input::Modifiers;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    fn frame_with(events: &[InputEvent]) -> (InputState, InputFrame) {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for ev in events {
            state.apply_event(&mut frame, ev.clone());
        }
        (state, frame)
    }

    // ── exit ──────────────────────────────────────────────────────────────

    #[test]
    fn escape_press_exits() {
        assert!(is_exit(&key(Key::Escape, KeyState::Pressed)));
        assert!(!is_exit(&key(Key::Escape, KeyState::Released)));
        assert!(!is_exit(&key(Key::Space, KeyState::Pressed)));
    }

    #[test]
    fn app_returns_exit_on_escape() {
        let mut app = LessonsApp::new(LessonsConfig::default());
        assert_eq!(app.on_input(&key(Key::Escape, KeyState::Pressed)), AppControl::Exit);
        assert_eq!(app.on_input(&key(Key::Digit2, KeyState::Pressed)), AppControl::Continue);
    }

    // ── scale keys ────────────────────────────────────────────────────────

    #[test]
    fn held_arrows_drive_scale() {
        let (state, _) = frame_with(&[key(Key::ArrowUp, KeyState::Pressed)]);
        assert_eq!(scale_input(&state), ScaleInput::Grow);

        let (state, _) = frame_with(&[key(Key::ArrowDown, KeyState::Pressed)]);
        assert_eq!(scale_input(&state), ScaleInput::Shrink);

        let (state, _) = frame_with(&[
            key(Key::ArrowUp, KeyState::Pressed),
            key(Key::ArrowUp, KeyState::Released),
        ]);
        assert_eq!(scale_input(&state), ScaleInput::Idle);
    }

    #[test]
    fn both_arrows_cancel_out() {
        let (state, _) = frame_with(&[
            key(Key::ArrowDown, KeyState::Pressed),
            key(Key::ArrowUp, KeyState::Pressed),
        ]);
        assert_eq!(scale_input(&state), ScaleInput::Idle);
    }

    // ── lesson switching ──────────────────────────────────────────────────

    #[test]
    fn digit_selects_lesson() {
        let (_, frame) = frame_with(&[key(Key::Digit5, KeyState::Pressed)]);
        assert_eq!(requested_lesson(&frame, Some(Lesson::Pulse)), Some(Lesson::Cube));
    }

    #[test]
    fn same_lesson_is_not_rebuilt() {
        let (_, frame) = frame_with(&[key(Key::Digit2, KeyState::Pressed)]);
        assert_eq!(requested_lesson(&frame, Some(Lesson::Pulse)), None);
        assert_eq!(requested_lesson(&frame, None), Some(Lesson::Pulse));
    }

    #[test]
    fn unmapped_digits_ignored() {
        let (_, frame) = frame_with(&[key(Key::Digit0, KeyState::Pressed)]);
        assert_eq!(requested_lesson(&frame, None), None);
        let (_, frame) = frame_with(&[key(Key::Digit9, KeyState::Pressed)]);
        assert_eq!(requested_lesson(&frame, None), None);
    }

    #[test]
    fn new_app_starts_with_configured_lesson_pending() {
        let app = LessonsApp::new(LessonsConfig::default());
        assert_eq!(app.pending, Some(Lesson::Pulse));
        assert!(app.active.is_none());
        assert_eq!(app.driver.current_scale(), 1.0);
    }

    #[test]
    fn title_names_the_lesson() {
        assert_eq!(window_title("lumen", Lesson::Cube), "lumen · cube [5]");
    }
}
