//! Per-frame application logic.
//!
//! The frame sequence: pick up the texture fetch result, fold input events
//! into orbit commands, run the slider panel, rebuild the four matrices, and
//! render (clear pass, 3D scene pass, overlay passes).

use meridian_engine::core::{App, AppControl, FrameCtx};
use meridian_engine::input::{InputEvent, Key, KeyState};
use meridian_engine::overlay::DrawList;
use meridian_engine::paint::Color;
use meridian_engine::render::{RectRenderer, TextRenderer};
use meridian_engine::text::{FontId, FontSystem};
use meridian_scene::{self as scene, AngleState, OrbitCommand};

use crate::fetch::TextureFetch;
use crate::panel::{ControlPanel, PANEL_HEIGHT};
use crate::scene3d::{FrameMatrices, SceneInput, SceneRenderer};

pub struct ViewerApp {
    angles: AngleState,

    scene_renderer: SceneRenderer,
    rect_renderer: RectRenderer,
    text_renderer: TextRenderer,

    fonts: FontSystem,
    panel_font: Option<FontId>,
    overlay: DrawList,
    panel: ControlPanel,

    texture_source: String,
    fetch: Option<TextureFetch>,
}

impl ViewerApp {
    pub fn new(fonts: FontSystem, panel_font: Option<FontId>, texture_source: String) -> Self {
        Self {
            angles: AngleState::default(),
            scene_renderer: SceneRenderer::new(),
            rect_renderer: RectRenderer::new(),
            text_renderer: TextRenderer::new(),
            fonts,
            panel_font,
            overlay: DrawList::new(),
            panel: ControlPanel::new(),
            texture_source,
            fetch: None,
        }
    }

    fn poll_texture(&mut self, ctx: &FrameCtx<'_, '_>) {
        let Some(result) = self.fetch.as_mut().and_then(TextureFetch::poll) else {
            return;
        };

        match result {
            Ok(bytes) => {
                if let Err(e) = self.scene_renderer.complete_texture(
                    ctx.gpu.device(),
                    ctx.gpu.queue(),
                    &bytes,
                ) {
                    log::error!("texture decode failed, keeping placeholder: {e:#}");
                }
            }
            Err(e) => log::error!("texture fetch failed, keeping placeholder: {e:#}"),
        }
    }

    /// Applies this frame's key events to the angle state.
    ///
    /// Raw events rather than the transition set: the OS key-repeat keeps a
    /// held arrow stepping, one degree per delivered event.
    fn apply_key_events(&mut self, ctx: &FrameCtx<'_, '_>) -> AppControl {
        for ev in &ctx.input_frame.events {
            let InputEvent::Key {
                key,
                state: KeyState::Pressed,
                ..
            } = ev
            else {
                continue;
            };

            if *key == Key::Escape {
                return AppControl::Exit;
            }
            if let Some(cmd) = key_command(*key) {
                self.angles.apply(cmd);
            }
        }
        AppControl::Continue
    }
}

/// Arrow-key bindings. Everything else is a no-op.
fn key_command(key: Key) -> Option<OrbitCommand> {
    match key {
        Key::ArrowRight => Some(OrbitCommand::StepLongitude(1)),
        Key::ArrowLeft => Some(OrbitCommand::StepLongitude(-1)),
        Key::ArrowUp => Some(OrbitCommand::StepLatitude(1)),
        Key::ArrowDown => Some(OrbitCommand::StepLatitude(-1)),
        _ => None,
    }
}

impl App for ViewerApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Start the one-shot fetch on the first frame; its completion pings
        // the runtime waker, which schedules the redraw that picks it up.
        if self.fetch.is_none() {
            log::info!("fetching cube texture from {}", self.texture_source);
            self.fetch = Some(TextureFetch::spawn(
                self.texture_source.clone(),
                ctx.runtime.waker(),
            ));
        }

        self.poll_texture(ctx);

        if self.apply_key_events(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        let (w, h) = ctx.window.logical_size();
        self.panel.layout(w, h);
        if let Some(cmd) = self.panel.handle_pointer(ctx.input_frame, self.angles) {
            self.angles.apply(cmd);
        }

        // The scene area is everything above the panel strip, split into the
        // two viewports.
        let scene_h = (h - PANEL_HEIGHT).max(1.0);
        let (left_vp, right_vp) = scene::split_scene(w, scene_h);

        let matrices = FrameMatrices {
            left: scene::left_matrix(),
            right: scene::right_matrix(self.angles, right_vp.aspect()),
            camera_line: scene::camera_line_matrix(self.angles),
            latitude: scene::latitude_matrix(self.angles),
        };

        let surface = ctx.gpu.size();
        let scene_input = SceneInput {
            matrices,
            left_viewport: left_vp,
            right_viewport: right_vp,
            surface_size: (surface.width, surface.height),
        };

        self.overlay.clear();
        self.panel
            .paint(&mut self.overlay, &self.fonts, self.panel_font, self.angles);

        let scene_r = &mut self.scene_renderer;
        let rect_r = &mut self.rect_renderer;
        let text_r = &mut self.text_renderer;
        let overlay = &self.overlay;
        let fonts = &self.fonts;

        ctx.render(Color::WHITE, |rctx, target| {
            scene_r.render(rctx, target, &scene_input);
            rect_r.render(rctx, target, overlay);
            text_r.render(rctx, target, overlay, fonts);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_step_one_degree() {
        assert_eq!(
            key_command(Key::ArrowRight),
            Some(OrbitCommand::StepLongitude(1))
        );
        assert_eq!(
            key_command(Key::ArrowLeft),
            Some(OrbitCommand::StepLongitude(-1))
        );
        assert_eq!(
            key_command(Key::ArrowUp),
            Some(OrbitCommand::StepLatitude(1))
        );
        assert_eq!(
            key_command(Key::ArrowDown),
            Some(OrbitCommand::StepLatitude(-1))
        );
    }

    #[test]
    fn unrecognized_keys_are_no_ops() {
        for key in [Key::Space, Key::Enter, Key::Home, Key::Unknown] {
            assert_eq!(key_command(key), None);
        }
    }

    #[test]
    fn held_arrow_saturates_at_bound() {
        let mut angles = AngleState::default();
        for _ in 0..370 {
            if let Some(cmd) = key_command(Key::ArrowRight) {
                angles.apply(cmd);
            }
        }
        assert_eq!(angles.longitude, 360);
    }
}
