//! The slider control panel.
//!
//! A fixed strip along the bottom of the window with one row per angle:
//! label, draggable slider, numeric readout. The panel never owns the angle
//! values — it paints from the current [`AngleState`] every frame (which is
//! what keeps key-driven changes and slider positions in sync) and turns
//! pointer gestures into [`OrbitCommand::Set`] commands.

use meridian_engine::coords::{Rect, Vec2};
use meridian_engine::input::{InputEvent, InputFrame, MouseButton, MouseButtonState};
use meridian_engine::overlay::DrawList;
use meridian_engine::paint::Color;
use meridian_engine::text::{FontId, FontSystem};
use meridian_scene::state::{LATITUDE_RANGE, LONGITUDE_RANGE};
use meridian_scene::{AngleState, OrbitCommand};

/// Height of the panel strip in logical pixels.
pub const PANEL_HEIGHT: f32 = 84.0;

const ROW_HEIGHT: f32 = 34.0;
const LABEL_WIDTH: f32 = 110.0;
const VALUE_WIDTH: f32 = 56.0;
const PADDING: f32 = 14.0;
const TRACK_HEIGHT: f32 = 4.0;
const THUMB_SIZE: f32 = 14.0;
const TEXT_SIZE: f32 = 15.0;

const PANEL_BG: Color = Color::opaque(0.07, 0.07, 0.09);
const TRACK_COLOR: Color = Color::opaque(0.15, 0.2, 0.3);
const FILL_COLOR: Color = Color::opaque(0.2, 0.6, 1.0);
const THUMB_COLOR: Color = Color::opaque(1.0, 1.0, 1.0);
const THUMB_BORDER_COLOR: Color = Color::opaque(0.4, 0.6, 0.9);
const TEXT_COLOR: Color = Color::opaque(0.85, 0.88, 0.94);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum SliderId {
    Longitude,
    Latitude,
}

#[derive(Debug, Copy, Clone)]
struct SliderRow {
    id: SliderId,
    label: &'static str,
    range: (i32, i32),
    track: Rect,
}

impl SliderRow {
    /// Value for a pointer x position: the clamped track fraction, rounded to
    /// the nearest integer degree.
    fn value_at(&self, x: f32) -> i32 {
        let t = ((x - self.track.origin.x) / self.track.size.x).clamp(0.0, 1.0);
        let (min, max) = self.range;
        min + (t * (max - min) as f32).round() as i32
    }

    /// Thumb center x for a value.
    fn thumb_x(&self, value: i32) -> f32 {
        let (min, max) = self.range;
        let t = (value - min) as f32 / (max - min) as f32;
        self.track.origin.x + t * self.track.size.x
    }

    /// Hit area: the track plus enough slack to grab the thumb.
    fn hit_rect(&self) -> Rect {
        self.track.inflated(THUMB_SIZE)
    }
}

pub struct ControlPanel {
    rows: [SliderRow; 2],
    drag: Option<SliderId>,
    area: Rect,
}

impl ControlPanel {
    pub fn new() -> Self {
        let placeholder = Rect::default();
        Self {
            rows: [
                SliderRow {
                    id: SliderId::Longitude,
                    label: "Longitude",
                    range: LONGITUDE_RANGE,
                    track: placeholder,
                },
                SliderRow {
                    id: SliderId::Latitude,
                    label: "Latitude",
                    range: LATITUDE_RANGE,
                    track: placeholder,
                },
            ],
            drag: None,
            area: placeholder,
        }
    }

    /// Recomputes the panel geometry for the current window size.
    pub fn layout(&mut self, window_width: f32, window_height: f32) {
        self.area = Rect::new(0.0, window_height - PANEL_HEIGHT, window_width, PANEL_HEIGHT);

        let track_x = PADDING + LABEL_WIDTH;
        let track_w = (window_width - track_x - VALUE_WIDTH - PADDING * 2.0).max(1.0);

        for (i, row) in self.rows.iter_mut().enumerate() {
            let row_top = self.area.origin.y + PADDING + i as f32 * ROW_HEIGHT;
            row.track = Rect::new(
                track_x,
                row_top + (ROW_HEIGHT - TRACK_HEIGHT) * 0.5,
                track_w,
                TRACK_HEIGHT,
            );
        }
    }

    /// Folds this frame's pointer events into at most one slider command.
    ///
    /// Press on a track starts a drag and jumps the value to the pointer;
    /// moves while dragging follow it; release commits and ends the drag.
    pub fn handle_pointer(
        &mut self,
        frame: &InputFrame,
        angles: AngleState,
    ) -> Option<OrbitCommand> {
        let mut command = None;

        for ev in &frame.events {
            match ev {
                InputEvent::PointerButton(btn)
                    if btn.button == MouseButton::Left
                        && btn.state == MouseButtonState::Pressed =>
                {
                    if let Some(row) = self.row_at(Vec2::new(btn.x, btn.y)) {
                        self.drag = Some(row.id);
                        command = Some(self.command_for(row.id, btn.x, angles));
                    }
                }

                InputEvent::PointerMoved(p) => {
                    if let Some(id) = self.drag {
                        command = Some(self.command_for(id, p.x, angles));
                    }
                }

                InputEvent::PointerButton(btn)
                    if btn.button == MouseButton::Left
                        && btn.state == MouseButtonState::Released =>
                {
                    if let Some(id) = self.drag.take() {
                        command = Some(self.command_for(id, btn.x, angles));
                    }
                }

                _ => {}
            }
        }

        command
    }

    /// Paints the panel into the overlay draw list.
    ///
    /// `font` is `None` when no system font could be loaded; the sliders
    /// still render and work, just without labels.
    pub fn paint(
        &self,
        dl: &mut DrawList,
        fonts: &FontSystem,
        font: Option<FontId>,
        angles: AngleState,
    ) {
        dl.push_rect(self.area, PANEL_BG);

        for row in &self.rows {
            let value = match row.id {
                SliderId::Longitude => angles.longitude,
                SliderId::Latitude => angles.latitude,
            };

            dl.push_rect(row.track, TRACK_COLOR);

            let thumb_x = row.thumb_x(value);
            let fill_w = thumb_x - row.track.origin.x;
            if fill_w > 0.0 {
                dl.push_rect(
                    Rect::new(row.track.origin.x, row.track.origin.y, fill_w, TRACK_HEIGHT),
                    FILL_COLOR,
                );
            }

            let cy = row.track.center_y();
            let thumb = Rect::new(
                thumb_x - THUMB_SIZE * 0.5,
                cy - THUMB_SIZE * 0.5,
                THUMB_SIZE,
                THUMB_SIZE,
            );
            dl.push_rect(thumb.inflated(2.0), THUMB_BORDER_COLOR);
            dl.push_rect(thumb, THUMB_COLOR);

            if let Some(font) = font {
                let text_y = cy - TEXT_SIZE * 0.55;
                dl.push_text(
                    Vec2::new(PADDING, text_y),
                    row.label,
                    TEXT_SIZE,
                    TEXT_COLOR,
                    font,
                );

                let readout = value.to_string();
                let text_w = fonts.measure_text(&readout, font, TEXT_SIZE).x;
                dl.push_text(
                    Vec2::new(
                        row.track.origin.x + row.track.size.x + VALUE_WIDTH + PADDING - text_w,
                        text_y,
                    ),
                    readout,
                    TEXT_SIZE,
                    TEXT_COLOR,
                    font,
                );
            }
        }
    }

    fn row_at(&self, pos: Vec2) -> Option<SliderRow> {
        self.rows.iter().copied().find(|r| r.hit_rect().contains(pos))
    }

    fn command_for(&self, id: SliderId, x: f32, angles: AngleState) -> OrbitCommand {
        let row = self
            .rows
            .iter()
            .find(|r| r.id == id)
            .copied()
            .unwrap_or(self.rows[0]);
        let value = row.value_at(x);
        match id {
            SliderId::Longitude => OrbitCommand::Set {
                longitude: value,
                latitude: angles.latitude,
            },
            SliderId::Latitude => OrbitCommand::Set {
                longitude: angles.longitude,
                latitude: value,
            },
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_engine::input::PointerButtonEvent;
    use meridian_engine::input::PointerMoveEvent;

    fn panel() -> ControlPanel {
        let mut p = ControlPanel::new();
        p.layout(800.0, 600.0);
        p
    }

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            x,
            y,
        })
    }

    // ── value mapping ─────────────────────────────────────────────────────

    #[test]
    fn value_at_track_ends_hits_range_bounds() {
        let p = panel();
        let lon = &p.rows[0];
        assert_eq!(lon.value_at(lon.track.origin.x), 0);
        assert_eq!(lon.value_at(lon.track.origin.x + lon.track.size.x), 360);
        // Far outside the track clamps.
        assert_eq!(lon.value_at(-1000.0), 0);
        assert_eq!(lon.value_at(10_000.0), 360);
    }

    #[test]
    fn value_at_midpoint_is_range_center() {
        let p = panel();
        let lat = &p.rows[1];
        let mid = lat.track.origin.x + lat.track.size.x * 0.5;
        assert_eq!(lat.value_at(mid), 0);
    }

    #[test]
    fn thumb_x_inverts_value_at() {
        let p = panel();
        let lon = &p.rows[0];
        for v in [0, 90, 180, 360] {
            assert_eq!(lon.value_at(lon.thumb_x(v)), v);
        }
    }

    // ── drag lifecycle ────────────────────────────────────────────────────

    #[test]
    fn press_on_track_emits_set_command() {
        let mut p = panel();
        let track = p.rows[0].track;
        let mut frame = InputFrame::default();
        frame.push_event(press(track.origin.x + track.size.x, track.center_y()));

        let cmd = p.handle_pointer(&frame, AngleState::default());
        assert_eq!(
            cmd,
            Some(OrbitCommand::Set {
                longitude: 360,
                latitude: 0,
            })
        );
    }

    #[test]
    fn moves_follow_only_while_dragging() {
        let mut p = panel();
        let track = p.rows[0].track;
        let cy = track.center_y();

        let mut frame = InputFrame::default();
        frame.push_event(press(track.origin.x, cy));
        frame.push_event(InputEvent::PointerMoved(PointerMoveEvent {
            x: track.origin.x + track.size.x * 0.5,
            y: cy,
        }));
        frame.push_event(release(track.origin.x + track.size.x * 0.5, cy));
        let cmd = p.handle_pointer(&frame, AngleState::default());
        assert_eq!(
            cmd,
            Some(OrbitCommand::Set {
                longitude: 180,
                latitude: 0,
            })
        );

        // Drag ended: a bare move emits nothing.
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::PointerMoved(PointerMoveEvent {
            x: track.origin.x,
            y: cy,
        }));
        assert_eq!(p.handle_pointer(&frame, AngleState::default()), None);
    }

    #[test]
    fn press_outside_tracks_is_ignored() {
        let mut p = panel();
        let mut frame = InputFrame::default();
        frame.push_event(press(10.0, 10.0));
        assert_eq!(p.handle_pointer(&frame, AngleState::default()), None);
    }

    #[test]
    fn latitude_drag_preserves_longitude() {
        let mut p = panel();
        let track = p.rows[1].track;
        let mut frame = InputFrame::default();
        frame.push_event(press(track.origin.x, track.center_y()));

        let angles = AngleState {
            longitude: 123,
            latitude: 0,
        };
        let cmd = p.handle_pointer(&frame, angles);
        assert_eq!(
            cmd,
            Some(OrbitCommand::Set {
                longitude: 123,
                latitude: -90,
            })
        );
    }
}
