// crates/streamcut-ui/src/modules/player.rs
//
// PlayerPanel: the central playback view. Renders the latest decoded frame
// letterboxed to the poster-derived aspect ratio, with transport controls
// underneath. Falls back to the poster (then a placeholder) until frames
// arrive.

use super::{PanelModule, PosterCache};
use streamcut_core::commands::AppCommand;
use streamcut_core::helpers::aspect::{ratio_from_poster, DEFAULT_RATIO};
use streamcut_core::helpers::time::{format_duration, format_marker};
use streamcut_core::state::{AssetStatus, SessionState};
use crate::theme::{DARK_BG_0, DARK_TEXT_DIM, RED_DIM};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, TextureHandle, Ui, Vec2};

/// Seconds skipped by the arrow keys. Segment-aligned seeking makes
/// frame-stepping pointless for remote streams.
const SKIP_STEP: f64 = 5.0;

pub struct PlayerPanel {
    /// Latest live playback frame, set by app.rs before each ui() pass.
    pub current_frame: Option<TextureHandle>,
}

impl PlayerPanel {
    pub fn new() -> Self {
        Self { current_frame: None }
    }
}

impl PanelModule for PlayerPanel {
    fn name(&self) -> &str { "Player" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, posters: &mut PosterCache, cmd: &mut Vec<AppCommand>) {
        let Some(asset) = state.selected() else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("▶").size(40.0).color(DARK_TEXT_DIM));
                    ui.label(RichText::new("Pick an asset from the library, or upload one")
                        .size(12.0).color(DARK_TEXT_DIM));
                });
            });
            return;
        };

        // ── Keyboard transport ───────────────────────────────────────────────
        if ui.input(|i| i.key_pressed(egui::Key::Space)) {
            if state.is_playing { cmd.push(AppCommand::Pause); }
            else                { cmd.push(AppCommand::Play);  }
        }
        if ui.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            cmd.push(AppCommand::SetPlayhead((state.current_time - SKIP_STEP).max(0.0)));
        }
        if ui.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            let total = asset.duration.max(0.0);
            cmd.push(AppCommand::SetPlayhead((state.current_time + SKIP_STEP).min(total)));
        }
        // I / O — mark the clip range without leaving the keyboard.
        if ui.input(|i| i.key_pressed(egui::Key::I)) {
            cmd.push(AppCommand::MarkStart);
        }
        if ui.input(|i| i.key_pressed(egui::Key::O)) {
            cmd.push(AppCommand::MarkEnd);
        }
        // Escape collapses the trim strip back to plain playback.
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            cmd.push(AppCommand::OpenLibrary);
        }

        ui.vertical(|ui| {
            // ── Viewport ─────────────────────────────────────────────────────
            let controls_h = 64.0;
            let avail = ui.available_size() - Vec2::new(0.0, controls_h);

            // Poster aspect drives the layout; the stream's own reported
            // shape is not trusted (some renditions misreport until a few
            // segments in).
            let ratio = asset.poster_size
                .map(|(w, h)| ratio_from_poster(w, h))
                .unwrap_or(DEFAULT_RATIO);

            let (view_w, view_h) = if avail.x / avail.y.max(1.0) > ratio {
                (avail.y * ratio, avail.y)
            } else {
                (avail.x, avail.x / ratio)
            };
            let view = Rect::from_center_size(
                Pos2::new(ui.max_rect().center().x, ui.cursor().top() + avail.y / 2.0),
                Vec2::new(view_w.max(1.0), view_h.max(1.0)),
            );

            let painter = ui.painter_at(ui.max_rect());
            painter.rect_filled(view, 4.0, DARK_BG_0);

            let frame_tex = self.current_frame.as_ref()
                .or_else(|| posters.get(&asset.id));
            if let Some(tex) = frame_tex {
                painter.image(
                    tex.id(),
                    view,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            } else {
                let hint = match &asset.status {
                    AssetStatus::Preparing   => "Preparing on the service…",
                    AssetStatus::Errored(e)  => e.as_str(),
                    AssetStatus::Ready       => "Loading stream…",
                };
                painter.text(
                    view.center(), Align2::CENTER_CENTER,
                    hint, FontId::proportional(12.0), DARK_TEXT_DIM,
                );
            }

            // Playback-error banner across the top of the viewport.
            if let Some(err) = &state.playback_error {
                let banner = Rect::from_min_size(
                    view.min, Vec2::new(view.width(), 24.0));
                painter.rect_filled(banner, 4.0, Color32::from_rgb(60, 22, 22));
                painter.text(
                    banner.left_center() + Vec2::new(8.0, 0.0), Align2::LEFT_CENTER,
                    format!("⚠ {err}"), FontId::proportional(11.0), RED_DIM,
                );
            }

            ui.advance_cursor_after_rect(Rect::from_min_size(
                ui.cursor().min, Vec2::new(ui.available_width(), avail.y)));

            // ── Transport ────────────────────────────────────────────────────
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let play_label = if state.is_playing { "⏸" } else { "▶" };
                let playable = asset.is_ready() && state.playback_error.is_none();
                if ui.add_enabled(playable, egui::Button::new(play_label)
                    .min_size(egui::vec2(34.0, 26.0))).clicked()
                {
                    if state.is_playing { cmd.push(AppCommand::Pause); }
                    else                { cmd.push(AppCommand::Play);  }
                }

                ui.label(RichText::new(format!(
                    "{} / {}",
                    format_marker(state.current_time),
                    format_duration(asset.duration.max(0.0)),
                )).monospace().size(11.0).color(DARK_TEXT_DIM));

                // Playhead scrubber.
                let total = asset.duration.max(0.0);
                if total > 0.0 {
                    let mut t = state.current_time.clamp(0.0, total);
                    let slider = egui::Slider::new(&mut t, 0.0..=total)
                        .show_value(false);
                    let resp = ui.add_sized(
                        egui::vec2((ui.available_width() - 90.0).max(40.0), 18.0), slider);
                    if resp.changed() {
                        cmd.push(AppCommand::SetPlayhead(t));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✂ Clip").clicked() {
                        cmd.push(AppCommand::OpenTrimmer(asset.id));
                    }
                });
            });
        });
    }
}
