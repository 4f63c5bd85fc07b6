// crates/streamcut-ui/src/modules/trimmer.rs
//
// TrimmerPanel: the clip-creation surface. A strip spanning the asset's
// timeline with two draggable range handles, mark-in/mark-out buttons that
// capture the playhead, and the submit button.
//
// The strip is the "range widget": dragging either handle reports the
// whole (start, end) pair upward as a RangeWidgetUpdate, which overwrites
// the markers verbatim. Handles default to the ends of the timeline while
// a marker is unset.
//
// Creation status (driven by SessionState clip fields):
//
//   Idle      → user clicks "Create clip"
//               → app.rs records the ClipJob, calls api.create_clip
//   Creating  → state.clip_job is Some; button disabled, spinner text
//   Done      → app navigates to the new clip's player view
//   Error     → state.clip_error is Some; ✕ banner + dismiss, resubmit allowed

use super::{PanelModule, PosterCache};
use streamcut_core::commands::AppCommand;
use streamcut_core::helpers::time::format_marker;
use streamcut_core::state::SessionState;
use crate::theme::{
    ACCENT, DARK_BG_0, DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM,
    MARKER_IN, MARKER_OUT, RED_DIM, STRIP_SPAN,
};
use egui::{Align2, Color32, FontId, Id, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

/// Grab width of a range handle, in pixels, centered on its time.
const HANDLE_W: f32 = 10.0;

pub struct TrimmerPanel {
    /// Which handle a drag started on. Pointer hit-testing alone is not
    /// enough: with both markers on the same time the handles overlap, and
    /// mid-drag the pointer can cross the other handle.
    dragging: Option<DragTarget>,
}

#[derive(Clone, Copy, PartialEq)]
enum DragTarget {
    Start,
    End,
}

impl TrimmerPanel {
    pub fn new() -> Self {
        Self { dragging: None }
    }
}

// ── Pixel ↔ time mapping ──────────────────────────────────────────────────────

/// Time under pixel `x` on a strip spanning [left, left+width] ↦ [0, duration].
/// Clamped to the timeline.
fn time_at_x(x: f32, left: f32, width: f32, duration: f64) -> f64 {
    if width <= 0.0 || duration <= 0.0 {
        return 0.0;
    }
    let frac = ((x - left) / width).clamp(0.0, 1.0) as f64;
    frac * duration
}

/// Pixel position of time `t` on the same strip.
fn x_at_time(t: f64, left: f32, width: f32, duration: f64) -> f32 {
    if duration <= 0.0 {
        return left;
    }
    left + ((t / duration).clamp(0.0, 1.0) as f32) * width
}

impl PanelModule for TrimmerPanel {
    fn name(&self) -> &str { "Trimmer" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, _posters: &mut PosterCache, cmd: &mut Vec<AppCommand>) {
        let Some(asset) = state.selected() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Open an asset to trim").color(DARK_TEXT_DIM));
            });
            return;
        };
        let duration = asset.duration;

        // ── Toolbar ──────────────────────────────────────────────────────────
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("⇤ Mark in").clicked() {
                        cmd.push(AppCommand::MarkStart);
                    }
                    if ui.button("Mark out ⇥").clicked() {
                        cmd.push(AppCommand::MarkEnd);
                    }

                    ui.separator();

                    let fmt = |v: Option<f64>| v.map(format_marker).unwrap_or_else(|| "—".into());
                    ui.label(RichText::new(format!("in {}", fmt(state.selection.start_time)))
                        .monospace().size(11.0).color(MARKER_IN));
                    ui.label(RichText::new(format!("out {}", fmt(state.selection.end_time)))
                        .monospace().size(11.0).color(MARKER_OUT));

                    // Inverted ranges are legal input here; the service is
                    // the one that rejects what it can't cut. Just say so.
                    if let Some((s, e)) = state.selection.bounds() {
                        if s > e {
                            ui.label(RichText::new("out is before in")
                                .size(10.0).color(DARK_TEXT_DIM));
                        }
                    }

                    if state.selection.is_complete() && ui.button("Clear").clicked() {
                        cmd.push(AppCommand::ClearRange);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if state.clip_job.is_some() {
                            ui.spinner();
                            ui.label(RichText::new("Creating clip…").size(11.0).color(DARK_TEXT_DIM));
                        } else {
                            let can_create = state.selection.is_complete() && asset.is_ready();
                            let btn = egui::Button::new("✂ Create clip")
                                .fill(Color32::from_rgb(25, 75, 68))
                                .stroke(Stroke::new(1.0, ACCENT));
                            if ui.add_enabled(can_create, btn).clicked() {
                                cmd.push(AppCommand::CreateClip);
                            }
                        }
                    });
                });
            });

        // ── Error banner ─────────────────────────────────────────────────────
        if let Some(err) = &state.clip_error {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("✕ {err}")).size(11.0).color(RED_DIM));
                if ui.small_button("Dismiss").clicked() {
                    cmd.push(AppCommand::ClearClipStatus);
                }
            });
        }

        // ── Strip ────────────────────────────────────────────────────────────
        let strip_h = 44.0;
        let (strip, _) = ui.allocate_exact_size(
            Vec2::new(ui.available_width(), strip_h),
            Sense::hover(),
        );
        let painter = ui.painter_at(strip);
        painter.rect_filled(strip, 4.0, DARK_BG_0);
        painter.rect_stroke(strip, 4.0, Stroke::new(1.0, DARK_BORDER), egui::StrokeKind::Inside);

        if duration <= 0.0 {
            painter.text(
                strip.center(), Align2::CENTER_CENTER,
                "waiting for duration…", FontId::proportional(11.0), DARK_TEXT_DIM,
            );
            return;
        }

        // Handle positions default to the timeline ends while unset.
        let start = state.selection.start_time.unwrap_or(0.0);
        let end   = state.selection.end_time.unwrap_or(duration);
        let sx = x_at_time(start, strip.left(), strip.width(), duration);
        let ex = x_at_time(end,   strip.left(), strip.width(), duration);

        // Span fill — drawn between the handles regardless of order.
        let (lo, hi) = if sx <= ex { (sx, ex) } else { (ex, sx) };
        painter.rect_filled(
            Rect::from_min_max(Pos2::new(lo, strip.top() + 2.0), Pos2::new(hi, strip.bottom() - 2.0)),
            2.0,
            STRIP_SPAN,
        );

        // Playhead.
        let px = x_at_time(state.current_time, strip.left(), strip.width(), duration);
        painter.line_segment(
            [Pos2::new(px, strip.top()), Pos2::new(px, strip.bottom())],
            Stroke::new(1.5, ACCENT),
        );

        // Handles.
        for (x, color) in [(sx, MARKER_IN), (ex, MARKER_OUT)] {
            painter.rect_filled(
                Rect::from_center_size(
                    Pos2::new(x, strip.center().y),
                    Vec2::new(4.0, strip.height() - 6.0),
                ),
                2.0,
                color,
            );
        }

        // ── Interaction ──────────────────────────────────────────────────────
        // Handles first (they sit on top of the scrub area), then the body.
        let start_rect = Rect::from_center_size(
            Pos2::new(sx, strip.center().y), Vec2::new(HANDLE_W, strip.height()));
        let end_rect = Rect::from_center_size(
            Pos2::new(ex, strip.center().y), Vec2::new(HANDLE_W, strip.height()));

        let start_resp = ui.interact(start_rect, Id::new("trim_handle_in"),  Sense::drag());
        let end_resp   = ui.interact(end_rect,   Id::new("trim_handle_out"), Sense::drag());

        if start_resp.drag_started() {
            self.dragging = Some(DragTarget::Start);
        } else if end_resp.drag_started() {
            self.dragging = Some(DragTarget::End);
        }
        if start_resp.drag_stopped() || end_resp.drag_stopped() {
            self.dragging = None;
        }

        if let Some(target) = self.dragging {
            let pointer = start_resp.interact_pointer_pos()
                .or_else(|| end_resp.interact_pointer_pos());
            if let Some(p) = pointer {
                let t = time_at_x(p.x, strip.left(), strip.width(), duration);
                let (new_start, new_end) = match target {
                    DragTarget::Start => (t, end),
                    DragTarget::End   => (start, t),
                };
                cmd.push(AppCommand::RangeWidgetUpdate { start: new_start, end: new_end });
            }
        }

        if start_resp.hovered() || end_resp.hovered() || self.dragging.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        }

        // Scrub on the strip body (clicks and drags outside the handles).
        if self.dragging.is_none() {
            let body = ui.interact(strip, Id::new("trim_strip_body"), Sense::click_and_drag());
            if body.clicked() || body.dragged() {
                if let Some(p) = body.interact_pointer_pos() {
                    cmd.push(AppCommand::SetPlayhead(
                        time_at_x(p.x, strip.left(), strip.width(), duration),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_edges_map_to_timeline_edges() {
        assert_eq!(time_at_x(100.0, 100.0, 500.0, 60.0), 0.0);
        assert_eq!(time_at_x(600.0, 100.0, 500.0, 60.0), 60.0);
        assert_eq!(x_at_time(0.0, 100.0, 500.0, 60.0), 100.0);
        assert_eq!(x_at_time(60.0, 100.0, 500.0, 60.0), 600.0);
    }

    #[test]
    fn positions_clamp_to_the_strip() {
        assert_eq!(time_at_x(50.0, 100.0, 500.0, 60.0), 0.0);
        assert_eq!(time_at_x(999.0, 100.0, 500.0, 60.0), 60.0);
        assert_eq!(x_at_time(-5.0, 100.0, 500.0, 60.0), 100.0);
        assert_eq!(x_at_time(90.0, 100.0, 500.0, 60.0), 600.0);
    }

    #[test]
    fn mapping_round_trips_mid_strip() {
        let t = time_at_x(350.0, 100.0, 500.0, 60.0);
        assert!((t - 30.0).abs() < 1e-6);
        assert!((x_at_time(t, 100.0, 500.0, 60.0) - 350.0).abs() < 1e-3);
    }

    #[test]
    fn zero_duration_is_inert() {
        assert_eq!(time_at_x(350.0, 100.0, 500.0, 0.0), 0.0);
        assert_eq!(x_at_time(10.0, 100.0, 500.0, 0.0), 100.0);
    }
}
