// crates/streamcut-ui/src/modules/share.rs
//
// SharePanel: the public link for the selected asset, plus the
// report-abuse form. The clipboard write happens here (it's a UI-side
// effect); everything else goes through commands like every other panel.

use super::{PanelModule, PosterCache};
use streamcut_core::commands::AppCommand;
use streamcut_core::state::SessionState;
use crate::theme::{ACCENT, DARK_BG_2, DARK_TEXT_DIM, GREEN_DIM, RED_DIM};
use egui::{RichText, Ui};

const REPORT_REASONS: &[&str] = &["copyright", "inappropriate", "spam", "other"];

pub struct SharePanel {
    /// Public watch-page root; links are `{watch_base}/{playback_id}`.
    watch_base: String,
    reason:     usize,
    comment:    String,
}

impl SharePanel {
    pub fn new() -> Self {
        Self {
            watch_base: std::env::var("STREAMCUT_WATCH_BASE")
                .unwrap_or_else(|_| "https://stream.example.com/v".to_string()),
            reason:  0,
            comment: String::new(),
        }
    }
}

impl PanelModule for SharePanel {
    fn name(&self) -> &str { "Share" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, _posters: &mut PosterCache, cmd: &mut Vec<AppCommand>) {
        // Transient confirmation auto-clears after 3 seconds (pure UI
        // memory, no state mutation until the command fires).
        if state.share_status.is_some() {
            let t = ui.input(|i| i.time);
            ui.memory_mut(|mem| {
                let key = egui::Id::new("share_status_time");
                let start = mem.data.get_temp_mut_or_insert_with(key, || t);
                if t - *start > 3.0 {
                    cmd.push(AppCommand::ClearShareStatus);
                    mem.data.remove::<f64>(key);
                }
            });
            ui.ctx().request_repaint();
        } else {
            ui.memory_mut(|mem| mem.data.remove::<f64>(egui::Id::new("share_status_time")));
        }

        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.label(RichText::new("🔗 Share").size(12.0).strong());
                ui.add_space(4.0);

                let playback_id = state.selected().and_then(|a| a.playback_id.clone());
                let Some(playback_id) = playback_id else {
                    ui.label(RichText::new("Select a ready asset to share")
                        .size(10.0).color(DARK_TEXT_DIM));
                    return;
                };

                // The watch URL is the public page, not the raw rendition.
                let watch_url = format!("{}/{playback_id}", self.watch_base);
                ui.label(RichText::new(&watch_url).size(10.0).color(DARK_TEXT_DIM).monospace());

                if ui.button("📋 Copy link").clicked() {
                    ui.ctx().copy_text(watch_url);
                    cmd.push(AppCommand::SetShareStatus("Link copied".into()));
                }

                if let Some(msg) = &state.share_status {
                    ui.label(RichText::new(format!("✔ {msg}")).size(10.0).color(GREEN_DIM));
                }

                ui.add_space(8.0);
                ui.separator();

                // ── Report abuse ────────────────────────────────────────────
                ui.label(RichText::new("Report this video").size(11.0).strong());
                egui::ComboBox::from_id_salt("report_reason")
                    .selected_text(REPORT_REASONS[self.reason])
                    .show_ui(ui, |ui| {
                        for (i, reason) in REPORT_REASONS.iter().enumerate() {
                            ui.selectable_value(&mut self.reason, i, *reason);
                        }
                    });
                ui.add(
                    egui::TextEdit::multiline(&mut self.comment)
                        .hint_text("What's wrong? (optional)")
                        .desired_rows(2)
                        .desired_width(ui.available_width()),
                );
                if ui.add(egui::Button::new("Send report").stroke(
                    egui::Stroke::new(1.0, ACCENT))).clicked()
                {
                    cmd.push(AppCommand::SubmitReport {
                        playback_id,
                        reason:  REPORT_REASONS[self.reason].to_string(),
                        comment: self.comment.clone(),
                    });
                }
                if let Some(err) = &state.report_error {
                    // Form contents stay put so the user can resubmit.
                    ui.label(RichText::new(format!("✕ {err}")).size(10.0).color(RED_DIM));
                }
            });
    }
}
