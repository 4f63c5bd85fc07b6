// crates/streamcut-ui/src/modules/upload.rs
//
// UploadPanel: pick a file, watch the transfer, dismiss the outcome.
//
// Status flow (driven by SessionState upload fields):
//
//   Idle       → user picks a file (or drops one anywhere in the window)
//                → app.rs sets upload_job, calls api.start_upload
//   Uploading  → UploadProgress results update (sent, total)
//   Processing → bytes are on the service, waiting for the asset
//   Done       → upload_done = title; ✓ banner until dismissed
//   Failed     → upload_error; ✕ banner until dismissed

use super::{PanelModule, PosterCache};
use streamcut_core::commands::AppCommand;
use streamcut_core::state::SessionState;
use crate::helpers::format::percent;
use crate::theme::{DARK_BG_2, DARK_TEXT_DIM, GREEN_DIM, RED_DIM};
use egui::{RichText, Ui};
use rfd::FileDialog;

pub struct UploadPanel;

impl PanelModule for UploadPanel {
    fn name(&self) -> &str { "Upload" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, _posters: &mut PosterCache, cmd: &mut Vec<AppCommand>) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.label(RichText::new("⬆ Upload").size(12.0).strong());
                ui.add_space(4.0);

                let busy = state.upload_job.is_some();
                if ui.add_enabled(!busy, egui::Button::new("＋ Choose a video…")).clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Video", &["mp4", "mov", "mkv", "webm", "m4v", "avi"])
                        .pick_file()
                    {
                        cmd.push(AppCommand::UploadFile(path));
                    }
                }

                if busy {
                    ui.add_space(4.0);
                    match state.upload_progress {
                        Some((sent, total)) if sent < total => {
                            let frac = if total > 0 { sent as f32 / total as f32 } else { 0.0 };
                            ui.add(egui::ProgressBar::new(frac).desired_height(8.0));
                            ui.label(RichText::new(format!("Uploading… {}", percent(sent, total)))
                                .size(10.0).color(DARK_TEXT_DIM));
                        }
                        Some(_) => {
                            ui.add(egui::ProgressBar::new(1.0).desired_height(8.0));
                            ui.label(RichText::new("Processing on the service…")
                                .size(10.0).color(DARK_TEXT_DIM));
                        }
                        None => {
                            ui.spinner();
                            ui.label(RichText::new("Requesting upload slot…")
                                .size(10.0).color(DARK_TEXT_DIM));
                        }
                    }
                }

                if let Some(title) = &state.upload_done {
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("✔ {title} uploaded"))
                            .size(11.0).color(GREEN_DIM));
                        if ui.small_button("✕").clicked() {
                            cmd.push(AppCommand::ClearUploadStatus);
                        }
                    });
                }
                if let Some(err) = &state.upload_error {
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("✕ {err}")).size(11.0).color(RED_DIM));
                        if ui.small_button("✕").clicked() {
                            cmd.push(AppCommand::ClearUploadStatus);
                        }
                    });
                }
            });
    }
}
