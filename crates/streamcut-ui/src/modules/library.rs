// crates/streamcut-ui/src/modules/library.rs
use super::{PanelModule, PosterCache};
use streamcut_core::commands::AppCommand;
use streamcut_core::helpers::aspect::ratio_label;
use streamcut_core::helpers::time::format_duration;
use streamcut_core::state::{AssetOrigin, AssetStatus, SessionState};
use crate::helpers::format::truncate;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BG_4, DARK_BORDER, DARK_TEXT_DIM, RED_DIM};
use egui::{Align, Color32, Layout, RichText, Sense, Stroke, Ui};

pub struct LibraryPanel;

impl PanelModule for LibraryPanel {
    fn name(&self) -> &str { "Library" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, posters: &mut PosterCache, cmd: &mut Vec<AppCommand>) {
        // ── Header ───────────────────────────────────────────────────────────
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🗂 Videos").size(12.0).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new(format!("{}", state.library.len()))
                            .size(11.0).color(DARK_TEXT_DIM));
                    });
                });
            });

        ui.separator();

        // ── Asset cards ──────────────────────────────────────────────────────
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(4.0);

            let background = ui.interact(
                ui.available_rect_before_wrap(),
                egui::Id::new("library_bg"),
                Sense::click(),
            );
            if background.clicked() {
                cmd.push(AppCommand::SelectAsset(None));
            }

            if state.library.is_empty() {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("🎬").size(32.0));
                    ui.add_space(6.0);
                    ui.label(RichText::new("Nothing here yet\nUpload a video to get started")
                        .size(11.0).color(DARK_TEXT_DIM));
                });
                return;
            }

            let mut to_forget: Option<uuid::Uuid> = None;

            for asset in &state.library {
                let id          = asset.id;
                let is_selected = state.selected_asset == Some(id);

                let border = if is_selected { ACCENT } else { DARK_BORDER };
                let fill   = if is_selected { DARK_BG_4 } else { DARK_BG_3 };

                let card = egui::Frame::new()
                    .fill(fill)
                    .stroke(Stroke::new(if is_selected { 1.5 } else { 1.0 }, border))
                    .corner_radius(egui::CornerRadius::same(5))
                    .inner_margin(egui::Margin::same(6))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            // ── Thumbnail ───────────────────────────────────
                            if let Some(tex) = posters.get(&id) {
                                ui.add(
                                    egui::Image::new((tex.id(), egui::vec2(72.0, 40.0)))
                                        .corner_radius(egui::CornerRadius::same(3)),
                                );
                            } else {
                                let (rect, _) = ui.allocate_exact_size(
                                    egui::vec2(72.0, 40.0), Sense::hover());
                                ui.painter().rect_filled(rect, 3.0, Color32::from_rgb(16, 18, 24));
                                let icon = match asset.status {
                                    AssetStatus::Errored(_) => "⚠",
                                    _ => "🎬",
                                };
                                ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER,
                                    icon, egui::FontId::proportional(16.0), Color32::from_gray(70));
                            }

                            // ── Text column ─────────────────────────────────
                            ui.vertical(|ui| {
                                ui.label(RichText::new(truncate(&asset.title, 22)).size(11.0));
                                match &asset.status {
                                    AssetStatus::Preparing => {
                                        ui.label(RichText::new("preparing…")
                                            .size(10.0).color(DARK_TEXT_DIM));
                                    }
                                    AssetStatus::Errored(e) => {
                                        ui.label(RichText::new(truncate(e, 26))
                                            .size(10.0).color(RED_DIM));
                                    }
                                    AssetStatus::Ready => {
                                        let badge = match asset.poster_size {
                                            Some((w, h)) => format!(
                                                "{}  {}", format_duration(asset.duration), ratio_label(w, h)),
                                            None => format_duration(asset.duration),
                                        };
                                        ui.label(RichText::new(badge)
                                            .size(10.0).color(ACCENT).monospace());
                                    }
                                }
                                if let AssetOrigin::Clipped { start_time, end_time, .. } = &asset.origin {
                                    ui.label(RichText::new(
                                        format!("✂ {start_time:.1}–{end_time:.1}s"))
                                        .size(9.0).color(DARK_TEXT_DIM));
                                }
                            });
                        });
                    })
                    .response;

                // ── Interact ────────────────────────────────────────────────
                let interact = ui.interact(card.rect, egui::Id::new("asset_card").with(id), Sense::click());
                if interact.clicked() {
                    cmd.push(AppCommand::OpenPlayer(id));
                }
                interact.context_menu(|ui| {
                    ui.set_min_width(130.0);
                    if ui.button("▶  Play").clicked() {
                        cmd.push(AppCommand::OpenPlayer(id));
                        ui.close();
                    }
                    if ui.button("✂  Trim").clicked() {
                        cmd.push(AppCommand::OpenTrimmer(id));
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("🗑  Remove from library").clicked() {
                        to_forget = Some(id);
                        ui.close();
                    }
                });

                ui.add_space(4.0);
            }

            if let Some(id) = to_forget {
                cmd.push(AppCommand::ForgetAsset(id));
            }
        });
    }
}
