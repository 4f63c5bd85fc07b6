// crates/streamcut-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing PanelModule
//   2. Add `pub mod mypanel;` below
//   3. Give it a slot in app.rs::update()

pub mod library;
pub mod player;
pub mod share;
pub mod trimmer;
pub mod upload;

use streamcut_core::commands::AppCommand;
use streamcut_core::state::SessionState;
use egui::{TextureHandle, Ui};
use std::collections::HashMap;
use uuid::Uuid;

/// GPU-resident poster thumbnails: local asset ID → loaded texture.
pub type PosterCache = HashMap<Uuid, TextureHandle>;

/// Every panel implements this trait.
/// Panels read state, emit commands — they never mutate state directly.
pub trait PanelModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:      &mut Ui,
        state:   &SessionState,
        posters: &mut PosterCache,
        cmd:     &mut Vec<AppCommand>,
    );
}
