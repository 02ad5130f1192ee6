use leptos::prelude::*;

use crate::catalog::{AvatarCatalog, AvatarFilters, CatalogFilter};
use crate::selection::SelectionState;

/// Reactive catalog, filters and selection for the studio page.
#[derive(Clone, Copy, Debug)]
pub struct StudioState {
    pub catalog: RwSignal<AvatarCatalog>,
    pub filters: RwSignal<AvatarFilters>,
    pub selection: RwSignal<SelectionState>,
}

impl Default for StudioState {
    fn default() -> Self {
        Self::new()
    }
}

impl StudioState {
    pub fn new() -> Self {
        Self {
            catalog: RwSignal::new(AvatarCatalog::default()),
            filters: RwSignal::new(AvatarFilters::default()),
            selection: RwSignal::new(SelectionState::default()),
        }
    }

    pub fn get() -> Self {
        let this: Self = expect_context();
        this
    }

    /// Install a freshly loaded catalog, then apply the default voice and
    /// any preselected avatar.
    pub fn install_catalog(self, catalog: AvatarCatalog, preselect: Option<&str>) {
        self.selection.update(|sel| {
            catalog.apply_default_voice(sel);
            if let Some(id) = preselect {
                catalog.select_avatar(sel, id);
            }
        });
        self.catalog.set(catalog);
    }

    pub fn select_avatar(self, id: &str) {
        self.catalog.with_untracked(|catalog| {
            self.selection.update(|sel| {
                catalog.select_avatar(sel, id);
            })
        });
    }

    pub fn select_voice(self, id: String) {
        self.selection
            .update(|sel| sel.selected_voice_id = Some(id));
    }

    pub fn set_text(self, text: String) {
        self.selection.update(|sel| sel.text = text);
    }

    pub fn set_category(self, filter: CatalogFilter) {
        self.filters.update(|f| f.category = filter);
        self.reconcile();
    }

    pub fn set_gender(self, filter: CatalogFilter) {
        self.filters.update(|f| f.gender = filter);
        self.reconcile();
    }

    fn reconcile(self) {
        let filters = self.filters.get_untracked();
        self.catalog.with_untracked(|catalog| {
            self.selection
                .update(|sel| catalog.reconcile_selection(&filters, sel));
        });
    }
}
