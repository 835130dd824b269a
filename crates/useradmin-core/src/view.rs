//! The users list view.
//!
//! `UsersView` owns every piece of view state (collection snapshot, filters,
//! selection, pending confirmation) and is the only writer of it. Store calls
//! are made by the methods that need them; after any successful mutation the
//! revision is bumped and the collection reloaded explicitly.

use tracing::{debug, info, warn};

use crate::actions::{authorized_actions, OperatorPrivilege, RowAction, RowActionKind};
use crate::collection::CollectionActions;
use crate::error::{AdminError, ViewError};
use crate::filter::Filters;
use crate::i18n::Translations;
use crate::loader::{CollectionLoader, LoadOutcome, LoadTicket, Revision};
use crate::models::{ActionOutcome, User, UserId};
use crate::remove::{BulkRemoveOutcome, PendingRemoval, RemovePrompt};
use crate::selection::SelectionSet;
use crate::table::{TableBody, UserRow, UsersTable, COLUMN_COUNT};
use crate::traits::UserStore;

#[derive(Debug)]
pub struct UsersView {
    loader: CollectionLoader,
    filters: Filters,
    selection: SelectionSet,
    pending: Option<PendingRemoval>,
    privilege: OperatorPrivilege,
    collection: CollectionActions,
    translations: Translations,
}

impl UsersView {
    pub fn new(privilege: OperatorPrivilege) -> Self {
        Self {
            loader: CollectionLoader::new(),
            filters: Filters::default(),
            selection: SelectionSet::new(),
            pending: None,
            privilege,
            collection: CollectionActions::users(),
            translations: Translations::default(),
        }
    }

    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self
    }

    // ========== Collection Loader ==========

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    /// Apply a fetch reply. An applied reply also drops selected ids whose
    /// user is gone.
    pub fn settle_load(
        &mut self,
        ticket: LoadTicket,
        reply: Result<Vec<User>, AdminError>,
    ) -> Result<LoadOutcome, ViewError> {
        let outcome = self.loader.settle(ticket, reply).map_err(ViewError::Load)?;
        if let LoadOutcome::Applied { .. } = outcome {
            let dropped = self.selection.retain_existing(self.loader.users());
            if dropped > 0 {
                debug!(dropped, "dropped selections for users no longer listed");
            }
        }
        Ok(outcome)
    }

    /// Fetch the collection now
    pub fn reload(&mut self, store: &dyn UserStore) -> Result<LoadOutcome, ViewError> {
        let ticket = self.begin_load();
        let reply = store.list_users(true);
        self.settle_load(ticket, reply)
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn users(&self) -> &[User] {
        self.loader.users()
    }

    pub fn revision(&self) -> Revision {
        self.loader.revision()
    }

    // ========== Filters ==========

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.filters.keyword = keyword.into();
    }

    pub fn set_include_temporary(&mut self, include: bool) {
        self.filters.include_temporary = include;
    }

    pub fn visible(&self) -> Vec<&User> {
        self.filters.visible(self.loader.users())
    }

    // ========== Selection ==========

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle(&mut self, id: UserId) {
        self.selection.toggle(id);
    }

    // ========== Mutations ==========

    pub fn pending_removal(&self) -> Option<&PendingRemoval> {
        self.pending.as_ref()
    }

    /// Contents of the open confirmation, if any
    pub fn remove_prompt(&self) -> Option<RemovePrompt> {
        self.pending
            .as_ref()
            .map(|_| RemovePrompt::for_selection(self.collection.endpoint(), &self.selection))
    }

    /// Open the bulk-remove confirmation. Returns whether it is open afterwards.
    pub fn request_bulk_remove(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        if self.pending.is_none() {
            self.pending = Some(PendingRemoval::open(&self.selection));
        }
        true
    }

    /// Close the confirmation and, when confirmed, delete every selected user
    /// one at a time.
    ///
    /// The first failed delete stops the sequence. In that case nothing is
    /// rolled back: the selection stays and the revision is not bumped.
    pub fn resolve_bulk_remove(
        &mut self,
        store: &dyn UserStore,
        confirmed: bool,
    ) -> Result<BulkRemoveOutcome, ViewError> {
        let Some(pending) = self.pending.take() else {
            return Ok(BulkRemoveOutcome::NotOpen);
        };
        if !confirmed {
            debug!(requested = pending.requested(), "bulk remove cancelled");
            return Ok(BulkRemoveOutcome::Cancelled);
        }

        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return Ok(BulkRemoveOutcome::Removed { ids });
        }

        for id in &ids {
            if let Err(source) = store.delete_item(self.collection.endpoint(), *id) {
                warn!(%id, error = %source, "bulk remove stopped");
                return Err(ViewError::Remove { id: *id, source });
            }
        }

        info!(count = ids.len(), "bulk remove finished");
        self.loader.bump_revision();
        self.selection.clear();
        self.reload(store)?;
        Ok(BulkRemoveOutcome::Removed { ids })
    }

    /// Single-row delete through the collection actions
    pub fn remove_one(&mut self, store: &dyn UserStore, id: UserId) -> Result<(), ViewError> {
        let loader = &mut self.loader;
        self.collection
            .remove(store, id, || {
                loader.bump_revision();
            })
            .map_err(|source| ViewError::Remove { id, source })?;
        self.reload(store)?;
        Ok(())
    }

    pub fn collection_actions(&self) -> &CollectionActions {
        &self.collection
    }

    // ========== Row actions ==========

    pub fn privilege(&self) -> OperatorPrivilege {
        self.privilege
    }

    pub fn row_actions(&self) -> Vec<RowAction> {
        authorized_actions(self.privilege, &self.translations)
    }

    /// Run an authorized row action for one user
    pub fn run_action(
        &self,
        store: &dyn UserStore,
        kind: RowActionKind,
        id: UserId,
    ) -> Result<ActionOutcome, ViewError> {
        let action = self
            .row_actions()
            .into_iter()
            .find(|a| a.kind == kind)
            .ok_or(ViewError::ActionNotAllowed(kind.key()))?;
        action.handle(store, id)
    }

    // ========== Composition ==========

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn table(&self) -> UsersTable {
        let t = &self.translations;
        let body = if self.loader.is_loading() {
            TableBody::Loading {
                columns: COLUMN_COUNT,
                end_action: true,
            }
        } else {
            let actions = self.row_actions();
            let rows = self
                .visible()
                .into_iter()
                .map(|u| UserRow::new(u, self.selection.contains(u.id), actions.clone(), t))
                .collect();
            TableBody::Rows { rows }
        };

        UsersTable {
            headers: UsersTable::headers(t),
            remove_enabled: !self.selection.is_empty(),
            remove_title: t.get("sharedRemove").to_string(),
            body,
            include_temporary: self.filters.include_temporary,
            temporary_label: t.get("userTemporary").to_string(),
        }
    }
}
