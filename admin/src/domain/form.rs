//! Form controller for creating and editing one user record.
//!
//! The controller owns the working record for a single form session. It
//! drives the postal-code autofill state machine, gates edits to the
//! address fields a successful lookup filled in, and commits validated
//! records through a [`UserStore`].
//!
//! Postal lookups are split in three steps so callers can interleave user
//! input with an in-flight request:
//!
//! 1. [`FormController::begin_postal_lookup`] enters
//!    [`LookupState::Pending`] and mints a [`LookupTicket`] carrying a fresh
//!    token.
//! 2. [`LookupTicket::resolve`] awaits the [`PostalLookupClient`].
//! 3. [`FormController::apply_lookup`] applies the completion only when its
//!    token is still the latest one.
//!
//! [`FormController::blur_postal_code`] runs all three in sequence.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use super::ports::{PostalCodeLookup, UserStore, UserStoreError};
use super::{
    AddressLookupResult, BrazilianState, LookupOutcome, PostalLookupClient, UserDraft, UserField,
    UserId, ValidationOutcome, resolve,
};

/// Hint rendered under the postal code when the lookup found nothing.
pub const POSTAL_CODE_NOT_FOUND_HINT: &str = "Não encontrado, favor preencher.";

/// Whether the session creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// No identity yet; submit appends a new record.
    Create,
    /// Submit replaces the record with this identity in place.
    Edit(UserId),
}

/// Postal-code autofill state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupState {
    /// No lookup outcome yet.
    #[default]
    Idle,
    /// A lookup is in flight.
    Pending,
    /// Address fields were filled from the directory and are locked.
    Found,
    /// Address fields were cleared for manual entry.
    NotFound,
}

/// Errors raised by form interactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Edit mode was requested for an identity the store does not hold.
    #[error("user {id} does not exist")]
    UserNotFound {
        /// Identity that was requested.
        id: UserId,
    },
    /// The field is locked by a successful postal lookup.
    #[error("field {field} is filled by the postal code lookup")]
    FieldDisabled {
        /// Locked field.
        field: UserField,
    },
    /// The field is not a free-text input.
    #[error("field {field} does not accept text")]
    NotFreeText {
        /// Field that was targeted.
        field: UserField,
    },
    /// The record store failed.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// Result of an explicit submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was written; the caller returns to the list view.
    Committed {
        /// Identity of the committed record.
        id: UserId,
        /// `true` when the submit appended a new record.
        created: bool,
    },
    /// Nothing was written; every failing field is reported.
    Invalid(ValidationOutcome),
}

/// Handle for one in-flight postal lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    token: u64,
    postal_code: String,
}

impl LookupTicket {
    /// Token identifying this lookup.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Postal code as typed when the lookup began.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Run the lookup through `client`.
    pub async fn resolve<L>(self, client: &PostalLookupClient<L>) -> LookupCompletion
    where
        L: PostalCodeLookup,
    {
        let outcome = client.lookup(&self.postal_code).await;
        LookupCompletion {
            token: self.token,
            outcome,
        }
    }
}

/// Settled lookup waiting to be applied to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCompletion {
    token: u64,
    outcome: LookupOutcome,
}

impl LookupCompletion {
    /// Pair an outcome with the token of the lookup that produced it.
    pub fn new(token: u64, outcome: LookupOutcome) -> Self {
        Self { token, outcome }
    }

    /// Token of the lookup that produced this completion.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Lookup outcome.
    pub fn outcome(&self) -> &LookupOutcome {
        &self.outcome
    }
}

/// Controller for one create or edit form session.
pub struct FormController<L, S> {
    client: PostalLookupClient<L>,
    store: Arc<S>,
    mode: FormMode,
    draft: UserDraft,
    lookup: LookupState,
    latest_token: u64,
    focus: Option<UserField>,
    errors: ValidationOutcome,
}

impl<L, S> FormController<L, S>
where
    L: PostalCodeLookup,
    S: UserStore,
{
    /// Open an empty form that will append a new record.
    pub fn create(client: PostalLookupClient<L>, store: Arc<S>) -> Self {
        Self {
            client,
            store,
            mode: FormMode::Create,
            draft: UserDraft::default(),
            lookup: LookupState::Idle,
            latest_token: 0,
            focus: None,
            errors: ValidationOutcome::default(),
        }
    }

    /// Open a form pre-populated from the stored record `id`.
    ///
    /// # Errors
    /// [`FormError::UserNotFound`] when the store has no such record, or
    /// [`FormError::Store`] when the store cannot be read.
    pub fn edit(
        client: PostalLookupClient<L>,
        store: Arc<S>,
        id: UserId,
    ) -> Result<Self, FormError> {
        let Some(record) = store.find(&id)? else {
            return Err(FormError::UserNotFound { id });
        };
        let mut form = Self::create(client, store);
        form.draft = UserDraft::from(&record);
        form.mode = FormMode::Edit(id);
        debug!(user_id = %record.id(), "form opened in edit mode");
        Ok(form)
    }

    /// Open a form for `id` when present, or an empty create form.
    pub fn open(
        client: PostalLookupClient<L>,
        store: Arc<S>,
        id: Option<UserId>,
    ) -> Result<Self, FormError> {
        match id {
            Some(id) => Self::edit(client, store, id),
            None => Ok(Self::create(client, store)),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Working record.
    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    /// Postal autofill state.
    pub fn lookup_state(&self) -> LookupState {
        self.lookup
    }

    /// Field holding input focus, if the controller moved it.
    pub fn focus(&self) -> Option<UserField> {
        self.focus
    }

    /// Errors from the most recent submit.
    pub fn errors(&self) -> &ValidationOutcome {
        &self.errors
    }

    /// Client used to resolve lookup tickets.
    pub fn lookup_client(&self) -> &PostalLookupClient<L> {
        &self.client
    }

    /// Whether `field` accepts direct edits.
    pub fn is_enabled(&self, field: UserField) -> bool {
        !(self.lookup == LookupState::Found && field.is_address_dependent())
    }

    /// Hint shown under the postal code after an unsuccessful lookup.
    pub fn postal_code_hint(&self) -> Option<&'static str> {
        (self.lookup == LookupState::NotFound).then_some(POSTAL_CODE_NOT_FOUND_HINT)
    }

    /// Whether the success indicator is shown next to the postal code.
    pub fn postal_code_verified(&self) -> bool {
        self.lookup == LookupState::Found
    }

    /// Replace the text of a free-text field.
    ///
    /// Editing the postal code while a lookup is pending abandons that
    /// lookup and returns to [`LookupState::Idle`].
    pub fn set_field(
        &mut self,
        field: UserField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.ensure_enabled(field)?;
        let slot = self
            .draft
            .text_mut(field)
            .ok_or(FormError::NotFreeText { field })?;
        *slot = value.into();

        if field == UserField::ZipCode && self.lookup == LookupState::Pending {
            self.latest_token += 1;
            self.lookup = LookupState::Idle;
            debug!(token = self.latest_token, "postal code edited; pending lookup abandoned");
        }
        Ok(())
    }

    /// Select a state, or clear the selection.
    pub fn set_state(&mut self, state: Option<BrazilianState>) -> Result<(), FormError> {
        self.ensure_enabled(UserField::State)?;
        self.draft.state = state;
        Ok(())
    }

    /// Set or clear the birth date.
    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) {
        self.draft.birth_date = birth_date;
    }

    /// Toggle the e-mail pre-verification switch.
    pub fn set_email_verified(&mut self, verified: bool) {
        self.draft.email_verified = Some(verified);
    }

    /// Postal code lost focus: start a lookup when it holds any text.
    ///
    /// Returns `None`, leaving the state untouched, when the field is blank.
    pub fn begin_postal_lookup(&mut self) -> Option<LookupTicket> {
        if self.draft.zip_code.trim().is_empty() {
            return None;
        }
        self.latest_token += 1;
        self.lookup = LookupState::Pending;
        debug!(token = self.latest_token, "postal lookup started");
        Some(LookupTicket {
            token: self.latest_token,
            postal_code: self.draft.zip_code.clone(),
        })
    }

    /// Apply a settled lookup.
    ///
    /// Returns `false` and leaves the form untouched when the completion is
    /// stale: a newer lookup started or the postal code changed meanwhile.
    pub fn apply_lookup(&mut self, completion: LookupCompletion) -> bool {
        if completion.token != self.latest_token || self.lookup != LookupState::Pending {
            debug!(
                token = completion.token,
                latest = self.latest_token,
                "stale postal lookup dropped"
            );
            return false;
        }
        match completion.outcome {
            LookupOutcome::Found(address) => self.fill_address(address),
            LookupOutcome::NotFound => self.clear_address(),
        }
        true
    }

    /// Begin, resolve and apply a lookup for the current postal code.
    pub async fn blur_postal_code(&mut self) -> LookupState {
        if let Some(ticket) = self.begin_postal_lookup() {
            let completion = ticket.resolve(&self.client).await;
            self.apply_lookup(completion);
        }
        self.lookup
    }

    /// Validate the working record and commit it when valid.
    ///
    /// On failure the errors are kept for rendering and focus moves to the
    /// first failing field.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let details = match resolve(&self.draft) {
            Ok(details) => details,
            Err(outcome) => {
                self.focus = outcome.iter().next().map(|(field, _)| field);
                self.errors = outcome.clone();
                debug!(failing = outcome.len(), "submit rejected by validation");
                return Ok(SubmitOutcome::Invalid(outcome));
            }
        };
        self.errors = ValidationOutcome::default();

        let (id, created) = match &self.mode {
            FormMode::Create => (self.store.create(details)?, true),
            FormMode::Edit(id) => {
                self.store.update(id, details)?;
                (id.clone(), false)
            }
        };
        self.mode = FormMode::Edit(id.clone());
        info!(user_id = %id, created, "user record committed");
        Ok(SubmitOutcome::Committed { id, created })
    }

    fn ensure_enabled(&self, field: UserField) -> Result<(), FormError> {
        if self.is_enabled(field) {
            Ok(())
        } else {
            Err(FormError::FieldDisabled { field })
        }
    }

    fn fill_address(&mut self, address: AddressLookupResult) {
        self.draft.address_name = address.address_name;
        self.draft.neighborhood = address.neighborhood;
        self.draft.city = address.city;
        self.draft.state = Some(address.state);
        self.lookup = LookupState::Found;
        self.focus = Some(UserField::Number);
        debug!(postal_code = %address.postal_code, "postal lookup applied");
    }

    fn clear_address(&mut self) {
        self.draft.address_name.clear();
        self.draft.neighborhood.clear();
        self.draft.city.clear();
        self.draft.state = None;
        self.lookup = LookupState::NotFound;
        self.focus = Some(UserField::AddressName);
        debug!("postal lookup found nothing; address cleared");
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
