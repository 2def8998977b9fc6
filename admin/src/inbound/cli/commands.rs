//! Console command execution.
//!
//! Each command drives the domain the way the page would: `create` and
//! `edit` fill a [`FormController`], blur the postal code, and submit;
//! `list`, `delete` and `show` go through the [`UserGrid`] and the store.

use std::io::{self, Write};
use std::sync::Arc;

use demo_users::{DemoUser, GenerationError, generate_demo_users};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use super::args::{Command, UserFieldArgs};
use super::render;
use crate::domain::ports::{PostalCodeLookup, UserStore, UserStoreError};
use crate::domain::{
    FormController, FormError, PageSize, PostalLookupClient, SubmitOutcome, UnsupportedPageSize,
    UserDraft, UserField, UserGrid, UserId, UserIdValidationError, resolve,
};

/// Errors that stop a console command.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The identity argument is empty or padded.
    #[error("invalid user id: {0}")]
    InvalidId(#[from] UserIdValidationError),
    /// The page size is not one of the offered sizes.
    #[error(transparent)]
    PageSize(#[from] UnsupportedPageSize),
    /// The form could not be opened or committed.
    #[error(transparent)]
    Form(#[from] FormError),
    /// The store failed outside a form session.
    #[error(transparent)]
    Store(#[from] UserStoreError),
    /// Sample users could not be generated.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Whether a command reached its goal; drives the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command did what was asked.
    Success,
    /// The command ran but was refused, e.g. by validation.
    Rejected,
}

/// Collaborators shared by every command.
pub struct ConsoleContext<L, S> {
    client: PostalLookupClient<L>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    page_size: PageSize,
}

impl<L, S> ConsoleContext<L, S>
where
    L: PostalCodeLookup,
    S: UserStore,
{
    /// Bundle the lookup client, store, clock and default page size.
    pub fn new(
        client: PostalLookupClient<L>,
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        page_size: PageSize,
    ) -> Self {
        Self {
            client,
            store,
            clock,
            page_size,
        }
    }

    fn grid(&self) -> UserGrid<S> {
        UserGrid::new(Arc::clone(&self.store), Arc::clone(&self.clock))
    }

    fn form(&self, id: Option<UserId>) -> Result<FormController<L, S>, FormError> {
        FormController::open(self.client.clone(), Arc::clone(&self.store), id)
    }

    /// Run `command`, writing human-readable output to `out`.
    pub async fn run<W: Write>(
        &self,
        command: Command,
        out: &mut W,
    ) -> Result<CommandStatus, ConsoleError> {
        match command {
            Command::List { page, page_size } => {
                let size = page_size.map_or(Ok(self.page_size), PageSize::try_from)?;
                render::page(out, &self.grid().page(page, size)?)?;
                Ok(CommandStatus::Success)
            }
            Command::Show { id } => {
                let id = UserId::new(id)?;
                match self.store.find(&id)? {
                    Some(record) => {
                        render::record(out, &record)?;
                        Ok(CommandStatus::Success)
                    }
                    None => {
                        writeln!(out, "user {id} not found")?;
                        Ok(CommandStatus::Rejected)
                    }
                }
            }
            Command::Lookup { postal_code } => {
                let outcome = self.client.lookup(&postal_code).await;
                render::lookup(out, &outcome)?;
                Ok(if outcome.address().is_some() {
                    CommandStatus::Success
                } else {
                    CommandStatus::Rejected
                })
            }
            Command::Create(fields) => self.submit_form(None, fields, out).await,
            Command::Edit { id, fields } => {
                let id = UserId::new(id)?;
                self.submit_form(Some(id), fields, out).await
            }
            Command::Delete { id } => {
                let id = UserId::new(id)?;
                match self.grid().delete(&id) {
                    Ok(()) => {
                        writeln!(out, "deleted {id}")?;
                        Ok(CommandStatus::Success)
                    }
                    Err(UserStoreError::NotFound { .. }) => {
                        writeln!(out, "user {id} not found")?;
                        Ok(CommandStatus::Rejected)
                    }
                    Err(error) => Err(error.into()),
                }
            }
            Command::Seed { seed, count } => self.seed(seed, count, out),
        }
    }

    async fn submit_form<W: Write>(
        &self,
        id: Option<UserId>,
        fields: UserFieldArgs,
        out: &mut W,
    ) -> Result<CommandStatus, ConsoleError> {
        let mut form = match self.form(id) {
            Ok(form) => form,
            Err(FormError::UserNotFound { id }) => {
                writeln!(out, "user {id} not found")?;
                return Ok(CommandStatus::Rejected);
            }
            Err(error) => return Err(error.into()),
        };
        fill_form(&mut form, fields, out).await?;

        match form.submit()? {
            SubmitOutcome::Committed { id, created } => {
                let verb = if created { "created" } else { "updated" };
                writeln!(out, "{verb} {id}")?;
                Ok(CommandStatus::Success)
            }
            SubmitOutcome::Invalid(outcome) => {
                render::errors(out, &outcome)?;
                Ok(CommandStatus::Rejected)
            }
        }
    }

    fn seed<W: Write>(
        &self,
        seed: u64,
        count: usize,
        out: &mut W,
    ) -> Result<CommandStatus, ConsoleError> {
        let drafts = generate_demo_users(seed, count)?
            .into_iter()
            .map(draft_from_demo);
        info!(seed, count, "seeding demo users");
        self.store_drafts(drafts, out)
    }

    /// Store every draft that passes the schema and report the tally.
    ///
    /// Any skipped draft turns the command into [`CommandStatus::Rejected`].
    fn store_drafts<W: Write>(
        &self,
        drafts: impl IntoIterator<Item = UserDraft>,
        out: &mut W,
    ) -> Result<CommandStatus, ConsoleError> {
        let mut created = 0_usize;
        let mut skipped = 0_usize;
        for draft in drafts {
            match resolve(&draft) {
                Ok(details) => {
                    self.store.create(details)?;
                    created += 1;
                }
                Err(outcome) => {
                    warn!(failing = outcome.len(), "generated user failed validation");
                    skipped += 1;
                }
            }
        }
        info!(created, skipped, "demo users seeded");
        if skipped == 0 {
            writeln!(out, "seeded {created} users")?;
            Ok(CommandStatus::Success)
        } else {
            writeln!(out, "seeded {created} users ({skipped} skipped)")?;
            Ok(CommandStatus::Rejected)
        }
    }
}

/// Apply flags to the form in screen order: personal fields, the postal code
/// and its blur, then whichever address fields are still enabled.
async fn fill_form<L, S, W>(
    form: &mut FormController<L, S>,
    fields: UserFieldArgs,
    out: &mut W,
) -> Result<(), ConsoleError>
where
    L: PostalCodeLookup,
    S: UserStore,
    W: Write,
{
    let UserFieldArgs {
        full_name,
        document,
        birth_date,
        email,
        email_verified,
        mobile,
        zip_code,
        address_name,
        number,
        complement,
        neighborhood,
        city,
        state,
    } = fields;

    let personal = [
        (UserField::FullName, full_name),
        (UserField::Document, document),
        (UserField::Email, email),
        (UserField::Mobile, mobile),
    ];
    for (field, value) in personal {
        if let Some(value) = value {
            form.set_field(field, value)?;
        }
    }
    if birth_date.is_some() {
        form.set_birth_date(birth_date);
    }
    if let Some(verified) = email_verified {
        form.set_email_verified(verified);
    }

    if let Some(zip_code) = zip_code {
        form.set_field(UserField::ZipCode, zip_code)?;
        form.blur_postal_code().await;
        render::postal_feedback(out, form)?;
    }

    let address = [
        (UserField::AddressName, address_name),
        (UserField::Number, number),
        (UserField::Complement, complement),
        (UserField::Neighborhood, neighborhood),
        (UserField::City, city),
    ];
    for (field, value) in address {
        let Some(value) = value else { continue };
        if form.is_enabled(field) {
            form.set_field(field, value)?;
        } else {
            writeln!(out, "{}: preenchido pelo CEP, valor ignorado", field.label())?;
        }
    }
    if let Some(state) = state {
        if form.is_enabled(UserField::State) {
            form.set_state(Some(state))?;
        } else {
            writeln!(
                out,
                "{}: preenchido pelo CEP, valor ignorado",
                UserField::State.label()
            )?;
        }
    }
    Ok(())
}

/// Working record for a generated user, as if typed into the form.
fn draft_from_demo(user: DemoUser) -> UserDraft {
    UserDraft {
        state: user.state.parse().ok(),
        full_name: user.full_name,
        document: user.document,
        birth_date: Some(user.birth_date),
        email: user.email,
        email_verified: Some(user.email_verified),
        mobile: user.mobile,
        zip_code: user.zip_code,
        address_name: user.address_name,
        number: user.number,
        complement: user.complement,
        neighborhood: user.neighborhood,
        city: user.city,
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
