//! Plain-text rendering of grid pages, records and form feedback.

use std::io::{self, Write};

use url::Url;

use crate::domain::ports::{PostalCodeLookup, UserStore};
use crate::domain::{
    FormController, GridPage, LookupOutcome, LookupState, POSTAL_CODE_NOT_FOUND_HINT, UserField,
    UserRecord, ValidationOutcome,
};

/// Write one grid page as tab-separated rows plus a pagination footer.
pub fn page<W: Write>(out: &mut W, page: &GridPage) -> io::Result<()> {
    writeln!(out, "ID\tNome\tSobrenome\tCPF\tIdade\tE-mail\tCelular\tWhatsApp")?;
    for row in &page.rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.first_name,
            row.last_name,
            row.document,
            row.age.map(|age| age.to_string()).unwrap_or_default(),
            row.email,
            row.mobile,
            row.whatsapp.as_ref().map(Url::as_str).unwrap_or_default(),
        )?;
    }
    let pages = page.page_count().max(1);
    writeln!(
        out,
        "page {} of {pages} ({} users, {} per page)",
        page.page.saturating_add(1),
        page.total,
        page.page_size
    )
}

/// Write every field of `record`, one labelled line each.
pub fn record<W: Write>(out: &mut W, record: &UserRecord) -> io::Result<()> {
    let details = record.details();
    writeln!(out, "ID: {}", record.id())?;
    let lines = [
        (UserField::FullName, details.full_name().to_owned()),
        (UserField::Document, details.document().to_owned()),
        (
            UserField::BirthDate,
            details
                .birth_date()
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
        ),
        (UserField::Email, details.email().to_owned()),
        (
            UserField::EmailVerified,
            if details.email_verified() { "sim" } else { "não" }.to_owned(),
        ),
        (UserField::Mobile, details.mobile().to_owned()),
        (UserField::ZipCode, details.zip_code().masked()),
        (UserField::AddressName, details.address_name().to_owned()),
        (UserField::Number, details.number().to_owned()),
        (UserField::Complement, details.complement().to_owned()),
        (UserField::Neighborhood, details.neighborhood().to_owned()),
        (UserField::City, details.city().to_owned()),
        (
            UserField::State,
            format!("{} ({})", details.state().name(), details.state().code()),
        ),
    ];
    for (field, value) in lines {
        writeln!(out, "{}: {value}", field.label())?;
    }
    Ok(())
}

/// Write the outcome of a standalone lookup.
pub fn lookup<W: Write>(out: &mut W, outcome: &LookupOutcome) -> io::Result<()> {
    match outcome {
        LookupOutcome::Found(address) => writeln!(
            out,
            "{}: {}, {}, {} - {}",
            address.postal_code.masked(),
            address.address_name,
            address.neighborhood,
            address.city,
            address.state.code()
        ),
        LookupOutcome::NotFound => writeln!(out, "{POSTAL_CODE_NOT_FOUND_HINT}"),
    }
}

/// Write the postal indicator shown next to the CEP input after a blur.
pub fn postal_feedback<W, L, S>(out: &mut W, form: &FormController<L, S>) -> io::Result<()>
where
    W: Write,
    L: PostalCodeLookup,
    S: UserStore,
{
    match form.lookup_state() {
        LookupState::Found => {
            let draft = form.draft();
            writeln!(
                out,
                "CEP verificado: {}, {}, {}",
                draft.address_name, draft.neighborhood, draft.city
            )
        }
        LookupState::NotFound => {
            writeln!(out, "CEP: {}", form.postal_code_hint().unwrap_or_default())
        }
        LookupState::Idle | LookupState::Pending => Ok(()),
    }
}

/// Write one line per failing field.
pub fn errors<W: Write>(out: &mut W, outcome: &ValidationOutcome) -> io::Result<()> {
    for (field, error) in outcome.iter() {
        writeln!(out, "{}: {error}", field.label())?;
    }
    Ok(())
}
