//! Paged list view over the record store.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::ports::{UserStore, UserStoreError};
use super::{UserId, UserRecord, digits_only};

/// Page sizes offered by the grid.
pub const PAGE_SIZES: [usize; 5] = [10, 15, 25, 50, 100];

/// Page size used when none is chosen.
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize(10);

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Rejected page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page size {requested} is not one of 10, 15, 25, 50 or 100")]
pub struct UnsupportedPageSize {
    /// Size that was asked for.
    pub requested: usize,
}

/// One of the [`PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Rows per page.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        DEFAULT_PAGE_SIZE
    }
}

impl TryFrom<usize> for PageSize {
    type Error = UnsupportedPageSize;

    fn try_from(requested: usize) -> Result<Self, Self::Error> {
        if PAGE_SIZES.contains(&requested) {
            Ok(Self(requested))
        } else {
            Err(UnsupportedPageSize { requested })
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row rendered by the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Record identity, used by the edit and delete actions.
    pub id: UserId,
    /// First token of the full name.
    pub first_name: String,
    /// Last token of the full name.
    pub last_name: String,
    /// CPF as stored.
    pub document: String,
    /// Whole years; absent without a birth date.
    pub age: Option<u32>,
    /// E-mail as stored.
    pub email: String,
    /// Normalised mobile number.
    pub mobile: String,
    /// Call action target; absent when the mobile has no digits.
    pub whatsapp: Option<Url>,
}

/// One page of rows plus the totals needed for pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPage {
    /// Rows on this page.
    pub rows: Vec<GridRow>,
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page.
    pub page_size: PageSize,
    /// Records in the whole store.
    pub total: usize,
}

impl GridPage {
    /// Number of pages needed for [`Self::total`] records.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size.get())
    }
}

/// Whole years between `birth_date` and `today`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use user_admin::domain::age_on;
///
/// let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
/// let before = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
/// let on = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
/// assert_eq!(age_on(birth, before), Some(29));
/// assert_eq!(age_on(birth, on), Some(30));
/// ```
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(birth_date)
}

/// WhatsApp chat link for a stored mobile number.
pub fn whatsapp_link(mobile: &str) -> Option<Url> {
    let digits = digits_only(mobile);
    if digits.is_empty() {
        return None;
    }
    Url::parse(&format!("{WHATSAPP_BASE}{digits}")).ok()
}

fn name_parts(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    let last = tokens.next_back().unwrap_or(first);
    (first.to_owned(), last.to_owned())
}

/// Grid service: renders pages and runs the row actions.
pub struct UserGrid<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> UserGrid<S>
where
    S: UserStore,
{
    /// Create a grid over `store`, computing ages against `clock`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Build the row shown for `record`.
    pub fn row(&self, record: &UserRecord) -> GridRow {
        let details = record.details();
        let today = self.clock.local().date_naive();
        let (first_name, last_name) = name_parts(details.full_name());
        GridRow {
            id: record.id().clone(),
            first_name,
            last_name,
            document: details.document().to_owned(),
            age: details.birth_date().and_then(|birth| age_on(birth, today)),
            email: details.email().to_owned(),
            mobile: details.mobile().to_owned(),
            whatsapp: whatsapp_link(details.mobile()),
        }
    }

    /// Rows of zero-based `page`; empty past the last page.
    pub fn page(&self, page: usize, page_size: PageSize) -> Result<GridPage, UserStoreError> {
        let records = self.store.list()?;
        let total = records.len();
        let rows = records
            .iter()
            .skip(page.saturating_mul(page_size.get()))
            .take(page_size.get())
            .map(|record| self.row(record))
            .collect();
        Ok(GridPage {
            rows,
            page,
            page_size,
            total,
        })
    }

    /// Delete action.
    pub fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        self.store.delete(id)?;
        debug!(user_id = %id, "user deleted from grid");
        Ok(())
    }

    /// Call action: the WhatsApp link for the record `id`.
    pub fn call_link(&self, id: &UserId) -> Result<Option<Url>, UserStoreError> {
        let record = self
            .store
            .find(id)?
            .ok_or_else(|| UserStoreError::not_found(id.as_str()))?;
        Ok(whatsapp_link(record.details().mobile()))
    }
}
