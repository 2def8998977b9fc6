//! Domain primitives, services and ports.
//!
//! Purpose: model user records, their validation schema, the postal-code
//! autofill workflow and the list view, independent of any transport or
//! storage technology. Adapters live in `crate::outbound` and
//! `crate::inbound`; they meet the domain through the traits in [`ports`].
//!
//! Public surface:
//! - `UserId`, `UserDetails`, `UserRecord`: identity and validated record.
//! - `UserDraft`, `validate`, `resolve`: working record and its schema.
//! - `PostalLookupClient`, `LookupOutcome`: Found/NotFound postal lookups.
//! - `FormController`: create/edit session state machine.
//! - `LocalUserStore`: whole-collection store over key-value storage.
//! - `UserGrid`: paged rows and grid actions.

pub mod form;
pub mod ports;
pub mod postal_code;
pub mod postal_lookup;
pub mod state;
pub mod user;
pub mod user_grid;
pub mod user_store;
pub mod validation;

pub use self::form::{
    FormController, FormError, FormMode, LookupCompletion, LookupState, LookupTicket,
    POSTAL_CODE_NOT_FOUND_HINT, SubmitOutcome,
};
pub use self::postal_code::{AddressLookupResult, POSTAL_CODE_DIGITS, PostalCode, digits_only};
pub use self::postal_lookup::{DEFAULT_LOOKUP_TIMEOUT, LookupOutcome, PostalLookupClient};
pub use self::state::{BrazilianState, UnknownStateCode};
pub use self::user::{UserDetails, UserId, UserIdValidationError, UserRecord};
pub use self::user_grid::{
    DEFAULT_PAGE_SIZE, GridPage, GridRow, PAGE_SIZES, PageSize, UnsupportedPageSize, UserGrid,
    age_on, whatsapp_link,
};
pub use self::user_store::{LocalUserStore, USERS_STORAGE_KEY};
pub use self::validation::{
    FieldError, MOBILE_COUNTRY_CODE, UserDraft, UserField, ValidationOutcome, is_valid_email,
    normalize_mobile, resolve, validate,
};
