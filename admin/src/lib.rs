//! User record administration.
//!
//! The crate models a small user registry: a validated create/edit form with
//! Brazilian postal-code autofill, a paged list view, and persistence in
//! device-local key-value storage. The domain is transport-agnostic; the
//! ViaCEP HTTP client and the directory-backed storage live in
//! [`outbound`], the `user-admin` console in [`inbound`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
mod test_support;
