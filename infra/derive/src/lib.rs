#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the Luthier crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! luthier-derive = { path = "../../infra/derive" }
//! thiserror = "2"
//! ```
//!
//! The generated code names `::thiserror`, so consumers must depend on it directly.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a structured error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext<T>` with `.context(...)`, implemented for `Result<T, Name>` and, for every
///   variant holding a source, for `Result<T, Source>`.
/// * `From<Source>` for variants that hold a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * `<Name>Kind`, a fieldless `Copy` mirror of the variants, and `Name::kind()`.
///   Callers match on the kind when they care about *which* failure happened and not its payload.
/// * A private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant has named fields.
/// 3. A context field must be typed `Option<Cow<'static, str>>`.
/// 4. Variants carrying a source must also carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use luthier_derive::luthier_error;
/// use std::borrow::Cow;
///
/// #[luthier_error]
/// pub enum LoadError {
///     #[error("Missing entry{}: {name}", format_context(.context))]
///     Missing { name: String, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn check(err: &LoadError) -> bool {
///     err.kind() == LoadErrorKind::Missing
/// }
/// ```
#[proc_macro_attribute]
pub fn luthier_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
