//! # Park Errors
//!
//! Every failure of the park is one [`ParkError`] variant carrying the namespace and the entity or
//! discriminator involved. Errors raised deep inside a recursive build reach the caller unchanged.

use luthier_domain::Namespace;
use std::borrow::Cow;
use std::sync::Arc;

pub type ParkResult<T> = Result<T, ParkError>;

#[luthier_derive::luthier_error]
pub enum ParkError {
    /// The namespace document is unreadable or is not a JSON object of entries.
    #[error("Config source error in {namespace}{}: {message}", format_context(.context))]
    ConfigSource {
        namespace: Namespace,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("No configuration entry {namespace}/{name}{}", format_context(.context))]
    ConfigNotFound { namespace: Namespace, name: Arc<str>, context: Option<Cow<'static, str>> },

    /// No factory, unsupported marker, or fallback matches the discriminator.
    #[error("Unknown type '{discriminator}' in {namespace}{}", format_context(.context))]
    UnknownType {
        namespace: Namespace,
        discriminator: Arc<str>,
        context: Option<Cow<'static, str>>,
    },

    /// The discriminator is known but deliberately not implemented.
    #[error("Type '{discriminator}' is not supported in {namespace}{}", format_context(.context))]
    UnsupportedCapability {
        namespace: Namespace,
        discriminator: Arc<str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Invalid field '{field}' of {namespace}/{name}{}: {message}", format_context(.context))]
    Validation {
        namespace: Namespace,
        name: Arc<str>,
        field: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// `name` was requested while its own construction was still in progress.
    #[error("Cyclic dependency on {namespace}/{name}{}", format_context(.context))]
    CyclicDependency { namespace: Namespace, name: Arc<str>, context: Option<Cow<'static, str>> },

    #[error("{namespace}/{name} is already published{}", format_context(.context))]
    Duplicate { namespace: Namespace, name: Arc<str>, context: Option<Cow<'static, str>> },

    /// Escape hatch for custom factories.
    #[error("Internal park error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ParkError {
    pub fn validation(
        namespace: Namespace,
        name: impl Into<Arc<str>>,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Validation {
            namespace,
            name: name.into(),
            field: field.into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn not_found(namespace: Namespace, name: impl Into<Arc<str>>) -> Self {
        Self::ConfigNotFound { namespace, name: name.into(), context: None }
    }

    /// The namespace the failure belongs to, when it has one.
    #[must_use]
    pub const fn namespace(&self) -> Option<Namespace> {
        match self {
            Self::ConfigSource { namespace, .. }
            | Self::ConfigNotFound { namespace, .. }
            | Self::UnknownType { namespace, .. }
            | Self::UnsupportedCapability { namespace, .. }
            | Self::Validation { namespace, .. }
            | Self::CyclicDependency { namespace, .. }
            | Self::Duplicate { namespace, .. } => Some(*namespace),
            Self::Internal { .. } => None,
        }
    }
}
