//! Admission-control token contract.
//!
//! A token represents one outstanding request against some rate-limiting counters. Binding
//! reserves the counters, unbinding gives them back. Policies live in the web layer; this
//! module only fixes the contract and the scoped-release helper.

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

#[luthier_derive::luthier_error]
pub enum TokenError {
    #[error("Request token rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Resource representing an outstanding request.
pub trait RequestToken {
    /// `true` when the counters are currently held.
    fn is_bound(&self) -> bool;

    /// Reserves the counters. Returns `true` when bound (or already bound), `false` when rejected.
    fn bind(&mut self) -> bool;

    /// Releases the counters. Calling it on an unbound token is a no-op.
    fn unbind(&mut self);
}

/// Holds a bound token and unbinds it when dropped.
#[derive(Debug)]
pub struct TokenGuard<T: RequestToken> {
    token: T,
}

impl<T: RequestToken> TokenGuard<T> {
    /// Binds `token` and guards it.
    ///
    /// # Errors
    /// Returns [`TokenError::Rejected`] when the token refuses to bind; the token is dropped.
    pub fn acquire(mut token: T) -> Result<Self, TokenError> {
        if token.bind() {
            Ok(Self { token })
        } else {
            Err(TokenError::Rejected {
                message: std::any::type_name::<T>().into(),
                context: Some("bind() returned false".into()),
            })
        }
    }

    /// Unbinds now instead of at scope end.
    pub fn release(mut self) {
        self.token.unbind();
    }
}

impl<T: RequestToken> Deref for TokenGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.token
    }
}

impl<T: RequestToken> DerefMut for TokenGuard<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.token
    }
}

impl<T: RequestToken> Drop for TokenGuard<T> {
    fn drop(&mut self) {
        if self.token.is_bound() {
            self.token.unbind();
        }
    }
}
