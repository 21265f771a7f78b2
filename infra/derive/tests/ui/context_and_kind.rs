use luthier_derive::luthier_error;
use std::borrow::Cow;

#[luthier_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing entry{}: {name}", format_context(.context))]
    Missing { name: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: DemoError = "boom".into();
    assert_eq!(err.kind(), DemoErrorKind::Internal);
    assert_eq!(DemoErrorKind::Missing.as_str(), "Missing");
}
