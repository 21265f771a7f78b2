use fxhash::FxHashMap;
use luthier_domain::{DefaultTimeGrain, Granularity};
use std::borrow::Cow;
use std::fmt;

#[luthier_derive::luthier_error]
pub enum GranularityError {
    #[error("Unknown granularity '{name}'{}", format_context(.context))]
    Unknown { name: String, context: Option<Cow<'static, str>> },
}

/// Turns configured granularity names into [`Granularity`] values.
pub trait GranularityParser: fmt::Debug + Send + Sync {
    /// # Errors
    /// [`GranularityError::Unknown`] when `name` is not recognized.
    fn parse_granularity(&self, name: &str) -> Result<Granularity, GranularityError>;
}

/// Knows `all` plus every [`DefaultTimeGrain`]; further aliases can be added.
///
/// Names are matched case-insensitively after trimming.
#[derive(Debug, Clone)]
pub struct StandardGranularityParser {
    names: FxHashMap<String, Granularity>,
}

impl StandardGranularityParser {
    #[must_use]
    pub fn new() -> Self {
        let names = DefaultTimeGrain::ALL
            .into_iter()
            .map(Granularity::from)
            .chain([Granularity::All])
            .map(|granularity| (granularity.name().to_owned(), granularity))
            .collect();
        Self { names }
    }

    /// Registers an extra name, e.g. `daily` for [`DefaultTimeGrain::Day`].
    #[must_use]
    pub fn with_alias(mut self, alias: &str, granularity: impl Into<Granularity>) -> Self {
        self.names.insert(alias.trim().to_lowercase(), granularity.into());
        self
    }
}

impl Default for StandardGranularityParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GranularityParser for StandardGranularityParser {
    fn parse_granularity(&self, name: &str) -> Result<Granularity, GranularityError> {
        self.names
            .get(&name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| GranularityError::Unknown { name: name.to_owned(), context: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grains_and_all() {
        let parser = StandardGranularityParser::new();
        assert_eq!(parser.parse_granularity(" Day ").unwrap(), DefaultTimeGrain::Day.into());
        assert_eq!(parser.parse_granularity("ALL").unwrap(), Granularity::All);
    }

    #[test]
    fn aliases_extend_the_vocabulary() {
        let parser = StandardGranularityParser::new().with_alias("Daily", DefaultTimeGrain::Day);
        assert_eq!(parser.parse_granularity("daily").unwrap(), Granularity::Grain(DefaultTimeGrain::Day));
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = StandardGranularityParser::new().parse_granularity("fortnight").unwrap_err();
        assert_eq!(err.kind(), GranularityErrorKind::Unknown);
        assert_eq!(err.to_string(), "Unknown granularity 'fortnight'");
    }
}
