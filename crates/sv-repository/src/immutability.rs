//! Per-name write policy.
//!
//! The write policy of a key is a pure function of its name: a name carrying
//! the without-dates prefix accepts a single write, a name carrying the
//! with-dates prefix accepts one write per date, any other name is an upsert.
//! The without-dates prefix is tested first because it usually extends the
//! with-dates one (`$$` vs `$`).

use sv_core::ensure;
use sv_core::errors::Result;

use crate::config::RepositoryConfig;
use crate::key::normalize;

/// Write policy of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmutabilityClass {
    /// Writes insert or replace the entry at their date.
    Mutable,
    /// The first write is stored at the epoch; every later write is rejected.
    ImmutableWithoutDates,
    /// A write is rejected only if its date is already present.
    ImmutableWithDates,
}

impl ImmutabilityClass {
    /// Whether the class rejects any overwrite.
    pub fn is_immutable(self) -> bool {
        !matches!(self, ImmutabilityClass::Mutable)
    }
}

/// Classifies names by prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutabilityClassifier {
    without_dates_prefix: String,
    with_dates_prefix: String,
}

impl ImmutabilityClassifier {
    /// Create a classifier; prefixes are normalized like names.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if either
    /// prefix is blank.
    pub fn new(without_dates_prefix: &str, with_dates_prefix: &str) -> Result<Self> {
        let classifier = Self {
            without_dates_prefix: normalize(without_dates_prefix),
            with_dates_prefix: normalize(with_dates_prefix),
        };
        ensure!(
            !classifier.without_dates_prefix.is_empty(),
            "immutable-without-dates prefix must not be blank"
        );
        ensure!(
            !classifier.with_dates_prefix.is_empty(),
            "immutable-with-dates prefix must not be blank"
        );
        Ok(classifier)
    }

    /// Create a classifier from a repository configuration.
    pub fn from_config(config: &RepositoryConfig) -> Result<Self> {
        Self::new(
            &config.immutable_without_dates_prefix,
            &config.immutable_with_dates_prefix,
        )
    }

    /// Classify `name`.
    pub fn classify(&self, name: &str) -> ImmutabilityClass {
        let name = normalize(name);
        if name.starts_with(&self.without_dates_prefix) {
            ImmutabilityClass::ImmutableWithoutDates
        } else if name.starts_with(&self.with_dates_prefix) {
            ImmutabilityClass::ImmutableWithDates
        } else {
            ImmutabilityClass::Mutable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ImmutabilityClassifier {
        ImmutabilityClassifier::new("$$", "$").unwrap()
    }

    #[test]
    fn longer_prefix_wins() {
        let c = classifier();
        assert_eq!(c.classify("$$start date"), ImmutabilityClass::ImmutableWithoutDates);
        assert_eq!(c.classify("$rate"), ImmutabilityClass::ImmutableWithDates);
        assert_eq!(c.classify("rate"), ImmutabilityClass::Mutable);
        assert_eq!(c.classify("rate $"), ImmutabilityClass::Mutable);
    }

    #[test]
    fn classification_ignores_padding() {
        let c = classifier();
        assert_eq!(c.classify("  $$x"), ImmutabilityClass::ImmutableWithoutDates);
        assert_eq!(c.classify(" $x"), ImmutabilityClass::ImmutableWithDates);
    }

    #[test]
    fn is_immutable() {
        assert!(!ImmutabilityClass::Mutable.is_immutable());
        assert!(ImmutabilityClass::ImmutableWithDates.is_immutable());
        assert!(ImmutabilityClass::ImmutableWithoutDates.is_immutable());
    }

    #[test]
    fn blank_prefixes_are_rejected() {
        assert!(ImmutabilityClassifier::new("", "$").is_err());
        assert!(ImmutabilityClassifier::new("$$", " ").is_err());
    }
}
