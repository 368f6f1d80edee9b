use std::borrow::Borrow;
use std::str::FromStr;

use serde::Serialize;

use crate::CoreError;

/// A single dashboard filter: either every value (`All`) or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T> Choice<T> {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// The concrete value, if one is selected.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }

    /// Whether a record field passes this filter.
    ///
    /// `All` admits everything, including missing values. A concrete choice
    /// only admits an equal, present value.
    pub fn admits<Q>(&self, field: Option<&Q>) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => field.is_some_and(|value| wanted.borrow() == value),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

/// `"All"` (any case) parses to [`Choice::All`]; anything else must parse as `T`.
impl<T> FromStr for Choice<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Choice::All);
        }
        trimmed
            .parse::<T>()
            .map(Choice::Only)
            .map_err(|e| CoreError::InvalidChoice {
                value: trimmed.to_string(),
                reason: e.to_string(),
            })
    }
}

/// The four dashboard filters for one rendering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub location: Choice<String>,
    pub category: Choice<String>,
    pub year: Choice<i32>,
    pub platform: Choice<String>,
}

impl FilterSelection {
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Choice::Only(location.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Choice::Only(category.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Choice::Only(year);
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Choice::Only(platform.into());
        self
    }

    /// Set one filter from a `key` / `value` pair, e.g. `("year", "2023")`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownFilterKey` for keys other than `location`,
    /// `category`, `year` and `platform`, and `CoreError::InvalidChoice` when
    /// the year is neither `All` nor an integer.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key.trim().to_lowercase().as_str() {
            "location" | "region" => self.location = value.parse()?,
            "category" => self.category = value.parse()?,
            "year" => self.year = value.parse()?,
            "platform" => self.platform = value.parse()?,
            other => return Err(CoreError::UnknownFilterKey(other.to_string())),
        }
        Ok(())
    }
}

impl std::fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "location={} category={} year={} platform={}",
            self.location, self.category, self.year, self.platform
        )
    }
}
