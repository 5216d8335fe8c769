use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::{env, fmt::Display, str::FromStr};
use tracing::info;

pub const MARKERS_VARIABLE: &str = "API_TEST_MARKERS";

lazy_static! {
    static ref MARKER_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
    static ref TERM_REGEX: Regex =
        Regex::new(r"^(?:(?P<not>!|not\s+)\s*)?(?P<marker>[a-z][a-z0-9_]*)$").unwrap();
}

/// A test category. Anything that is not one of the built-in categories is a feature tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    Smoke,
    Regression,
    Negative,
    Boundary,
    Contract,
    Performance,
    Feature(String),
}

impl Marker {
    pub fn is_valid_name(name: &str) -> bool {
        MARKER_REGEX.is_match(name)
    }

    pub fn name(&self) -> &str {
        match self {
            Marker::Smoke => "smoke",
            Marker::Regression => "regression",
            Marker::Negative => "negative",
            Marker::Boundary => "boundary",
            Marker::Contract => "contract",
            Marker::Performance => "performance",
            Marker::Feature(name) => name,
        }
    }
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();

        Ok(match name {
            "smoke" => Marker::Smoke,
            "regression" => Marker::Regression,
            "negative" => Marker::Negative,
            "boundary" => Marker::Boundary,
            "contract" => Marker::Contract,
            "performance" => Marker::Performance,
            _ if Self::is_valid_name(name) => Marker::Feature(name.to_string()),
            _ => return Err(Error::InvalidMarkerExpression(name.to_string())),
        })
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which tests to run, e.g. `smoke,regression` or `all,!performance`.
///
/// Plain names include, `!name` and `not name` exclude and `all` includes everything. A test runs
/// when none of its markers is excluded and either nothing is explicitly included or one of its
/// markers is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkerSelection {
    include_all: bool,
    include: Vec<Marker>,
    exclude: Vec<Marker>,
}

impl MarkerSelection {
    pub fn all() -> Self {
        Self {
            include_all: true,
            ..Self::default()
        }
    }

    pub fn parse(expression: &str) -> Result<Self, Error> {
        let mut selection = Self::default();

        for term in expression.split(',').map(str::trim) {
            if term.is_empty() {
                continue;
            }

            let captures = TERM_REGEX
                .captures(term)
                .ok_or_else(|| Error::InvalidMarkerExpression(expression.to_string()))?;
            let marker = &captures["marker"];

            if marker == "not" {
                return Err(Error::InvalidMarkerExpression(expression.to_string()));
            }

            if captures.name("not").is_some() {
                selection.exclude.push(marker.parse()?);
            } else if marker == "all" {
                selection.include_all = true;
            } else {
                selection.include.push(marker.parse()?);
            }
        }

        if !selection.include_all && selection.include.is_empty() && selection.exclude.is_empty() {
            return Err(Error::InvalidMarkerExpression(expression.to_string()));
        }

        Ok(selection)
    }

    /// Reads `API_TEST_MARKERS`; `None` when it is not set.
    pub fn from_env() -> Result<Option<Self>, Error> {
        match env::var(MARKERS_VARIABLE) {
            Ok(expression) => Self::parse(&expression).map(Some),
            Err(_) => Ok(None),
        }
    }

    pub fn matches(&self, markers: &[Marker]) -> bool {
        if markers.iter().any(|marker| self.exclude.contains(marker)) {
            return false;
        }

        self.include_all
            || self.include.is_empty()
            || markers.iter().any(|marker| self.include.contains(marker))
    }
}

/// Decides whether the test `test_name` tagged with `markers` should run in this process.
///
/// Live tests only run when a selection is given through `API_TEST_MARKERS`.
pub fn is_selected(test_name: &str, markers: &[&str]) -> Result<bool, Error> {
    let markers = markers
        .iter()
        .map(|marker| marker.parse())
        .collect::<Result<Vec<Marker>, _>>()?;

    let selected = match MarkerSelection::from_env()? {
        Some(selection) => selection.matches(&markers),
        None => {
            info!(
                "Skipping {}: set {} (e.g. \"all\" or \"smoke\") to run live API tests",
                test_name, MARKERS_VARIABLE
            );
            return Ok(false);
        }
    };

    if !selected {
        info!("Skipping {}: markers {:?} not selected", test_name, markers);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::{Marker, MarkerSelection};
    use crate::error::Error;

    fn markers(names: &[&str]) -> Vec<Marker> {
        names.iter().map(|name| name.parse().unwrap()).collect()
    }

    #[test]
    fn test_parses_builtin_markers_and_feature_tags() {
        assert_eq!("smoke".parse::<Marker>().unwrap(), Marker::Smoke);
        assert_eq!("contract".parse::<Marker>().unwrap(), Marker::Contract);
        assert_eq!(
            "user_retrieval".parse::<Marker>().unwrap(),
            Marker::Feature(String::from("user_retrieval"))
        );
        assert!(matches!(
            "Smoke Test".parse::<Marker>(),
            Err(Error::InvalidMarkerExpression(_))
        ));
    }

    #[test]
    fn test_includes_match_any_marker() {
        let selection = MarkerSelection::parse("smoke, regression").unwrap();

        assert!(selection.matches(&markers(&["smoke", "user_retrieval"])));
        assert!(selection.matches(&markers(&["regression"])));
        assert!(!selection.matches(&markers(&["negative", "error_scenarios"])));
    }

    #[test]
    fn test_exclusions_win() {
        let selection = MarkerSelection::parse("all, !performance").unwrap();

        assert!(selection.matches(&markers(&["contract"])));
        assert!(!selection.matches(&markers(&["api_validation", "performance"])));

        let only_exclusions = MarkerSelection::parse("not boundary").unwrap();
        assert!(only_exclusions.matches(&markers(&["smoke"])));
        assert!(!only_exclusions.matches(&markers(&["boundary", "user_creation"])));
    }

    #[test]
    fn test_all_selects_everything() {
        let selection = MarkerSelection::parse("all").unwrap();

        assert_eq!(selection, MarkerSelection::all());
        assert!(selection.matches(&markers(&["negative"])));
        assert!(selection.matches(&[]));
    }

    #[test]
    fn test_invalid_expressions() {
        for expression in ["", " , ", "smoke;regression", "!", "not"] {
            assert!(
                MarkerSelection::parse(expression).is_err(),
                "\"{}\" should be rejected",
                expression
            );
        }
    }
}
