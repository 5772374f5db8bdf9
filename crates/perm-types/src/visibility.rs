use serde::{Deserialize, Serialize};
use std::fmt;

/// Restrictiveness of a tab visibility, ordered from most to least restrictive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisibilityLevel {
    Hidden,
    Available,
    Visible,
}

/// A tab visibility token as written in a document.
///
/// Permission sets use `Visible` / `Available` / `None`, profiles use
/// `DefaultOn` / `DefaultOff` / `Hidden`. Any other token is carried as
/// [`TabVisibility::Other`] so documents round-trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabVisibility {
    Visible,
    Available,
    /// Written as `None`
    NoAccess,
    DefaultOn,
    DefaultOff,
    Hidden,
    Other(String),
}

impl TabVisibility {
    pub fn as_str(&self) -> &str {
        match self {
            TabVisibility::Visible => "Visible",
            TabVisibility::Available => "Available",
            TabVisibility::NoAccess => "None",
            TabVisibility::DefaultOn => "DefaultOn",
            TabVisibility::DefaultOff => "DefaultOff",
            TabVisibility::Hidden => "Hidden",
            TabVisibility::Other(token) => token,
        }
    }

    /// Restrictiveness of a known token; `None` for unrecognized ones.
    pub fn level(&self) -> Option<VisibilityLevel> {
        match self {
            TabVisibility::Visible | TabVisibility::DefaultOn => Some(VisibilityLevel::Visible),
            TabVisibility::Available | TabVisibility::DefaultOff => {
                Some(VisibilityLevel::Available)
            }
            TabVisibility::NoAccess | TabVisibility::Hidden => Some(VisibilityLevel::Hidden),
            TabVisibility::Other(_) => None,
        }
    }

    /// True only for the profile `Hidden` token, the one value filters drop.
    pub fn is_hidden(&self) -> bool {
        matches!(self, TabVisibility::Hidden)
    }

    /// Translate profile vocabulary into permission-set vocabulary.
    pub fn to_permission_set(&self) -> Self {
        match self {
            TabVisibility::DefaultOn => TabVisibility::Visible,
            TabVisibility::DefaultOff => TabVisibility::Available,
            other => other.clone(),
        }
    }

    /// Reconcile with a newly seen value.
    ///
    /// `DefaultOn` is replaced by any different value, `DefaultOff` only by
    /// `Hidden`; every other accumulated value stays as it is.
    pub fn restrict(self, seen: TabVisibility) -> TabVisibility {
        match self {
            TabVisibility::DefaultOn if seen != TabVisibility::DefaultOn => seen,
            TabVisibility::DefaultOff if seen.is_hidden() => seen,
            current => current,
        }
    }
}

impl From<&str> for TabVisibility {
    fn from(token: &str) -> Self {
        match token {
            "Visible" => TabVisibility::Visible,
            "Available" => TabVisibility::Available,
            "None" => TabVisibility::NoAccess,
            "DefaultOn" => TabVisibility::DefaultOn,
            "DefaultOff" => TabVisibility::DefaultOff,
            "Hidden" => TabVisibility::Hidden,
            other => TabVisibility::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TabVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_vocabularies() {
        for token in ["Visible", "Available", "None", "DefaultOn", "DefaultOff", "Hidden"] {
            let parsed = TabVisibility::from(token);
            assert_eq!(parsed.as_str(), token);
            assert!(parsed.level().is_some());
        }
    }

    #[test]
    fn unknown_tokens_are_kept_verbatim() {
        let parsed = TabVisibility::from("visible");
        assert_eq!(parsed, TabVisibility::Other("visible".into()));
        assert_eq!(parsed.to_string(), "visible");
        assert_eq!(parsed.level(), None);
        assert!(!parsed.is_hidden());
        assert_eq!(parsed.to_permission_set(), parsed);
    }

    #[test]
    fn levels_are_ordered_by_restrictiveness() {
        assert!(VisibilityLevel::Hidden < VisibilityLevel::Available);
        assert!(VisibilityLevel::Available < VisibilityLevel::Visible);
        assert_eq!(TabVisibility::DefaultOn.level(), TabVisibility::Visible.level());
        assert_eq!(TabVisibility::NoAccess.level(), Some(VisibilityLevel::Hidden));
    }

    #[test]
    fn only_the_hidden_token_is_hidden() {
        assert!(TabVisibility::Hidden.is_hidden());
        assert!(!TabVisibility::NoAccess.is_hidden());
        assert!(!TabVisibility::DefaultOff.is_hidden());
    }

    #[test]
    fn default_on_yields_to_any_other_value() {
        assert_eq!(
            TabVisibility::DefaultOn.restrict(TabVisibility::DefaultOff),
            TabVisibility::DefaultOff
        );
        assert_eq!(
            TabVisibility::DefaultOn.restrict(TabVisibility::Hidden),
            TabVisibility::Hidden
        );
        assert_eq!(
            TabVisibility::DefaultOn.restrict(TabVisibility::NoAccess),
            TabVisibility::NoAccess
        );
        assert_eq!(
            TabVisibility::DefaultOn.restrict(TabVisibility::DefaultOn),
            TabVisibility::DefaultOn
        );
    }

    #[test]
    fn default_off_only_yields_to_hidden() {
        assert_eq!(
            TabVisibility::DefaultOff.restrict(TabVisibility::DefaultOn),
            TabVisibility::DefaultOff
        );
        assert_eq!(
            TabVisibility::DefaultOff.restrict(TabVisibility::NoAccess),
            TabVisibility::DefaultOff
        );
        assert_eq!(
            TabVisibility::DefaultOff.restrict(TabVisibility::Hidden),
            TabVisibility::Hidden
        );
    }

    #[test]
    fn other_values_never_change() {
        for seen in [
            TabVisibility::DefaultOn,
            TabVisibility::DefaultOff,
            TabVisibility::Hidden,
        ] {
            assert_eq!(TabVisibility::Hidden.restrict(seen.clone()), TabVisibility::Hidden);
            assert_eq!(
                TabVisibility::NoAccess.restrict(seen),
                TabVisibility::NoAccess
            );
        }
    }

    #[test]
    fn maps_profile_vocabulary_to_permission_set() {
        assert_eq!(TabVisibility::DefaultOn.to_permission_set(), TabVisibility::Visible);
        assert_eq!(TabVisibility::DefaultOff.to_permission_set(), TabVisibility::Available);
        assert_eq!(TabVisibility::Hidden.to_permission_set(), TabVisibility::Hidden);
        assert_eq!(TabVisibility::Visible.to_permission_set(), TabVisibility::Visible);
    }
}
