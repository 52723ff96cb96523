//! Allow-lists and the interlock policy built from them.

use crate::core::{Direction, GearState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static EMPTY: AllowList = AllowList::empty();

/// Set of state names from which a command direction is accepted.
///
/// Names are matched against [`GearState::name`]. Names that match no state
/// are kept as given; they simply never permit anything.
///
/// # Example
///
/// ```rust
/// use landing_gear::core::GearState;
/// use landing_gear::interlock::AllowList;
///
/// let allow = AllowList::from_states([GearState::UpLocked]);
/// assert!(allow.permits(GearState::UpLocked));
/// assert!(!allow.permits(GearState::TransitioningDown));
///
/// let by_name: AllowList = ["DOWN_LOCKED"].into_iter().collect();
/// assert!(by_name.permits(GearState::DownLocked));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(BTreeSet<String>);

impl AllowList {
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn from_states<I>(states: I) -> Self
    where
        I: IntoIterator<Item = GearState>,
    {
        states.into_iter().map(|s| s.name()).collect()
    }

    /// Check whether a leg in `state` may accept the command.
    pub fn permits(&self, state: GearState) -> bool {
        self.0.contains(state.name())
    }

    /// Names that do not correspond to any [`GearState`].
    pub fn unknown_names(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|name| name.parse::<GearState>().is_err())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Interlock policy shared by every leg of a controller.
///
/// A direction whose list is `None` resolves to the empty allow-list, so
/// every command in that direction is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterlockPolicy {
    pub allow_down_from: Option<AllowList>,
    pub allow_up_from: Option<AllowList>,
}

impl InterlockPolicy {
    pub fn new(allow_down_from: AllowList, allow_up_from: AllowList) -> Self {
        Self {
            allow_down_from: Some(allow_down_from),
            allow_up_from: Some(allow_up_from),
        }
    }

    /// Resolve the allow-list for a command direction.
    pub fn allow_list(&self, direction: Direction) -> &AllowList {
        let list = match direction {
            Direction::Down => self.allow_down_from.as_ref(),
            Direction::Up => self.allow_up_from.as_ref(),
        };
        list.unwrap_or(&EMPTY)
    }
}

impl Default for InterlockPolicy {
    /// DOWN only from `UP_LOCKED`, UP only from `DOWN_LOCKED`.
    fn default() -> Self {
        Self::new(
            AllowList::from_states([GearState::UpLocked]),
            AllowList::from_states([GearState::DownLocked]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_canonical_sources() {
        let policy = InterlockPolicy::default();

        for state in GearState::ALL {
            assert_eq!(
                policy.allow_list(Direction::Down).permits(state),
                state == GearState::UpLocked
            );
            assert_eq!(
                policy.allow_list(Direction::Up).permits(state),
                state == GearState::DownLocked
            );
        }
    }

    #[test]
    fn omitted_direction_resolves_to_empty() {
        let policy = InterlockPolicy {
            allow_down_from: None,
            allow_up_from: Some(AllowList::from_states([GearState::DownLocked])),
        };

        assert!(policy.allow_list(Direction::Down).is_empty());
        assert!(!policy.allow_list(Direction::Up).is_empty());
    }

    #[test]
    fn names_match_exactly() {
        let allow: AllowList = ["up_locked", "UpLocked"].into_iter().collect();
        assert!(!allow.permits(GearState::UpLocked));
        assert_eq!(allow.unknown_names().count(), 2);
    }

    #[test]
    fn allow_list_serializes_as_array() {
        let allow = AllowList::from_states([GearState::UpLocked, GearState::DownLocked]);
        let json = serde_json::to_string(&allow).unwrap();
        assert_eq!(json, r#"["DOWN_LOCKED","UP_LOCKED"]"#);
    }
}
