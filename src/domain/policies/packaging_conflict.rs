//! Packaging Conflict Policy
//!
//! Decides which candidate occupies a resource bundle slot when several target
//! the same relative path. Losing candidates are dropped without failing the
//! packaging step.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::PackagedResource;

/// Precedence rule for duplicate bundle paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackagingConflictPolicy {
    /// The later candidate replaces the earlier one
    #[default]
    LastWins,
    /// The earlier candidate is kept; later duplicates are dropped
    FirstWins,
}

/// What happened to a staged candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// Slot was empty
    Claimed,
    /// Candidate took the slot; the previous occupant was dropped
    Replaced { dropped: PackagedResource },
    /// Candidate lost to the current occupant
    Dropped,
}

impl PackagingConflictPolicy {
    /// True if `incoming` should take an occupied slot
    pub fn incoming_wins(&self) -> bool {
        matches!(self, PackagingConflictPolicy::LastWins)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingConflictPolicy::LastWins => "last-wins",
            PackagingConflictPolicy::FirstWins => "first-wins",
        }
    }
}

impl fmt::Display for PackagingConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackagingConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-wins" | "last" => Ok(PackagingConflictPolicy::LastWins),
            "first-wins" | "first" | "exclude" => Ok(PackagingConflictPolicy::FirstWins),
            other => Err(format!("unknown conflict policy '{}'", other)),
        }
    }
}

/// Candidate resources resolved to one winner per relative path
#[derive(Debug, Clone, Default)]
pub struct ResourceSlots {
    policy: PackagingConflictPolicy,
    slots: BTreeMap<PathBuf, PackagedResource>,
    dropped: Vec<PackagedResource>,
}

impl ResourceSlots {
    pub fn new(policy: PackagingConflictPolicy) -> Self {
        Self {
            policy,
            slots: BTreeMap::new(),
            dropped: Vec::new(),
        }
    }

    pub fn policy(&self) -> PackagingConflictPolicy {
        self.policy
    }

    /// Offer a candidate for its slot
    pub fn stage(&mut self, candidate: PackagedResource) -> SlotOutcome {
        let key = candidate.resource_relative_path.clone();
        match self.slots.remove(&key) {
            None => {
                self.slots.insert(key, candidate);
                SlotOutcome::Claimed
            }
            Some(current) if self.policy.incoming_wins() => {
                self.slots.insert(key, candidate);
                self.dropped.push(current.clone());
                SlotOutcome::Replaced { dropped: current }
            }
            Some(current) => {
                self.slots.insert(key, current);
                self.dropped.push(candidate);
                SlotOutcome::Dropped
            }
        }
    }

    /// Winners, sorted by relative path
    pub fn winners(&self) -> impl Iterator<Item = &PackagedResource> {
        self.slots.values()
    }

    pub fn dropped(&self) -> &[PackagedResource] {
        &self.dropped
    }

    pub fn into_parts(self) -> (Vec<PackagedResource>, Vec<PackagedResource>) {
        (self.slots.into_values().collect(), self.dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BuildArtifact;
    use crate::domain::value_objects::PlatformTag;

    fn candidate(slot: &str, from: &str) -> PackagedResource {
        PackagedResource::new(
            slot,
            BuildArtifact::new(PathBuf::from("native"), PathBuf::from(from), PlatformTag::Windows),
        )
    }

    #[test]
    fn last_wins_keeps_later_candidate() {
        let mut slots = ResourceSlots::new(PackagingConflictPolicy::LastWins);
        assert_eq!(slots.stage(candidate("Debug/SwoftLang.dll", "deps/old.dll")), SlotOutcome::Claimed);
        let outcome = slots.stage(candidate("Debug/SwoftLang.dll", "build/Debug/SwoftLang.dll"));

        assert!(matches!(outcome, SlotOutcome::Replaced { .. }));
        let winners: Vec<_> = slots.winners().collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].source_file(), std::path::Path::new("build/Debug/SwoftLang.dll"));
        assert_eq!(slots.dropped().len(), 1);
    }

    #[test]
    fn first_wins_drops_later_candidate() {
        let mut slots = ResourceSlots::new(PackagingConflictPolicy::FirstWins);
        slots.stage(candidate("Debug/SwoftLang.dll", "deps/old.dll"));
        assert_eq!(
            slots.stage(candidate("Debug/SwoftLang.dll", "build/Debug/SwoftLang.dll")),
            SlotOutcome::Dropped
        );
        let (winners, dropped) = slots.into_parts();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].source_file(), std::path::Path::new("deps/old.dll"));
        assert_eq!(dropped[0].source_file(), std::path::Path::new("build/Debug/SwoftLang.dll"));
    }

    #[test]
    fn distinct_paths_do_not_conflict() {
        let mut slots = ResourceSlots::new(PackagingConflictPolicy::LastWins);
        slots.stage(candidate("Debug/a.dll", "a.dll"));
        slots.stage(candidate("Debug/b.dll", "b.dll"));
        assert_eq!(slots.winners().count(), 2);
        assert!(slots.dropped().is_empty());
    }

    #[test]
    fn parse_policy_names() {
        assert_eq!("last-wins".parse(), Ok(PackagingConflictPolicy::LastWins));
        assert_eq!("EXCLUDE".parse(), Ok(PackagingConflictPolicy::FirstWins));
        assert!("merge".parse::<PackagingConflictPolicy>().is_err());
    }
}
