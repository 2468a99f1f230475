//! Visibility tracking policy.
//!
//! The browser's `IntersectionObserver` delivers raw threshold crossings; a
//! `VisibilityTracker` decides which of them reach the feature callback and
//! when an element should stop being observed. Keys are whatever the caller
//! uses to identify an element (registry indices in the page glue).

use std::collections::HashSet;
use std::hash::Hash;

/// Direction of a threshold crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    Entered,
    Left,
}

impl Crossing {
    pub fn from_intersecting(is_intersecting: bool) -> Self {
        if is_intersecting {
            Crossing::Entered
        } else {
            Crossing::Left
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirePolicy {
    /// Fire on the first entry only; the element stays observed.
    Once,
    /// Fire on the first entry, then stop observing the element.
    UntilFirstHit,
    /// Fire on every entry and exit.
    EveryCrossing,
}

/// What the caller should do with a crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Fire,
    /// Fire, then unobserve the element.
    FireAndRelease,
    Skip,
}

#[derive(Debug)]
pub struct VisibilityTracker<K> {
    threshold: f64,
    policy: FirePolicy,
    observed: HashSet<K>,
    fired: HashSet<K>,
}

impl<K: Eq + Hash + Clone> VisibilityTracker<K> {
    pub fn new(threshold: f64, policy: FirePolicy) -> Self {
        Self {
            threshold,
            policy,
            observed: HashSet::new(),
            fired: HashSet::new(),
        }
    }

    /// Visible ratio the browser observer is configured with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn observe(&mut self, key: K) {
        self.observed.insert(key);
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    /// Write-once record: true once the key has fired at least once.
    pub fn has_fired(&self, key: &K) -> bool {
        self.fired.contains(key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn on_crossing(&mut self, key: &K, crossing: Crossing) -> Outcome {
        if !self.observed.contains(key) {
            return Outcome::Skip;
        }
        match self.policy {
            FirePolicy::Once => {
                if crossing == Crossing::Entered && self.fired.insert(key.clone()) {
                    Outcome::Fire
                } else {
                    Outcome::Skip
                }
            }
            FirePolicy::UntilFirstHit => {
                if crossing == Crossing::Entered {
                    self.observed.remove(key);
                    self.fired.insert(key.clone());
                    Outcome::FireAndRelease
                } else {
                    Outcome::Skip
                }
            }
            FirePolicy::EveryCrossing => {
                if crossing == Crossing::Entered {
                    self.fired.insert(key.clone());
                }
                Outcome::Fire
            }
        }
    }

    /// Stop observing everything (page teardown). The fired record is kept.
    pub fn release_all(&mut self) {
        self.observed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_a_single_time_and_keeps_observing() {
        let mut t = VisibilityTracker::new(0.1, FirePolicy::Once);
        t.observe("about");
        assert_eq!(t.on_crossing(&"about", Crossing::Left), Outcome::Skip);
        assert_eq!(t.on_crossing(&"about", Crossing::Entered), Outcome::Fire);
        assert_eq!(t.on_crossing(&"about", Crossing::Left), Outcome::Skip);
        assert_eq!(t.on_crossing(&"about", Crossing::Entered), Outcome::Skip);
        assert!(t.is_observing(&"about"));
        assert!(t.has_fired(&"about"));
    }

    #[test]
    fn until_first_hit_releases_the_element() {
        let mut t = VisibilityTracker::new(0.5, FirePolicy::UntilFirstHit);
        t.observe(3usize);
        assert_eq!(t.on_crossing(&3, Crossing::Entered), Outcome::FireAndRelease);
        assert!(!t.is_observing(&3));
        assert_eq!(t.on_crossing(&3, Crossing::Entered), Outcome::Skip);
    }

    #[test]
    fn every_crossing_fires_in_both_directions() {
        let mut t = VisibilityTracker::new(0.15, FirePolicy::EveryCrossing);
        t.observe(0usize);
        for _ in 0..3 {
            assert_eq!(t.on_crossing(&0, Crossing::Entered), Outcome::Fire);
            assert_eq!(t.on_crossing(&0, Crossing::Left), Outcome::Fire);
        }
    }

    #[test]
    fn unknown_and_released_keys_skip() {
        let mut t = VisibilityTracker::new(0.15, FirePolicy::EveryCrossing);
        assert_eq!(t.on_crossing(&9usize, Crossing::Entered), Outcome::Skip);
        t.observe(1usize);
        t.release_all();
        assert_eq!(t.on_crossing(&1, Crossing::Entered), Outcome::Skip);
        assert_eq!(t.observed_count(), 0);
    }

    #[test]
    fn fired_record_survives_release_and_reobserve() {
        let mut t = VisibilityTracker::new(0.1, FirePolicy::Once);
        t.observe(0usize);
        assert_eq!(t.on_crossing(&0, Crossing::Entered), Outcome::Fire);
        // stop() then start() again
        t.release_all();
        t.observe(0);
        assert_eq!(t.on_crossing(&0, Crossing::Entered), Outcome::Skip);
        assert!(t.has_fired(&0));
        assert_eq!(t.threshold(), 0.1);
    }
}
