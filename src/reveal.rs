//! Staggered section reveal schedule.

use crate::config::RevealTiming;

/// Part of a section that receives the `animate` class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTarget {
    Section,
    Header,
    /// Content card by 0-based document order inside the section.
    Card(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub target: RevealTarget,
    /// Delay after the animation frame in which the section itself is marked.
    pub delay_ms: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealPlan {
    steps: Vec<RevealStep>,
}

impl RevealPlan {
    pub fn for_section(has_header: bool, card_count: usize, timing: &RevealTiming) -> Self {
        let mut steps = Vec::with_capacity(card_count + 2);
        steps.push(RevealStep {
            target: RevealTarget::Section,
            delay_ms: 0,
        });
        if has_header {
            steps.push(RevealStep {
                target: RevealTarget::Header,
                delay_ms: timing.header_delay_ms,
            });
        }
        for i in 0..card_count {
            let stagger = timing.card_stagger_ms.saturating_mul(i as u32);
            steps.push(RevealStep {
                target: RevealTarget::Card(i),
                delay_ms: timing.first_card_delay_ms.saturating_add(stagger),
            });
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    pub fn delay_for(&self, target: RevealTarget) -> Option<u32> {
        self.steps
            .iter()
            .find(|s| s.target == target)
            .map(|s| s.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_are_staggered_linearly() {
        let plan = RevealPlan::for_section(true, 4, &RevealTiming::default());
        assert_eq!(plan.delay_for(RevealTarget::Section), Some(0));
        assert_eq!(plan.delay_for(RevealTarget::Header), Some(200));
        let cards: Vec<u32> = (0..4)
            .filter_map(|i| plan.delay_for(RevealTarget::Card(i)))
            .collect();
        assert_eq!(cards, vec![400, 550, 700, 850]);
    }

    #[test]
    fn missing_parts_are_skipped() {
        let plan = RevealPlan::for_section(false, 0, &RevealTiming::default());
        let only_section = RevealStep {
            target: RevealTarget::Section,
            delay_ms: 0,
        };
        assert_eq!(plan.steps(), &[only_section]);
        assert_eq!(plan.delay_for(RevealTarget::Header), None);
    }
}
