// Integration tests (native) for the `folio-motion` crate.
// These drive the pure decision logic the way the page glue does, without a
// browser, so they run under `cargo test` on the host.

use folio_motion::PageConfig;
use folio_motion::carousel::Carousel;
use folio_motion::modal::{ModalPanel, modal_id};
use folio_motion::nav::{NavBinding, NavHighlighter, NavVariant, href_fragment};
use folio_motion::progress::{ThrottleGate, scroll_percent};
use folio_motion::reveal::{RevealPlan, RevealTarget};
use folio_motion::visibility::{Crossing, FirePolicy, Outcome, VisibilityTracker};

const SECTIONS: [&str; 3] = ["hero", "about", "projects"];

fn nav_for(sections: &[&str]) -> NavHighlighter {
    let mut bindings = Vec::new();
    for variant in [NavVariant::Primary, NavVariant::Floating] {
        for id in sections {
            bindings.push(NavBinding::new(*id, variant));
        }
    }
    NavHighlighter::new(bindings)
}

#[test]
fn section_reveal_happens_once_per_section() {
    let cfg = PageConfig::default();
    let mut tracker = VisibilityTracker::new(cfg.section_threshold, FirePolicy::Once);
    for i in 0..SECTIONS.len() {
        tracker.observe(i);
    }
    let mut reveals = vec![0; SECTIONS.len()];
    // Scroll down and back up twice.
    for _ in 0..2 {
        for i in (0..SECTIONS.len()).chain((0..SECTIONS.len()).rev()) {
            for crossing in [Crossing::Entered, Crossing::Left] {
                if tracker.on_crossing(&i, crossing) == Outcome::Fire {
                    reveals[i] += 1;
                }
            }
        }
    }
    assert_eq!(reveals, vec![1, 1, 1]);
    assert!((0..SECTIONS.len()).all(|i| tracker.has_fired(&i) && tracker.is_observing(&i)));
}

#[test]
fn reveal_plan_uses_configured_timing() {
    let cfg = PageConfig::default();
    let plan = RevealPlan::for_section(true, 3, &cfg.reveal);
    let order: Vec<RevealTarget> = plan.steps().iter().map(|s| s.target).collect();
    assert_eq!(
        order,
        vec![
            RevealTarget::Section,
            RevealTarget::Header,
            RevealTarget::Card(0),
            RevealTarget::Card(1),
            RevealTarget::Card(2),
        ]
    );
    assert_eq!(plan.delay_for(RevealTarget::Card(2)), Some(700));
}

#[test]
fn timeline_items_stop_being_observed_after_first_hit() {
    let mut tracker = VisibilityTracker::new(0.5, FirePolicy::UntilFirstHit);
    for i in 0..4usize {
        tracker.observe(i);
    }
    assert_eq!(tracker.on_crossing(&2, Crossing::Left), Outcome::Skip);
    assert_eq!(tracker.on_crossing(&2, Crossing::Entered), Outcome::FireAndRelease);
    assert_eq!(tracker.on_crossing(&2, Crossing::Entered), Outcome::Skip);
    assert_eq!(tracker.observed_count(), 3);
}

#[test]
fn scrolling_about_into_view_highlights_only_about() {
    let mut tracker = VisibilityTracker::new(0.15, FirePolicy::EveryCrossing);
    let mut nav = nav_for(&SECTIONS);
    for i in 0..SECTIONS.len() {
        tracker.observe(i);
    }
    let about = 1usize;
    assert_eq!(tracker.on_crossing(&about, Crossing::Entered), Outcome::Fire);
    let flags = nav.on_crossing(SECTIONS[about], Crossing::Entered).unwrap();
    for (binding, on) in nav.bindings().iter().zip(&flags) {
        assert_eq!(*on, binding.targets("about"));
    }
}

#[test]
fn one_section_highlighted_after_any_sequence() {
    let mut nav = nav_for(&SECTIONS);
    let events = [
        ("hero", true),
        ("about", true),
        ("hero", false),
        ("projects", true),
        ("about", false),
        ("about", true),
    ];
    for (id, visible) in events {
        nav.on_crossing(id, Crossing::from_intersecting(visible));
        let active: Vec<&str> = nav
            .bindings()
            .iter()
            .zip(nav.flags())
            .filter(|(_, on)| *on)
            .filter_map(|(b, _)| b.section_id.as_deref())
            .collect();
        // One primary link plus its floating twin, both for the same section.
        assert_eq!(active.len(), 2);
        assert_eq!(active[0], active[1]);
    }
    assert_eq!(nav.active_section(), Some("about"));
}

#[test]
fn sections_without_ids_clear_the_nav() {
    // Header: two section links and an external one. Sections: hero, an
    // untitled block, about.
    let bindings = ["#hero", "/blog", "#about"]
        .iter()
        .map(|href| NavBinding::from_href(href, NavVariant::Primary))
        .collect();
    let sections = ["hero", "", "about"];
    let mut nav = NavHighlighter::new(bindings);

    let mut seen = Vec::new();
    for id in sections {
        seen.push(nav.on_crossing(id, Crossing::Entered).unwrap());
    }
    assert_eq!(
        seen,
        vec![
            vec![true, false, false],
            vec![false, false, false],
            vec![false, false, true],
        ]
    );
}

#[test]
fn nav_links_resolve_to_sections() {
    let hrefs = ["#hero", "#about", "index.html#projects"];
    let ids: Vec<&str> = hrefs.iter().filter_map(|h| href_fragment(h)).collect();
    assert_eq!(ids, SECTIONS.to_vec());
}

#[test]
fn modal_opens_from_trigger_and_closes_from_backdrop_only() {
    assert_eq!(modal_id("#modal-x"), Some("modal-x"));
    let mut panel = ModalPanel::new();
    panel.open();
    // Click inside the content bubbles up with a different target.
    panel.backdrop_click(false);
    assert!(panel.is_open());
    panel.backdrop_click(true);
    assert!(!panel.is_open());
}

#[test]
fn carousel_of_three_scenario() {
    let mut c = Carousel::from_flags(&[false, false, false]).unwrap();
    assert_eq!(c.index(), 0);
    assert_eq!(c.advance(), 1);
    let mut c = Carousel::from_flags(&[false, false, false]).unwrap();
    for _ in 0..3 {
        c.retreat();
    }
    assert_eq!(c.index(), 0);
}

#[test]
fn carousel_advance_then_retreat_is_identity() {
    for n in 2..7 {
        for start in 0..n {
            let flags: Vec<bool> = (0..n).map(|i| i == start).collect();
            let mut c = Carousel::from_flags(&flags).unwrap();
            c.advance();
            c.retreat();
            assert_eq!(c.index(), start);
            c.retreat();
            c.advance();
            assert_eq!(c.index(), start);
        }
    }
}

#[test]
fn scroll_burst_schedules_one_update() {
    let mut gate = ThrottleGate::new();
    let scheduled = (0..25).filter(|_| gate.try_begin()).count();
    assert_eq!(scheduled, 1);
    gate.finish();
    assert!(gate.try_begin());
}

#[test]
fn exported_scroll_percent_matches_core() {
    assert_eq!(folio_motion::scroll_percent(500.0, 2000.0, 1000.0), 50.0);
    assert_eq!(scroll_percent(0.0, 700.0, 700.0), 0.0);
}
