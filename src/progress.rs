//! Scroll progress computation and the per-frame throttle gate.

/// Percentage of the scrollable range already scrolled, in [0, 100].
///
/// Pages that cannot scroll (document no taller than the viewport) report 0
/// rather than dividing by zero.
pub fn scroll_percent(offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / scrollable * 100.0).clamp(0.0, 100.0)
}

/// CSS width value for the progress bar.
pub fn width_style(percent: f64) -> String {
    format!("{}%", percent)
}

/// Coalescing gate: at most one recomputation pending at a time.
#[derive(Debug, Default)]
pub struct ThrottleGate {
    in_flight: bool,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller should schedule work; the gate is then closed
    /// until `finish` is called.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_scrollable_range() {
        assert_eq!(scroll_percent(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_percent(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(scroll_percent(2000.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn short_pages_report_zero() {
        assert_eq!(scroll_percent(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_percent(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scroll_percent(-40.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_percent(2100.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn gate_coalesces_until_finished() {
        let mut gate = ThrottleGate::new();
        assert!(gate.try_begin());
        assert!(!gate.try_begin());
        assert!(!gate.try_begin());
        assert!(gate.is_pending());
        gate.finish();
        assert!(gate.try_begin());
    }

    #[test]
    fn width_is_a_percentage() {
        assert_eq!(width_style(42.5), "42.5%");
        assert_eq!(width_style(0.0), "0%");
    }
}
