//! Runtime page configuration.
//!
//! `PageConfig::default()` reproduces the values the page was designed with.
//! With the `serde` feature any subset can be overridden from JSON; absent
//! fields keep their defaults.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Timing of the staggered section reveal (milliseconds).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RevealTiming {
    pub header_delay_ms: u32,
    pub first_card_delay_ms: u32,
    pub card_stagger_ms: u32,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            header_delay_ms: 200,
            first_card_delay_ms: 400,
            card_stagger_ms: 150,
        }
    }
}

/// Background particle cadence and randomisation ranges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleConfig {
    pub enabled: bool,
    pub spawn_interval_ms: u32,
    pub lifetime_ms: u32,
    pub min_duration_s: f64,
    pub duration_spread_s: f64,
    pub min_opacity: f64,
    pub opacity_spread: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval_ms: 2000,
            // Longer than the slowest animation (min + spread = 8s).
            lifetime_ms: 8000,
            min_duration_s: 5.0,
            duration_spread_s: 3.0,
            min_opacity: 0.3,
            opacity_spread: 0.5,
        }
    }
}

/// Data handed to the radar chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillChartConfig {
    pub enabled: bool,
    pub canvas_id: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Default for SkillChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            canvas_id: "skillRadarChart".to_string(),
            dataset_label: "習熟度".to_string(),
            labels: ["HTML", "CSS", "VSCode", "Git/GitHub", "JavaScript", "React"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            values: vec![60.0, 60.0, 50.0, 30.0, 30.0, 10.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    /// Visible ratio that triggers a section reveal.
    pub section_threshold: f64,
    pub section_root_margin: String,
    /// Visible ratio that reveals a single timeline item.
    pub timeline_threshold: f64,
    /// Visible ratio that moves the nav highlight.
    pub nav_threshold: f64,
    pub reveal: RevealTiming,
    pub particles: ParticleConfig,
    /// Value written to `--animation-duration` when the user prefers reduced motion.
    pub reduced_motion_duration: String,
    pub chart: SkillChartConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            section_threshold: 0.1,
            section_root_margin: "0px".to_string(),
            timeline_threshold: 0.5,
            nav_threshold: 0.15,
            reveal: RevealTiming::default(),
            particles: ParticleConfig::default(),
            reduced_motion_duration: "0.01ms".to_string(),
            chart: SkillChartConfig::default(),
        }
    }
}

impl PageConfig {
    /// Clamp values the browser would reject (thresholds outside [0,1]).
    pub fn normalized(mut self) -> Self {
        self.section_threshold = clamp_ratio(self.section_threshold);
        self.timeline_threshold = clamp_ratio(self.timeline_threshold);
        self.nav_threshold = clamp_ratio(self.nav_threshold);
        self
    }

    /// Parse a (possibly partial) JSON override on top of the defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cfg: PageConfig = serde_json::from_str(json)?;
        Ok(cfg.normalized())
    }
}

/// Millisecond delay as accepted by `setTimeout`/`setInterval`. Values past
/// `i32::MAX` saturate instead of wrapping negative.
pub fn timer_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

fn clamp_ratio(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
