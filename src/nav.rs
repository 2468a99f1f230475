//! Navigation highlighting.
//!
//! Two parallel link sets (header links and floating dots) point at the same
//! sections. When a section enters the viewport every link is cleared and the
//! links bound to that section are set; the last delivered entry wins.

use crate::visibility::Crossing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavVariant {
    Primary,
    Floating,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavBinding {
    /// `None` for links that do not point at an in-page section.
    pub section_id: Option<String>,
    pub variant: NavVariant,
}

impl NavBinding {
    pub fn new(section_id: impl Into<String>, variant: NavVariant) -> Self {
        Self {
            section_id: Some(section_id.into()),
            variant,
        }
    }

    /// Binding for a raw `href`, as found on the link element.
    pub fn from_href(href: &str, variant: NavVariant) -> Self {
        Self {
            section_id: href_fragment(href).map(str::to_string),
            variant,
        }
    }

    pub fn targets(&self, section_id: &str) -> bool {
        self.section_id.as_deref() == Some(section_id)
    }
}

/// Section id referenced by an in-page link (`"#about"` -> `"about"`).
///
/// Returns `None` for links without a fragment or with an empty one.
pub fn href_fragment(href: &str) -> Option<&str> {
    let (_, frag) = href.split_once('#')?;
    if frag.is_empty() { None } else { Some(frag) }
}

#[derive(Debug, Default)]
pub struct NavHighlighter {
    bindings: Vec<NavBinding>,
    active_section: Option<String>,
}

impl NavHighlighter {
    pub fn new(bindings: Vec<NavBinding>) -> Self {
        Self {
            bindings,
            active_section: None,
        }
    }

    pub fn bindings(&self) -> &[NavBinding] {
        &self.bindings
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Handle a crossing for `section_id`. On entry returns the full set of
    /// active flags, one per binding; exits leave the highlight untouched.
    /// An entering section without an id clears every link.
    pub fn on_crossing(&mut self, section_id: &str, crossing: Crossing) -> Option<Vec<bool>> {
        if crossing != Crossing::Entered {
            return None;
        }
        self.active_section = if section_id.is_empty() {
            None
        } else {
            Some(section_id.to_string())
        };
        Some(self.flags())
    }

    pub fn flags(&self) -> Vec<bool> {
        self.bindings
            .iter()
            .map(|b| match self.active_section.as_deref() {
                Some(active) => b.targets(active),
                None => false,
            })
            .collect()
    }
}
