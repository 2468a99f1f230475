//! Modal overlay state.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalPanel {
    state: ModalState,
}

impl ModalPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn open(&mut self) {
        self.state = ModalState::Open;
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Click on the overlay. Only closes when the overlay itself was the
    /// event target, not something inside it.
    pub fn backdrop_click(&mut self, exact_target: bool) -> bool {
        if exact_target {
            self.close();
        }
        exact_target
    }
}

/// Overlay id referenced by a `data-modal-target` value (`"#modal-x"`).
///
/// Only plain id selectors resolve; anything else needs a document query.
pub fn modal_id(target: &str) -> Option<&str> {
    let id = target.trim().strip_prefix('#')?;
    let plain = !id.is_empty() && id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if plain { Some(id) } else { None }
}
