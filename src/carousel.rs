//! Per-container image carousel index.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    /// Build from the images' current-flags in document order. Starts at the
    /// first pre-flagged image, else 0. Returns `None` when there is nothing
    /// to navigate (one image or none).
    pub fn from_flags(flags: &[bool]) -> Option<Self> {
        if flags.len() <= 1 {
            return None;
        }
        let index = flags.iter().position(|&f| f).unwrap_or(0);
        Some(Self {
            index,
            len: flags.len(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.len
    }

    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn retreat(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Full flag set: exactly one entry is true.
    pub fn flags(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_or_no_image_is_not_navigable() {
        assert_eq!(Carousel::from_flags(&[]), None);
        assert_eq!(Carousel::from_flags(&[true]), None);
    }

    #[test]
    fn adopts_preflagged_image() {
        let c = Carousel::from_flags(&[false, false, true, false]).unwrap();
        assert_eq!(c.index(), 2);
        assert_eq!(c.flags(), vec![false, false, true, false]);
    }

    #[test]
    fn wraps_in_both_directions() {
        let mut c = Carousel::from_flags(&[false; 3]).unwrap();
        assert_eq!(c.index(), 0);
        assert_eq!(c.retreat(), 2);
        assert_eq!(c.retreat(), 1);
        assert_eq!(c.retreat(), 0);
        assert_eq!(c.advance(), 1);
        assert_eq!(c.advance(), 2);
        assert_eq!(c.advance(), 0);
    }

    #[test]
    fn exactly_one_current_after_every_move() {
        let mut c = Carousel::from_flags(&[true, true, false, false, false]).unwrap();
        for step in 0..12 {
            if step % 3 == 0 {
                c.retreat();
            } else {
                c.advance();
            }
            assert_eq!(c.flags().iter().filter(|f| **f).count(), 1);
            assert!(c.index() < c.image_count());
        }
    }
}
