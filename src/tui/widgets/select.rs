/// Chosen option of a select widget; `None` until the user picks one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectState {
    selected: Option<usize>,
}

impl SelectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(index: usize) -> Self {
        Self {
            selected: Some(index),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Selected entry of `options`, if any
    pub fn value<'a, T>(&self, options: &'a [T]) -> Option<&'a T> {
        self.selected.and_then(|i| options.get(i))
    }
}

/// Index one step forward or back from `current`, wrapping over `count` options
pub fn cycle(current: Option<usize>, count: usize, forward: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(i), true) => (i + 1) % count,
        (Some(0), false) => count - 1,
        (Some(i), false) => i - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        assert_eq!(cycle(None, 3, true), Some(0));
        assert_eq!(cycle(None, 3, false), Some(2));
        assert_eq!(cycle(Some(2), 3, true), Some(0));
        assert_eq!(cycle(Some(0), 3, false), Some(2));
        assert_eq!(cycle(Some(0), 0, true), None);
    }

    #[test]
    fn test_value() {
        let options = ["a", "b"];
        assert_eq!(SelectState::new().value(&options), None);
        assert_eq!(SelectState::with_selected(1).value(&options), Some(&"b"));
        assert_eq!(SelectState::with_selected(5).value(&options), None);
    }
}
