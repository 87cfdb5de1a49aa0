/// Number of layer switches a viewer offers by default.
pub const DEFAULT_LAYERS: usize = 12;

/// Which layers a consumer currently shows.
///
/// Layers are numbered from 0; anything outside `0..len()` is never active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerMask {
    active: Vec<bool>,
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::new(DEFAULT_LAYERS)
    }
}

impl LayerMask {
    /// Creates a mask of `count` layers, all active.
    pub fn new(count: usize) -> Self {
        Self {
            active: vec![true; count],
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn slot(&self, layer: i32) -> Option<usize> {
        usize::try_from(layer).ok().filter(|l| *l < self.active.len())
    }

    pub fn is_active(&self, layer: i32) -> bool {
        self.slot(layer).map_or(false, |l| self.active[l])
    }

    /// Sets a layer on or off; layers outside the mask are ignored.
    pub fn set(&mut self, layer: i32, active: bool) {
        if let Some(l) = self.slot(layer) {
            self.active[l] = active;
        }
    }

    /// Flips a layer and returns its new state.
    pub fn toggle(&mut self, layer: i32) -> bool {
        let now = !self.is_active(layer);
        self.set(layer, now);
        self.is_active(layer)
    }

    /// Active layers in ascending order.
    pub fn active(&self) -> impl Iterator<Item = i32> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(l, _)| l as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_active_by_default() {
        let mask = LayerMask::default();
        assert_eq!(mask.len(), DEFAULT_LAYERS);
        assert!((0..12).all(|l| mask.is_active(l)));
    }

    #[test]
    fn out_of_range_is_inactive() {
        let mut mask = LayerMask::new(4);
        assert!(!mask.is_active(-1));
        assert!(!mask.is_active(4));
        assert!(!mask.toggle(7));
    }

    #[test]
    fn toggle_flips() {
        let mut mask = LayerMask::new(4);
        assert!(!mask.toggle(2));
        assert!(mask.toggle(2));
        mask.set(0, false);
        assert_eq!(mask.active().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
