use crate::colors::Rgba;

/// Style carried from one record to the next, across frame breaks.
///
/// Only `y` (layer), `@` (color) and `r` (thickness) records change it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub layer: i32,
    pub color: Rgba,
    pub thickness: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            layer: 1,
            color: Rgba::default(),
            thickness: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = DrawState::default();
        assert_eq!(state.layer, 1);
        assert_eq!(state.color, Rgba::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(state.thickness, 1.0);
    }
}
