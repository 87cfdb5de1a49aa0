use std::ops::Index;

use crate::error::RecordError;

/// A color with red, green, blue and alpha components, nominally in `0.0..=1.0`.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<[f32; 3]> for Rgba {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

/// What an `@` record asks for, before it is looked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec {
    /// Palette entry, already truncated to an integer.
    Index(usize),
    /// Direct color, alpha defaults to opaque.
    Rgb([f32; 3]),
    /// Direct color with explicit alpha.
    Rgba([f32; 4]),
}

/// Indexed color table supplied by the caller.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Returns the number of entries in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, if the palette has one.
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.colors.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgba> {
        self.colors.iter()
    }

    /// Turns a color request into a concrete color.
    /// Direct colors pass through; indices must name an existing entry.
    pub fn resolve(&self, spec: &ColorSpec) -> Result<Rgba, RecordError> {
        match *spec {
            ColorSpec::Rgb(rgb) => Ok(rgb.into()),
            ColorSpec::Rgba(rgba) => Ok(rgba.into()),
            ColorSpec::Index(index) => self.get(index).ok_or(RecordError::PaletteIndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }
}

impl Index<usize> for Palette {
    type Output = Rgba;
    fn index(&self, index: usize) -> &Rgba {
        &self.colors[index]
    }
}

impl From<Vec<Rgba>> for Palette {
    fn from(colors: Vec<Rgba>) -> Self {
        Self::new(colors)
    }
}

impl From<&[Rgba]> for Palette {
    fn from(colors: &[Rgba]) -> Self {
        Self::new(colors.to_vec())
    }
}

impl FromIterator<Rgba> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgba>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgba;
    type IntoIter = std::slice::Iter<'a, Rgba>;
    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Palette {
        vec![
            Rgba::rgb(0.0, 0.0, 0.0),
            Rgba::rgb(0.5, 0.5, 0.5),
            Rgba::new(0.1, 0.2, 0.3, 0.4),
        ]
        .into()
    }

    #[test]
    fn default_color_is_transparent_black() {
        assert_eq!(Rgba::default().to_array(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Rgba::from([0.2, 0.4, 0.6]), Rgba::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn resolve_index() {
        let palette = three();
        assert_eq!(
            palette.resolve(&ColorSpec::Index(2)),
            Ok(Rgba::new(0.1, 0.2, 0.3, 0.4))
        );
        assert_eq!(palette[1], Rgba::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn resolve_direct_ignores_palette() {
        let palette = Palette::default();
        assert_eq!(
            palette.resolve(&ColorSpec::Rgb([0.2, 0.4, 0.6])),
            Ok(Rgba::new(0.2, 0.4, 0.6, 1.0))
        );
        assert_eq!(
            palette.resolve(&ColorSpec::Rgba([0.2, 0.4, 0.6, 0.5])),
            Ok(Rgba::new(0.2, 0.4, 0.6, 0.5))
        );
    }

    #[test]
    fn resolve_out_of_range() {
        let palette = three();
        assert_eq!(
            palette.resolve(&ColorSpec::Index(3)),
            Err(RecordError::PaletteIndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            Palette::default().resolve(&ColorSpec::Index(0)),
            Err(RecordError::PaletteIndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn collect_into_palette() {
        let palette: Palette = (0..4).map(|i| Rgba::rgb(i as f32, 0.0, 0.0)).collect();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.iter().last(), Some(&Rgba::rgb(3.0, 0.0, 0.0)));
    }
}
