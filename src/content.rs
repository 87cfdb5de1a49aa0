use ordermap::OrderSet;

use crate::{colors::Rgba, command::Shape, layers::LayerMask, state::DrawState};

/// The four drawable kinds of the script format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `c`: a point marker drawn as a circle.
    Circle,
    /// `l`: a segment between two points.
    Line,
    /// `s`: a segment of a polyline ("string"), drawn with thickness.
    Polyline,
    /// `t`: a text label anchored at a point.
    Text,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 4] = [
        PrimitiveKind::Circle,
        PrimitiveKind::Line,
        PrimitiveKind::Polyline,
        PrimitiveKind::Text,
    ];

    /// Returns the single-character tag used in scripts.
    pub fn tag(&self) -> char {
        match self {
            PrimitiveKind::Circle => 'c',
            PrimitiveKind::Line => 'l',
            PrimitiveKind::Polyline => 's',
            PrimitiveKind::Text => 't',
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "c" => Some(PrimitiveKind::Circle),
            "l" => Some(PrimitiveKind::Line),
            "s" => Some(PrimitiveKind::Polyline),
            "t" => Some(PrimitiveKind::Text),
            _ => None,
        }
    }

    /// Number of coordinates per occurrence.
    pub fn arity(&self) -> usize {
        match self {
            PrimitiveKind::Circle | PrimitiveKind::Text => 3,
            PrimitiveKind::Line | PrimitiveKind::Polyline => 6,
        }
    }

    pub fn has_thickness(&self) -> bool {
        matches!(self, PrimitiveKind::Circle | PrimitiveKind::Polyline)
    }

    pub fn has_text(&self) -> bool {
        *self == PrimitiveKind::Text
    }
}

/// A borrowed view of one occurrence inside a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Circle {
        center: [f32; 3],
        thickness: f32,
        color: Rgba,
        layer: i32,
    },
    Line {
        from: [f32; 3],
        to: [f32; 3],
        color: Rgba,
        layer: i32,
    },
    Polyline {
        from: [f32; 3],
        to: [f32; 3],
        thickness: f32,
        color: Rgba,
        layer: i32,
    },
    Text {
        anchor: [f32; 3],
        text: &'a str,
        color: Rgba,
        layer: i32,
    },
}

impl Primitive<'_> {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Circle { .. } => PrimitiveKind::Circle,
            Primitive::Line { .. } => PrimitiveKind::Line,
            Primitive::Polyline { .. } => PrimitiveKind::Polyline,
            Primitive::Text { .. } => PrimitiveKind::Text,
        }
    }

    pub fn color(&self) -> Rgba {
        match *self {
            Primitive::Circle { color, .. }
            | Primitive::Line { color, .. }
            | Primitive::Polyline { color, .. }
            | Primitive::Text { color, .. } => color,
        }
    }

    pub fn layer(&self) -> i32 {
        match *self {
            Primitive::Circle { layer, .. }
            | Primitive::Line { layer, .. }
            | Primitive::Polyline { layer, .. }
            | Primitive::Text { layer, .. } => layer,
        }
    }
}

/// All occurrences of one kind within a frame, stored as parallel sequences.
///
/// Occurrence `i` is `positions[i * arity..(i + 1) * arity]`, `colors[i]`,
/// `layers[i]`, plus `thicknesses[i]` or `texts[i]` where the kind has them.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitives {
    kind: PrimitiveKind,
    positions: Vec<f32>,
    thicknesses: Vec<f32>,
    colors: Vec<Rgba>,
    layers: Vec<i32>,
    texts: Vec<String>,
}

impl Primitives {
    fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            positions: Vec::new(),
            thicknesses: Vec::new(),
            colors: Vec::new(),
            layers: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Returns the number of occurrences.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Flat coordinates, `kind().arity()` values per occurrence.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn layers(&self) -> &[i32] {
        &self.layers
    }

    /// `None` for kinds that carry no thickness.
    pub fn thicknesses(&self) -> Option<&[f32]> {
        if self.kind.has_thickness() {
            Some(self.thicknesses.as_slice())
        } else {
            None
        }
    }

    /// `None` for every kind except text.
    pub fn texts(&self) -> Option<&[String]> {
        if self.kind.has_text() {
            Some(self.texts.as_slice())
        } else {
            None
        }
    }

    /// Returns the occurrence at `index` as a typed view.
    pub fn get(&self, index: usize) -> Option<Primitive<'_>> {
        if index >= self.len() {
            return None;
        }
        let arity = self.kind.arity();
        let p = &self.positions[index * arity..(index + 1) * arity];
        let color = self.colors[index];
        let layer = self.layers[index];
        Some(match self.kind {
            PrimitiveKind::Circle => Primitive::Circle {
                center: [p[0], p[1], p[2]],
                thickness: self.thicknesses[index],
                color,
                layer,
            },
            PrimitiveKind::Line => Primitive::Line {
                from: [p[0], p[1], p[2]],
                to: [p[3], p[4], p[5]],
                color,
                layer,
            },
            PrimitiveKind::Polyline => Primitive::Polyline {
                from: [p[0], p[1], p[2]],
                to: [p[3], p[4], p[5]],
                thickness: self.thicknesses[index],
                color,
                layer,
            },
            PrimitiveKind::Text => Primitive::Text {
                anchor: [p[0], p[1], p[2]],
                text: self.texts[index].as_str(),
                color,
                layer,
            },
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Primitive<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Every 3D point of every occurrence.
    pub fn points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    fn push(&mut self, positions: &[f32], state: &DrawState, text: Option<&str>) {
        self.positions.extend_from_slice(positions);
        if self.kind.has_thickness() {
            self.thicknesses.push(state.thickness);
        }
        if self.kind.has_text() {
            self.texts.push(text.unwrap_or_default().to_string());
        }
        self.colors.push(state.color);
        self.layers.push(state.layer);
    }

    fn push_from(&mut self, other: &Primitives, index: usize) {
        let arity = self.kind.arity();
        self.positions
            .extend_from_slice(&other.positions[index * arity..(index + 1) * arity]);
        if self.kind.has_thickness() {
            self.thicknesses.push(other.thicknesses[index]);
        }
        if self.kind.has_text() {
            self.texts.push(other.texts[index].clone());
        }
        self.colors.push(other.colors[index]);
        self.layers.push(other.layers[index]);
    }
}

/// Axis-aligned box around a frame's points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    fn point(p: [f32; 3]) -> Self {
        Self { min: p, max: p }
    }

    fn include(&mut self, p: [f32; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    /// Extent along each axis.
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn largest_dimension(&self) -> f32 {
        let [x, y, z] = self.size();
        x.max(y).max(z)
    }
}

/// One time-step of drawable primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    circles: Primitives,
    lines: Primitives,
    polylines: Primitives,
    texts: Primitives,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Creates a frame with no primitives.
    pub fn new() -> Self {
        Self {
            circles: Primitives::new(PrimitiveKind::Circle),
            lines: Primitives::new(PrimitiveKind::Line),
            polylines: Primitives::new(PrimitiveKind::Polyline),
            texts: Primitives::new(PrimitiveKind::Text),
        }
    }

    pub fn get(&self, kind: PrimitiveKind) -> &Primitives {
        match kind {
            PrimitiveKind::Circle => &self.circles,
            PrimitiveKind::Line => &self.lines,
            PrimitiveKind::Polyline => &self.polylines,
            PrimitiveKind::Text => &self.texts,
        }
    }

    fn get_mut(&mut self, kind: PrimitiveKind) -> &mut Primitives {
        match kind {
            PrimitiveKind::Circle => &mut self.circles,
            PrimitiveKind::Line => &mut self.lines,
            PrimitiveKind::Polyline => &mut self.polylines,
            PrimitiveKind::Text => &mut self.texts,
        }
    }

    pub fn circles(&self) -> &Primitives {
        &self.circles
    }

    pub fn lines(&self) -> &Primitives {
        &self.lines
    }

    pub fn polylines(&self) -> &Primitives {
        &self.polylines
    }

    pub fn texts(&self) -> &Primitives {
        &self.texts
    }

    /// Returns the total number of primitives of all kinds.
    pub fn len(&self) -> usize {
        PrimitiveKind::ALL.into_iter().map(|k| self.get(k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a shape styled with the current draw state.
    pub fn push(&mut self, shape: &Shape, state: &DrawState) {
        let text = match shape {
            Shape::Text(_, text) => Some(text.as_str()),
            _ => None,
        };
        self.get_mut(shape.kind())
            .push(shape.positions(), state, text);
    }

    /// Iterates circles, lines, polylines and texts, in that order.
    pub fn iter(&self) -> impl Iterator<Item = Primitive<'_>> + '_ {
        PrimitiveKind::ALL
            .into_iter()
            .flat_map(move |k| self.get(k).iter())
    }

    /// Returns the box enclosing every point, or `None` for an empty frame.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = PrimitiveKind::ALL
            .into_iter()
            .flat_map(move |k| self.get(k).points());
        let mut bounds = Bounds::point(points.next()?);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Largest extent of the frame, 0 when it is empty.
    pub fn largest_dimension(&self) -> f32 {
        self.bounds().map_or(0.0, |b| b.largest_dimension())
    }

    /// Distinct layers in order of first appearance.
    pub fn layers_used(&self) -> OrderSet<i32> {
        PrimitiveKind::ALL
            .into_iter()
            .flat_map(|k| self.get(k).layers().iter().copied())
            .collect()
    }

    /// Returns a copy holding only primitives on active layers.
    pub fn filter_layers(&self, mask: &LayerMask) -> Frame {
        let mut frame = Frame::new();
        for kind in PrimitiveKind::ALL {
            let src = self.get(kind);
            let dst = frame.get_mut(kind);
            for (i, layer) in src.layers().iter().enumerate() {
                if mask.is_active(*layer) {
                    dst.push_from(src, i);
                }
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(layer: i32, color: Rgba, thickness: f32) -> DrawState {
        DrawState {
            layer,
            color,
            thickness,
        }
    }

    fn sample() -> Frame {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        let mut frame = Frame::new();
        frame.push(&Shape::Circle([1.0, 2.0, 3.0]), &state(2, red, 5.0));
        frame.push(
            &Shape::Line([0.0, 0.0, 0.0, 1.0, -1.0, 4.0]),
            &state(1, red, 5.0),
        );
        frame.push(
            &Shape::Polyline([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]),
            &state(3, red, 0.5),
        );
        frame.push(
            &Shape::Text([0.5, 0.5, 0.5], "label".into()),
            &state(2, red, 5.0),
        );
        frame
    }

    #[test]
    fn tags_round_trip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_tag(&kind.tag().to_string()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_tag("y"), None);
    }

    #[test]
    fn per_kind_attributes() {
        let frame = sample();
        assert_eq!(frame.circles().thicknesses(), Some(&[5.0][..]));
        assert_eq!(frame.circles().texts(), None);
        assert_eq!(frame.lines().thicknesses(), None);
        assert_eq!(frame.lines().texts(), None);
        assert_eq!(frame.polylines().thicknesses(), Some(&[0.5][..]));
        assert_eq!(frame.texts().thicknesses(), None);
        assert_eq!(frame.texts().texts(), Some(&["label".to_string()][..]));
    }

    #[test]
    fn sequences_stay_parallel() {
        let frame = sample();
        for kind in PrimitiveKind::ALL {
            let p = frame.get(kind);
            let n = p.positions().len() / kind.arity();
            assert_eq!(n, p.colors().len());
            assert_eq!(n, p.layers().len());
            assert_eq!(n, p.len());
            if let Some(t) = p.thicknesses() {
                assert_eq!(n, t.len());
            }
            if let Some(t) = p.texts() {
                assert_eq!(n, t.len());
            }
        }
    }

    #[test]
    fn typed_view() {
        let frame = sample();
        assert_eq!(
            frame.lines().get(0),
            Some(Primitive::Line {
                from: [0.0, 0.0, 0.0],
                to: [1.0, -1.0, 4.0],
                color: Rgba::rgb(1.0, 0.0, 0.0),
                layer: 1,
            })
        );
        assert_eq!(frame.lines().get(1), None);
        let kinds: Vec<PrimitiveKind> = frame.iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, PrimitiveKind::ALL.to_vec());
        assert_eq!(frame.len(), 4);
    }

    #[test]
    fn bounds_cover_all_points() {
        let frame = sample();
        let bounds = frame.bounds().unwrap();
        assert_eq!(bounds.min, [0.0, -1.0, 0.0]);
        assert_eq!(bounds.max, [2.0, 2.0, 4.0]);
        assert_eq!(frame.largest_dimension(), 4.0);
    }

    #[test]
    fn empty_frame_has_no_bounds() {
        let frame = Frame::new();
        assert!(frame.is_empty());
        assert_eq!(frame.bounds(), None);
        assert_eq!(frame.largest_dimension(), 0.0);
    }

    #[test]
    fn layers_in_first_appearance_order() {
        let used: Vec<i32> = sample().layers_used().into_iter().collect();
        assert_eq!(used, vec![2, 1, 3]);
    }

    #[test]
    fn filter_by_layer() {
        let mut mask = LayerMask::default();
        mask.set(2, false);
        let filtered = sample().filter_layers(&mask);
        assert!(filtered.circles().is_empty());
        assert!(filtered.texts().is_empty());
        assert_eq!(filtered.lines().len(), 1);
        assert_eq!(filtered.polylines().thicknesses(), Some(&[0.5][..]));
    }
}
