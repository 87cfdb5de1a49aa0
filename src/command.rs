//! One script line turned into a typed record.

use crate::{
    colors::ColorSpec,
    content::PrimitiveKind,
    error::RecordError,
    helpers::Fields,
};

/// A drawable record together with its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle([f32; 3]),
    Line([f32; 6]),
    Polyline([f32; 6]),
    Text([f32; 3], String),
}

impl Shape {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Shape::Circle(_) => PrimitiveKind::Circle,
            Shape::Line(_) => PrimitiveKind::Line,
            Shape::Polyline(_) => PrimitiveKind::Polyline,
            Shape::Text(_, _) => PrimitiveKind::Text,
        }
    }

    /// Flat coordinates, `kind().arity()` values long.
    pub fn positions(&self) -> &[f32] {
        match self {
            Shape::Circle(p) | Shape::Text(p, _) => &p[..],
            Shape::Line(p) | Shape::Polyline(p) => &p[..],
        }
    }
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Draw(Shape),
    Layer(i32),
    Color(ColorSpec),
    Thickness(f32),
    /// Tag not part of the format.
    Unknown,
}

impl Command {
    /// Parses one non-blank line.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut fields = Fields::new(line);
        let tag = match fields.next() {
            Some(tag) => tag,
            None => return Ok(Command::Unknown),
        };
        if let Some(kind) = PrimitiveKind::from_tag(tag) {
            return Ok(Command::Draw(parse_shape(kind, tag, &mut fields)?));
        }
        match tag {
            "y" => {
                let token = fields.next().ok_or_else(|| missing(tag, 1, 0))?;
                token
                    .parse::<i32>()
                    .map(Command::Layer)
                    .map_err(|_| malformed(tag, token))
            }
            "r" => {
                let [thickness] = floats::<1>(tag, &mut fields)?;
                Ok(Command::Thickness(thickness))
            }
            "@" => parse_color(tag, fields).map(Command::Color),
            _ => Ok(Command::Unknown),
        }
    }
}

fn parse_shape(
    kind: PrimitiveKind,
    tag: &str,
    fields: &mut Fields<'_>,
) -> Result<Shape, RecordError> {
    Ok(match kind {
        PrimitiveKind::Circle => Shape::Circle(floats(tag, fields)?),
        PrimitiveKind::Line => Shape::Line(floats(tag, fields)?),
        PrimitiveKind::Polyline => Shape::Polyline(floats(tag, fields)?),
        PrimitiveKind::Text => {
            let anchor = floats(tag, fields)?;
            Shape::Text(anchor, fields.remainder().to_string())
        }
    })
}

fn parse_color(tag: &str, fields: Fields<'_>) -> Result<ColorSpec, RecordError> {
    let tokens: Vec<&str> = fields.collect();
    let values = tokens
        .iter()
        .map(|token| number(tag, token))
        .collect::<Result<Vec<f32>, _>>()?;
    match values[..] {
        // Checked before truncation so `-0.5` does not land on entry 0.
        [index] if index < 0.0 => Err(RecordError::NegativePaletteIndex(tokens[0].into())),
        [index] => Ok(ColorSpec::Index(index as usize)),
        [r, g, b] => Ok(ColorSpec::Rgb([r, g, b])),
        [r, g, b, a] => Ok(ColorSpec::Rgba([r, g, b, a])),
        _ => Err(RecordError::ColorArity(values.len())),
    }
}

/// Reads exactly `N` numbers, leaving anything after them in `fields`.
fn floats<const N: usize>(tag: &str, fields: &mut Fields<'_>) -> Result<[f32; N], RecordError> {
    let mut out = [0.0; N];
    for (found, slot) in out.iter_mut().enumerate() {
        let token = fields.next().ok_or_else(|| missing(tag, N, found))?;
        *slot = number(tag, token)?;
    }
    Ok(out)
}

fn number(tag: &str, token: &str) -> Result<f32, RecordError> {
    match token.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(malformed(tag, token)),
    }
}

fn missing(tag: &str, expected: usize, found: usize) -> RecordError {
    RecordError::MissingField {
        tag: tag.into(),
        expected,
        found,
    }
}

fn malformed(tag: &str, token: &str) -> RecordError {
    RecordError::Malformed {
        tag: tag.into(),
        token: token.into(),
    }
}
