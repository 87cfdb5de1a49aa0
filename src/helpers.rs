/// Whitespace-separated fields of a line that can hand back the unsplit
/// remainder at any point.
#[derive(Debug, Clone)]
pub(crate) struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Everything after the last returned field, minus exactly one
    /// separating whitespace character.
    pub(crate) fn remainder(&self) -> &'a str {
        let mut chars = self.rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => chars.as_str(),
            _ => self.rest,
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.rest.trim_start();
        if start.is_empty() {
            self.rest = start;
            return None;
        }
        let end = start.find(char::is_whitespace).unwrap_or(start.len());
        let (field, rest) = start.split_at(end);
        self.rest = rest;
        Some(field)
    }
}

/// Clamps `v` into `0..len`; `len == 0` yields 0.
pub(crate) fn clamp_index(v: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        v.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let fields: Vec<&str> = Fields::new("  c\t1  2 3 ").collect();
        assert_eq!(fields, vec!["c", "1", "2", "3"]);
    }

    #[test]
    fn remainder_drops_one_separator() {
        let mut fields = Fields::new("t 1 2 3  hello   world ");
        for _ in 0..4 {
            fields.next();
        }
        assert_eq!(fields.remainder(), " hello   world ");
    }

    #[test]
    fn remainder_of_exhausted_line_is_empty() {
        let mut fields = Fields::new("t 1 2 3");
        for _ in 0..4 {
            fields.next();
        }
        assert_eq!(fields.remainder(), "");
    }

    #[test]
    fn clamp() {
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(7, 0), 0);
    }
}
