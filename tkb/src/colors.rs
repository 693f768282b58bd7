//! Display colors per course code.
//!
//! Colors are handed out in first-encounter order and recycle once the
//! palette runs out. The mapping lives as long as the `ColorAssignment` value,
//! normally one per session, and can be reset explicitly.

use std::collections::HashMap;

pub const COURSE_COLORS: [&str; 10] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#f43f5e", "#f97316",
    "#eab308", "#22c55e", "#14b8a6", "#06b6d4", "#3b82f6",
];

#[derive(Debug, Clone)]
pub struct ColorAssignment {
    palette: &'static [&'static str],
    assigned: HashMap<String, &'static str>,
    next: usize,
}

impl Default for ColorAssignment {
    fn default() -> Self {
        ColorAssignment::new()
    }
}

impl ColorAssignment {
    pub fn new() -> ColorAssignment {
        ColorAssignment::with_palette(&COURSE_COLORS)
    }

    /// An empty palette falls back to [`COURSE_COLORS`].
    pub fn with_palette(palette: &'static [&'static str]) -> ColorAssignment {
        let palette: &'static [&'static str] = if palette.is_empty() { &COURSE_COLORS } else { palette };
        ColorAssignment { palette, assigned: HashMap::new(), next: 0 }
    }

    pub fn color_for(&mut self, course_code: &str) -> &'static str {
        if let Some(c) = self.peek(course_code) {
            return c;
        }
        let c = self.palette[self.next % self.palette.len()];
        self.next += 1;
        self.assigned.insert(course_code.to_string(), c);
        c
    }

    /// Color already given to `course_code`, without assigning one.
    pub fn peek(&self, course_code: &str) -> Option<&'static str> {
        self.assigned.get(course_code).copied()
    }

    pub fn reset(&mut self) {
        self.assigned.clear();
        self.next = 0;
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_code_same_color() {
        let mut colors = ColorAssignment::new();
        let a = colors.color_for("1001");
        colors.color_for("1002");
        assert_eq!(colors.color_for("1001"), a);
        assert_eq!(a, COURSE_COLORS[0]);
    }

    #[test]
    fn palette_recycles_after_p_codes() {
        let mut colors = ColorAssignment::new();
        let p = colors.palette_len();
        for i in 0..p {
            assert_eq!(colors.color_for(&format!("c{}", i)), COURSE_COLORS[i]);
        }
        assert_eq!(colors.color_for("one-more"), COURSE_COLORS[0]);
    }

    #[test]
    fn reset_starts_over() {
        static PAL: [&str; 2] = ["red", "blue"];
        let mut colors = ColorAssignment::with_palette(&PAL);
        colors.color_for("x");
        assert_eq!(colors.color_for("y"), "blue");
        colors.reset();
        assert_eq!(colors.peek("y"), None);
        assert_eq!(colors.color_for("y"), "red");
    }

    #[test]
    fn empty_palette_uses_default() {
        let mut colors = ColorAssignment::with_palette(&[]);
        assert_eq!(colors.color_for("x"), COURSE_COLORS[0]);
    }
}
