//! Byte ranges within a single scanned line.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The text this span covers in `line`, or `""` if it does not fit.
    pub fn slice(self, line: &str) -> &str {
        line.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_is_bounds_checked() {
        let line = ")origin 0\n";
        assert_eq!(Span::new(1, 7).slice(line), "origin");
        assert_eq!(Span::new(8, 40).slice(line), "");
        assert!(Span::new(3, 3).is_empty());
    }
}
