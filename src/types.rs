use std::fmt;

/// Strand decision taken from a hit's subject coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// start > end: the subject aligned on the reverse strand.
    Reverse,
    /// start < end: same strand, rotate so `start` becomes position 1.
    Forward,
    /// start == end: nothing sensible to do with it.
    Degenerate,
}

impl Orientation {
    pub fn from_coordinates(start: usize, end: usize) -> Self {
        match start.cmp(&end) {
            std::cmp::Ordering::Greater => Orientation::Reverse,
            std::cmp::Ordering::Less => Orientation::Forward,
            std::cmp::Ordering::Equal => Orientation::Degenerate,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::Reverse => "reverse",
            Orientation::Forward => "forward",
            Orientation::Degenerate => "degenerate",
        };
        write!(f, "{}", s)
    }
}
