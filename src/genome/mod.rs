pub mod fasta;
pub mod reverse;
pub mod rotate;

pub use reverse::{reverse_complement, write_reversed, REVERSED_SUFFIX};
pub use rotate::{rotate, write_rotated};
