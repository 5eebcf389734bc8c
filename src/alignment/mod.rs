pub mod hit;
pub mod runner;

pub use hit::{parse_hits, AlignmentHit};
pub use runner::{Aligner, BlastnAligner, HitSink};
