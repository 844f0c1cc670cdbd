// Resume analysis core: vocabulary scan, heuristic analyzer, job matcher.
// Everything except `handlers` is pure and performs no I/O.

pub mod analyzer;
pub mod feedback;
pub mod handlers;
pub mod matcher;
pub mod quality;
pub mod vocabulary;
