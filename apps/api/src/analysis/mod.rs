// Resume analysis: the HTTP-facing pipeline around the scoring core.
// Each request is independent; nothing is persisted.

pub mod handlers;
pub mod pipeline;
