// CV highlight matching.
// Inline span matching over displayed text, citation classification over assistant
// answers, and the incremental variant used while an answer is still streaming.
// Everything here is pure and synchronous; handlers are thin adapters.

pub mod board;
pub mod citations;
pub mod handlers;
pub mod message;
pub mod spans;
pub mod stream;
pub mod terms;
