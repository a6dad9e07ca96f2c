pub mod cv;
pub mod highlight;
