// Profile lookup and search over the CV repository.

pub mod handlers;
pub mod store;
