pub mod mood;
pub mod period;
pub mod recommendation;
pub mod user;

pub use mood::*;
pub use period::*;
pub use recommendation::*;
pub use user::*;

#[cfg(test)]
mod tests;
