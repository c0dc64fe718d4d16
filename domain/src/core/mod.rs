//! Core domain types shared across the council flow

pub mod message;
pub mod model;
pub mod question;

pub use message::{Message, Role};
pub use model::Model;
pub use question::Question;
