//! API models for stored records and request/response payloads

pub mod idea;
pub mod user;

pub use idea::{Idea, IdeaDraft, IdeaRequest};
pub use user::{AuthResponse, LoginRequest, NewUser, PublicUser, RegisterRequest, User};
