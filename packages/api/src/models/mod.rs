//! Wire models for the notes API.

mod note;
mod user;

pub use note::{filter_notes, NoteCreate, NoteResponse, NoteUpdate};
pub use user::{
    LoginRequest, PageMeta, PaginatedUsers, Registration, Role, Token, UserCreate, UserQuery,
    UserResponse,
};
