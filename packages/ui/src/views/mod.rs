mod dashboard;
pub use dashboard::DashboardView;

mod users;
pub use users::UsersView;

mod user_notes;
pub use user_notes::{parse_id, UserNotesView};

mod admin_note;
pub use admin_note::AdminNoteView;
