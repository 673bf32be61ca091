mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod guest;
use guest::GuestOnly;
