mod auth;
mod flash;

pub use auth::{
    CurrentUser, SESSION_COOKIE, clear_session_cookie, issue_session_cookie, require_auth,
    session_user,
};
pub use flash::{Flash, push_flash, take_flash};
