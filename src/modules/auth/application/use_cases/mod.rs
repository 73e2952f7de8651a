pub mod accept_oauth_callback;
pub mod restore_session;
pub mod sign_in;
pub mod sign_out;
pub mod switch_role;
