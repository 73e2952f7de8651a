pub mod role_switch;
