pub mod ctf_action;
pub mod registration;
pub mod resolve;
