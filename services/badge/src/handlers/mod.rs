pub mod badge;
pub mod ctf;
pub mod device;
