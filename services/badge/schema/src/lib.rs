pub mod events;
pub mod staff;
pub mod user_achievements;
pub mod users;
