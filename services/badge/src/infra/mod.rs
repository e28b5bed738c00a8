pub mod cache;
pub mod db;
pub mod facts;
pub mod pubsub;
