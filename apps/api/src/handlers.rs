pub mod health;
pub mod likes;
