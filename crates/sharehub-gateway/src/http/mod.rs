pub mod health;
pub mod share;
