pub mod assignment;
pub mod department;
pub mod health;
pub mod user;
