pub mod dashboard;
pub mod delivery;
pub mod geography;
pub mod health;
pub mod overview;
pub mod payments;
pub mod products;
pub mod reviews;
