pub mod aggregate;
pub mod goals;
pub mod preferences;
pub mod providers;
pub mod rank;
pub mod recommend;
pub mod social;
pub mod trends;
