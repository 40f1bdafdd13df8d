pub mod auth;
pub mod collection;
pub mod favorite;
pub mod generate;
pub mod journal;
pub mod music;
pub mod playlist;
pub mod upload;
pub mod user;
