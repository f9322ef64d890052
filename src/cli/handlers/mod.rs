pub mod check;
pub mod classify;
pub mod encode;
pub mod migrate;
pub mod table;
pub mod verify;
