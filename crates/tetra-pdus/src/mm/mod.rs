pub mod elements;
pub mod enums;
pub mod pdus;
