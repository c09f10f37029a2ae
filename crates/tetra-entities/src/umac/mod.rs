pub mod subcomp;
pub mod upper_mac;
