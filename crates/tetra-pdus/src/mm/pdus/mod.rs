pub mod d_authentication;
pub mod d_ck_change_demand;
pub mod d_disable_enable;
pub mod d_group_identity;
pub mod d_location_update;
pub mod d_mm_status;
pub mod d_otar;
pub mod not_supported;
