pub mod burst_consts;
pub mod framesync;
pub mod train_consts;
