//! Training sequences, Clause 9.4.4.3.

/// 9.4.4.3.2 Normal training sequence 1 (n1..n22): full-slot burst
pub const NORMAL_TRAINING_SEQ_1: [u8; 22] =
    [1, 1, 0, 1, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 0];

/// 9.4.4.3.2 Normal training sequence 2 (p1..p22): split-slot burst
pub const NORMAL_TRAINING_SEQ_2: [u8; 22] =
    [0, 1, 1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1, 0];

/// 9.4.4.3.4 Synchronisation training sequence (y1..y38)
pub const SYNC_TRAINING_SEQ: [u8; 38] = [
    1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 0,
    1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1,
];
