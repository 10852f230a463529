// Draft bookkeeping: positions, the draft log, roster slots, board view.

pub mod board;
pub mod pick;
pub mod roster;
pub mod state;
