pub mod check;
pub mod lowest;
pub mod trace;
