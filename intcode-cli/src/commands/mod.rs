pub mod common;
pub mod peek;
pub mod run;
pub mod trace;
