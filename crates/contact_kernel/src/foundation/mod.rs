//! Foundation types shared by every kernel module

pub mod math;
