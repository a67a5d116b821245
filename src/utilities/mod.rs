// src/utilities/mod.rs

pub mod interleave;

pub use interleave::interleave;
