#![allow(dead_code)]

pub mod factories;
pub mod fakes;
pub mod helpers;

pub use factories::*;
pub use fakes::*;
pub use helpers::*;
