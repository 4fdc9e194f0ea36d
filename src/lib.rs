//! Tabula - virtual tabletop piece engine with composable trait chains

pub mod codec;
pub mod context;
pub mod core;
pub mod piece;
pub mod render;
pub mod roll;
