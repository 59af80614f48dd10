//! Renderers: registry data to Ruby stub text.
//!
//! Nothing here touches the filesystem except stub discovery in
//! [`manifest::discover_stubs`]; writing happens in `crate::writer`.

pub mod docstring;
pub mod manifest;
pub mod stub;
