//! Infrastructure 層
//!
//! ストアアダプタ（Repository 実装）と HTTP DTO を提供します。

pub mod dto;
pub mod repository;
