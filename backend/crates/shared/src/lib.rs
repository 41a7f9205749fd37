//! Shared Kernel
//!
//! Vocabulary shared by every LightBnB crate:
//! - Unified error type and result alias
//! - Typed database identifiers
//! - Request extractors with JSON rejections (`axum` feature)
//!
//! Only things whose meaning is identical in `auth` and `booking` belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
