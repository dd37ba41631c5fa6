//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who a message is attributed to.
///
/// # Examples
///
/// ```
/// use rackham_core::Role;
///
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the model's persona
    #[display("system")]
    System,
    /// The request itself
    #[display("user")]
    User,
    /// Model output
    #[display("assistant")]
    Assistant,
}
