//! Macro for implementing Display and FromStr for status enums
//!
//! Status enums are persisted as lowercase text and accepted from query
//! strings in any case, so both directions share one mapping table.
//!
//! # Example
//!
//! ```rust
//! use vibekeeper_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ReminderState {
//!     Scheduled,
//!     Sent,
//! }
//!
//! impl_domain_status_conversions!(ReminderState {
//!     Scheduled => "scheduled",
//!     Sent => "sent",
//! });
//!
//! assert_eq!(ReminderState::Sent.to_string(), "sent");
//! assert_eq!("SCHEDULED".parse::<ReminderState>(), Ok(ReminderState::Scheduled));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display: the mapped lowercase string
/// - FromStr: case-insensitive parse, error names the enum and the input
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
