//! Menutree Types - shared domain types for the restaurant admin surfaces
//!
//! ## Key Concepts
//!
//! - **Restaurant**: A restaurant record owned by a user
//! - **SessionContext**: Read-only view of the signed-in user, passed
//!   explicitly into whatever renders session-dependent output
//! - **Notification**: A success or error message emitted after an action settles

#![deny(unsafe_code)]

pub mod ids;
pub mod notification;
pub mod restaurant;
pub mod session;

pub use ids::{IdParseError, RestaurantId, UserId};
pub use notification::{Notification, NotificationKind};
pub use restaurant::Restaurant;
pub use session::{SessionContext, SessionUser};
