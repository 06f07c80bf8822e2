//! Menutree Admin - restaurant admin surfaces
//!
//! Builds the owner-facing screens on top of the confirmation gate:
//! - Header that switches between a sign-in link and the user menu
//! - Delete-restaurant dialog guarded by a two-field confirmation
//! - Restaurant directory the delete mutation is dispatched to

#![deny(unsafe_code)]

pub mod config;
pub mod dialog;
pub mod directory;
pub mod error;
pub mod header;
pub mod notify;

pub use crate::config::{AdminConfig, CatalogConfig, LoggingConfig};
pub use dialog::{DeleteRestaurantDialog, DialogCopy};
pub use directory::{InMemoryRestaurantDirectory, RestaurantDirectory};
pub use error::{AdminError, AdminResult, DirectoryError};
pub use header::{HeaderAction, HeaderView};
pub use notify::ConsoleNotifier;
