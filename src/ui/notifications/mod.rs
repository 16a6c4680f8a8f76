// SPDX-License-Identifier: MPL-2.0
//! Toast notification system.
//!
//! Every API error and every aggregate outcome (bulk actions, batch uploads)
//! is surfaced here as a single line of text. Severity decides color and
//! auto-dismiss timing; errors stay until dismissed manually.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
