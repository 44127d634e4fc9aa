//! Mail gateway implementations.
//!
//! [`email`] delivers over SMTP. [`log`] stands in when SMTP is not
//! configured. [`recording`] keeps sends in memory for tests.

pub mod email;
pub mod log;
pub mod recording;
