//! Active session records and device classification.
//!
//! Sessions are server-owned; the client only lists and revokes them. The
//! one piece of client-side state is the id of the session the client
//! itself is running under, used to tell self-revocation (log out and
//! navigate to login) apart from revoking some other device (just drop the
//! row from the list).

pub mod device;
pub mod models;

pub use device::{Browser, DeviceInfo, Os};
pub use models::SessionRecord;
