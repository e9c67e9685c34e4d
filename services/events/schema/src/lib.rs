//! sea-orm entities for the events service.

pub mod attendees;
pub mod award_events;
pub mod categories;
pub mod events;
pub mod invite_codes;
pub mod nominees;
pub mod otps;
pub mod recipients;
pub mod votes;
