pub mod attendees;
pub mod award_events;
pub mod categories;
pub mod events;
pub mod extract;
pub mod invites;
pub mod leaderboards;
pub mod nominees;
pub mod otp;
pub mod recipients;
pub mod votes;
