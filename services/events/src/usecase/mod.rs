pub mod attendee;
pub mod award_event;
pub mod category;
pub mod event;
pub mod invite;
pub mod leaderboard;
pub mod nominee;
pub mod otp;
pub mod recipient;
pub mod vote;
