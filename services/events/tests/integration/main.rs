mod helpers;
mod leaderboard_test;
mod otp_test;
mod vote_test;
