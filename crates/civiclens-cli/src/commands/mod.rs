pub mod check;
pub mod issue;
pub mod leaderboard;
pub mod notifications;
pub mod user;
