pub mod dispatch;
mod question;
mod shared;
