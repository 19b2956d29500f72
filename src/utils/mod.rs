pub mod poise;
pub use poise::Context;

pub mod serenity;
