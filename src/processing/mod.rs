//! Text cleaning, filtering and aggregation

pub mod frequency;
pub mod pipeline;
pub mod sentiment;
pub mod stop_words;
pub mod text_cleaner;
