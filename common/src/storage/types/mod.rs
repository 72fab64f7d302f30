pub mod answer;
pub mod text_chunk;
