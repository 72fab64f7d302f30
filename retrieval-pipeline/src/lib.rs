#![allow(clippy::missing_docs_in_private_items)]

pub mod classifier;
pub mod completion;
pub mod pipeline;

pub use pipeline::{QueryOutcome, QueryPipeline, StoreContextSource};
