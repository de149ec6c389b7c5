pub mod errors;
pub mod levels;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use errors::FudagenError;
pub use levels::{ JlptLevel, WordLevel };
pub use models::{ ExamplePair, FormType, KanjiEntry, Sense, VocabEntry };
