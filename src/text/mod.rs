//! Text preprocessing: cleaning, tokenization and lemmatization

pub mod lemmatizer;
pub mod normalizer;
pub mod resources;
pub mod stopwords;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
pub use resources::LinguisticResources;
pub use tokenizer::Tokenizer;
