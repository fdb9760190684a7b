// Forecast pipeline stages, in the order the assembler runs them
pub mod historical_matcher;
pub mod path_replayer;
pub mod path_synthesizer;
pub mod divergence;
pub mod data_quality;
pub mod scenario_builder;

pub use data_quality::{DataQualityClassifier, QualityInputs};
pub use divergence::{DivergenceAnalyzer, DivergenceReport};
pub use historical_matcher::{HistoricalMatcher, similarity_weights};
pub use path_replayer::PathReplayer;
pub use path_synthesizer::PathSynthesizer;
pub use scenario_builder::ScenarioBuilder;
