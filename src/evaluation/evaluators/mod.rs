mod diversity_evaluator;

pub use diversity_evaluator::DiversityEvaluator;
