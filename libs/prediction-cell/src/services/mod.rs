pub mod predictor;

pub use predictor::{
    demographic_risk, financial_risk, historical_risk, timing_risk, NoShowPredictor,
};
