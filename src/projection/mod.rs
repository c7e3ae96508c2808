//! Third-pillar compound projection engine

mod engine;

pub use engine::{
    AccountProjection, ProjectionConfig, ProjectionEngine, YearRow, DEFAULT_RENT_YEARS,
    DEFAULT_RETIREMENT_AGE,
};
