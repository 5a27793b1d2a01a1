//! Anomaly injection.

pub mod injector;

pub use injector::{
    inject_into, inject_point_anomalies, AnomalyProfile, InjectionReport, DEFAULT_FREQUENCY,
};
