//! ## Trip Preparation Pipeline
//!
//! This module provides the abstractions used to prepare a raw trip dataset for analysis.
//!
//! ### Overview
//!
//! - The [`Transformer`] trait defines a common interface for a preparation step
//!   (the zone lookup join and the cleaner are both transformers).
//! - The [`Pipeline`] struct chains named steps. Each step only extends the logical plan,
//!   so nothing is executed until an aggregation collects the result.
//! - Macros [`crate::impl_transformer`] and [`crate::make_pipeline`] simplify implementing
//!   transformers and building pipelines.

use crate::exceptions::{TaxiReportError, TaxiReportResult};
use async_trait::async_trait;
use datafusion::prelude::*;
use std::time::Instant;
use tracing::info;

/// Trait for the steps of the preparation pipeline.
///
/// `fit` may inspect the input (for example its schema) before `transform` is applied;
/// `transform` updates the DataFrame's logical plan without triggering execution.
#[async_trait]
pub trait Transformer {
    /// Fit the transformer given a DataFrame.
    async fn fit(&mut self, df: &DataFrame) -> TaxiReportResult<()>;

    /// Transform the input DataFrame, returning a new DataFrame with the step applied.
    fn transform(&self, df: DataFrame) -> TaxiReportResult<DataFrame>;

    /// Returns true if the transformer must be fitted before `transform` can be called.
    fn is_stateful(&self) -> bool;
}

/// Implements [`Transformer`] for a type that provides inherent `fit`, `transform`
/// and `inherent_is_stateful` methods.
#[macro_export]
macro_rules! impl_transformer {
    ($ty:ty) => {
        #[async_trait::async_trait]
        impl $crate::pipeline::Transformer for $ty {
            async fn fit(
                &mut self,
                df: &datafusion::prelude::DataFrame,
            ) -> $crate::exceptions::TaxiReportResult<()> {
                <$ty>::fit(self, df).await
            }
            fn transform(
                &self,
                df: datafusion::prelude::DataFrame,
            ) -> $crate::exceptions::TaxiReportResult<datafusion::prelude::DataFrame> {
                <$ty>::transform(self, df)
            }
            fn is_stateful(&self) -> bool {
                <$ty>::inherent_is_stateful(self)
            }
        }
    };
}

fn step_failed(name: &str, source: TaxiReportError) -> TaxiReportError {
    TaxiReportError::StepFailed {
        step: name.to_string(),
        source: Box::new(source),
    }
}

/// A pipeline that chains a sequence of transformers.
///
/// Each transformer's output (a new logical plan) is passed as input to the next one.
pub struct Pipeline {
    steps: Vec<(String, Box<dyn Transformer + Send + Sync>)>,
    verbose: bool,
}

impl Pipeline {
    /// Creates a new pipeline.
    ///
    /// # Arguments
    ///
    /// * `steps` - A vector of (name, transformer) pairs.
    /// * `verbose` - If true, logs every step with its timing.
    pub fn new(steps: Vec<(String, Box<dyn Transformer + Send + Sync>)>, verbose: bool) -> Self {
        Self { steps, verbose }
    }

    /// Names of the steps, in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Fits each transformer on the output of the previous one and returns the final plan.
    pub async fn fit(&mut self, df: &DataFrame) -> TaxiReportResult<DataFrame> {
        if self.steps.is_empty() {
            return Err(TaxiReportError::InvalidParameter(
                "Pipeline must have at least one transformer.".to_string(),
            ));
        }
        let mut current_df = df.clone();
        for (name, step) in self.steps.iter_mut() {
            let start = Instant::now();
            step.fit(&current_df)
                .await
                .map_err(|e| step_failed(name, e))?;
            current_df = step.transform(current_df).map_err(|e| step_failed(name, e))?;
            if self.verbose {
                info!(step = %name, elapsed = ?start.elapsed(), "pipeline step planned");
            }
        }
        Ok(current_df)
    }

    /// Applies the `transform` method of each transformer (without fitting).
    pub fn transform(&self, df: DataFrame) -> TaxiReportResult<DataFrame> {
        if self.steps.is_empty() {
            return Err(TaxiReportError::InvalidParameter(
                "Pipeline must have at least one transformer.".to_string(),
            ));
        }
        let mut current_df = df;
        for (name, step) in self.steps.iter() {
            if self.verbose {
                info!(step = %name, "applying transformer");
            }
            current_df = step.transform(current_df).map_err(|e| step_failed(name, e))?;
        }
        Ok(current_df)
    }

    /// Convenience method to call `fit` and return the final transformed DataFrame.
    pub async fn fit_transform(&mut self, df: &DataFrame) -> TaxiReportResult<DataFrame> {
        self.fit(df).await
    }
}

/// Macro to simplify pipeline creation by automatically boxing transformers.
///
/// # Example
///
/// ```rust,no_run
/// use taxi_report::make_pipeline;
/// use taxi_report::transformers::cleaning::TripCleaner;
///
/// let pipeline = make_pipeline!(false,
///     ("cleaning", TripCleaner::new()),
/// );
/// ```
#[macro_export]
macro_rules! make_pipeline {
    ($verbose:expr, $(($name:expr, $transformer:expr)),+ $(,)?) => {
        {
            let steps: Vec<(String, Box<dyn $crate::pipeline::Transformer + Send + Sync>)> = vec![
                $(
                    ($name.to_string(), Box::new($transformer)),
                )+
            ];
            $crate::pipeline::Pipeline::new(steps, $verbose)
        }
    };
}
