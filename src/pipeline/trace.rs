//! Step-by-step trace of an analysis run

use serde::Serialize;

use crate::pipeline::approximation::{serialize_by_decision, Approximation};
use crate::pipeline::partition::ClassSnapshot;
use crate::pipeline::rules::Rule;
use crate::pipeline::table::DecisionTable;

/// Stage-specific content of a step
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StepPayload {
    Data { data: DecisionTable },
    Classes { classes: Vec<ClassSnapshot> },
    Approximations {
        #[serde(serialize_with = "serialize_by_decision")]
        approximations: Vec<Approximation>,
    },
    Objects { objects: Vec<String> },
    Rules { rules: Vec<Rule> },
}

/// One recorded stage. The payload is an owned copy of that stage's output.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub step: usize,
    pub description: String,
    #[serde(flatten)]
    pub payload: StepPayload,
}

/// Ordered list of steps, numbered from 1
#[derive(Debug, Clone, Default)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, description: &str, payload: StepPayload) {
        let step = self.steps.len() + 1;
        tracing::debug!(step, description, "Recorded analysis step");
        self.steps.push(Step {
            step,
            description: description.to_string(),
            payload,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
