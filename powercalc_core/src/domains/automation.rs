//! # Automation
//!
//! Three-step cycle: `T = t1 + t2 + t3`, throughput `3600 / T` units per hour
//! and utilization `busy / T`. Both are 0 for a zero-length cycle.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::numeric::ratio_or_zero;
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::units::SECONDS_PER_HOUR;
use crate::validation::ParsedInputs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputInput {
    /// Step durations (s)
    pub step_times: [f64; 3],
    /// Busy time per cycle (s)
    pub busy_time: f64,
}

impl ThroughputInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(ThroughputInput {
            step_times: [parsed.require("t1")?, parsed.require("t2")?, parsed.require("t3")?],
            busy_time: parsed.require("busy")?,
        })
    }

    pub fn cycle_time(&self) -> f64 {
        self.step_times.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputResult {
    pub cycle_time_s: f64,
    pub units_per_hour: f64,
    pub utilization: f64,
}

impl ThroughputResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Cycle time (s)", self.cycle_time_s)
            .with("Throughput (units/h)", self.units_per_hour)
            .with("Utilization (ratio)", self.utilization)
    }
}

pub fn calculate(input: &ThroughputInput) -> ThroughputResult {
    let cycle_time_s = input.cycle_time();
    ThroughputResult {
        cycle_time_s,
        units_per_hour: ratio_or_zero(SECONDS_PER_HOUR, cycle_time_s),
        utilization: ratio_or_zero(input.busy_time, cycle_time_s),
    }
}

pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("t1", "Step 1 time").unit("s").min(0.0).required(),
        FieldSpec::number("t2", "Step 2 time").unit("s").min(0.0).required(),
        FieldSpec::number("t3", "Step 3 time").unit("s").min(0.0).required(),
        FieldSpec::number("busy", "Busy time per cycle").unit("s").min(0.0).required(),
    ]
}

fn compute(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = ThroughputInput::from_parsed(parsed)?;
    Ok(calculate(&input).to_outcome())
}

pub fn descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "automation-throughput",
        label: "Automation",
        summary: "Cycle time, throughput and utilization of a three-step cell",
        inputs: fields(),
        compute,
        projector: None,
    }
}
