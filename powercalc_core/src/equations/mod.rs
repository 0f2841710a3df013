//! # Engineering Equations
//!
//! The physical formulas shared by the calculation domains, kept in one place
//! so each can be checked against its textbook form once:
//!
//! - [`electrical`] - battery energy, apparent power, three-phase current,
//!   power-factor correction
//! - [`hydraulics`] - hydraulic and shaft power for pumps
//! - [`structural`] - design load, bending moment, section modulus
//!
//! Every function is pure and total. Divisions by a non-positive quantity
//! return `0` (see [`crate::numeric::ratio_or_zero`]).

pub mod electrical;
pub mod hydraulics;
pub mod structural;

pub use electrical::{
    apparent_power,
    battery_energy_wh,
    capacitor_kvar,
    input_power,
    three_phase_current,
};

pub use hydraulics::{
    daily_pumping_power_kw,
    hydraulic_power_w,
    shaft_power,
};

pub use structural::{
    bending_moment,
    design_load,
    required_section_modulus_cm3,
    SupportCondition,
};
