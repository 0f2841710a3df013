//! # Structural Beam Sizing
//!
//! Bending-only sizing of a uniformly loaded beam, with a rough weight and
//! cost estimate and the lightest catalogue section that provides the
//! required section modulus.
//!
//! ## Procedure
//!
//! 1. Factored line load `w = (live + dead) × SF`
//! 2. Maximum moment `M = wL²/8` (simply supported) or `wL²/12` (fixed)
//! 3. Required section modulus `Z = M × 10⁶ / (E × 1000)`
//! 4. `weight = Z × ρ × L × width / 1000`, `cost = Z × ρ × L × width × price / 10⁶`
//! 5. Lightest section of the material's catalogue with `Z_section >= Z`
//!
//! Deflection, shear and buckling are not checked.

use serde::{Deserialize, Serialize};

use crate::equations::{bending_moment, design_load, required_section_modulus_cm3, SupportCondition};
use crate::errors::CalcResult;
use crate::numeric::non_negative;
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::validation::ParsedInputs;

// ============================================================================
// Materials and section catalogues
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeamMaterial {
    Steel,
    Aluminum,
    Timber,
    Concrete,
}

/// Properties of a beam material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    /// Modulus (MPa)
    pub modulus_mpa: f64,
    /// Density (kg/m³)
    pub density: f64,
    /// Supply price (KES/kg)
    pub cost_per_kg: f64,
}

/// A rolled, extruded, sawn or cast standard section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardSection {
    pub designation: &'static str,
    /// Elastic section modulus (cm³)
    pub modulus_cm3: f64,
    /// Mass per metre (kg/m)
    pub weight_kg_m: f64,
}

const fn section(designation: &'static str, modulus_cm3: f64, weight_kg_m: f64) -> StandardSection {
    StandardSection {
        designation,
        modulus_cm3,
        weight_kg_m,
    }
}

const STEEL_UB: [StandardSection; 7] = [
    section("UB 203x133x25", 232.0, 25.0),
    section("UB 254x146x31", 351.0, 31.0),
    section("UB 305x165x40", 623.0, 40.0),
    section("UB 356x171x45", 775.0, 45.0),
    section("UB 406x178x60", 1190.0, 60.0),
    section("UB 457x191x67", 1530.0, 67.0),
    section("UB 533x210x82", 2060.0, 82.0),
];

const ALUMINIUM_I: [StandardSection; 4] = [
    section("AL I 150x75x6", 105.0, 8.5),
    section("AL I 200x100x8", 245.0, 12.5),
    section("AL I 250x125x10", 480.0, 18.5),
    section("AL I 300x150x12", 815.0, 25.5),
];

const TIMBER: [StandardSection; 4] = [
    section("Timber 150x50", 187.5, 3.75),
    section("Timber 200x50", 333.0, 5.0),
    section("Timber 250x75", 781.0, 9.375),
    section("Timber 300x100", 1500.0, 15.0),
];

const CONCRETE: [StandardSection; 3] = [
    section("RC 300x600", 5400.0, 432.0),
    section("RC 400x800", 12800.0, 768.0),
    section("RC 500x1000", 25000.0, 1200.0),
];

impl BeamMaterial {
    pub const OPTIONS: [&'static str; 4] = ["steel", "aluminum", "timber", "concrete"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "steel" => Some(BeamMaterial::Steel),
            "aluminum" => Some(BeamMaterial::Aluminum),
            "timber" => Some(BeamMaterial::Timber),
            "concrete" => Some(BeamMaterial::Concrete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BeamMaterial::Steel => "steel",
            BeamMaterial::Aluminum => "aluminum",
            BeamMaterial::Timber => "timber",
            BeamMaterial::Concrete => "concrete",
        }
    }

    pub fn properties(&self) -> MaterialProperties {
        let (modulus_mpa, density, cost_per_kg) = match self {
            BeamMaterial::Steel => (200_000.0, 7850.0, 250.0),
            BeamMaterial::Aluminum => (70_000.0, 2700.0, 600.0),
            BeamMaterial::Timber => (11_000.0, 500.0, 150.0),
            BeamMaterial::Concrete => (30_000.0, 2400.0, 50.0),
        };
        MaterialProperties {
            modulus_mpa,
            density,
            cost_per_kg,
        }
    }

    /// Standard sections available in this material
    pub fn catalogue(&self) -> &'static [StandardSection] {
        match self {
            BeamMaterial::Steel => &STEEL_UB,
            BeamMaterial::Aluminum => &ALUMINIUM_I,
            BeamMaterial::Timber => &TIMBER,
            BeamMaterial::Concrete => &CONCRETE,
        }
    }

    /// Lightest catalogue section with at least `required_cm3` of modulus.
    pub fn lightest_adequate(&self, required_cm3: f64) -> Option<StandardSection> {
        self.catalogue()
            .iter()
            .filter(|s| s.modulus_cm3 >= required_cm3)
            .min_by(|a, b| a.weight_kg_m.total_cmp(&b.weight_kg_m))
            .copied()
    }
}

// ============================================================================
// Sizing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSizingInput {
    /// Live load (kN/m)
    pub live_load: f64,
    /// Dead load (kN/m)
    pub dead_load: f64,
    /// Span (m)
    pub span_m: f64,
    /// Tributary width (m)
    pub width_m: f64,
    pub safety_factor: f64,
    pub material: BeamMaterial,
    pub support: SupportCondition,
}

impl BeamSizingInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let material = parsed.require_choice("material")?;
        let support = parsed.require_choice("supportType")?;
        Ok(BeamSizingInput {
            live_load: parsed.require("liveLoad")?,
            dead_load: parsed.require("deadLoad")?,
            span_m: parsed.require("span")?,
            width_m: parsed.require("width")?,
            safety_factor: parsed.require("safetyFactor")?,
            material: BeamMaterial::from_option(material).unwrap_or(BeamMaterial::Steel),
            support: SupportCondition::from_option(support),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamSizingResult {
    pub design_load: f64,
    pub moment_knm: f64,
    pub section_modulus_cm3: f64,
    pub estimated_weight_kg: f64,
    pub estimated_cost: f64,
    pub material: BeamMaterial,
    /// `None` when no catalogue section is large enough
    pub section: Option<StandardSection>,
}

impl BeamSizingResult {
    pub fn to_outcome(&self) -> Outcome {
        let mut outcome = Outcome::new()
            .with("Design load (kN/m)", self.design_load)
            .with("Bending moment (kN·m)", self.moment_knm)
            .with("Required section modulus (cm3)", self.section_modulus_cm3)
            .with("Estimated weight (kg)", self.estimated_weight_kg)
            .with("Estimated cost", self.estimated_cost)
            .with("Material", self.material.as_str());
        match &self.section {
            Some(s) => {
                outcome.push("Recommended section", s.designation);
                outcome.push("Section weight (kg/m)", s.weight_kg_m);
            }
            None => outcome.push("Recommended section", "none"),
        }
        outcome
    }
}

pub fn calculate(input: &BeamSizingInput) -> BeamSizingResult {
    let props = input.material.properties();
    let load = non_negative(design_load(input.live_load, input.dead_load, input.safety_factor));
    let moment_knm = bending_moment(load, input.span_m, input.support);
    let section_modulus_cm3 = required_section_modulus_cm3(moment_knm, props.modulus_mpa);

    let volume_term = section_modulus_cm3 * props.density * input.span_m * input.width_m;

    BeamSizingResult {
        design_load: load,
        moment_knm,
        section_modulus_cm3,
        estimated_weight_kg: non_negative(volume_term / 1000.0),
        estimated_cost: non_negative(volume_term * props.cost_per_kg / 1e6),
        material: input.material,
        section: input.material.lightest_adequate(section_modulus_cm3),
    }
}

pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("liveLoad", "Live load").unit("kN/m").min(0.0).required(),
        FieldSpec::number("deadLoad", "Dead load").unit("kN/m").min(0.0).required(),
        FieldSpec::number("span", "Span length").unit("m").min(0.1).required(),
        FieldSpec::number("width", "Tributary width").unit("m").min(0.0).default_number(1.0),
        FieldSpec::number("safetyFactor", "Safety factor").range(1.0, 3.0).default_number(1.5),
        FieldSpec::choice("material", "Material", BeamMaterial::OPTIONS).default_choice("steel"),
        FieldSpec::choice("supportType", "Support type", SupportCondition::OPTIONS).default_choice("simply"),
    ]
}

fn compute(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = BeamSizingInput::from_parsed(parsed)?;
    Ok(calculate(&input).to_outcome())
}

pub fn descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "structural-beam-sizing",
        label: "Structural Beam Sizing",
        summary: "Bending moment, section modulus and standard section for a beam",
        inputs: fields(),
        compute,
        projector: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_beam() -> BeamSizingInput {
        BeamSizingInput {
            live_load: 10.0,
            dead_load: 5.0,
            span_m: 6.0,
            width_m: 1.0,
            safety_factor: 1.5,
            material: BeamMaterial::Steel,
            support: SupportCondition::Simply,
        }
    }

    #[test]
    fn test_simply_supported_steel() {
        let result = calculate(&floor_beam());
        assert_eq!(result.design_load, 22.5);
        assert_eq!(result.moment_knm, 101.25);
        assert!((result.section_modulus_cm3 - 0.50625).abs() < 1e-12);
        // 0.50625 × 7850 × 6 / 1000
        assert!((result.estimated_weight_kg - 23.844_375).abs() < 1e-9);
        assert!((result.estimated_cost - 5.961_093_75).abs() < 1e-9);
        assert_eq!(result.section.map(|s| s.designation), Some("UB 203x133x25"));
    }

    #[test]
    fn test_fixed_support_lowers_moment() {
        let fixed = BeamSizingInput {
            support: SupportCondition::Fixed,
            ..floor_beam()
        };
        assert_eq!(calculate(&fixed).moment_knm, 67.5);
    }

    #[test]
    fn test_lightest_adequate_section() {
        let pick = BeamMaterial::Steel.lightest_adequate(700.0).unwrap();
        assert_eq!(pick.designation, "UB 356x171x45");
        let timber = BeamMaterial::Timber.lightest_adequate(200.0).unwrap();
        assert_eq!(timber.designation, "Timber 200x50");
        assert!(BeamMaterial::Aluminum.lightest_adequate(1_000.0).is_none());
    }

    #[test]
    fn test_no_adequate_section_reported() {
        let result = BeamSizingResult {
            section: BeamMaterial::Concrete.lightest_adequate(30_000.0),
            ..calculate(&floor_beam())
        };
        let outcome = result.to_outcome();
        assert_eq!(outcome.text("Recommended section"), Some("none"));
        assert!(outcome.get("Section weight (kg/m)").is_none());
    }

    #[test]
    fn test_material_changes_modulus() {
        let timber = BeamSizingInput {
            material: BeamMaterial::Timber,
            ..floor_beam()
        };
        let result = calculate(&timber);
        assert!(result.section_modulus_cm3 > calculate(&floor_beam()).section_modulus_cm3);
        assert_eq!(result.to_outcome().text("Material"), Some("timber"));
    }

    #[test]
    fn test_catalogues_are_ordered_by_weight() {
        for material in [BeamMaterial::Steel, BeamMaterial::Aluminum, BeamMaterial::Timber, BeamMaterial::Concrete] {
            let weights: Vec<f64> = material.catalogue().iter().map(|s| s.weight_kg_m).collect();
            assert!(weights.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
