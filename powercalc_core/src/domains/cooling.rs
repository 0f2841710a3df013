//! # AC Cooling Load
//!
//! Heat-gain estimate for one room, the air-conditioning capacity it calls
//! for, and what that capacity costs to buy and to run.
//!
//! ```text
//! Q_room   = area × BTU/m² (by room type)
//! Q_window = windows × area_w × 800 × orientation
//! Q_roof   = area × 150                     (exposed roof only)
//! Q_people = people × 400                   (600 in a gym)
//! Q_equip  = (computers × 300 + lighting + other) × 3.41
//! Q_total  = ΣQ × (1 + (ΔT - 10) × 0.02) × (1 + (RH - 50) × 0.005)
//! Q_design = Q_total × margin               (1.2)
//! ```
//!
//! The recommended unit is the smallest standard size covering the design
//! load, or the largest size when none does. Running cost uses the EER of
//! the chosen AC type interpolated over its 1-5 star range.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::numeric::{ceil_count, non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, CoolingAssumptions};
use crate::validation::ParsedInputs;

const WINDOW_BTU_PER_M2: f64 = 800.0;
const ROOF_BTU_PER_M2: f64 = 150.0;
const COMPUTER_W: f64 = 300.0;
const BTU_PER_WATT: f64 = 3.41;
const BTU_PER_TON: f64 = 12_000.0;
const BTU_PER_KW: f64 = 3412.0;

/// Standard split-unit capacities (BTU/h)
pub const STANDARD_SIZES_BTU: [f64; 8] = [9000.0, 12_000.0, 18_000.0, 24_000.0, 30_000.0, 36_000.0, 48_000.0, 60_000.0];

// ============================================================================
// Room, window and equipment tables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    Bedroom,
    LivingRoom,
    Office,
    ServerRoom,
    ConferenceRoom,
    Restaurant,
    Retail,
    CommercialKitchen,
    HospitalWard,
    Gym,
}

impl RoomType {
    pub const OPTIONS: [&'static str; 10] = [
        "bedroom",
        "living-room",
        "office",
        "server-room",
        "conference-room",
        "restaurant",
        "retail",
        "commercial-kitchen",
        "hospital-ward",
        "gym",
    ];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "bedroom" => Some(RoomType::Bedroom),
            "living-room" => Some(RoomType::LivingRoom),
            "office" => Some(RoomType::Office),
            "server-room" => Some(RoomType::ServerRoom),
            "conference-room" => Some(RoomType::ConferenceRoom),
            "restaurant" => Some(RoomType::Restaurant),
            "retail" => Some(RoomType::Retail),
            "commercial-kitchen" => Some(RoomType::CommercialKitchen),
            "hospital-ward" => Some(RoomType::HospitalWard),
            "gym" => Some(RoomType::Gym),
            _ => None,
        }
    }

    /// Base heat gain per m² of floor (BTU/h)
    pub fn btu_per_m2(&self) -> f64 {
        match self {
            RoomType::Bedroom => 500.0,
            RoomType::LivingRoom => 550.0,
            RoomType::Office => 600.0,
            RoomType::ServerRoom => 2000.0,
            RoomType::ConferenceRoom => 700.0,
            RoomType::Restaurant => 800.0,
            RoomType::Retail => 650.0,
            RoomType::CommercialKitchen => 1200.0,
            RoomType::HospitalWard => 700.0,
            RoomType::Gym => 900.0,
        }
    }

    /// Heat given off per occupant (BTU/h)
    pub fn btu_per_person(&self) -> f64 {
        match self {
            RoomType::Gym => 600.0,
            _ => 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    pub const OPTIONS: [&'static str; 4] = ["north", "south", "east", "west"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "north" => Some(Orientation::North),
            "south" => Some(Orientation::South),
            "east" => Some(Orientation::East),
            "west" => Some(Orientation::West),
            _ => None,
        }
    }

    /// Solar gain multiplier for glazing facing this way
    pub fn window_factor(&self) -> f64 {
        match self {
            Orientation::North => 1.0,
            Orientation::South => 1.1,
            Orientation::East => 1.15,
            Orientation::West => 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcType {
    Split,
    Window,
    Cassette,
    FloorStanding,
    Vrf,
    Chiller,
}

impl AcType {
    pub const OPTIONS: [&'static str; 6] = ["split", "window", "cassette", "floor-standing", "vrf", "chiller"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "split" => Some(AcType::Split),
            "window" => Some(AcType::Window),
            "cassette" => Some(AcType::Cassette),
            "floor-standing" => Some(AcType::FloorStanding),
            "vrf" => Some(AcType::Vrf),
            "chiller" => Some(AcType::Chiller),
            _ => None,
        }
    }

    /// EER at 1 star and at 5 stars
    pub fn eer_range(&self) -> (f64, f64) {
        match self {
            AcType::Split => (3.2, 5.5),
            AcType::Window => (2.8, 3.5),
            AcType::Cassette => (3.5, 5.0),
            AcType::FloorStanding => (3.0, 4.5),
            AcType::Vrf => (4.0, 6.5),
            AcType::Chiller => (5.0, 7.0),
        }
    }

    /// Price relative to a split unit of the same capacity
    pub fn price_multiplier(&self) -> f64 {
        match self {
            AcType::Split => 1.0,
            AcType::Window => 0.6,
            AcType::Cassette => 1.5,
            AcType::FloorStanding => 1.3,
            AcType::Vrf => 2.5,
            AcType::Chiller => 5.0,
        }
    }

    /// EER for a 1-5 star rating, linear between the range ends
    pub fn eer(&self, stars: f64) -> f64 {
        let (low, high) = self.eer_range();
        low + (stars.clamp(1.0, 5.0) - 1.0) * (high - low) / 4.0
    }
}

/// Smallest standard size covering `design_btu`, else the largest.
pub fn standard_size(design_btu: f64) -> f64 {
    STANDARD_SIZES_BTU
        .iter()
        .copied()
        .find(|&size| size >= design_btu)
        .unwrap_or(STANDARD_SIZES_BTU[STANDARD_SIZES_BTU.len() - 1])
}

// ============================================================================
// Calculation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingInput {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    pub room_type: RoomType,
    pub windows: f64,
    /// Glazed area per window (m²)
    pub window_area_m2: f64,
    pub orientation: Orientation,
    pub roof_exposed: bool,
    pub people: f64,
    pub computers: f64,
    /// Lighting load (W)
    pub lighting_w: f64,
    /// Other equipment load (W)
    pub equipment_w: f64,
    pub outdoor_temp_c: f64,
    pub indoor_temp_c: f64,
    /// Relative humidity (%)
    pub humidity_pct: f64,
    pub ac_type: AcType,
    /// Energy rating in stars (1-5)
    pub stars: f64,
}

impl CoolingInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let room_type = parsed.require_choice("roomType")?;
        let orientation = parsed.require_choice("windowOrientation")?;
        let ac_type = parsed.require_choice("acType")?;
        Ok(CoolingInput {
            length_m: parsed.require("length")?,
            width_m: parsed.require("width")?,
            height_m: parsed.require("height")?,
            room_type: RoomType::from_option(room_type).unwrap_or(RoomType::Office),
            windows: parsed.require("windows")?,
            window_area_m2: parsed.require("windowArea")?,
            orientation: Orientation::from_option(orientation).unwrap_or(Orientation::North),
            roof_exposed: parsed.require_choice("roof")? == "exposed",
            people: parsed.require("people")?,
            computers: parsed.require("computers")?,
            lighting_w: parsed.require("lighting")?,
            equipment_w: parsed.require("otherEquipment")?,
            outdoor_temp_c: parsed.require("outdoorTemp")?,
            indoor_temp_c: parsed.require("indoorTemp")?,
            humidity_pct: parsed.require("humidity")?,
            ac_type: AcType::from_option(ac_type).unwrap_or(AcType::Split),
            stars: parsed.require("energyRating")?,
        })
    }
}

/// Heat gains by source (BTU/h), before climate factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatGains {
    pub room: f64,
    pub windows: f64,
    pub roof: f64,
    pub people: f64,
    pub equipment: f64,
}

impl HeatGains {
    pub fn total(&self) -> f64 {
        self.room + self.windows + self.roof + self.people + self.equipment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingResult {
    pub floor_area_m2: f64,
    pub volume_m3: f64,
    pub gains: HeatGains,
    pub total_btu: f64,
    pub design_btu: f64,
    pub unit_btu: f64,
    pub units_needed: f64,
    pub eer: f64,
    pub power_draw_w: f64,
    pub monthly_kwh: f64,
    pub monthly_cost: f64,
    pub purchase_cost: f64,
    pub installation_cost: f64,
}

impl CoolingResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Floor area (m2)", self.floor_area_m2)
            .with("Room volume (m3)", self.volume_m3)
            .with("Room load (BTU/h)", self.gains.room)
            .with("Window load (BTU/h)", self.gains.windows)
            .with("Roof load (BTU/h)", self.gains.roof)
            .with("People load (BTU/h)", self.gains.people)
            .with("Equipment load (BTU/h)", self.gains.equipment)
            .with("Total heat load (BTU/h)", self.total_btu)
            .with("Design load (BTU/h)", self.design_btu)
            .with("Cooling capacity (tons)", self.design_btu / BTU_PER_TON)
            .with("Cooling capacity (kW)", self.design_btu / BTU_PER_KW)
            .with("Recommended unit (BTU/h)", self.unit_btu)
            .with("Units needed", self.units_needed)
            .with("EER", self.eer)
            .with("Power draw (W)", self.power_draw_w)
            .with("Monthly energy (kWh)", self.monthly_kwh)
            .with("Monthly running cost", self.monthly_cost)
            .with("Purchase cost", self.purchase_cost)
            .with("Installation cost", self.installation_cost)
            .with("Total cost", self.purchase_cost + self.installation_cost)
    }
}

pub fn heat_gains(input: &CoolingInput) -> HeatGains {
    let area = input.length_m * input.width_m;
    HeatGains {
        room: area * input.room_type.btu_per_m2(),
        windows: input.windows * input.window_area_m2 * WINDOW_BTU_PER_M2 * input.orientation.window_factor(),
        roof: if input.roof_exposed { area * ROOF_BTU_PER_M2 } else { 0.0 },
        people: input.people * input.room_type.btu_per_person(),
        equipment: (input.computers * COMPUTER_W + input.lighting_w + input.equipment_w) * BTU_PER_WATT,
    }
}

/// Scale for the indoor/outdoor difference; 1 at a 10 °C difference.
pub fn temperature_factor(outdoor_c: f64, indoor_c: f64) -> f64 {
    non_negative(1.0 + (outdoor_c - indoor_c - 10.0) * 0.02)
}

/// Scale for latent load; 1 at 50 % relative humidity.
pub fn humidity_factor(humidity_pct: f64) -> f64 {
    non_negative(1.0 + (humidity_pct - 50.0) * 0.005)
}

pub fn calculate(input: &CoolingInput, cooling: &CoolingAssumptions) -> CoolingResult {
    let floor_area_m2 = input.length_m * input.width_m;
    let gains = heat_gains(input);
    let total_btu = non_negative(
        gains.total()
            * temperature_factor(input.outdoor_temp_c, input.indoor_temp_c)
            * humidity_factor(input.humidity_pct),
    );
    let design_btu = total_btu * cooling.design_margin;
    let unit_btu = standard_size(design_btu);

    let eer = input.ac_type.eer(input.stars);
    let power_draw_w = ratio_or_zero(design_btu, eer * 3.412);
    let monthly_kwh = power_draw_w / 1000.0 * cooling.hours_per_day * cooling.days_per_month;
    let purchase_cost = unit_btu * cooling.cost_per_btu * input.ac_type.price_multiplier();

    CoolingResult {
        floor_area_m2,
        volume_m3: floor_area_m2 * input.height_m,
        gains,
        total_btu,
        design_btu,
        unit_btu,
        units_needed: ceil_count(ratio_or_zero(design_btu, cooling.max_unit_btu)),
        eer,
        power_draw_w,
        monthly_kwh,
        monthly_cost: monthly_kwh * cooling.electricity_rate,
        purchase_cost,
        installation_cost: purchase_cost * cooling.installation_fraction,
    }
}

pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("length", "Room length").unit("m").min(0.1).required(),
        FieldSpec::number("width", "Room width").unit("m").min(0.1).required(),
        FieldSpec::number("height", "Ceiling height").unit("m").range(2.0, 10.0).default_number(3.0),
        FieldSpec::choice("roomType", "Room type", RoomType::OPTIONS).default_choice("office"),
        FieldSpec::number("windows", "Windows").min(0.0).default_number(2.0),
        FieldSpec::number("windowArea", "Area per window").unit("m²").min(0.0).default_number(2.0),
        FieldSpec::choice("windowOrientation", "Window orientation", Orientation::OPTIONS).default_choice("west"),
        FieldSpec::choice("roof", "Roof", ["exposed", "covered"]).default_choice("exposed"),
        FieldSpec::number("people", "Occupants").min(0.0).default_number(4.0),
        FieldSpec::number("computers", "Computers").min(0.0).default_number(3.0),
        FieldSpec::number("lighting", "Lighting").unit("W").min(0.0).default_number(500.0),
        FieldSpec::number("otherEquipment", "Other equipment").unit("W").min(0.0).default_number(1000.0),
        FieldSpec::number("outdoorTemp", "Outdoor design temperature").unit("°C").range(20.0, 50.0).default_number(35.0),
        FieldSpec::number("indoorTemp", "Indoor set point").unit("°C").range(16.0, 30.0).default_number(24.0),
        FieldSpec::number("humidity", "Relative humidity").unit("%").range(0.0, 100.0).default_number(60.0),
        FieldSpec::choice("acType", "AC type", AcType::OPTIONS).default_choice("split"),
        FieldSpec::number("energyRating", "Energy rating").unit("stars").range(1.0, 5.0).default_number(5.0),
    ]
}

fn compute(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = CoolingInput::from_parsed(parsed)?;
    Ok(calculate(&input, &assumptions.cooling).to_outcome())
}

pub fn descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "ac-cooling-load",
        label: "AC Cooling Load",
        summary: "Room heat load, AC unit size, running cost and purchase cost",
        inputs: fields(),
        compute,
        projector: None,
    }
}
