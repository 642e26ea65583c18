use crate::ml::features::{self, IncidentParams};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Incident type categories, encoded 0-7 for the trained models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    #[strum(to_string = "Disabled Vehicle")]
    DisabledVehicle,
    #[strum(to_string = "Debris")]
    Debris,
    #[strum(to_string = "Abandoned Vehicle")]
    AbandonedVehicle,
    #[strum(to_string = "Non-Injury Collision")]
    NonInjuryCollision,
    #[strum(to_string = "Injury Collision")]
    InjuryCollision,
    #[strum(to_string = "Fatality Collision")]
    FatalityCollision,
    #[strum(to_string = "Other")]
    Other,
    #[strum(to_string = "Unknown")]
    Unknown,
}

impl IncidentType {
    /// Numeric code as seen by the trained models
    pub fn code(&self) -> u8 {
        match self {
            IncidentType::DisabledVehicle => 0,
            IncidentType::Debris => 1,
            IncidentType::AbandonedVehicle => 2,
            IncidentType::NonInjuryCollision => 3,
            IncidentType::InjuryCollision => 4,
            IncidentType::FatalityCollision => 5,
            IncidentType::Other => 6,
            IncidentType::Unknown => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(IncidentType::DisabledVehicle),
            1 => Some(IncidentType::Debris),
            2 => Some(IncidentType::AbandonedVehicle),
            3 => Some(IncidentType::NonInjuryCollision),
            4 => Some(IncidentType::InjuryCollision),
            5 => Some(IncidentType::FatalityCollision),
            6 => Some(IncidentType::Other),
            7 => Some(IncidentType::Unknown),
            _ => None,
        }
    }
}

/// Lane closure categories, encoded 0-6 for the trained models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum LaneClosure {
    #[strum(to_string = "No Closure")]
    NoClosure,
    #[strum(to_string = "Shoulder")]
    Shoulder,
    #[strum(to_string = "One Lane")]
    OneLane,
    #[strum(to_string = "Two Lanes")]
    TwoLanes,
    #[strum(to_string = "Three Lanes")]
    ThreeLanes,
    #[strum(to_string = "Multiple Lanes")]
    MultipleLanes,
    #[strum(to_string = "Total Closure")]
    TotalClosure,
}

impl LaneClosure {
    pub fn code(&self) -> u8 {
        match self {
            LaneClosure::NoClosure => 0,
            LaneClosure::Shoulder => 1,
            LaneClosure::OneLane => 2,
            LaneClosure::TwoLanes => 3,
            LaneClosure::ThreeLanes => 4,
            LaneClosure::MultipleLanes => 5,
            LaneClosure::TotalClosure => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LaneClosure::NoClosure),
            1 => Some(LaneClosure::Shoulder),
            2 => Some(LaneClosure::OneLane),
            3 => Some(LaneClosure::TwoLanes),
            4 => Some(LaneClosure::ThreeLanes),
            5 => Some(LaneClosure::MultipleLanes),
            6 => Some(LaneClosure::TotalClosure),
            _ => None,
        }
    }
}

/// Travel direction along the corridor, 0 = Northbound, 1 = Southbound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[strum(to_string = "Northbound")]
    Northbound,
    #[strum(to_string = "Southbound")]
    Southbound,
}

impl Direction {
    pub fn code(&self) -> u8 {
        match self {
            Direction::Northbound => 0,
            Direction::Southbound => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Northbound),
            1 => Some(Direction::Southbound),
            _ => None,
        }
    }
}

/// A reported incident, as described by the caller
///
/// The derived flags (`is_rush_hour`, `is_weekend`,
/// `rush_blocking_interaction`) are computed here, not supplied by the
/// caller, so they cannot drift out of sync with the raw fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    /// Hour of day, 0-23
    pub hour: u8,

    /// Day of week, 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,

    /// Location zone category, 0-9
    pub location_zone: u8,

    /// Normalized position along the corridor, 0.0-1.0
    pub milepost_normalized: f64,

    /// Incident type
    pub incident_type: IncidentType,

    /// Lane closure extent
    pub lane_closure: LaneClosure,

    /// Travel direction
    pub direction: Direction,

    /// Whether lanes are blocked
    pub blocking: bool,

    /// Severity score, 1-3
    pub severity_score: u8,
}

impl IncidentReport {
    /// Morning peak is 07:00-10:00, evening peak 16:00-19:00 (inclusive)
    pub fn is_rush_hour(&self) -> bool {
        (7..=10).contains(&self.hour) || (16..=19).contains(&self.hour)
    }

    pub fn is_weekend(&self) -> bool {
        self.day_of_week >= 5
    }

    pub fn rush_blocking_interaction(&self) -> bool {
        self.is_rush_hour() && self.blocking
    }

    /// Encode into the named numeric parameters the feature schema draws from
    pub fn encode(&self) -> IncidentParams {
        let mut params = IncidentParams::new();
        params.insert(features::HOUR.to_string(), self.hour as f64);
        params.insert(features::DAY_OF_WEEK.to_string(), self.day_of_week as f64);
        params.insert(
            features::IS_RUSH_HOUR.to_string(),
            self.is_rush_hour() as u8 as f64,
        );
        params.insert(
            features::IS_WEEKEND.to_string(),
            self.is_weekend() as u8 as f64,
        );
        params.insert(
            features::LOCATION_ZONE.to_string(),
            self.location_zone as f64,
        );
        params.insert(
            features::MILEPOST_NORMALIZED.to_string(),
            self.milepost_normalized,
        );
        params.insert(
            features::INCIDENT_TYPE_ENCODED.to_string(),
            self.incident_type.code() as f64,
        );
        params.insert(
            features::LANE_CLOSURE_ENCODED.to_string(),
            self.lane_closure.code() as f64,
        );
        params.insert(
            features::DIRECTION_ENCODED.to_string(),
            self.direction.code() as f64,
        );
        params.insert(
            features::BLOCKING_ENCODED.to_string(),
            self.blocking as u8 as f64,
        );
        params.insert(
            features::SEVERITY_SCORE.to_string(),
            self.severity_score as f64,
        );
        params.insert(
            features::RUSH_BLOCKING_INTERACTION.to_string(),
            self.rush_blocking_interaction() as u8 as f64,
        );
        params
    }
}
