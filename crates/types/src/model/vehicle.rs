use crate::color::PaletteColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InProject,
    InWorkshop,
    Accident,
    Rented,
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    pub fn arabic_label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "متاحة",
            VehicleStatus::InProject => "في مشروع",
            VehicleStatus::InWorkshop => "في الورشة",
            VehicleStatus::Accident => "حادث",
            VehicleStatus::Rented => "مؤجرة",
            VehicleStatus::Unknown => "غير محدد",
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::InProject => "In project",
            VehicleStatus::InWorkshop => "In workshop",
            VehicleStatus::Accident => "Accident",
            VehicleStatus::Rented => "Rented",
            VehicleStatus::Unknown => "Unknown",
        }
    }

    /// Badge colour shown next to the status in report headers.
    pub fn badge(&self) -> PaletteColor {
        match self {
            VehicleStatus::Available => PaletteColor::Success,
            VehicleStatus::InProject => PaletteColor::Primary,
            VehicleStatus::InWorkshop => PaletteColor::Warning,
            VehicleStatus::Accident => PaletteColor::Danger,
            VehicleStatus::Rented | VehicleStatus::Unknown => PaletteColor::Muted,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: Option<u64>,
    pub plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub status: VehicleStatus,
}

impl Vehicle {
    /// "Toyota Hilux", or whichever half is known.
    pub fn make_and_model(&self) -> String {
        [self.make.trim(), self.model.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_deserializes() {
        let v: Vehicle = serde_json::from_str(r#"{"plate":"1-A","status":"scrapped"}"#).unwrap();
        assert_eq!(v.status, VehicleStatus::Unknown);
        assert_eq!(v.status.arabic_label(), "غير محدد");
    }

    #[test]
    fn make_and_model_skips_blanks() {
        let v = Vehicle { plate: "1".into(), make: "Toyota".into(), ..Default::default() };
        assert_eq!(v.make_and_model(), "Toyota");
    }
}
