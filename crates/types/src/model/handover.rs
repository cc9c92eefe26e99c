use super::vehicle::Vehicle;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandoverKind {
    Delivery,
    #[serde(alias = "receipt")]
    Return,
}

impl HandoverKind {
    /// "تسليم" or "استلام"
    pub fn arabic_label(&self) -> &'static str {
        match self {
            HandoverKind::Delivery => "تسليم",
            HandoverKind::Return => "استلام",
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            HandoverKind::Delivery => "Delivery",
            HandoverKind::Return => "Return",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelLevel {
    #[default]
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "3/4")]
    ThreeQuarters,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "1/4")]
    Quarter,
    #[serde(rename = "empty")]
    Empty,
}

impl FuelLevel {
    pub fn arabic_label(&self) -> &'static str {
        match self {
            FuelLevel::Full => "ممتلئ",
            FuelLevel::ThreeQuarters => "ثلاثة أرباع",
            FuelLevel::Half => "نصف",
            FuelLevel::Quarter => "ربع",
            FuelLevel::Empty => "فارغ",
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            FuelLevel::Full => "Full",
            FuelLevel::ThreeQuarters => "3/4",
            FuelLevel::Half => "1/2",
            FuelLevel::Quarter => "1/4",
            FuelLevel::Empty => "Empty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistItem {
    SpareTire,
    FireExtinguisher,
    FirstAidKit,
    WarningTriangle,
    Tools,
}

impl ChecklistItem {
    pub fn arabic_label(&self) -> &'static str {
        match self {
            ChecklistItem::SpareTire => "إطار احتياطي",
            ChecklistItem::FireExtinguisher => "طفاية حريق",
            ChecklistItem::FirstAidKit => "حقيبة إسعافات أولية",
            ChecklistItem::WarningTriangle => "مثلث تحذيري",
            ChecklistItem::Tools => "أدوات",
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            ChecklistItem::SpareTire => "Spare tire",
            ChecklistItem::FireExtinguisher => "Fire extinguisher",
            ChecklistItem::FirstAidKit => "First-aid kit",
            ChecklistItem::WarningTriangle => "Warning triangle",
            ChecklistItem::Tools => "Tools",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checklist {
    pub spare_tire: bool,
    pub fire_extinguisher: bool,
    pub first_aid_kit: bool,
    pub warning_triangle: bool,
    pub tools: bool,
}

impl Checklist {
    pub fn all(value: bool) -> Self {
        Self {
            spare_tire: value,
            fire_extinguisher: value,
            first_aid_kit: value,
            warning_triangle: value,
            tools: value,
        }
    }

    /// The five items in printed order.
    pub fn items(&self) -> [(ChecklistItem, bool); 5] {
        [
            (ChecklistItem::SpareTire, self.spare_tire),
            (ChecklistItem::FireExtinguisher, self.fire_extinguisher),
            (ChecklistItem::FirstAidKit, self.first_aid_kit),
            (ChecklistItem::WarningTriangle, self.warning_triangle),
            (ChecklistItem::Tools, self.tools),
        ]
    }
}

/// Asset-relative paths of captured signature images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signatures {
    pub deliverer: Option<String>,
    pub receiver: Option<String>,
}

impl Signatures {
    pub fn is_empty(&self) -> bool {
        self.deliverer.is_none() && self.receiver.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handover {
    pub id: u64,
    pub kind: HandoverKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    pub person_name: String,
    #[serde(default)]
    pub driver_ref: Option<String>,
    #[serde(default)]
    pub supervisor: Option<String>,
    #[serde(default)]
    pub mileage: u64,
    #[serde(default)]
    pub fuel_level: FuelLevel,
    #[serde(default)]
    pub checklist: Checklist,
    #[serde(default)]
    pub vehicle_condition: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub form_link: Option<String>,
    #[serde(default)]
    pub signatures: Signatures,
}

/// A handover with the records the form prints alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoverView {
    pub handover: Handover,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    /// Driver of the most recent delivery of the same vehicle, when the caller
    /// has locked a return to it.
    #[serde(default)]
    pub prior_delivery_driver: Option<String>,
}

impl HandoverView {
    pub fn new(handover: Handover, vehicle: Vehicle) -> Self {
        Self { handover, vehicle: Some(vehicle), prior_delivery_driver: None }
    }

    /// True when the return banner applies.
    pub fn is_locked_return(&self) -> bool {
        self.handover.kind == HandoverKind::Return && self.prior_delivery_driver.is_some()
    }
}
