use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pdf::PdfGenerator;
use crate::registry::AppointmentStore;

/// Wire format for `appointment_date`, shared by the JSON bodies and the
/// confirmation PDF.
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn AppointmentStore>,
    pub documents: PdfGenerator,
}

/* -------------------------
   Appointment record
--------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One booked appointment. Records are append-only: nothing mutates them once
/// the registry has stored them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub patient_name: String,
    pub contact_number: String,
    #[serde(with = "appointment_date_format")]
    pub appointment_date: NaiveDateTime,
    pub reference_id: String,
    pub status: AppointmentStatus,
}

/* -------------------------
   Serde helpers
--------------------------*/

/// `appointment_date` travels as e.g. `2026-08-22 14:30:00`, not RFC 3339.
pub mod appointment_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::APPOINTMENT_DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(APPOINTMENT_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, APPOINTMENT_DATE_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_record() -> AppointmentRecord {
        AppointmentRecord {
            patient_name: "Asha Rao".into(),
            contact_number: "+919876543210".into(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(9, 26, 53)
                .unwrap(),
            reference_id: "APT-0001".into(),
            status: AppointmentStatus::Scheduled,
        }
    }

    #[test]
    fn record_serializes_wire_formats() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["appointment_date"], "2026-03-14 09:26:53");
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["reference_id"], "APT-0001");
    }

    #[test]
    fn appointment_date_round_trips() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: AppointmentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.appointment_date, record.appointment_date);
        assert_eq!(back.status, record.status);
    }
}
