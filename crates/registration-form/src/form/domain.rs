use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::preview::PreviewRef;

/// Extensions offered by the resume picker. The filter is a hint; any file can still be attached.
pub const ACCEPTED_RESUME_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

/// Named inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Resume,
    TimeSlots,
}

impl Field {
    pub const fn ordered() -> [Self; 4] {
        [Self::Name, Self::Email, Self::Resume, Self::TimeSlots]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Resume => "resume",
            Self::TimeSlots => "timeSlots",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Free-text inputs that are edited keystroke by keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Name,
    Email,
}

impl TextField {
    pub const fn field(self) -> Field {
        match self {
            Self::Name => Field::Name,
            Self::Email => Field::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not an editable text field")]
pub struct UnknownField(pub String);

impl FromStr for TextField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotWindow {
    Morning,
    Afternoon,
}

impl SlotWindow {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "9-11 AM",
            Self::Afternoon => "2-4 PM",
        }
    }
}

/// One of the ten availability windows offered for the interview.
///
/// Ordering follows the option list (day first, morning before afternoon), so a
/// `BTreeSet<TimeSlot>` always iterates in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    pub day: Weekday,
    pub window: SlotWindow,
}

impl TimeSlot {
    pub const fn new(day: Weekday, window: SlotWindow) -> Self {
        Self { day, window }
    }

    pub const fn options() -> [Self; 10] {
        use SlotWindow::{Afternoon, Morning};
        use Weekday::{Friday, Monday, Thursday, Tuesday, Wednesday};
        [
            Self::new(Monday, Morning),
            Self::new(Monday, Afternoon),
            Self::new(Tuesday, Morning),
            Self::new(Tuesday, Afternoon),
            Self::new(Wednesday, Morning),
            Self::new(Wednesday, Afternoon),
            Self::new(Thursday, Morning),
            Self::new(Thursday, Afternoon),
            Self::new(Friday, Morning),
            Self::new(Friday, Afternoon),
        ]
    }

    pub fn label(self) -> String {
        format!("{} {}", self.day.label(), self.window.label())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day.label(), self.window.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not one of the offered time slots")]
pub struct UnknownTimeSlot(pub String);

impl FromStr for TimeSlot {
    type Err = UnknownTimeSlot;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::options()
            .into_iter()
            .find(|slot| slot.label() == wanted)
            .ok_or_else(|| UnknownTimeSlot(value.to_string()))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Metadata of the file handed over by the host's file picker. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub file_name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl ResumeFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            size_bytes,
        }
    }

    /// Only an exact `application/pdf` media type gets an inline preview.
    pub fn is_previewable(&self) -> bool {
        self.media_type == mime::APPLICATION_PDF.essence_str()
    }

    pub fn matches_accept_filter(&self) -> bool {
        let name = self.file_name.to_ascii_lowercase();
        ACCEPTED_RESUME_EXTENSIONS
            .iter()
            .any(|extension| name.ends_with(extension))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub resume: Option<ResumeFile>,
    pub time_slots: BTreeSet<TimeSlot>,
}

impl FormData {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Email => &self.email,
        }
    }

    pub fn is_selected(&self, slot: TimeSlot) -> bool {
        self.time_slots.contains(&slot)
    }
}

/// Messages for fields that failed the last validation pass and have not been edited since.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Returns whether an error was present.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

impl SubmissionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Editing => "Editing",
            Self::Submitting => "Submitting",
            Self::Submitted => "Submitted",
        }
    }
}

/// Receipt captured when the simulated submission completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub name: String,
    pub email: String,
    pub resume_file_name: String,
    pub time_slots: Vec<TimeSlot>,
    pub submitted_at: DateTime<Utc>,
}

/// Everything the form owns between events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub data: FormData,
    pub errors: ValidationErrors,
    pub submission: SubmissionState,
    pub preview: Option<PreviewRef>,
    pub confirmation: Option<Confirmation>,
}
