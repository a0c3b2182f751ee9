//! The fixed-field row projection.

use super::{CellValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine columns kept in a [`ProjectedRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Display,
    Locomotion,
    BodyMovementType,
    LocusOfControl,
    EncodingChannel,
    Anchor,
    VisualMark,
    SkippingTool,
    Overview,
}

impl Field {
    /// All fields, in output order.
    pub const ALL: [Field; 9] = [
        Field::Display,
        Field::Locomotion,
        Field::BodyMovementType,
        Field::LocusOfControl,
        Field::EncodingChannel,
        Field::Anchor,
        Field::VisualMark,
        Field::SkippingTool,
        Field::Overview,
    ];

    /// The exact column header this field is read from.
    pub fn name(self) -> &'static str {
        match self {
            Field::Display => "Display",
            Field::Locomotion => "Locomotion",
            Field::BodyMovementType => "Body Movement Type",
            Field::LocusOfControl => "Locus of control",
            Field::EncodingChannel => "Encoding Channel",
            Field::Anchor => "Anchor",
            Field::VisualMark => "Visual Mark",
            Field::SkippingTool => "Skipping Tool",
            Field::Overview => "Overview",
        }
    }

    /// Find the field for an exact (case-sensitive) header name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A worksheet row reduced to the nine known fields.
///
/// A field is `None` when the source row had no value under that header.
/// Serialized, every field is present and missing values are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRow {
    #[serde(rename = "Display", default)]
    pub display: Option<CellValue>,

    #[serde(rename = "Locomotion", default)]
    pub locomotion: Option<CellValue>,

    #[serde(rename = "Body Movement Type", default)]
    pub body_movement_type: Option<CellValue>,

    #[serde(rename = "Locus of control", default)]
    pub locus_of_control: Option<CellValue>,

    #[serde(rename = "Encoding Channel", default)]
    pub encoding_channel: Option<CellValue>,

    #[serde(rename = "Anchor", default)]
    pub anchor: Option<CellValue>,

    #[serde(rename = "Visual Mark", default)]
    pub visual_mark: Option<CellValue>,

    #[serde(rename = "Skipping Tool", default)]
    pub skipping_tool: Option<CellValue>,

    #[serde(rename = "Overview", default)]
    pub overview: Option<CellValue>,
}

impl ProjectedRow {
    /// Copy the nine known fields out of a record.
    pub fn from_record(record: &Record) -> Self {
        let mut row = Self::default();
        for field in Field::ALL {
            *row.slot_mut(field) = record.get(field.name()).cloned();
        }
        row
    }

    /// Value of a field, `None` if missing.
    pub fn get(&self, field: Field) -> Option<&CellValue> {
        match field {
            Field::Display => self.display.as_ref(),
            Field::Locomotion => self.locomotion.as_ref(),
            Field::BodyMovementType => self.body_movement_type.as_ref(),
            Field::LocusOfControl => self.locus_of_control.as_ref(),
            Field::EncodingChannel => self.encoding_channel.as_ref(),
            Field::Anchor => self.anchor.as_ref(),
            Field::VisualMark => self.visual_mark.as_ref(),
            Field::SkippingTool => self.skipping_tool.as_ref(),
            Field::Overview => self.overview.as_ref(),
        }
    }

    /// Set or clear a field.
    pub fn set(&mut self, field: Field, value: Option<CellValue>) {
        *self.slot_mut(field) = value;
    }

    /// Iterate over all nine fields in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&CellValue>)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// True when every field is missing.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, value)| value.is_none())
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<CellValue> {
        match field {
            Field::Display => &mut self.display,
            Field::Locomotion => &mut self.locomotion,
            Field::BodyMovementType => &mut self.body_movement_type,
            Field::LocusOfControl => &mut self.locus_of_control,
            Field::EncodingChannel => &mut self.encoding_channel,
            Field::Anchor => &mut self.anchor,
            Field::VisualMark => &mut self.visual_mark,
            Field::SkippingTool => &mut self.skipping_tool,
            Field::Overview => &mut self.overview,
        }
    }
}

impl From<&Record> for ProjectedRow {
    fn from(record: &Record) -> Self {
        Self::from_record(record)
    }
}
