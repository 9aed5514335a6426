//! Normalized row model for the grid.

/// Region codes assigned to records by position. The remote dataset carries
/// no region information, so rows cycle through this fixed table.
pub const REGIONS: [&str; 10] = ["US", "GB", "DE", "FR", "ES", "IT", "NL", "SE", "CA", "AU"];

/// A normalized row of the dataset shown in the grid.
///
/// The identifier is assigned once at mapping time and never changes; it is
/// unique within one fetched record set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub language: String,
    pub region: String,
    pub created_at: String,
    pub status: Status,
    /// Locally created and not yet part of any fetched record set.
    pub is_new: bool,
}

impl Record {
    /// Create a locally synthesized, unsaved row.
    pub fn new_unsaved(id: String, created_at: String) -> Self {
        Self {
            id,
            name: String::new(),
            bio: String::new(),
            language: String::new(),
            region: String::new(),
            created_at,
            status: Status::Active,
            is_new: true,
        }
    }

    /// Current value of an editable field, as shown in a display cell.
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Bio => &self.bio,
            Field::Language => &self.language,
            Field::Region => &self.region,
            Field::Status => self.status.as_str(),
        }
    }

    /// Write one field by its overlay key. Unknown keys are inert, as is a
    /// status value outside the enumeration (only reachable through a
    /// hand-edited overlay blob).
    pub fn set_field(&mut self, field: &str, value: &str) {
        match field {
            "name" => self.name = value.to_string(),
            "bio" => self.bio = value.to_string(),
            "language" => self.language = value.to_string(),
            "region" => self.region = value.to_string(),
            "status" => {
                if let Some(status) = Status::parse(value) {
                    self.status = status;
                }
            }
            _ => {}
        }
    }
}

/// Record status. Exactly these four values are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Active,
    Inactive,
    Pending,
    Suspended,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Active,
        Status::Inactive,
        Status::Pending,
        Status::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Pending => "pending",
            Status::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            "pending" => Some(Status::Pending),
            "suspended" => Some(Status::Suspended),
            _ => None,
        }
    }
}

/// Editable columns of the grid, keyed to overlay field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Bio,
    Language,
    Region,
    Status,
}

impl Field {
    /// Overlay key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Bio => "bio",
            Field::Language => "language",
            Field::Region => "region",
            Field::Status => "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("banned"), None);
        assert_eq!(Status::parse("Active"), None);
    }

    #[test]
    fn test_set_field_ignores_unknown_keys() {
        let mut record = Record::new_unsaved("r1".into(), "2024-01-01 00:00:00".into());
        record.set_field("name", "Ada");
        record.set_field("nickname", "al");
        assert_eq!(record.name, "Ada");
    }

    #[test]
    fn test_set_field_keeps_status_on_illegal_value() {
        let mut record = Record::new_unsaved("r1".into(), "2024-01-01 00:00:00".into());
        record.set_field("status", "pending");
        assert_eq!(record.status, Status::Pending);
        record.set_field("status", "deleted");
        assert_eq!(record.status, Status::Pending);
    }
}
