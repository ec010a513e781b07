//! Address-book style contact record.

/// One phone entry of a [`ContactRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneEntry {
    /// Phone number as free-form text.
    pub number: String,
}

/// Flat record modeling a person with contact fields.
///
/// No invariant is enforced; any values are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    /// Numeric identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Ordered phone entries.
    pub phones: Vec<PhoneEntry>,
}

impl ContactRecord {
    /// The fixed record streamed by the `contact` variant.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            id: 9999,
            name: "John Doe".to_string(),
            email: "jdoe@example.com".to_string(),
            phones: vec![PhoneEntry {
                number: "555-5555".to_string(),
            }],
        }
    }
}
