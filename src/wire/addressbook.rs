//! `tutorial.Person` address-book schema.

use crate::domain::{ContactRecord, PhoneEntry};

/// Kind of phone number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PhoneType {
    /// Mobile number (proto3 default).
    Mobile = 0,
    /// Home number.
    Home = 1,
    /// Work number.
    Work = 2,
}

/// One phone number of a [`Person`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct PhoneNumber {
    /// Number text.
    #[prost(string, tag = "1")]
    pub number: String,
    /// [`PhoneType`] as its `i32` wire value.
    #[prost(enumeration = "PhoneType", tag = "2")]
    pub r#type: i32,
}

/// Address-book entry.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Person {
    /// Display name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Numeric identifier.
    #[prost(int32, tag = "2")]
    pub id: i32,
    /// Email address.
    #[prost(string, tag = "3")]
    pub email: String,
    /// Phone numbers, in order.
    #[prost(message, repeated, tag = "4")]
    pub phones: Vec<PhoneNumber>,
}

impl From<&ContactRecord> for Person {
    fn from(record: &ContactRecord) -> Self {
        Self {
            name: record.name.clone(),
            id: record.id,
            email: record.email.clone(),
            phones: record
                .phones
                .iter()
                .map(|p| PhoneNumber {
                    number: p.number.clone(),
                    r#type: PhoneType::Mobile as i32,
                })
                .collect(),
        }
    }
}

impl From<Person> for ContactRecord {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            email: person.email,
            phones: person
                .phones
                .into_iter()
                .map(|p| PhoneEntry { number: p.number })
                .collect(),
        }
    }
}
