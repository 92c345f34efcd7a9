//! Purpose: The fixed person document served by `GET /json` and printed by `dyndoc sample`.
//! Exports: `person`, `PERSON_JSON`, `Person`, `Address`.
//! Role: Canonical fixture showing nested objects, lists and typed document views.
//! Invariants: `person()` equals `PERSON_JSON` parsed; key order matches the text.

use std::ops::Deref;

use crate::api::{Document, DocumentType, Error};

pub const PERSON_JSON: &str = r#"{"last name":"иванов","address":{"city":"Ленинград","postalCode":101101,"street Adress":"Московское ш., 101, кв.101"},"first name":"иван","phoneNumbers":["812 123-1234","916 123-4567"]}"#;

pub fn person() -> Document {
    let mut address = Document::new();
    address
        .append("city", "Ленинград")
        .append("postalCode", 101_101)
        .append("street Adress", "Московское ш., 101, кв.101");

    let mut person = Document::new();
    person
        .append("last name", "иванов")
        .append("address", address)
        .append("first name", "иван")
        .append("phoneNumbers", vec!["812 123-1234", "916 123-4567"]);
    person
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Person(Document);

impl Person {
    pub fn address(&self) -> Result<Option<Address>, Error> {
        self.0.get_object("address")
    }

    pub fn phone_numbers(&self) -> Result<Vec<String>, Error> {
        self.0.get_list_or("phoneNumbers", Vec::new())
    }
}

impl DocumentType for Person {
    const TYPE_NAME: &'static str = "Person";

    fn construct() -> Result<Self, Error> {
        Ok(Self::default())
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.0
    }
}

impl Deref for Person {
    type Target = Document;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address(Document);

impl Address {
    pub fn city(&self) -> Option<String> {
        self.0.get_string("city")
    }

    pub fn postal_code(&self) -> Result<Option<i64>, Error> {
        self.0.get_i64("postalCode")
    }
}

impl DocumentType for Address {
    const TYPE_NAME: &'static str = "Address";

    fn construct() -> Result<Self, Error> {
        Ok(Self::default())
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.0
    }
}

impl Deref for Address {
    type Target = Document;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{PERSON_JSON, Person, person};
    use crate::api::Document;

    #[test]
    fn built_person_matches_fixture_text() {
        let parsed = Document::parse(PERSON_JSON).expect("fixture parses");
        assert_eq!(person(), parsed);
        assert_eq!(person().to_json().expect("json"), PERSON_JSON);
    }

    #[test]
    fn typed_views_read_nested_fields() {
        let wrapper = Document::with_entry("person", person());
        let typed: Person = wrapper
            .get_object("person")
            .expect("materialize")
            .expect("present");
        let address = typed.address().expect("address").expect("present");
        assert_eq!(address.city().as_deref(), Some("Ленинград"));
        assert_eq!(address.postal_code().expect("postal"), Some(101_101));
        assert_eq!(
            typed.phone_numbers().expect("phones"),
            ["812 123-1234", "916 123-4567"]
        );
        assert_eq!(typed.get_string("first name").as_deref(), Some("иван"));
    }
}
