use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
/// Failure to read an address book file.
pub enum AddressBookError {
    #[error("cannot read address book: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid address book: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Named contact with one or more phone numbers.
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Named, ordered list of contacts.
pub struct ContactGroup {
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
/// Contacts and contact groups shared by every device on a line.
///
/// Read-only once loaded; reloading replaces the whole value.
pub struct AddressBook {
    #[serde(default)]
    pub groups: Vec<ContactGroup>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// Result of looking up a recipient token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Group(&'a ContactGroup),
    Contact(&'a Contact),
    Miss,
}

impl AddressBook {
    /// Read an address book from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AddressBookError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, AddressBookError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Group with exactly this name.
    pub fn find_group(&self, name: &str) -> Option<&ContactGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Contact with exactly this name.
    pub fn find_contact(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.name == name)
    }

    /// Groups take precedence over contacts.
    pub fn lookup(&self, token: &str) -> Lookup<'_> {
        if let Some(group) = self.find_group(token) {
            return Lookup::Group(group);
        }
        if let Some(contact) = self.find_contact(token) {
            return Lookup::Contact(contact);
        }
        Lookup::Miss
    }
}

/// Turn a recipient token into candidate phone numbers.
///
/// Without an address book, or when the token names neither a group nor a contact,
/// the token itself is the only candidate. Candidates are not validated here.
pub fn resolve(token: &str, address_book: Option<&AddressBook>) -> Vec<String> {
    let Some(book) = address_book else {
        return vec![token.to_owned()];
    };

    match book.lookup(token) {
        Lookup::Group(group) => group
            .contacts
            .iter()
            .flat_map(|contact| contact.phone_numbers.iter().cloned())
            .collect(),
        Lookup::Contact(contact) => contact.phone_numbers.clone(),
        Lookup::Miss => vec![token.to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phones: &[&str]) -> Contact {
        Contact {
            name: name.to_owned(),
            phone_numbers: phones.iter().map(|it| (*it).to_owned()).collect(),
        }
    }

    fn book() -> AddressBook {
        AddressBook {
            groups: vec![ContactGroup {
                name: "ops-team".to_owned(),
                contacts: vec![
                    contact("alice", &["+15550001111", "+15550003333"]),
                    contact("bob", &["+15550002222"]),
                ],
            }],
            contacts: vec![
                contact("alice", &["+15550001111", "+15550003333"]),
                contact("ops-team", &["+15559999999"]),
                contact("nobody", &[]),
            ],
        }
    }

    #[test]
    fn without_address_book_token_is_the_number() {
        assert_eq!(resolve("+15551234567", None), vec!["+15551234567"]);
        assert_eq!(resolve("ops-team", None), vec!["ops-team"]);
    }

    #[test]
    fn group_expands_in_contact_then_phone_order() {
        let book = book();
        assert_eq!(
            resolve("ops-team", Some(&book)),
            vec!["+15550001111", "+15550003333", "+15550002222"]
        );
    }

    #[test]
    fn group_shadows_contact_with_same_name() {
        let book = book();
        assert!(matches!(book.lookup("ops-team"), Lookup::Group(_)));
        assert!(!resolve("ops-team", Some(&book)).contains(&"+15559999999".to_owned()));
    }

    #[test]
    fn contact_resolves_to_its_numbers() {
        let book = book();
        assert_eq!(
            resolve("alice", Some(&book)),
            vec!["+15550001111", "+15550003333"]
        );
    }

    #[test]
    fn contact_without_numbers_resolves_to_nothing() {
        let book = book();
        assert!(resolve("nobody", Some(&book)).is_empty());
    }

    #[test]
    fn miss_falls_back_to_literal_token() {
        let book = book();
        assert_eq!(book.lookup("carol"), Lookup::Miss);
        assert_eq!(resolve("carol", Some(&book)), vec!["carol"]);
        assert_eq!(resolve("+15551234567", Some(&book)), vec!["+15551234567"]);
    }

    #[test]
    fn lookup_is_exact_match() {
        let book = book();
        assert_eq!(book.lookup("Alice"), Lookup::Miss);
        assert_eq!(book.lookup(" alice"), Lookup::Miss);
    }

    #[test]
    fn parses_json_with_missing_sections() {
        let json = r#"
        {
          "contacts": [
            { "name": "alice", "phone_numbers": ["+15550001111"] }
          ]
        }
        "#;
        let book = AddressBook::from_json(json).unwrap();
        assert!(book.groups.is_empty());
        assert_eq!(book.find_contact("alice").unwrap().phone_numbers.len(), 1);

        assert!(matches!(
            AddressBook::from_json("{ not json }"),
            Err(AddressBookError::Json(_))
        ));
    }
}
