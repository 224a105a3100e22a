use serde::{Deserialize, Serialize};

use crate::{ContactId, Document, DomainError, DomainResult};

/// A phonebook entry. Contacts have no owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>, number: Option<String>) -> Self {
        Self {
            id: ContactId::new(),
            name: name.into(),
            number,
        }
    }
}

impl Document for Contact {
    type Id = ContactId;

    const COLLECTION: &'static str = "persons";

    fn id(&self) -> ContactId {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name missing"));
        }
        Ok(())
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let contact = Contact::new("   ", Some("040-123456".to_string()));
        assert_eq!(
            contact.validate(),
            Err(DomainError::validation("name missing"))
        );
    }

    #[test]
    fn number_is_optional() {
        let contact = Contact::new("Arto Hellas", None);
        assert!(contact.validate().is_ok());
        assert_eq!(contact.unique_keys(), vec![("name", "Arto Hellas".to_string())]);
    }
}
