//! Wire types for the `/clients` resource.

use serde::{Deserialize, Deserializer, Serialize};

/// A client record as served by the remote service.
///
/// The service assigns `id`; it is never produced locally. Text fields
/// default to empty strings so a sparse response still decodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cpf: String,
}

/// Body of `POST /clients` and `PUT /clients/{id}`: the four mutable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
}

impl From<&Record> for ClientPayload {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            cpf: record.cpf.clone(),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_numeric_id_and_missing_fields() {
        let rec: Record = serde_json::from_str(r#"{"id": 42, "name": "Ana"}"#).unwrap();
        assert_eq!(rec.id, "42");
        assert_eq!(rec.name, "Ana");
        assert!(rec.email.is_empty());
        assert!(rec.cpf.is_empty());
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let rec: Record = serde_json::from_str(
            r#"{"id":"a1","name":"Ana","email":"ana@x.io","phone":"1","cpf":"111","createdAt":"now"}"#,
        )
        .unwrap();
        assert_eq!(rec.id, "a1");
        assert_eq!(rec.email, "ana@x.io");
    }

    #[test]
    fn payload_serializes_exactly_four_fields() {
        let body = serde_json::to_value(ClientPayload {
            name: "Ana".into(),
            email: "ana@x.io".into(),
            phone: "5511".into(),
            cpf: "11122233344".into(),
        })
        .unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["cpf"], "11122233344");
    }
}
