use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::city::Coordinate;

/// A person record as served by the upstream provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ip_address: String,
    #[serde(deserialize_with = "lenient_degrees")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_degrees")]
    pub longitude: f64,
}

impl Person {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDegrees {
    Number(f64),
    Text(String),
}

/// The provider sends coordinates either as JSON numbers or as quoted strings.
fn lenient_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDegrees::deserialize(deserializer)? {
        RawDegrees::Number(value) => Ok(value),
        RawDegrees::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid coordinate `{text}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_numeric_coordinates() {
        let person: Person = serde_json::from_value(json!({
            "id": 1,
            "first_name": "Maurise",
            "last_name": "Shieldon",
            "email": "mshieldon0@squidoo.com",
            "ip_address": "192.57.232.111",
            "latitude": 34.003135,
            "longitude": -117.7228641
        }))
        .unwrap();

        assert_eq!(person.id, 1);
        assert_eq!(person.coordinate(), Coordinate::new(34.003135, -117.7228641));
    }

    #[test]
    fn decodes_quoted_coordinates() {
        let person: Person = serde_json::from_str(
            r#"{"id":2,"first_name":"Bendix","last_name":"Halgarth",
                "email":"bhalgarth1@timesonline.co.uk","ip_address":"4.185.73.82",
                "latitude":"-2.9623869","longitude":"104.7399789"}"#,
        )
        .unwrap();

        assert_eq!(person.latitude, -2.9623869);
        assert_eq!(person.longitude, 104.7399789);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let result = serde_json::from_value::<Person>(json!({
            "id": 3,
            "first_name": "Meghan",
            "last_name": "Stanmore",
            "email": "ms@example.com",
            "ip_address": "10.0.0.1",
            "latitude": "Not a number",
            "longitude": 1.0
        }));

        assert!(result.is_err());
    }

    #[test]
    fn serializes_coordinates_as_numbers() {
        let person = Person {
            id: 4,
            first_name: "Ancell".to_string(),
            last_name: "Garnsworthy".to_string(),
            email: "agarnsworthy7d@seattletimes.com".to_string(),
            ip_address: "67.4.69.137".to_string(),
            latitude: 51.6553959,
            longitude: 0.0572553,
        };

        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["latitude"], json!(51.6553959));
        assert_eq!(value["ip_address"], json!("67.4.69.137"));
    }
}
