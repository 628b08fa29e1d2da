//! The AQI reading and its flattening to a single tabular row.

use std::collections::BTreeMap;

use serde_json::Value;

/// One air quality reading for a city, as reported by the feed endpoint.
///
/// Every field is optional: the feed omits fields freely, and a missing
/// field becomes a null in the flattened row rather than an error. The
/// pollutant sub-readings (`iaqi`) vary per response, so downstream storage
/// must tolerate heterogeneous columns.
#[derive(Debug, Clone, Default)]
pub struct AqiReading {
    pub timestamp_iso: Option<String>,
    pub aqi: Option<i64>,
    pub idx: Option<i64>,
    pub dominentpol: Option<String>,
    pub city_name: Option<String>,
    pub geo_lat: Option<f64>,
    pub geo_lon: Option<f64>,
    pub iaqi: BTreeMap<String, Value>,
}

impl AqiReading {
    /// Builds a reading from the validated `data` object of a feed payload.
    pub fn from_payload(data: &Value) -> Self {
        let geo = data.pointer("/city/geo");

        AqiReading {
            timestamp_iso: string_at(data, "/time/iso"),
            aqi: data.get("aqi").and_then(Value::as_i64),
            idx: data.get("idx").and_then(Value::as_i64),
            dominentpol: string_at(data, "/dominentpol"),
            city_name: string_at(data, "/city/name"),
            geo_lat: geo.and_then(|g| g.get(0)).and_then(Value::as_f64),
            geo_lon: geo.and_then(|g| g.get(1)).and_then(Value::as_f64),
            iaqi: extract_iaqi(data),
        }
    }

    /// Flattens the reading to an ordered row: the fixed fields first, then
    /// one `iaqi_<code>` entry per pollutant in sorted code order.
    pub fn flatten(&self) -> Vec<(String, Value)> {
        let mut row: Vec<(String, Value)> = vec![
            ("timestamp_iso".to_string(), value_or_null(self.timestamp_iso.clone())),
            ("aqi".to_string(), value_or_null(self.aqi)),
            ("idx".to_string(), value_or_null(self.idx)),
            ("dominentpol".to_string(), value_or_null(self.dominentpol.clone())),
            ("city_name".to_string(), value_or_null(self.city_name.clone())),
            ("geo_lat".to_string(), value_or_null(self.geo_lat)),
            ("geo_lon".to_string(), value_or_null(self.geo_lon)),
        ];

        for (code, value) in &self.iaqi {
            row.push((format!("iaqi_{}", code), value.clone()));
        }

        row
    }
}

fn string_at(data: &Value, pointer: &str) -> Option<String> {
    data.pointer(pointer).and_then(Value::as_str).map(String::from)
}

// Each pollutant entry is an object holding its sub-index under `v`. A
// pollutant present without a `v` still gets a column, as a null.
fn extract_iaqi(data: &Value) -> BTreeMap<String, Value> {
    let mut iaqi = BTreeMap::new();

    if let Some(map) = data.get("iaqi").and_then(Value::as_object) {
        for (code, sub) in map {
            let value = sub.get("v").cloned().unwrap_or(Value::Null);
            iaqi.insert(code.clone(), value);
        }
    }

    iaqi
}

fn value_or_null<T: Into<Value>>(field: Option<T>) -> Value {
    field.map(Into::into).unwrap_or(Value::Null)
}

// -- Tests ----------------------------------------------------------------------------
