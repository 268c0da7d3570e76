//! Payload parsing: JSON → validated `RawMetrics`.
//!
//! The wire shape (one object per session):
//!
//! ```json
//! {
//!   "states": ["Alabama", "Alaska"],
//!   "counts": { "Alabama": { "Adult Drug": 3, "Veterans Treatment": 2 } },
//!   "totals": { "Alabama": 5 },
//!   "color_code": { "Alabama": { "color": "#0b5d93" } },
//!   "coordinators": { "Alabama": { "first_name": "…", "phone": "…" } },
//!   "program_types": ["Adult Drug", "Veterans Treatment"],
//!   "downloads": { "Alabama": "https://…" },
//!   "link": "https://…"
//! }
//! ```
//!
//! `counts` is the only required section. Everything else degrades to empty
//! when absent. Object key order is preserved end to end (serde_json is built
//! with `preserve_order`): `counts` entry order drives bar stacking,
//! `color_code` order drives legend swatches.

use serde::Deserialize;
use serde_json::{Map, Value};

use cm_core::{
    CategoryCount, ContactInfo, LabelOffsets, RawMetrics, StateDirectory, StateEntry, StateId,
};

use crate::{PayloadError, PayloadResult};

/// Parse and validate a payload from its JSON text.
pub fn parse_payload(text: &str) -> PayloadResult<RawMetrics> {
    let value: Value = serde_json::from_str(text)?;
    payload_from_value(&value)
}

/// Validate an already-parsed payload value.
pub fn payload_from_value(value: &Value) -> PayloadResult<RawMetrics> {
    let root = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/".into() })?;

    let counts_value = root.get("counts").ok_or(PayloadError::Missing("counts"))?;
    let counts = parse_counts(counts_value)?;

    let states = match root.get("states") {
        Some(v) => string_array(v, "/states")?,
        None => Vec::new(),
    };
    let program_types = match root.get("program_types") {
        Some(v) => string_array(v, "/program_types")?,
        None => Vec::new(),
    };

    let totals = match root.get("totals") {
        Some(v) => parse_totals(v)?,
        None => Default::default(),
    };
    let color_code = match root.get("color_code") {
        Some(v) => parse_color_code(v)?,
        None => Vec::new(),
    };
    let coordinators = match root.get("coordinators") {
        Some(v) => parse_coordinators(v)?,
        None => Default::default(),
    };
    let downloads = match root.get("downloads") {
        Some(v) => parse_downloads(v)?,
        None => Default::default(),
    };
    let link = root.get("link").and_then(|v| v.as_str()).map(str::to_string);

    Ok(RawMetrics {
        states,
        counts,
        color_code,
        coordinators,
        program_types,
        totals,
        downloads,
        link,
    })
}

/// A provided total that disagrees with the sum of that state's counts.
/// Advisory: derived views always recompute, so a mismatch is logged, not
/// fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TotalsMismatch {
    pub state: String,
    pub provided: u64,
    pub derived: u64,
}

/// Cross-check server-provided totals against the sums of `counts`.
pub fn totals_mismatches(metrics: &RawMetrics) -> Vec<TotalsMismatch> {
    metrics
        .totals
        .iter()
        .filter_map(|(state, &provided)| {
            let derived: u64 = metrics
                .counts_for(state)
                .map(|entries| entries.iter().map(|e| e.count).sum())
                .unwrap_or(0);
            (derived != provided).then(|| TotalsMismatch {
                state: state.clone(),
                provided,
                derived,
            })
        })
        .collect()
}

/// Parse a state-names document into a directory. Two wire shapes exist:
/// plain `"1": "Alabama"` and the label-offset form
/// `"1": {"name": "Alabama", "rx": 4, …}`; both are accepted, per entry.
pub fn parse_state_directory(text: &str) -> PayloadResult<StateDirectory> {
    let value: Value = serde_json::from_str(text)?;
    state_directory_from_value(&value)
}

pub fn state_directory_from_value(value: &Value) -> PayloadResult<StateDirectory> {
    let root = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/".into() })?;

    let mut dir = StateDirectory::new();
    for (key, entry) in root {
        let pointer = pointer_to(&[key.as_str()]);
        let id: u32 = key.parse().map_err(|_| PayloadError::Json {
            pointer: pointer.clone(),
            msg: format!("key {key:?} is not a numeric geography id"),
        })?;
        let entry = match entry {
            Value::String(name) => StateEntry::named(name.clone()),
            Value::Object(fields) => named_entry(fields, &pointer)?,
            _ => return Err(PayloadError::NotAnObject { pointer }),
        };
        dir.insert(StateId(id), entry);
    }
    Ok(dir)
}

/* ----------------------------- section parsers ----------------------------- */

fn parse_counts(value: &Value) -> PayloadResult<Vec<(String, Vec<CategoryCount>)>> {
    let by_state = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/counts".into() })?;

    let mut out = Vec::with_capacity(by_state.len());
    for (state, categories) in by_state {
        let categories = categories.as_object().ok_or_else(|| PayloadError::NotAnObject {
            pointer: pointer_to(&["counts", state.as_str()]),
        })?;
        let mut entries = Vec::with_capacity(categories.len());
        for (category, count) in categories {
            let count = expect_count(count, &["counts", state.as_str(), category.as_str()])?;
            entries.push(CategoryCount::new(category.clone(), count));
        }
        out.push((state.clone(), entries));
    }
    Ok(out)
}

fn parse_totals(value: &Value) -> PayloadResult<std::collections::BTreeMap<String, u64>> {
    let by_state = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/totals".into() })?;
    by_state
        .iter()
        .map(|(state, total)| Ok((state.clone(), expect_count(total, &["totals", state.as_str()])?)))
        .collect()
}

fn parse_color_code(value: &Value) -> PayloadResult<Vec<(String, String)>> {
    let by_state = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/color_code".into() })?;

    let mut out = Vec::with_capacity(by_state.len());
    for (state, entry) in by_state {
        let pointer = pointer_to(&["color_code", state.as_str()]);
        // Canonical shape is `{"color": "#hex"}`; a bare string is tolerated.
        let color = match entry {
            Value::String(c) => c.clone(),
            Value::Object(fields) => fields
                .get("color")
                .and_then(|c| c.as_str())
                .ok_or_else(|| PayloadError::Json {
                    pointer: pointer.clone(),
                    msg: "missing string field \"color\"".into(),
                })?
                .to_string(),
            _ => return Err(PayloadError::NotAnObject { pointer }),
        };
        out.push((state.clone(), color));
    }
    Ok(out)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireContact {
    first_name: Option<String>,
    last_name: Option<String>,
    title: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl From<WireContact> for ContactInfo {
    fn from(w: WireContact) -> Self {
        ContactInfo {
            first_name: w.first_name,
            last_name: w.last_name,
            title: w.title,
            email: w.email,
            phone: w.phone,
        }
    }
}

fn parse_coordinators(
    value: &Value,
) -> PayloadResult<std::collections::BTreeMap<String, ContactInfo>> {
    let by_state = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/coordinators".into() })?;
    by_state
        .iter()
        .map(|(state, contact)| {
            let wire: WireContact =
                serde_json::from_value(contact.clone()).map_err(|e| PayloadError::Json {
                    pointer: pointer_to(&["coordinators", state.as_str()]),
                    msg: e.to_string(),
                })?;
            Ok((state.clone(), wire.into()))
        })
        .collect()
}

fn parse_downloads(value: &Value) -> PayloadResult<std::collections::BTreeMap<String, String>> {
    let by_state = value
        .as_object()
        .ok_or_else(|| PayloadError::NotAnObject { pointer: "/downloads".into() })?;
    by_state
        .iter()
        .map(|(state, url)| {
            let url = url.as_str().ok_or_else(|| PayloadError::Json {
                pointer: pointer_to(&["downloads", state.as_str()]),
                msg: "expected string".into(),
            })?;
            Ok((state.clone(), url.to_string()))
        })
        .collect()
}

fn named_entry(fields: &Map<String, Value>, pointer: &str) -> PayloadResult<StateEntry> {
    let name = fields
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| PayloadError::Json {
            pointer: pointer.to_string(),
            msg: "missing string field \"name\"".into(),
        })?;
    let offset = |key: &str| fields.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    let has_offsets = ["rx", "ry", "lx", "ly", "lw"].iter().any(|k| fields.contains_key(*k));
    Ok(StateEntry {
        name: name.to_string(),
        label: has_offsets.then(|| LabelOffsets {
            rx: offset("rx"),
            ry: offset("ry"),
            lx: offset("lx"),
            ly: offset("ly"),
            lw: offset("lw"),
        }),
    })
}

/* ----------------------------- small helpers ----------------------------- */

fn string_array(value: &Value, pointer: &str) -> PayloadResult<Vec<String>> {
    let items = value.as_array().ok_or_else(|| PayloadError::Json {
        pointer: pointer.to_string(),
        msg: "expected array".into(),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| PayloadError::Json {
                pointer: format!("{pointer}/{i}"),
                msg: "expected string".into(),
            })
        })
        .collect()
}

/// A count must be a non-negative integer; negative, fractional, and
/// non-numeric values are all load-fatal.
fn expect_count(value: &Value, path: &[&str]) -> PayloadResult<u64> {
    value.as_u64().ok_or_else(|| PayloadError::BadCount {
        pointer: pointer_to(path),
        found: value.to_string(),
    })
}

fn pointer_to(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts {
        out.push('/');
        // JSON Pointer escaping, RFC 6901.
        out.push_str(&part.replace('~', "~0").replace('/', "~1"));
    }
    out
}
