use serde::Serialize;
use serde_json::{Map, Value};

const WORD_KEYS: &[&str] = &["word"];
const QUALITY_KEYS: &[&str] = &["quality_score", "qualityScore"];
const PHONE_LIST_KEYS: &[&str] = &["phone_score_list", "phoneScoreList"];
const PHONE_LABEL_KEYS: &[&str] = &["phone"];
const SOUND_MOST_LIKE_KEYS: &[&str] = &["sound_most_like", "soundMostLike"];
const EXTENT_KEYS: &[&str] = &["extent"];

/// Item-level bound keys, probed pairwise in order.
const ITEM_BOUND_KEYS: &[(&str, &str)] = &[
    ("start", "end"),
    ("start_time", "end_time"),
    ("startTime", "endTime"),
];

/// One phoneme-level score reported by the scoring service.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PhoneRecord {
    pub phone: String,
    pub quality: Option<f64>,
    pub sound_most_like: Option<String>,
    /// Start/end in 10 ms ticks.
    pub extent: Option<[i64; 2]>,
}

impl PhoneRecord {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            phone: first_of(obj, PHONE_LABEL_KEYS)
                .and_then(string_from_value)
                .unwrap_or_default(),
            quality: first_of(obj, QUALITY_KEYS).and_then(number_from_value),
            sound_most_like: first_of(obj, SOUND_MOST_LIKE_KEYS).and_then(string_from_value),
            extent: first_of(obj, EXTENT_KEYS).and_then(extent_from_value),
        }
    }

    /// True when the speaker's sound most resembled a different phone.
    pub fn is_substituted(&self) -> bool {
        match &self.sound_most_like {
            Some(heard) => !heard.is_empty() && !heard.eq_ignore_ascii_case(&self.phone),
            None => false,
        }
    }
}

/// One scoring-service entry for a spoken word.
///
/// Decoding never fails: fields that are missing or of an unexpected type
/// come through as `None`/empty so the record keeps its position in the list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub word: String,
    pub quality: Option<f64>,
    pub phones: Vec<PhoneRecord>,
    /// Raw item-level bounds, units not yet normalized.
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl ScoreRecord {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let phones: Vec<PhoneRecord> = first_of(obj, PHONE_LIST_KEYS)
            .and_then(Value::as_array)
            .map(|list| list.iter().map(PhoneRecord::from_value).collect())
            .unwrap_or_default();

        let (start, end) = ITEM_BOUND_KEYS
            .iter()
            .find_map(|(start_key, end_key)| {
                let start = obj.get(*start_key).and_then(number_from_value)?;
                let end = obj.get(*end_key).and_then(number_from_value)?;
                Some((Some(start), Some(end)))
            })
            .unwrap_or((None, None));

        Self {
            word: first_of(obj, WORD_KEYS)
                .and_then(string_from_value)
                .unwrap_or_default(),
            quality: first_of(obj, QUALITY_KEYS).and_then(number_from_value),
            phones,
            start,
            end,
        }
    }
}

fn first_of<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

/// Accepts JSON numbers and numeric strings.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn extent_from_value(value: &Value) -> Option<[i64; 2]> {
    match value.as_array()?.as_slice() {
        [start, end] => {
            let start = number_from_value(start)?;
            let end = number_from_value(end)?;
            if !start.is_finite() || !end.is_finite() {
                return None;
            }
            Some([start.round() as i64, end.round() as i64])
        }
        _ => None,
    }
}
