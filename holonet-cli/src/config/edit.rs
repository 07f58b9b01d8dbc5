//! Dotted-key edits on the settings document
//!
//! Edits go through `toml_edit` so comments and layout in a hand-edited
//! settings file survive a `config set`.

use anyhow::{Context, Result, bail};
use holonet_core::Settings;
use toml_edit::{DocumentMut, Item, Table, TableLike, Value};

/// Parse a command-line value as TOML, falling back to a plain string
///
/// `true`, `3` and `[1, 2]` keep their types; `Local` becomes `"Local"`.
pub fn parse_value(raw: &str) -> Value {
    raw.parse::<Value>().unwrap_or_else(|_| Value::from(raw))
}

/// Set `key` (e.g. `chat.enter_to_post`) in `doc`
///
/// Missing parent tables are created; inline parent tables are edited in
/// place. The edited document must still decode
/// into [`Settings`] and `key` must name a known setting; the decoded
/// settings are returned.
pub fn set_key(doc: &mut DocumentMut, key: &str, value: Value) -> Result<Settings> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        bail!("Invalid key: {:?}", key);
    }
    let Some((last, parents)) = segments.split_last() else {
        bail!("Invalid key: {:?}", key);
    };

    let mut table: &mut dyn TableLike = doc.as_table_mut();
    for segment in parents {
        table = table
            .entry(segment)
            .or_insert(Item::Table(Table::new()))
            .as_table_like_mut()
            .with_context(|| format!("{} is not a table", segment))?;
    }
    table.insert(last, Item::Value(value));

    validate(doc, key)
}

fn validate(doc: &DocumentMut, key: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(&doc.to_string()).with_context(|| format!("Invalid value for {}", key))?;

    // Unknown keys decode fine, so look the key up in the normalised record
    let normalised = toml::Value::try_from(&settings)?;
    let known = key
        .split('.')
        .try_fold(&normalised, |value, segment| value.get(segment))
        .is_some();
    if !known {
        bail!("Unknown setting: {}", key);
    }

    Ok(settings)
}
