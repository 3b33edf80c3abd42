#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rendering adapter that turns one operation stream into both output views.
//!
//! The sequencer's stream is consumed twice by independent formatters: once
//! for the plain command script and once for the structured macro fragment.
//! Both views share the delay-lag rule: the delay attached to a structured
//! entry is the configured pause for the category of the entry that
//! *preceded* it, which is how the consuming macro tool realizes "delay
//! after X" as "delay before the thing after X". The fold over the previous
//! category is explicit, keeping both renderers pure.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use worldshift_core::{DelayCategory, DelayProfile, Operation};

const MESSAGE_VERSION: u32 = 1;
const PROFILE_VERSION: u32 = 4;
const MACRO_VERSION: u32 = 6;
const CONFIG_VERSION: u32 = 6;
const UNBOUND_KEY: &str = "key.keyboard.unknown";

/// Renders the plain command script from the operation stream.
///
/// Commands render verbatim one per line, annotations render as `#`-prefixed
/// comment lines, and separators render as blank lines, so each tile group is
/// preceded by its header comment and followed by a spacer. Every line is
/// newline-terminated.
#[must_use]
pub fn render_script(ops: &[Operation]) -> String {
    let mut script = String::new();
    for op in ops {
        if op.is_separator() {
            script.push('\n');
            continue;
        }
        if op.is_annotation() {
            script.push_str("# ");
        }
        script.push_str(op.text());
        script.push('\n');
    }
    script
}

/// Renders the structured message list from the operation stream.
///
/// One entry is produced per non-separator operation; annotations receive a
/// `/say ` prefix so downstream consumers can tell log lines from executable
/// commands. The delay of entry *i* is the configured tick count for the
/// category of the most recent operation that produced an entry, and zero
/// for the first entry or when that category is `none`. Separators produce
/// no entry and are transparent to the lag, so the pause configured for a
/// paste lands on the entry that opens the next tile.
#[must_use]
pub fn render_messages(ops: &[Operation], delays: &DelayProfile) -> Vec<MacroMessage> {
    let mut previous = DelayCategory::None;
    let mut messages = Vec::new();
    for op in ops {
        if op.is_separator() {
            continue;
        }
        let text = if op.is_annotation() {
            format!("/say {}", op.text())
        } else {
            op.text().to_owned()
        };
        messages.push(MacroMessage::new(text, delays.ticks_for(previous)));
        previous = op.category();
    }
    messages
}

/// Builds the display name of the generated profile.
///
/// Dry runs are flagged in the name so the profile cannot be mistaken for a
/// destructive one inside the macro tool.
#[must_use]
pub fn profile_name(source_world: &str, target_world: &str, dry_run: bool) -> String {
    if dry_run {
        format!("DRY RUN: {source_world} -> {target_world}")
    } else {
        format!("{source_world} -> {target_world}")
    }
}

/// One structured output entry: a command string plus its leading delay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroMessage {
    version: u32,
    string: String,
    #[serde(rename = "delayTicks")]
    delay_ticks: u32,
}

impl MacroMessage {
    /// Creates a message entry with the fragment's fixed schema version.
    #[must_use]
    pub fn new(string: impl Into<String>, delay_ticks: u32) -> Self {
        Self {
            version: MESSAGE_VERSION,
            string: string.into(),
            delay_ticks,
        }
    }

    /// Command or `/say` line carried by this entry.
    #[must_use]
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Ticks the macro tool waits before sending this entry.
    #[must_use]
    pub const fn delay_ticks(&self) -> u32 {
        self.delay_ticks
    }
}

/// Profile object spliced into the external macro tool's configuration.
///
/// Only the message list and the profile name originate from the pipeline;
/// every other field is the schema's fixed boilerplate (vanilla activation,
/// unbound keys, rate limiting on).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroProfile {
    version: u32,
    name: String,
    links: Vec<Value>,
    add_to_history: String,
    show_hud_message: String,
    resume_repeating: String,
    use_ratelimit: String,
    macros: Vec<MacroEntry>,
}

impl MacroProfile {
    /// Wraps a rendered message list in a single-macro profile.
    #[must_use]
    pub fn new(name: impl Into<String>, messages: Vec<MacroMessage>) -> Self {
        Self {
            version: PROFILE_VERSION,
            name: name.into(),
            links: Vec::new(),
            add_to_history: "OFF".to_owned(),
            show_hud_message: "OFF".to_owned(),
            resume_repeating: "OFF".to_owned(),
            use_ratelimit: "ON".to_owned(),
            macros: vec![MacroEntry::with_messages(messages)],
        }
    }

    /// Display name of the profile.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message entries of the profile's single macro.
    #[must_use]
    pub fn messages(&self) -> &[MacroMessage] {
        self.macros
            .first()
            .map_or(&[], |entry| entry.messages.as_slice())
    }
}

/// Single macro held by a generated profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MacroEntry {
    version: u32,
    add_to_history: bool,
    show_hud_message: bool,
    resume_repeating: bool,
    use_ratelimit: bool,
    conflict_strategy: String,
    send_mode: String,
    activation_type: String,
    space_ticks: u32,
    keybind: MacroKeybind,
    alt_keybind: MacroKeybind,
    messages: Vec<MacroMessage>,
}

impl MacroEntry {
    fn with_messages(messages: Vec<MacroMessage>) -> Self {
        Self {
            version: MACRO_VERSION,
            add_to_history: false,
            show_hud_message: false,
            resume_repeating: false,
            use_ratelimit: true,
            conflict_strategy: "SUBMIT".to_owned(),
            send_mode: "SEND".to_owned(),
            activation_type: "VANILLA".to_owned(),
            space_ticks: 0,
            keybind: MacroKeybind::unbound(),
            alt_keybind: MacroKeybind::unbound(),
            messages,
        }
    }
}

/// Keybinding slot of a macro; generated profiles are never key-activated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MacroKeybind {
    version: u32,
    key_name: String,
    limit_key_name: String,
}

impl MacroKeybind {
    fn unbound() -> Self {
        Self {
            version: 0,
            key_name: UNBOUND_KEY.to_owned(),
            limit_key_name: UNBOUND_KEY.to_owned(),
        }
    }
}

/// Minimal valid macro-tool document used when none exists on disk.
///
/// The rate-limit and default values mirror the external tool's own fresh
/// configuration; the pipeline owns nothing here beyond the empty profile
/// list.
#[must_use]
pub fn skeletal_document() -> Value {
    json!({
        "version": CONFIG_VERSION,
        "profiles": [],
        "spDefault": 0,
        "mpDefault": 0,
        "defaultConflictStrategy": "SUBMIT",
        "defaultSendMode": "SEND",
        "defaultActivationType": "HOLD",
        "ratelimitCount": 4,
        "ratelimitTicks": 20,
        "ratelimitStrict": false,
        "ratelimitSp": false,
    })
}

/// Splices a profile into an externally-owned macro document.
///
/// A profile with the same name is replaced in place; otherwise the profile
/// is appended. Every unrelated field of the document is left untouched. The
/// document must be a JSON object and its `profiles` member, when present,
/// must be an array.
pub fn merge_profile(document: &mut Value, profile: &MacroProfile) -> Result<()> {
    let rendered = serde_json::to_value(profile).context("serializing generated profile")?;
    let root = document
        .as_object_mut()
        .context("macro config root is not a JSON object")?;
    let profiles = root
        .entry("profiles")
        .or_insert_with(|| Value::Array(Vec::new()));
    let profiles = profiles
        .as_array_mut()
        .context("macro config 'profiles' is not an array")?;

    if let Some(existing) = profiles
        .iter_mut()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(profile.name()))
    {
        *existing = rendered;
    } else {
        profiles.push(rendered);
    }
    Ok(())
}
