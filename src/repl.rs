//! Text presentation surface
//!
//! Line-oriented commands for driving the studio from a terminal or a script.

use serde_json::Value;
use std::fmt::Write;

use crate::controller::{Message, StudioView};
use crate::error::{StudioError, StudioResult};
use crate::model::{Catalog, Properties};

pub const HELP: &str = "\
Commands:
  voice <id>                  select a voice clone
  input <text>                replace the input text
  set <key>=<value>           update one property (value may be JSON)
  variations on|off           toggle variation generation
  generate                    start a simulated generation
  cancel                      cancel the pending generation
  save <name> [| <desc>]      save current properties as a template
  load <id>                   load a template's properties
  delete <id>                 delete a template
  show                        print the session
  voices                      list voice clones
  templates                   list templates
  help                        show this help
  quit                        exit";

/// A parsed harness command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(Message),
    Show,
    Voices,
    Templates,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> StudioResult<Command> {
    let line = line.trim_start();
    // `raw` is everything after the single separator following the verb
    let (verb, raw) = match line.split_once(char::is_whitespace) {
        Some((verb, raw)) => (verb, raw),
        None => (line.trim_end(), ""),
    };
    let rest = raw.trim();

    let command = match verb.to_lowercase().as_str() {
        "voice" => Command::Send(Message::SelectVoiceClone(required(rest, "voice <id>")?)),
        // Input keeps the raw remainder, including empty text
        "input" => Command::Send(Message::UpdateInput(raw.to_string())),
        "set" => Command::Send(Message::UpdateProperties(parse_assignment(rest)?)),
        "variations" => match rest.to_lowercase().as_str() {
            "on" | "true" | "yes" => Command::Send(Message::ToggleVariations(true)),
            "off" | "false" | "no" => Command::Send(Message::ToggleVariations(false)),
            _ => return Err(StudioError::Command("usage: variations on|off".into())),
        },
        "generate" => Command::Send(Message::Generate),
        "cancel" => Command::Send(Message::CancelGeneration),
        "save" => {
            let (name, description) = match rest.split_once('|') {
                Some((name, description)) => (name.trim(), description.trim()),
                None => (rest, ""),
            };
            Command::Send(Message::SaveTemplate {
                name: required(name, "save <name> [| <description>]")?,
                description: description.to_string(),
            })
        }
        "load" => Command::Send(Message::LoadTemplate(required(rest, "load <id>")?)),
        "delete" => Command::Send(Message::DeleteTemplate(required(rest, "delete <id>")?)),
        "show" => Command::Show,
        "voices" => Command::Voices,
        "templates" => Command::Templates,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err(StudioError::Command("empty command".into())),
        other => return Err(StudioError::Command(format!("unknown command '{}'", other))),
    };
    Ok(command)
}

fn required(arg: &str, usage: &str) -> StudioResult<String> {
    if arg.is_empty() {
        return Err(StudioError::Command(format!("usage: {}", usage)));
    }
    Ok(arg.to_string())
}

/// Parse `key=value`; the value is JSON when it parses, else a plain string
fn parse_assignment(arg: &str) -> StudioResult<Properties> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| StudioError::Command("usage: set <key>=<value>".into()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(StudioError::Command("property key is empty".into()));
    }
    let raw = raw.trim();
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::from(raw));

    let mut partial = Properties::new();
    partial.set(key, value);
    Ok(partial)
}

pub fn render(view: &StudioView, catalog: &Catalog) -> String {
    let session = &view.session;
    let mut out = String::new();

    let voice = match session.voice_clone_id.as_deref() {
        Some(id) => match catalog.voice_clone(id) {
            Some(clone) => format!("{} ({})", clone.name, id),
            None => format!("{} (not in catalog)", id),
        },
        None => "none selected".to_string(),
    };

    let _ = writeln!(out, "Status:      {}", session.status);
    let _ = writeln!(out, "Voice:       {}", voice);
    let _ = writeln!(
        out,
        "Input:       {:?} ({} chars)",
        session.input, session.input_character_count
    );
    let _ = writeln!(
        out,
        "Variations:  {}",
        if session.generate_variations { "on" } else { "off" }
    );
    if let Some(saved) = session.last_saved_at {
        let _ = writeln!(out, "Last saved:  {}", saved.to_rfc3339());
    }
    let _ = writeln!(out, "Properties:");
    if session.properties.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (key, value) in session.properties.iter() {
        let _ = writeln!(out, "  {} = {}", key, value);
    }
    let _ = writeln!(out, "Templates:   {}", view.templates.len());
    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "Error:       {}", error);
    }
    out
}

pub fn render_voices(catalog: &Catalog) -> String {
    let mut out = String::new();
    for clone in &catalog.voice_clones {
        let _ = writeln!(out, "  [{}] {} - {}", clone.id, clone.name, clone.description);
    }
    if out.is_empty() {
        out.push_str("  (no voice clones)\n");
    }
    out
}

pub fn render_templates(view: &StudioView) -> String {
    let mut out = String::new();
    for template in &view.templates {
        let marker = if template.is_default { "*" } else { " " };
        let _ = writeln!(
            out,
            " {} [{}] {} - {} (used {}x)",
            marker, template.id, template.name, template.description, template.usage_count
        );
    }
    if out.is_empty() {
        out.push_str("  (no templates)\n");
    }
    out
}
