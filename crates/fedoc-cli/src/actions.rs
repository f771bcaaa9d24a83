//! # Actions Subcommand
//!
//! Shows the action gate's verdict for a document JSON file: one line
//! per action, permitted or denied with the gate's reason.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use fedoc_core::ElectronicDocument;
use fedoc_state::{permitted_actions, ActionSet, DocState, ALL_ACTIONS};

/// Arguments for the actions subcommand.
#[derive(Args, Debug)]
pub struct ActionsArgs {
    /// Path to the document JSON.
    pub document: PathBuf,

    /// Emit a JSON object instead of the human-readable table.
    #[arg(long)]
    pub json: bool,
}

/// Print the gate verdict for the document.
pub fn run(args: &ActionsArgs) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.document)
        .with_context(|| format!("reading {}", args.document.display()))?;
    let document: ElectronicDocument =
        serde_json::from_str(&raw).context("decoding document JSON")?;

    let state = DocState::parse(&document.state)?;
    let set = permitted_actions(document.document_type, state);

    if args.json {
        println!("{}", as_json(&set));
    } else {
        println!("{} {} — state {state}", document.document_type, document.sequence);
        print!("{}", as_table(&set));
    }
    Ok(())
}

fn as_json(set: &ActionSet) -> serde_json::Value {
    serde_json::json!({
        "emit": set.emit,
        "authorize": set.authorize,
        "retry": set.retry,
        "download": set.download,
        "cancel": set.cancel,
        "delete": set.delete,
        "annul": set.annul,
    })
}

fn as_table(set: &ActionSet) -> String {
    let mut out = String::new();
    for action in ALL_ACTIONS {
        let line = match set.denial_reason(action) {
            None => format!("  {action:<10} permitted\n"),
            Some(reason) => format!("  {action:<10} denied: {reason}\n"),
        };
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedoc_core::DocumentType;

    #[test]
    fn test_table_lists_every_action() {
        let set = permitted_actions(DocumentType::Invoice, DocState::Draft);
        let table = as_table(&set);
        for action in ALL_ACTIONS {
            assert!(table.contains(&action.to_string()), "missing {action}");
        }
        assert!(table.contains("emit       permitted"));
        assert!(table.contains("download   denied"));
    }

    #[test]
    fn test_json_shape() {
        let set = permitted_actions(DocumentType::Invoice, DocState::Authorized);
        let value = as_json(&set);
        assert_eq!(value["download"], true);
        assert_eq!(value["delete"], false);
    }
}
