//! Parsing of stdin intents.

use anyhow::{Context, bail};

use stocktrack_core::ItemId;
use stocktrack_inventory::ItemDraft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(ItemDraft),
    Set { id: ItemId, quantity: i64 },
    Take { id: ItemId, units: i64 },
    Remove(ItemId),
    List,
    History(String),
    Total,
    Report,
    Retry,
    Failed,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <name> <category> <quantity> <price>   add an item (the name may be several words)
  set <id> <quantity>                        set the quantity on hand
  take <id> <units>                          remove some units of an item
  remove <id>                                remove an item entirely
  list                                       show current inventory
  history [filter]                           show history (all, add, remove, update or a category)
  total                                      show total inventory value
  report                                     print the export report as JSON
  retry                                      resend writes the store has not acknowledged
  failed                                     list writes the store refused
  help | quit";

impl Command {
    /// Parse one input line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("add", [name @ .., category, quantity, price]) if !name.is_empty() => {
                Command::Add(ItemDraft::new(
                    name.join(" "),
                    *category,
                    number("quantity", quantity)?,
                    number("price", price)?,
                ))
            }
            ("set", [id, quantity]) => Command::Set {
                id: item_id(id)?,
                quantity: number("quantity", quantity)?,
            },
            ("take", [id, units]) => Command::Take {
                id: item_id(id)?,
                units: number("units", units)?,
            },
            ("remove", [id]) => Command::Remove(item_id(id)?),
            ("list", []) => Command::List,
            ("history", []) => Command::History("all".to_string()),
            ("history", [filter]) => Command::History(filter.to_string()),
            ("total", []) => Command::Total,
            ("report", []) => Command::Report,
            ("retry", []) => Command::Retry,
            ("failed", []) => Command::Failed,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            (verb, _) => bail!("unrecognised command or arguments: '{verb}' (try 'help')"),
        };
        Ok(Some(cmd))
    }
}

fn number(field: &str, raw: &str) -> anyhow::Result<i64> {
    raw.parse()
        .with_context(|| format!("{field} must be a whole number, got '{raw}'"))
}

fn item_id(raw: &str) -> anyhow::Result<ItemId> {
    Ok(raw.parse::<ItemId>()?)
}
