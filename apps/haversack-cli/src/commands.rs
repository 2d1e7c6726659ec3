//! # CLI Commands
//!
//! Each command loads a character file, calls into haversack-core and
//! renders plain text. Commands return their output instead of printing so
//! they can be tested without capturing stdout.
//!
//! ```text
//! haversack summary  <file>
//! haversack search   <file> <query>
//! haversack transfer <file> <item-id> <from> <to>    (pack | storage id)
//! haversack wealth   <file>
//! haversack init     <file>
//! ```

use anyhow::{bail, Result};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use haversack_core::calc::Severity;
use haversack_core::{
    CoinNames, ContainerRef, CopperPieces, Denomination, InventorySummary, RuleTables,
    TransferOutcome,
};

use crate::store;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Summary { file: PathBuf },
    Search { file: PathBuf, query: String },
    Transfer {
        file: PathBuf,
        item_id: String,
        from: ContainerRef,
        to: ContainerRef,
    },
    Wealth { file: PathBuf },
    Init { file: PathBuf },
    Help,
}

/// Global options plus the command.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// `--rules <path>`; otherwise the usual rules file lookup applies.
    pub rules_path: Option<PathBuf>,
    pub command: Command,
}

pub const USAGE: &str = "\
Haversack inventory tool

Usage: haversack [--rules <path>] <command> [args]

Commands:
  summary  <file>                         Weight, slots, coins and warnings
  search   <file> <query>                 Find items in the pack and storages
  transfer <file> <item-id> <from> <to>   Move an item (`pack` or a storage id)
  wealth   <file>                         Coin value within reach
  init     <file>                         Create an empty character file

Options:
  -r, --rules <path>   Rules file (default: HAVERSACK_RULES_PATH or the config dir)
  -h, --help           Show this help message";

impl Invocation {
    /// Parses arguments (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules_path = None;
        let mut positional = Vec::new();

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-r" | "--rules" => match args.next() {
                    Some(path) => rules_path = Some(PathBuf::from(path)),
                    None => bail!("--rules needs a path"),
                },
                "-h" | "--help" => {
                    return Ok(Invocation {
                        rules_path,
                        command: Command::Help,
                    })
                }
                _ => positional.push(arg),
            }
        }

        let command = match positional.as_slice() {
            [] => Command::Help,
            [cmd, file] if cmd == "summary" => Command::Summary { file: file.into() },
            [cmd, file] if cmd == "wealth" => Command::Wealth { file: file.into() },
            [cmd, file] if cmd == "init" => Command::Init { file: file.into() },
            [cmd, file, query] if cmd == "search" => Command::Search {
                file: file.into(),
                query: query.clone(),
            },
            [cmd, file, item_id, from, to] if cmd == "transfer" => Command::Transfer {
                file: file.into(),
                item_id: item_id.clone(),
                from: from.parse()?,
                to: to.parse()?,
            },
            [cmd, ..] => bail!("Unknown command or wrong arguments for '{}'\n\n{}", cmd, USAGE),
        };

        Ok(Invocation {
            rules_path,
            command,
        })
    }
}

/// Runs a command and returns what should be printed.
pub fn run(command: &Command, rules: &RuleTables) -> Result<String> {
    match command {
        Command::Summary { file } => summary(file, rules),
        Command::Search { file, query } => search(file, query),
        Command::Transfer {
            file,
            item_id,
            from,
            to,
        } => transfer(file, item_id, from, to),
        Command::Wealth { file } => wealth(file, rules.coin_names()),
        Command::Init { file } => {
            store::init_inventory(file)?;
            Ok(format!("Created {}", file.display()))
        }
        Command::Help => Ok(USAGE.to_string()),
    }
}

// =============================================================================
// Commands
// =============================================================================

fn summary(file: &Path, rules: &RuleTables) -> Result<String> {
    let inventory = store::load_inventory(file)?;
    let s = InventorySummary::new(&inventory, rules);

    let mut out = String::new();
    writeln!(out, "{} ({})", s.pack_name, s.pack_type_id)?;
    writeln!(
        out,
        "  Load:       {}/{} {}",
        s.total_weight,
        s.capacity,
        marker(s.load_severity)
    )?;
    writeln!(
        out,
        "  Coins:      {} carried, weight {} {}",
        s.total_coins,
        s.coin_weight,
        marker(s.coin_severity)
    )?;
    writeln!(
        out,
        "  Attuned:    {}/{} {}",
        s.attuned_count,
        haversack_core::MAX_ATTUNED_ITEMS,
        marker(s.attunement_severity)
    )?;
    writeln!(
        out,
        "  Slots:      weapon {}, armor {}, utility {}",
        s.slots.weapon, s.slots.armor, s.slots.utility
    )?;
    writeln!(out, "  Items:      {}", s.item_count)?;

    for storage in &s.storages {
        writeln!(
            out,
            "  [{}] {} ({}): {} items, weight {}, {} coins {}",
            if storage.nearby { "near" } else { "far" },
            storage.name,
            storage.type_name.as_deref().unwrap_or("unknown type"),
            storage.item_count,
            storage.total_weight,
            storage.total_coins,
            marker(storage.coin_severity)
        )?;
    }

    write!(out, "Overall: {}", severity_label(s.worst()))?;
    Ok(out)
}

fn search(file: &Path, query: &str) -> Result<String> {
    let inventory = store::load_inventory(file)?;
    let hits = inventory.search(query);

    if hits.is_empty() {
        return Ok(format!("No items match '{}'", query));
    }

    let mut out = String::new();
    for hit in &hits {
        writeln!(
            out,
            "{} x{} [{}] in {}{}",
            hit.item.name,
            hit.item.quantity,
            hit.item.id,
            hit.location,
            if hit.storage_id.is_some() && !hit.can_transfer {
                " (not nearby)"
            } else {
                ""
            }
        )?;
    }
    Ok(out.trim_end().to_string())
}

fn transfer(file: &Path, item_id: &str, from: &ContainerRef, to: &ContainerRef) -> Result<String> {
    let mut inventory = store::load_inventory(file)?;

    match inventory.transfer_item(item_id, from, to)? {
        TransferOutcome::Moved { de_attuned, .. } => {
            store::save_inventory(file, &inventory)?;
            info!(item_id, %from, %to, "Transfer saved");
            let mut msg = format!("Moved {} from {} to {}", item_id, from, to);
            if de_attuned {
                msg.push_str(" (attunement ended)");
            }
            Ok(msg)
        }
        TransferOutcome::NotNearby { storage_id } => Ok(format!(
            "Storage {} is not nearby; nothing was moved",
            storage_id
        )),
    }
}

fn wealth(file: &Path, names: &CoinNames) -> Result<String> {
    let inventory = store::load_inventory(file)?;
    let w = inventory.nearby_wealth();

    Ok(format!(
        "Pack:     {}\nVaults:   {}\nStorages: {}\nTotal:    {}",
        format_value(w.pack, names),
        format_value(w.vaults, names),
        format_value(w.storages, names),
        format_value(w.total, names),
    ))
}

// =============================================================================
// Formatting
// =============================================================================

/// Splits a copper value into the fewest coins, largest first.
///
/// `1234 cp` with default names reads `1 Platinum, 2 Gold, 3 Silver, 4 Copper`.
pub fn format_value(value: CopperPieces, names: &CoinNames) -> String {
    let mut remaining = value.cp();
    let mut parts = Vec::new();

    for denomination in Denomination::ALL.iter().rev() {
        let count = remaining / denomination.copper_rate();
        remaining %= denomination.copper_rate();
        if count > 0 {
            parts.push(format!("{} {}", count, names.name(*denomination)));
        }
    }

    if parts.is_empty() {
        format!("0 {}", names.name(Denomination::Copper))
    } else {
        parts.join(", ")
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "ok",
        Severity::Warning => "warning",
        Severity::Error => "over limit",
    }
}

fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "",
        Severity::Warning => "(!)",
        Severity::Error => "(!!)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversack_core::{ExternalStorageDraft, Inventory, ItemCategory, ItemDraft};
    use pretty_assertions::assert_eq;

    fn write_character(dir: &Path) -> (PathBuf, String, String) {
        let path = dir.join("brom.json");
        let mut n = 0;
        let mut ids = || {
            n += 1;
            format!("id-{}", n)
        };

        let mut inv = Inventory::default();
        let ring = inv
            .add_item(
                ItemDraft::new("Ring of Warmth", ItemCategory::Jewelry).attunement(true, true),
                &mut ids,
            )
            .unwrap();
        let cart = inv
            .add_storage(
                ExternalStorageDraft {
                    name: "Mule Cart".into(),
                    storage_type_id: "small-cart".into(),
                    nearby: true,
                    ..ExternalStorageDraft::default()
                },
                &mut ids,
            )
            .unwrap();
        inv.currency.gold = 12;
        inv.currency.silver = 3;

        store::save_inventory(&path, &inv).unwrap();
        (path, ring, cart)
    }

    #[test]
    fn test_parse_commands() {
        let inv = Invocation::parse(["--rules", "r.toml", "search", "brom.json", "rope"]).unwrap();
        assert_eq!(inv.rules_path, Some(PathBuf::from("r.toml")));
        assert_eq!(
            inv.command,
            Command::Search {
                file: "brom.json".into(),
                query: "rope".into()
            }
        );

        let inv = Invocation::parse(["transfer", "b.json", "id-1", "PACK", "cart"]).unwrap();
        assert_eq!(
            inv.command,
            Command::Transfer {
                file: "b.json".into(),
                item_id: "id-1".into(),
                from: ContainerRef::Pack,
                to: ContainerRef::Storage("cart".into()),
            }
        );

        assert_eq!(
            Invocation::parse(Vec::<String>::new()).unwrap().command,
            Command::Help
        );
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(Invocation::parse(["summary"]).is_err());
        assert!(Invocation::parse(["explode", "b.json"]).is_err());
        assert!(Invocation::parse(["--rules"]).is_err());
        assert!(Invocation::parse(["transfer", "b.json", "id-1", "pack", " "]).is_err());
    }

    #[test]
    fn test_format_value() {
        let names = CoinNames::default();
        assert_eq!(
            format_value(CopperPieces::from_cp(1234), &names),
            "1 Platinum, 2 Gold, 3 Silver, 4 Copper"
        );
        assert_eq!(format_value(CopperPieces::from_cp(500), &names), "5 Gold");
        assert_eq!(format_value(CopperPieces::zero(), &names), "0 Copper");
    }

    #[test]
    fn test_transfer_command_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let (path, ring, cart) = write_character(dir.path());
        let rules = RuleTables::default();

        let cmd = Command::Transfer {
            file: path.clone(),
            item_id: ring.clone(),
            from: ContainerRef::Pack,
            to: ContainerRef::Storage(cart.clone()),
        };
        let out = run(&cmd, &rules).unwrap();
        assert!(out.ends_with("(attunement ended)"));

        let saved = store::load_inventory(&path).unwrap();
        assert!(saved.items.is_empty());
        let moved = &saved.storage(&cart).unwrap().inventory.items[0];
        assert!(!moved.is_attuned);
    }

    #[test]
    fn test_transfer_unknown_item_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _, cart) = write_character(dir.path());

        let cmd = Command::Transfer {
            file: path,
            item_id: "nope".into(),
            from: ContainerRef::Pack,
            to: ContainerRef::Storage(cart),
        };
        assert!(run(&cmd, &RuleTables::default()).is_err());
    }

    #[test]
    fn test_search_and_wealth_output() {
        let dir = tempfile::tempdir().unwrap();
        let (path, ring, _) = write_character(dir.path());
        let rules = RuleTables::default();

        let out = run(
            &Command::Search {
                file: path.clone(),
                query: "ring".into(),
            },
            &rules,
        )
        .unwrap();
        assert_eq!(out, format!("Ring of Warmth x1 [{}] in Player Pack", ring));

        let out = run(&Command::Wealth { file: path }, &rules).unwrap();
        assert!(out.ends_with("Total:    1 Platinum, 2 Gold, 3 Silver"));
    }

    #[test]
    fn test_summary_output() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _, _) = write_character(dir.path());

        let out = run(&Command::Summary { file: path }, &RuleTables::default()).unwrap();
        assert!(out.starts_with("Standard Pack (standard-pack)"));
        assert!(out.contains("Attuned:    1/3"));
        assert!(out.contains("[near] Mule Cart"));
        assert!(out.ends_with("Overall: ok"));
    }
}
