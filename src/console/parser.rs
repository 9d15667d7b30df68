//! Console command parsing.
//!
//! Commands are whitespace separated; wrap an argument in double quotes to
//! keep spaces (`kiosk add reagent "Mist Wood" 120`).

use crate::error::{Error, Result};
use crate::utils::parse_raid_time;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    RaidShow {
        guild_id: String,
    },
    RaidAddGate {
        guild_id: String,
        date: String,
    },
    RaidJoin {
        guild_id: String,
        gate: usize,
        user_id: String,
        position: String,
        backup: bool,
    },
    RaidLeave {
        guild_id: String,
        gate: usize,
        user_id: String,
    },
    RaidStatus {
        guild_id: String,
        gate: usize,
        status: i64,
    },
    KioskAdd {
        item_type: String,
        name: String,
        price: i64,
        stock: i64,
    },
    KioskGet {
        name: String,
    },
    KioskRemove {
        item_type: String,
        name: String,
    },
    KioskShow,
    KioskUpdated,
}

pub const USAGE: &str = "\
Commands:
  raid show <guild>
  raid add-gate <guild> <date-key | MM/DD/YYYY hh:mm:ss PM ZONE>
  raid join <guild> <gate 1-3> <user> <position> [backup]
  raid leave <guild> <gate 1-3> <user>
  raid status <guild> <gate 1-3> <colour, e.g. 0xFF0000>
  kiosk add <type> <name> <price> [stock]
  kiosk get <name>
  kiosk remove <type> <name>
  kiosk show
  kiosk updated
  help
  quit";

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let tokens = tokenize(line)?;
        let Some((head, rest)) = tokens.split_first() else {
            return Ok(None);
        };

        let cmd = match head.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "raid" => parse_raid(rest)?,
            "kiosk" => parse_kiosk(rest)?,
            other => return Err(Error::invalid(format!("unknown command: {other}"))),
        };

        Ok(Some(cmd))
    }
}

fn parse_raid(args: &[String]) -> Result<Command> {
    let (sub, args) = args
        .split_first()
        .ok_or_else(|| Error::invalid("usage: raid <show|add-gate|join|leave|status> ..."))?;

    match sub.as_str() {
        "show" => {
            let [guild_id] = exact::<1>(args, "raid show <guild>")?;
            Ok(Command::RaidShow { guild_id })
        }
        "add-gate" => {
            let (guild_id, when) = args
                .split_first()
                .filter(|(_, when)| !when.is_empty())
                .ok_or_else(|| Error::invalid("usage: raid add-gate <guild> <date>"))?;
            let date = match when {
                [key] => key.clone(),
                _ => parse_raid_time(&when.join(" "))?,
            };
            Ok(Command::RaidAddGate {
                guild_id: guild_id.clone(),
                date,
            })
        }
        "join" => {
            let usage = "raid join <guild> <gate> <user> <position> [backup]";
            let (required, backup) = match args {
                [a, b, c, d] => ([a, b, c, d], false),
                [a, b, c, d, flag] if flag.eq_ignore_ascii_case("backup") => ([a, b, c, d], true),
                _ => return Err(Error::invalid(format!("usage: {usage}"))),
            };
            let [guild_id, gate, user_id, position] = required.map(String::clone);
            Ok(Command::RaidJoin {
                guild_id,
                gate: parse_gate(&gate)?,
                user_id,
                position,
                backup,
            })
        }
        "leave" => {
            let [guild_id, gate, user_id] = exact::<3>(args, "raid leave <guild> <gate> <user>")?;
            Ok(Command::RaidLeave {
                guild_id,
                gate: parse_gate(&gate)?,
                user_id,
            })
        }
        "status" => {
            let [guild_id, gate, status] = exact::<3>(args, "raid status <guild> <gate> <colour>")?;
            Ok(Command::RaidStatus {
                guild_id,
                gate: parse_gate(&gate)?,
                status: parse_status(&status)?,
            })
        }
        other => Err(Error::invalid(format!("unknown raid command: {other}"))),
    }
}

fn parse_kiosk(args: &[String]) -> Result<Command> {
    let (sub, args) = args
        .split_first()
        .ok_or_else(|| Error::invalid("usage: kiosk <add|get|remove|show|updated> ..."))?;

    match sub.as_str() {
        "add" => {
            let usage = "kiosk add <type> <name> <price> [stock]";
            let (item_type, name, price, stock) = match args {
                [t, n, p] => (t, n, p, None),
                [t, n, p, s] => (t, n, p, Some(s)),
                _ => return Err(Error::invalid(format!("usage: {usage}"))),
            };
            Ok(Command::KioskAdd {
                item_type: item_type.clone(),
                name: name.clone(),
                price: parse_int(price, "price")?,
                stock: stock.map(|s| parse_stock(s)).transpose()?.unwrap_or(0),
            })
        }
        "get" => {
            let [name] = exact::<1>(args, "kiosk get <name>")?;
            Ok(Command::KioskGet { name })
        }
        "remove" => {
            let [item_type, name] = exact::<2>(args, "kiosk remove <type> <name>")?;
            Ok(Command::KioskRemove { item_type, name })
        }
        "show" => Ok(Command::KioskShow),
        "updated" => Ok(Command::KioskUpdated),
        other => Err(Error::invalid(format!("unknown kiosk command: {other}"))),
    }
}

/// Require exactly `N` arguments.
fn exact<const N: usize>(args: &[String], usage: &str) -> Result<[String; N]> {
    <[String; N]>::try_from(args.to_vec()).map_err(|_| Error::invalid(format!("usage: {usage}")))
}

fn parse_gate(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| Error::invalid(format!("gate must be a number, got {raw}")))
}

fn parse_int(raw: &str, what: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::invalid(format!("{what} must be a whole number, got {raw}")))
}

fn parse_stock(raw: &str) -> Result<i64> {
    let stock = parse_int(raw, "stock")?;
    if stock < 0 {
        return Err(Error::invalid(format!("stock must not be negative, got {raw}")));
    }
    Ok(stock)
}

/// Accepts `0xRRGGBB`, `#RRGGBB` or a decimal number.
fn parse_status(raw: &str) -> Result<i64> {
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix('#')) {
        i64::from_str_radix(hex, 16)
    } else {
        raw.parse()
    };
    parsed.map_err(|_| Error::invalid(format!("invalid status colour: {raw}")))
}

/// Split on whitespace, honouring double quotes.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::invalid("unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"kiosk add reagent "Mist Wood" 120"#).unwrap(),
            vec!["kiosk", "add", "reagent", "Mist Wood", "120"]
        );
        assert_eq!(tokenize(r#"a "" b"#).unwrap(), vec!["a", "", "b"]);
        assert!(tokenize(r#"kiosk get "Mist"#).is_err());
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_raid_commands() {
        assert_eq!(
            parse("raid add-gate g1 2024-01-01"),
            Command::RaidAddGate {
                guild_id: "g1".into(),
                date: "2024-01-01".into()
            }
        );
        assert_eq!(
            parse("raid add-gate g1 01/02/2006 03:04:05 PM MST"),
            Command::RaidAddGate {
                guild_id: "g1".into(),
                date: "1136239445".into()
            }
        );
        assert_eq!(
            parse("raid join g1 2 u1 healer backup"),
            Command::RaidJoin {
                guild_id: "g1".into(),
                gate: 2,
                user_id: "u1".into(),
                position: "healer".into(),
                backup: true
            }
        );
        assert_eq!(
            parse("raid status g1 1 0xFF0000"),
            Command::RaidStatus {
                guild_id: "g1".into(),
                gate: 1,
                status: 0xFF0000
            }
        );
        assert_eq!(parse("RAID show g1"), Command::RaidShow { guild_id: "g1".into() });
    }

    #[test]
    fn test_parse_kiosk_commands() {
        assert_eq!(
            parse(r#"kiosk add reagent "Mist Wood" 120"#),
            Command::KioskAdd {
                item_type: "reagent".into(),
                name: "Mist Wood".into(),
                price: 120,
                stock: 0
            }
        );
        assert_eq!(
            parse("kiosk remove gear Hat"),
            Command::KioskRemove {
                item_type: "gear".into(),
                name: "Hat".into()
            }
        );
        assert_eq!(parse("kiosk updated"), Command::KioskUpdated);
    }

    #[test]
    fn test_parse_errors() {
        for line in [
            "dance",
            "raid",
            "raid show",
            "raid join g1 x u1 healer",
            "raid join g1 1 u1 healer maybe",
            "raid add-gate g1",
            "raid add-gate g1 tomorrow at noon",
            "kiosk add reagent Ore cheap",
            "kiosk add reagent Ore 10 -5",
            "kiosk fly",
        ] {
            let err = Command::parse(line).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "line: {line}");
        }
    }

    #[test]
    fn test_parse_status_forms() {
        assert_eq!(parse_status("#FFD700").unwrap(), 0xFFD700);
        assert_eq!(parse_status("255").unwrap(), 255);
        assert!(parse_status("gold").is_err());
    }
}
