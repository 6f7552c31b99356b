//! Command line grammar and dispatch.
use std::fmt::Write;

use anyhow::{Context, Result, bail};
use encounter_core::{CombatantId, Condition, InitiativeRoll};
use encounter_runtime::EncounterSession;

use crate::render;

pub const USAGE: &str = "\
usage: encounter <command>

  status                    show the turn order
  start                     start combat from the top of the order
  next                      pass the turn
  end                       end combat, keep the combatants
  clear                     remove everyone
  roll [id]                 roll initiative for one combatant or everyone
  add <monster_id>          add a monster from the bestiary
  join <character_id>       add a character from the roster
  remove <id>               remove a combatant
  init <id> <value>         set initiative by hand
  hp <id> <value>           set hit points
  damage <id> <amount>      subtract hit points
  heal <id> <amount>        add hit points
  condition <id> <name>     toggle a condition
  active <id>               give the turn to a combatant
  monsters                  list bestiary ids
";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Status,
    Start,
    Next,
    End,
    Clear,
    Roll(Option<CombatantId>),
    Add(String),
    Join(String),
    Remove(CombatantId),
    Initiative(CombatantId, f64),
    Hp(CombatantId, i32),
    Damage(CombatantId, i32),
    Heal(CombatantId, i32),
    Condition(CombatantId, Condition),
    Active(CombatantId),
    Monsters,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match args.as_slice() {
            [] | ["status"] => Self::Status,
            ["start"] => Self::Start,
            ["next"] => Self::Next,
            ["end"] => Self::End,
            ["clear"] => Self::Clear,
            ["roll"] => Self::Roll(None),
            ["roll", id] => Self::Roll(Some(parse_id(id)?)),
            ["add", monster] => Self::Add((*monster).to_owned()),
            ["join", character] => Self::Join((*character).to_owned()),
            ["remove", id] => Self::Remove(parse_id(id)?),
            ["init", id, value] => Self::Initiative(parse_id(id)?, parse_number(value)?),
            ["hp", id, value] => Self::Hp(parse_id(id)?, parse_number(value)?),
            ["damage", id, amount] => Self::Damage(parse_id(id)?, parse_number(amount)?),
            ["heal", id, amount] => Self::Heal(parse_id(id)?, parse_number(amount)?),
            ["condition", id, name] => Self::Condition(
                parse_id(id)?,
                name.parse::<Condition>()
                    .with_context(|| format!("unknown condition '{name}'"))?,
            ),
            ["active", id] => Self::Active(parse_id(id)?),
            ["monsters"] => Self::Monsters,
            _ => bail!("unrecognized command\n\n{USAGE}"),
        };
        Ok(command)
    }

    /// Runs the command and returns what to print.
    pub fn run(&self, session: &EncounterSession) -> Result<String> {
        tracing::debug!("Running {:?}", self);
        let mut out = String::new();

        let order = match self {
            Self::Status => session.turn_order()?,
            Self::Start => session.start_combat()?,
            Self::Next => session.next_turn()?,
            Self::End => session.end_combat()?,
            Self::Clear => session.clear_combat()?,
            Self::Roll(Some(id)) => {
                let roll = session.roll_initiative(*id)?;
                writeln!(out, "{}", describe_roll(*id, &roll))?;
                session.turn_order()?
            }
            Self::Roll(None) => {
                for (id, roll) in session.roll_all_initiatives()? {
                    writeln!(out, "{}", describe_roll(id, &roll))?;
                }
                session.turn_order()?
            }
            Self::Add(monster) => {
                let id = session.add_monster(monster)?;
                writeln!(out, "added {id}")?;
                session.turn_order()?
            }
            Self::Join(character) => {
                let id = session.add_character(character)?;
                writeln!(out, "added {id}")?;
                session.turn_order()?
            }
            Self::Remove(id) => session.remove_combatant(*id)?,
            Self::Initiative(id, value) => session.set_manual_initiative(*id, *value)?,
            Self::Hp(id, value) => session.update_hp(*id, *value)?,
            Self::Damage(id, amount) => session.apply_damage(*id, *amount)?,
            Self::Heal(id, amount) => session.heal(*id, *amount)?,
            Self::Condition(id, condition) => session.toggle_condition(*id, *condition)?,
            Self::Active(id) => session.set_active(*id)?,
            Self::Monsters => {
                for id in session.bestiary().all_ids() {
                    writeln!(out, "{id}")?;
                }
                return Ok(out);
            }
        };

        out.push_str(&render::turn_order(session.round()?, &order));
        Ok(out)
    }
}

fn describe_roll(id: CombatantId, roll: &InitiativeRoll) -> String {
    format!("{id} rolled {} {:+} = {}", roll.roll, roll.modifier, roll.total)
}

fn parse_id(raw: &str) -> Result<CombatantId> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    let id = digits
        .parse::<u32>()
        .with_context(|| format!("invalid combatant id '{raw}'"))?;
    Ok(CombatantId(id))
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("invalid number '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command> {
        let args: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        Command::parse(&args)
    }

    #[test]
    fn parses_turn_commands() {
        assert_eq!(parse("").unwrap(), Command::Status);
        assert_eq!(parse("next").unwrap(), Command::Next);
        assert_eq!(parse("roll").unwrap(), Command::Roll(None));
        assert_eq!(parse("roll #3").unwrap(), Command::Roll(Some(CombatantId(3))));
        assert_eq!(parse("add goblin").unwrap(), Command::Add("goblin".into()));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            parse("init 2 14.5").unwrap(),
            Command::Initiative(CombatantId(2), 14.5)
        );
        assert_eq!(parse("damage 4 -3").unwrap(), Command::Damage(CombatantId(4), -3));
        assert_eq!(
            parse("condition 1 Prone").unwrap(),
            Command::Condition(CombatantId(1), Condition::Prone)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("add").is_err());
        assert!(parse("hp x 3").is_err());
        assert!(parse("condition 1 on_fire").is_err());
        assert!(parse("dance").is_err());
    }
}
