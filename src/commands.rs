//! Line commands typed at the terminal.

use anyhow::{Context, bail};
use medvida_catalog::Specialty;
use medvida_core::PageId;

pub const HELP: &str = "\
commands:
  go <page>          landing | specialties | plans | doctor-selection | doctor-profile | checkout
  home               back to the landing page
  book-now | plans   landing buttons
  how                toggle \"how it works\" on the landing page
  specialty <name>   choose a specialty
  profile <id>       open a doctor's profile
  book <id>          book a doctor's next free slot
  day <n>            choose a calendar day on the profile
  slot <hh:mm>       choose a time slot on the profile
  pix | card <num>   payment method at checkout
  confirm            confirm the booking step on screen
  scroll <y>         scroll the page (landing menu)
  help | quit";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Go(PageId),
    Home,
    BookNow,
    SeePlans,
    HowItWorks,
    Specialty(Specialty),
    Profile(String),
    Book(String),
    Day(u32),
    Slot(String),
    Pix,
    Card(String),
    Confirm,
    Scroll(f64),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word.to_lowercase().as_str(), rest) {
        ("go", page) => Command::Go(page.parse()?),
        ("home", "") => Command::Home,
        ("book-now", "") => Command::BookNow,
        ("plans", "") => Command::SeePlans,
        ("how", "") => Command::HowItWorks,
        ("specialty", name) if !name.is_empty() => Command::Specialty(name.parse()?),
        ("profile", id) if !id.is_empty() => Command::Profile(id.to_string()),
        ("book", id) if !id.is_empty() => Command::Book(id.to_string()),
        ("day", n) => Command::Day(
            n.parse()
                .with_context(|| format!("day must be a number, got {n:?}"))?,
        ),
        ("slot", time) if !time.is_empty() => Command::Slot(time.to_string()),
        ("pix", "") => Command::Pix,
        ("card", number) => Command::Card(number.to_string()),
        ("confirm", "") => Command::Confirm,
        ("scroll", y) => Command::Scroll(
            y.parse()
                .with_context(|| format!("scroll needs a position, got {y:?}"))?,
        ),
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ => bail!("unrecognised command {line:?}, type `help`"),
    };
    Ok(Some(command))
}
