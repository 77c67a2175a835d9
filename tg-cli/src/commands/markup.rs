//! Reply markup flags and the offline `markup` command.

use clap::{Args, Subcommand};

use tg_api::{ForceReply, ReplyKeyboardHide, ReplyKeyboardMarkup, ReplyMarkup};
use tg_core::error::{TgError, TgResult};

/// Reply markup flags shared by the sending commands.
#[derive(Args, Debug, Default)]
pub struct MarkupArgs {
    /// Custom keyboard row, buttons separated by commas. Repeat for more rows.
    #[arg(long = "keyboard", value_name = "ROW")]
    pub rows: Vec<String>,
    /// Fit the custom keyboard to its buttons.
    #[arg(long)]
    pub resize: bool,
    /// Hide the custom keyboard after one use.
    #[arg(long)]
    pub one_time: bool,
    /// Hide the current custom keyboard.
    #[arg(long)]
    pub hide_keyboard: bool,
    /// Ask the client to show a reply interface.
    #[arg(long)]
    pub force_reply: bool,
    /// Only show the markup to mentioned users.
    #[arg(long)]
    pub selective: bool,
}

impl MarkupArgs {
    /// At most one kind of markup may be requested.
    pub fn build(&self) -> TgResult<Option<ReplyMarkup>> {
        let requested = [!self.rows.is_empty(), self.hide_keyboard, self.force_reply]
            .iter()
            .filter(|set| **set)
            .count();
        if requested > 1 {
            return Err(TgError::Config(
                "--keyboard, --hide-keyboard and --force-reply are mutually exclusive".into(),
            ));
        }

        if self.hide_keyboard {
            return Ok(Some(ReplyKeyboardHide::new(self.selective).into()));
        }
        if self.force_reply {
            return Ok(Some(ForceReply::new(self.selective).into()));
        }
        if self.rows.is_empty() {
            return Ok(None);
        }

        let keyboard = ReplyKeyboardMarkup::new(parse_rows(&self.rows))
            .resize(self.resize)
            .one_time(self.one_time)
            .selective(self.selective);
        Ok(Some(keyboard.into()))
    }
}

fn parse_rows(rows: &[String]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            row.split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[derive(Subcommand)]
pub enum MarkupAction {
    /// Markup that hides the custom keyboard.
    Hide {
        #[arg(long)]
        selective: bool,
    },
    /// Markup that forces a reply.
    ForceReply {
        #[arg(long)]
        selective: bool,
    },
    /// Custom keyboard markup.
    Keyboard {
        /// Rows, buttons separated by commas.
        #[arg(required = true)]
        rows: Vec<String>,
        #[arg(long)]
        resize: bool,
        #[arg(long)]
        one_time: bool,
        #[arg(long)]
        selective: bool,
    },
}

pub fn run(action: MarkupAction) -> TgResult<()> {
    let markup: ReplyMarkup = match action {
        MarkupAction::Hide { selective } => ReplyKeyboardHide::new(selective).into(),
        MarkupAction::ForceReply { selective } => ForceReply::new(selective).into(),
        MarkupAction::Keyboard { rows, resize, one_time, selective } => {
            ReplyKeyboardMarkup::new(parse_rows(&rows))
                .resize(resize)
                .one_time(one_time)
                .selective(selective)
                .into()
        }
    };
    println!("{}", markup.to_json());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_no_markup() {
        assert!(MarkupArgs::default().build().unwrap().is_none());
    }

    #[test]
    fn test_keyboard_rows() {
        let args = MarkupArgs {
            rows: vec!["yes, no".into(), "later".into()],
            one_time: true,
            ..MarkupArgs::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&args.build().unwrap().unwrap().to_json()).unwrap();
        assert_eq!(json["keyboard"], serde_json::json!([["yes", "no"], ["later"]]));
        assert_eq!(json["one_time_keyboard"], true);
    }

    #[test]
    fn test_hide_keyboard() {
        let args = MarkupArgs {
            hide_keyboard: true,
            ..MarkupArgs::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&args.build().unwrap().unwrap().to_json()).unwrap();
        assert_eq!(json["hide_keyboard"], true);
    }

    #[test]
    fn test_conflicting_flags() {
        let args = MarkupArgs {
            hide_keyboard: true,
            force_reply: true,
            ..MarkupArgs::default()
        };
        assert!(args.build().is_err());
    }
}
