//! Splits flags clap does not know from the ones it does.
//!
//! Axis limitations are open-ended (`--wght 400:700`, `--opsz=drop`), so they
//! cannot be declared up front. Everything unknown is pulled out here and
//! handed on as key/value pairs.

use std::{collections::HashSet, ffi::OsString};

use clap::CommandFactory;
use serde_json::Value;

use crate::cli::Cli;

/// Arguments after splitting.
#[derive(Debug, Default, PartialEq)]
pub struct SplitArgs {
    /// Program name, known flags and positionals, in order and as given.
    pub known: Vec<OsString>,
    /// Unknown long flags as `(name, value)`.
    pub leftovers: Vec<(String, Value)>,
}

/// Long flag names (and aliases) that [`Cli`] declares.
pub fn known_long_flags() -> HashSet<String> {
    let command = Cli::command();
    let mut names: HashSet<String> = ["help", "version"].into_iter().map(String::from).collect();
    for arg in command.get_arguments() {
        names.extend(arg.get_long().map(String::from));
        if let Some(aliases) = arg.get_all_aliases() {
            names.extend(aliases.into_iter().map(String::from));
        }
    }
    names
}

/// Pull unknown long flags out of `args`.
///
/// `--key=value` gives `(key, "value")`. `--key value` takes the next token
/// when it does not start with `-`, otherwise `--key` gives `(key, true)`.
/// `--no-key` gives `(key, false)`. Everything after `--` is left alone, as is
/// any token that is not valid UTF-8.
pub fn split_args<I, F>(args: I, is_known: F) -> SplitArgs
where
    I: IntoIterator<Item = OsString>,
    F: Fn(&str) -> bool,
{
    let mut split = SplitArgs::default();
    let mut args = args.into_iter().peekable();

    if let Some(program) = args.next() {
        split.known.push(program);
    }

    while let Some(arg) = args.next() {
        if arg == "--" {
            split.known.push(arg);
            split.known.extend(args);
            break;
        }

        let text = arg.to_str().map(str::to_owned);
        let Some(flag) = text
            .as_deref()
            .and_then(|text| text.strip_prefix("--"))
            .filter(|flag| !flag.is_empty())
        else {
            split.known.push(arg);
            continue;
        };

        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };
        if is_known(name) {
            split.known.push(arg);
            continue;
        }

        let pair = match (inline, name.strip_prefix("no-")) {
            (Some(value), _) => (name.to_string(), Value::from(value)),
            (None, Some(negated)) => (negated.to_string(), Value::Bool(false)),
            (None, None) => {
                let value = args.next_if(|next| next.to_str().is_some_and(|next| !next.starts_with('-')));
                match value {
                    Some(value) => (name.to_string(), Value::from(value.to_string_lossy())),
                    None => (name.to_string(), Value::Bool(true)),
                }
            }
        };
        split.leftovers.push(pair);
    }

    split
}
