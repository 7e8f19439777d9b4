//! Command line selection of an action kind.
//!
//! [`ActionSelection`] is a [`clap::Subcommand`] with one subcommand per entry
//! of the [`ActionRegistry`], each carrying that kind's flags. The verb it is
//! used under only contributes the usage text.

use std::marker::PhantomData;

use clap::{ArgMatches, Command, FromArgMatches, Subcommand, error::ErrorKind};

use crate::{action::Action, registry::ActionRegistry};

/// A command that takes an action kind as its subcommand
pub trait ActionVerb {
    /// Usage text of the subcommand for the kind with the given label
    fn about(label: &str) -> String;
}

/// The action built from the selected kind's subcommand and its flags
#[derive(Debug, Clone)]
pub struct ActionSelection<V> {
    action: Action,
    verb: PhantomData<V>,
}

impl<V> ActionSelection<V> {
    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn into_action(self) -> Action {
        self.action
    }
}

impl<V: ActionVerb> FromArgMatches for ActionSelection<V> {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(clap::Error::raw(
                ErrorKind::MissingSubcommand,
                "an action type is required",
            ));
        };
        let entry = ActionRegistry::builtin()
            .entry(name)
            .map_err(|e| clap::Error::raw(ErrorKind::InvalidSubcommand, e))?;
        Ok(Self {
            action: (entry.from_arg_matches)(sub_matches)?,
            verb: PhantomData,
        })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl<V: ActionVerb> Subcommand for ActionSelection<V> {
    fn augment_subcommands(cmd: Command) -> Command {
        ActionRegistry::builtin().entries().fold(cmd, |cmd, entry| {
            let sub = (entry.augment_args)(Command::new(entry.name)).about(V::about(entry.label));
            cmd.subcommand(sub)
        })
    }

    fn augment_subcommands_for_update(cmd: Command) -> Command {
        Self::augment_subcommands(cmd)
    }

    fn has_subcommand(name: &str) -> bool {
        ActionRegistry::builtin().entry(name).is_ok()
    }
}
